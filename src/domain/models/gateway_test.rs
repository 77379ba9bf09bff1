use super::ChatSession;
use super::GatewayName;
use super::GatewayRole;
use super::GatewayTurn;

#[test]
fn it_parses_gateway_names() {
    assert_eq!(
        GatewayName::parse("gemini".to_string()),
        Some(GatewayName::Gemini)
    );
    assert_eq!(GatewayName::parse("Gemini".to_string()), None);
    assert_eq!(GatewayName::parse("".to_string()), None);
}

#[test]
fn it_serializes_roles_in_lowercase() {
    assert_eq!(serde_json::to_string(&GatewayRole::Model).unwrap(), "\"model\"");
    assert_eq!(GatewayRole::User.to_string(), "user");
}

#[test]
fn it_creates_chat_sessions() {
    let chat = ChatSession::new(
        "model-1",
        "Be nice.",
        vec![GatewayTurn {
            role: GatewayRole::User,
            text: "hi".to_string(),
        }],
    );

    assert_eq!(chat.model, "model-1");
    assert_eq!(chat.system_instruction, "Be nice.");
    assert_eq!(chat.history.len(), 1);
}
