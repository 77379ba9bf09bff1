use super::ChatMessage;
use super::ChatRole;
use super::ChatTranscript;
use crate::domain::models::GatewayRole;
use crate::domain::models::GatewayTurn;

#[test]
fn it_maps_assistant_to_model() {
    let mut transcript = ChatTranscript::default();
    transcript.push(ChatMessage::new(ChatRole::User, "hi"));
    transcript.push(ChatMessage::new(ChatRole::Assistant, "hello"));

    assert_eq!(
        transcript.to_gateway_history(),
        vec![
            GatewayTurn {
                role: GatewayRole::User,
                text: "hi".to_string(),
            },
            GatewayTurn {
                role: GatewayRole::Model,
                text: "hello".to_string(),
            },
        ]
    );
}

#[test]
fn it_keeps_messages_in_order() {
    let mut transcript = ChatTranscript::default();
    transcript.push(ChatMessage::new(ChatRole::User, "one"));
    transcript.push(ChatMessage::new(ChatRole::Assistant, "two"));
    transcript.push(ChatMessage::new(ChatRole::User, "three"));

    let contents = transcript
        .messages()
        .iter()
        .map(|message| return message.content.as_str())
        .collect::<Vec<&str>>();

    assert_eq!(contents, vec!["one", "two", "three"]);
}

#[test]
fn it_clears() {
    let mut transcript = ChatTranscript::default();
    transcript.push(ChatMessage::new(ChatRole::User, "hi"));
    assert_eq!(transcript.len(), 1);

    transcript.clear();
    assert!(transcript.is_empty());
    assert!(transcript.to_gateway_history().is_empty());
}
