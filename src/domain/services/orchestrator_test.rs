use anyhow::bail;
use anyhow::Result;
use test_utils::code_fixture;
use test_utils::resume_fixture;
use test_utils::resume_text_fixture;

use super::Orchestrator;
use crate::domain::models::AnalysisError;
use crate::domain::models::ChatMessage;
use crate::domain::models::ChatRole;
use crate::domain::models::ChatTranscript;
use crate::domain::models::CodeAnalysisCategory;
use crate::domain::models::GatewayRole;
use crate::domain::models::GatewayTurn;
use crate::domain::models::Language;
use crate::domain::models::ResumeAnalysisResult;
use crate::infrastructure::gateways::mock::MockGateway;
use crate::infrastructure::gateways::mock::RecordedCall;

fn orchestrator(gateway: &MockGateway) -> Orchestrator {
    return Orchestrator::new(Box::new(gateway.clone()), "fast-model", "smart-model");
}

mod evaluate_resume {
    use super::*;

    #[tokio::test]
    async fn it_sends_one_request_with_schema() -> Result<()> {
        let gateway = MockGateway::new(vec![Ok(resume_fixture())]);
        let res = orchestrator(&gateway)
            .evaluate_resume(resume_text_fixture(), "Backend Engineer")
            .await?;

        assert_eq!(res.score, 7.0);

        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        match &calls[0] {
            RecordedCall::Generate(req) => {
                assert_eq!(req.model, "fast-model");
                assert_eq!(req.response_schema, Some(ResumeAnalysisResult::schema()));
                assert!(req.prompt.contains(resume_text_fixture()));
                assert!(req.prompt.contains("Backend Engineer"));
            }
            _ => bail!("Wrong call"),
        }

        return Ok(());
    }

    #[tokio::test]
    async fn it_rejects_missing_fields() {
        let body = resume_fixture().replace(",\"summary\":\"Solid.\"", "");
        let gateway = MockGateway::new(vec![Ok(body.as_str())]);
        let res = orchestrator(&gateway)
            .evaluate_resume(resume_text_fixture(), "")
            .await;

        assert!(matches!(res, Err(AnalysisError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn it_treats_empty_responses_as_malformed() {
        let gateway = MockGateway::new(vec![Ok("")]);
        let res = orchestrator(&gateway)
            .evaluate_resume(resume_text_fixture(), "")
            .await;

        assert!(matches!(res, Err(AnalysisError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn it_surfaces_gateway_errors_once() {
        let gateway = MockGateway::new(vec![Err("quota exhausted"), Ok(resume_fixture())]);
        let res = orchestrator(&gateway)
            .evaluate_resume(resume_text_fixture(), "")
            .await;

        assert_eq!(
            res,
            Err(AnalysisError::Gateway("quota exhausted".to_string()))
        );
        assert_eq!(gateway.calls().len(), 1);
    }
}

mod analyze_code {
    use super::*;

    #[tokio::test]
    async fn it_returns_analysis() -> Result<()> {
        let gateway = MockGateway::new(vec![Ok("It averages numbers.")]);
        let res = orchestrator(&gateway)
            .analyze_code(code_fixture(), Language::Python, CodeAnalysisCategory::Explanation)
            .await?;

        assert_eq!(res, "It averages numbers.");
        match &gateway.calls()[0] {
            RecordedCall::Generate(req) => {
                assert_eq!(req.model, "smart-model");
                assert!(req.response_schema.is_none());
                assert!(req.prompt.contains("```python\n"));
                assert!(req.prompt.contains(code_fixture()));
                assert!(req
                    .system_instruction
                    .contains(CodeAnalysisCategory::Explanation.instruction()));
            }
            _ => bail!("Wrong call"),
        }

        return Ok(());
    }

    #[tokio::test]
    async fn it_falls_back_on_empty_success() -> Result<()> {
        let gateway = MockGateway::new(vec![Ok("")]);
        let res = orchestrator(&gateway)
            .analyze_code(code_fixture(), Language::Python, CodeAnalysisCategory::Bugs)
            .await?;

        assert_eq!(res, "No analysis could be generated.");
        return Ok(());
    }

    #[tokio::test]
    async fn it_falls_back_on_whitespace_reply() -> Result<()> {
        let gateway = MockGateway::new(vec![Ok(" \n\t ")]);
        let res = orchestrator(&gateway)
            .analyze_code(code_fixture(), Language::Python, CodeAnalysisCategory::Bugs)
            .await?;

        assert_eq!(res, "No analysis could be generated.");
        return Ok(());
    }

    #[tokio::test]
    async fn it_reruns_on_every_call() -> Result<()> {
        let gateway = MockGateway::new(vec![Ok("first"), Ok("second")]);
        let orchestrator = orchestrator(&gateway);

        let first = orchestrator
            .analyze_code(code_fixture(), Language::Python, CodeAnalysisCategory::Tests)
            .await?;
        let second = orchestrator
            .analyze_code(code_fixture(), Language::Python, CodeAnalysisCategory::Tests)
            .await?;

        assert_eq!(first, "first");
        assert_eq!(second, "second");
        assert_eq!(gateway.calls().len(), 2);
        return Ok(());
    }

    #[tokio::test]
    async fn it_surfaces_gateway_errors() {
        let gateway = MockGateway::new(vec![Err("connection reset")]);
        let res = orchestrator(&gateway)
            .analyze_code(code_fixture(), Language::Python, CodeAnalysisCategory::Bugs)
            .await;

        assert!(matches!(res, Err(AnalysisError::Gateway(_))));
    }
}

mod send_turn {
    use super::*;

    #[tokio::test]
    async fn it_translates_roles_and_sends_new_turn_separately() -> Result<()> {
        let gateway = MockGateway::new(vec![Ok("Because of the division.")]);
        let mut history = ChatTranscript::default();
        history.push(ChatMessage::new(ChatRole::User, "hi"));
        history.push(ChatMessage::new(ChatRole::Assistant, "hello"));

        let res = orchestrator(&gateway)
            .send_turn(code_fixture(), Language::Python, &history, "why?")
            .await?;

        assert_eq!(res, "Because of the division.");
        assert_eq!(history.len(), 2);

        match &gateway.calls()[0] {
            RecordedCall::SendMessage(chat, text) => {
                assert_eq!(text, "why?");
                assert_eq!(chat.model, "smart-model");
                assert!(chat.system_instruction.contains(code_fixture()));
                assert_eq!(
                    chat.history,
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
            _ => bail!("Wrong call"),
        }

        return Ok(());
    }

    #[tokio::test]
    async fn it_falls_back_on_empty_success() -> Result<()> {
        let gateway = MockGateway::new(vec![Ok("   ")]);
        let res = orchestrator(&gateway)
            .send_turn(
                code_fixture(),
                Language::Python,
                &ChatTranscript::default(),
                "hi",
            )
            .await?;

        assert_eq!(
            res,
            "I'm having trouble responding right now. Please try again."
        );
        return Ok(());
    }

    #[tokio::test]
    async fn it_surfaces_gateway_errors() {
        let gateway = MockGateway::new(vec![Err("401 unauthorized")]);
        let res = orchestrator(&gateway)
            .send_turn(
                code_fixture(),
                Language::Python,
                &ChatTranscript::default(),
                "hi",
            )
            .await;

        assert!(matches!(res, Err(AnalysisError::Gateway(_))));
    }
}
