use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;

use anyhow::anyhow;
use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::ChatSession;
use crate::domain::models::Gateway;
use crate::domain::models::GatewayName;
use crate::domain::models::GatewayResponse;
use crate::domain::models::GenerateRequest;

#[derive(Clone, Debug, PartialEq)]
pub enum RecordedCall {
    Generate(GenerateRequest),
    SendMessage(ChatSession, String),
}

/// Scripted gateway for tests. Each call pops the next reply, where `Err`
/// simulates a transport failure. Clones share the same script and call log.
#[derive(Clone, Default)]
pub struct MockGateway {
    replies: Arc<Mutex<VecDeque<Result<String, String>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockGateway {
    pub fn new(replies: Vec<Result<&str, &str>>) -> MockGateway {
        let replies = replies
            .into_iter()
            .map(|reply| {
                return reply
                    .map(|text| return text.to_string())
                    .map_err(|err| return err.to_string());
            })
            .collect::<VecDeque<Result<String, String>>>();

        return MockGateway {
            replies: Arc::new(Mutex::new(replies)),
            calls: Arc::new(Mutex::new(vec![])),
        };
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        return self.calls.lock().unwrap().clone();
    }

    fn next_reply(&self, call: RecordedCall) -> Result<GatewayResponse> {
        self.calls.lock().unwrap().push(call);
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => return Ok(GatewayResponse { text }),
            Some(Err(err)) => return Err(anyhow!(err)),
            None => return Err(anyhow!("MockGateway ran out of replies")),
        }
    }
}

#[async_trait]
impl Gateway for MockGateway {
    fn name(&self) -> GatewayName {
        return GatewayName::Gemini;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn list_models(&self) -> Result<Vec<String>> {
        return Ok(vec!["model-1".to_string()]);
    }

    #[allow(clippy::implicit_return)]
    async fn generate(&self, request: GenerateRequest) -> Result<GatewayResponse> {
        return self.next_reply(RecordedCall::Generate(request));
    }

    #[allow(clippy::implicit_return)]
    async fn send_message(&self, chat: &ChatSession, text: &str) -> Result<GatewayResponse> {
        return self.next_reply(RecordedCall::SendMessage(chat.clone(), text.to_string()));
    }
}
