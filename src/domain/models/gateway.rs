#[cfg(test)]
#[path = "gateway_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

#[derive(Clone, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum GatewayName {
    Gemini,
}

impl GatewayName {
    pub fn parse(text: String) -> Option<GatewayName> {
        return GatewayName::iter().find(|e| return e.to_string() == text);
    }
}

/// Role vocabulary understood by the gateway. Application level chat roles
/// are translated into these before a conversation is sent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GatewayRole {
    User,
    Model,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayTurn {
    pub role: GatewayRole,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub system_instruction: String,
    /// When set, the gateway is asked to reply with a JSON document matching
    /// this schema.
    pub response_schema: Option<serde_json::Value>,
}

/// A multi turn conversation handle. Gateways hold no state between calls,
/// so the full history is resent with every message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatSession {
    pub model: String,
    pub system_instruction: String,
    pub history: Vec<GatewayTurn>,
}

impl ChatSession {
    pub fn new(model: &str, system_instruction: &str, history: Vec<GatewayTurn>) -> ChatSession {
        return ChatSession {
            model: model.to_string(),
            system_instruction: system_instruction.to_string(),
            history,
        };
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GatewayResponse {
    pub text: String,
}

#[async_trait]
pub trait Gateway {
    /// Returns the name of the gateway.
    fn name(&self) -> GatewayName;

    /// Used by `coachlm models` to verify the gateway is configured and
    /// reachable before listing models.
    async fn health_check(&self) -> Result<()>;

    /// Lists all models on the gateway able to generate content.
    async fn list_models(&self) -> Result<Vec<String>>;

    /// Single turn generation. Fails on transport errors, authentication
    /// errors, and quota exhaustion alike.
    async fn generate(&self, request: GenerateRequest) -> Result<GatewayResponse>;

    /// Sends `text` as the next user turn of `chat`. The history in `chat`
    /// is everything said before `text`.
    async fn send_message(&self, chat: &ChatSession, text: &str) -> Result<GatewayResponse>;
}

pub type GatewayBox = Box<dyn Gateway + Send + Sync>;
