#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::GatewayRole;
use super::GatewayTurn;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn gateway_role(&self) -> GatewayRole {
        match self {
            ChatRole::User => return GatewayRole::User,
            ChatRole::Assistant => return GatewayRole::Model,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: &str) -> ChatMessage {
        return ChatMessage {
            role,
            content: content.to_string(),
        };
    }
}

/// Ordered, append only log of a tutoring conversation. Messages are never
/// edited; the whole transcript may be cleared.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
}

impl ChatTranscript {
    pub fn messages(&self) -> &[ChatMessage] {
        return &self.messages;
    }

    pub fn len(&self) -> usize {
        return self.messages.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.messages.is_empty();
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// History in the gateway's role vocabulary.
    pub fn to_gateway_history(&self) -> Vec<GatewayTurn> {
        return self
            .messages
            .iter()
            .map(|message| {
                return GatewayTurn {
                    role: message.role.gateway_role(),
                    text: message.content.to_string(),
                };
            })
            .collect();
    }
}
