/// Helpdesk webhook event models
///
/// Webhook payload shapes vary across helpdesk versions: the event name,
/// the message nesting, and the message type tag all come in two forms.
/// Every field is optional; anything that fails to line up simply does not
/// qualify for processing rather than erroring.
use crate::constants::{OUTGOING_TYPE_CODE, OUTGOING_TYPE_NAME};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct WebhookEvent {
    pub event: Option<String>,
    pub name: Option<String>,
    pub data: Option<WebhookData>,
    pub message: Option<WebhookMessage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WebhookData {
    pub message: Option<WebhookMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookMessage {
    pub message_type: Option<MessageType>,
    pub private: Option<bool>,
    pub conversation_id: Option<i64>,
    pub content: Option<String>,
}

/// Message type tag; numeric in API payloads, a string name in newer
/// webhook payloads.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MessageType {
    Code(i64),
    Name(String),
}

impl MessageType {
    pub fn is_outgoing(&self) -> bool {
        match self {
            Self::Code(code) => *code == OUTGOING_TYPE_CODE,
            Self::Name(name) => name == OUTGOING_TYPE_NAME,
        }
    }
}

impl WebhookEvent {
    /// Event name, read from `event` first and the legacy `name` second.
    pub fn event_name(&self) -> Option<&str> {
        self.event.as_deref().or(self.name.as_deref())
    }

    /// Message payload, read from `data.message` first and the top-level
    /// `message` second.
    pub fn message(&self) -> Option<&WebhookMessage> {
        self.data
            .as_ref()
            .and_then(|data| data.message.as_ref())
            .or(self.message.as_ref())
    }
}

impl WebhookMessage {
    /// An agent reply worth forwarding: outgoing type and not private.
    pub fn is_agent_reply(&self) -> bool {
        self.message_type
            .as_ref()
            .is_some_and(MessageType::is_outgoing)
            && !self.private.unwrap_or(false)
    }
}
