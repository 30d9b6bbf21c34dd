//! Messaging transport that publishes messages as structured log events.
//!
//! Each message is serialised to its JSON wire form and emitted at `info`
//! under the `input_blade::chat` target, so a subscriber (or log shipper)
//! acts as the transport.

use async_trait::async_trait;

use crate::domain::ChatMessage;
use crate::domain::ports::{ChatService, ChatServiceError};

/// Target used for published chat events.
pub const CHAT_EVENT_TARGET: &str = "input_blade::chat";

/// Chat transport backed by `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingChatService;

impl TracingChatService {
    /// Create a new transport.
    pub fn new() -> Self {
        Self
    }

    fn encode(message: &ChatMessage) -> Result<String, ChatServiceError> {
        serde_json::to_string(message)
            .map_err(|err| ChatServiceError::rejected(format!("failed to encode message: {err}")))
    }
}

#[async_trait]
impl ChatService for TracingChatService {
    async fn send_message(&self, message: ChatMessage) -> Result<(), ChatServiceError> {
        let payload = Self::encode(&message)?;
        tracing::info!(
            target: CHAT_EVENT_TARGET,
            user_id = %message.user_id(),
            payload = %payload,
            "chat message published"
        );
        Ok(())
    }
}
