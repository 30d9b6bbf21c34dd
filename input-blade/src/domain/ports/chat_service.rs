//! Driven port for handing composed messages to a messaging transport.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::ChatMessage;

define_port_error! {
    /// Errors surfaced by messaging transports.
    pub enum ChatServiceError {
        /// The transport refused the message.
        Rejected { message: String } => "chat transport rejected message: {message}",
        /// The transport could not be reached.
        Unavailable { message: String } => "chat transport unavailable: {message}",
    }
}

/// Messaging service contract.
///
/// Delivery is best effort from the blade's point of view: the returned
/// result only reports whether the hand-off to the transport succeeded.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Hand a message to the transport.
    async fn send_message(&self, message: ChatMessage) -> Result<(), ChatServiceError>;
}

/// In-memory messaging service that records every message it receives.
#[derive(Debug, Default)]
pub struct FixtureChatService {
    sent: Mutex<Vec<ChatMessage>>,
}

impl FixtureChatService {
    /// Messages received so far, in send order.
    pub fn sent_messages(&self) -> Vec<ChatMessage> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ChatService for FixtureChatService {
    async fn send_message(&self, message: ChatMessage) -> Result<(), ChatServiceError> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::UserId;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn message(text: &str) -> ChatMessage {
        let sent_at = Utc
            .with_ymd_and_hms(2024, 5, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        ChatMessage::new(UserId::new("u1").expect("user id"), text, sent_at)
    }

    #[rstest]
    #[tokio::test]
    async fn records_messages_in_send_order() {
        let service = FixtureChatService::default();

        service.send_message(message("first")).await.expect("send");
        service.send_message(message("second")).await.expect("send");

        let texts: Vec<_> = service
            .sent_messages()
            .iter()
            .map(|m| m.text().to_owned())
            .collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[rstest]
    fn error_constructors_render_messages() {
        assert_eq!(
            ChatServiceError::rejected("too long").to_string(),
            "chat transport rejected message: too long"
        );
        assert_eq!(
            ChatServiceError::unavailable("offline").to_string(),
            "chat transport unavailable: offline"
        );
    }
}
