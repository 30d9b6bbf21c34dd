//! Chat message value object handed to the messaging service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// A message composed by the input blade at send time.
///
/// Messages are immutable once built; ownership moves straight into
/// [`ChatService::send_message`](crate::domain::ports::ChatService::send_message).
/// The timestamp serialises as RFC 3339 in UTC.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use input_blade::domain::{ChatMessage, UserId};
///
/// let sent_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
/// let message = ChatMessage::new(UserId::new("u1").unwrap(), "hello", sent_at);
/// assert_eq!(message.text(), "hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    user_id: UserId,
    text: String,
    timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Build a message from its sender, text, and send time.
    pub fn new(user_id: UserId, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            user_id,
            text: text.into(),
            timestamp,
        }
    }

    /// Identifier of the sending user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Text entered by the user.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Point in time the message was composed.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
