//! Outbound adapters implementing domain ports.
//!
//! - **tracing_chat**: messaging transport that publishes each message as a
//!   structured `tracing` event.
//!
//! Adapters translate between domain types and their transport. They contain
//! no blade logic.

pub mod tracing_chat;

pub use tracing_chat::TracingChatService;
