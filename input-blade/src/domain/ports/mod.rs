//! Domain ports and supporting types for the hexagonal boundary.
//!
//! The view model depends only on these traits. Fixture implementations
//! stand in for production services during development and tests.

mod macros;
pub(crate) use macros::define_port_error;

mod chat_service;
mod user_service;

#[cfg(test)]
pub use chat_service::MockChatService;
pub use chat_service::{ChatService, ChatServiceError, FixtureChatService};
#[cfg(test)]
pub use user_service::MockUserService;
pub use user_service::{
    FixtureUserService, INJECTED_FAILURE_CODE, NO_CURRENT_USER_CODE,
    ParseUserFetchBehaviourError, UserFetchBehaviour, UserService,
};
