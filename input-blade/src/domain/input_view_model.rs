//! View model behind the chat input blade.
//!
//! Building the view model issues exactly one identity request. The outcome
//! drives [`UiStateController`]; a resolved user enables the blade and is kept
//! as the sender for every message composed afterwards. Failures are
//! terminal for the session and never retried.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info, warn};

use super::ports::{ChatService, ChatServiceError, UserService};
use super::{ChatMessage, IdentityEvent, UiState, UiStateController, User, UserRetrievalError};

/// Port implementations the blade is wired with.
#[derive(Clone)]
pub struct InputBladeServices {
    /// Identity service resolving the signed-in user.
    pub user: Arc<dyn UserService>,
    /// Messaging service receiving composed messages.
    pub chat: Arc<dyn ChatService>,
}

impl InputBladeServices {
    /// Bundle explicit port implementations.
    pub fn new(user: Arc<dyn UserService>, chat: Arc<dyn ChatService>) -> Self {
        Self { user, chat }
    }
}

/// Why a send request did not reach the messaging service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The blade is disabled: identity is pending or failed.
    Disabled,
    /// The input is empty or whitespace only.
    EmptyText,
}

/// Result of a send request that did not fail in the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The message was handed to the messaging service.
    Sent,
    /// Preconditions failed; nothing was sent and the input is untouched.
    Skipped(SkipReason),
}

/// Observable state and behaviour of the chat input blade.
pub struct InputViewModel {
    chat: Arc<dyn ChatService>,
    clock: Arc<dyn Clock>,
    controller: UiStateController,
    user: Option<User>,
    input: String,
}

impl InputViewModel {
    /// Build the view model and resolve the current user.
    ///
    /// The identity service is called exactly once. If it never completes
    /// the returned future never resolves and the blade is never enabled.
    ///
    /// ```rust
    /// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
    /// use std::sync::Arc;
    ///
    /// use input_blade::domain::ports::{FixtureChatService, FixtureUserService};
    /// use input_blade::domain::{InputBladeServices, InputViewModel};
    /// use mockable::DefaultClock;
    ///
    /// let services = InputBladeServices::new(
    ///     Arc::new(FixtureUserService::default()),
    ///     Arc::new(FixtureChatService::default()),
    /// );
    /// let view_model = InputViewModel::connect(&services, Arc::new(DefaultClock)).await;
    /// assert!(!view_model.state().enabled());
    /// assert!(!view_model.state().feedback_message().is_empty());
    /// # });
    /// ```
    pub async fn connect(services: &InputBladeServices, clock: Arc<dyn Clock>) -> Self {
        let mut view_model = Self {
            chat: Arc::clone(&services.chat),
            clock,
            controller: UiStateController::new(),
            user: None,
            input: String::new(),
        };
        debug!("requesting current user");
        let outcome = services.user.current_user().await;
        view_model.apply_identity_outcome(outcome);
        view_model
    }

    fn apply_identity_outcome(&mut self, outcome: Result<User, UserRetrievalError>) {
        match outcome {
            Ok(user) => {
                info!(user_id = %user.user_id(), "current user retrieved");
                self.user = Some(user);
                self.controller.apply(IdentityEvent::IdentityResolved);
            }
            Err(error) => {
                warn!(code = error.code(), reason = error.message(), "user retrieval failed");
                self.user = None;
                self.controller.apply(IdentityEvent::IdentityFailed(error));
            }
        }
    }

    /// Current observable UI state.
    pub fn state(&self) -> &UiState {
        self.controller.state()
    }

    /// User resolved at construction, if any.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Current content of the input field.
    pub fn input(&self) -> &str {
        self.input.as_str()
    }

    /// Replace the content of the input field.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Send the input field's content as a message from the current user.
    ///
    /// Skips without side effects while disabled or when the input is blank.
    /// Otherwise the input is cleared whether or not the transport accepts
    /// the message.
    ///
    /// # Errors
    ///
    /// Returns the transport's [`ChatServiceError`] when the hand-off fails.
    pub async fn send(&mut self) -> Result<SendOutcome, ChatServiceError> {
        let sender = match (&self.user, self.controller.state().enabled()) {
            (Some(user), true) => user.user_id().clone(),
            _ => {
                debug!("send skipped: blade disabled");
                return Ok(SendOutcome::Skipped(SkipReason::Disabled));
            }
        };
        if self.input.trim().is_empty() {
            debug!("send skipped: empty input");
            return Ok(SendOutcome::Skipped(SkipReason::EmptyText));
        }

        let text = std::mem::take(&mut self.input);
        let message = ChatMessage::new(sender, text, self.clock.utc());
        debug!(user_id = %message.user_id(), timestamp = %message.timestamp(), "dispatching message");

        self.chat.send_message(message).await.map_err(|error| {
            warn!(%error, "message dispatch failed");
            error
        })?;
        Ok(SendOutcome::Sent)
    }

    /// Set the input field to `text` and send it.
    ///
    /// # Errors
    ///
    /// See [`InputViewModel::send`].
    pub async fn send_text(
        &mut self,
        text: impl Into<String>,
    ) -> Result<SendOutcome, ChatServiceError> {
        self.set_input(text);
        self.send().await
    }
}

#[cfg(test)]
#[path = "input_view_model_tests.rs"]
mod tests;
