//! Observable UI state and the controller that drives it.
//!
//! The controller is a two-state machine. It starts disabled with no
//! feedback and only identity outcomes move it. A failure always leaves it
//! disabled with non-empty feedback.

use tracing::debug;

use super::UserRetrievalError;

/// Snapshot of the state a renderer binds to.
///
/// ## Invariants
/// - `enabled` is `false` whenever `feedback_message` is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    enabled: bool,
    feedback_message: String,
}

impl UiState {
    /// Whether the input and send controls accept interaction.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Feedback shown to the user; empty when there is nothing to report.
    pub fn feedback_message(&self) -> &str {
        self.feedback_message.as_str()
    }
}

/// Identity outcomes that drive the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityEvent {
    /// The current user was retrieved.
    IdentityResolved,
    /// Retrieval failed with an opaque code and message.
    IdentityFailed(UserRetrievalError),
}

/// Phase of the controller's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiPhase {
    /// Interaction is allowed.
    Enabled,
    /// Interaction is blocked, either pending identity or after a failure.
    Disabled,
}

/// Owns [`UiState`] and applies [`IdentityEvent`]s to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiStateController {
    state: UiState,
}

impl UiStateController {
    /// Controller in its initial state: disabled, no feedback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current observable state.
    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Current phase derived from the state.
    pub fn phase(&self) -> UiPhase {
        if self.state.enabled {
            UiPhase::Enabled
        } else {
            UiPhase::Disabled
        }
    }

    /// Apply an identity outcome.
    pub fn apply(&mut self, event: IdentityEvent) {
        match event {
            IdentityEvent::IdentityResolved => {
                self.state.enabled = true;
                self.state.feedback_message.clear();
            }
            IdentityEvent::IdentityFailed(error) => {
                self.state.enabled = false;
                self.state.feedback_message = error.feedback();
            }
        }
        debug!(
            phase = ?self.phase(),
            feedback = %self.state.feedback_message,
            "ui state updated"
        );
    }
}
