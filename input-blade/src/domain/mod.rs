//! Domain primitives, state machine and the input blade view model.
//!
//! Purpose: keep the blade's behaviour independent of rendering and of the
//! concrete services behind it. Types here talk to the outside world only
//! through the traits in [`ports`].
//!
//! Public surface:
//! - `User`, `UserId` — identity reported by the user service.
//! - `ChatMessage` — value object handed to the chat service.
//! - `UiState`, `UiStateController` — enabled/disabled state with feedback.
//! - `InputViewModel` — identity requester and message dispatcher.

pub mod error;
pub mod input_view_model;
pub mod message;
pub mod ports;
pub mod ui_state;
pub mod user;

pub use self::error::{UNSPECIFIED_FAILURE, UserRetrievalError};
pub use self::input_view_model::{InputBladeServices, InputViewModel, SendOutcome, SkipReason};
pub use self::message::ChatMessage;
pub use self::ui_state::{IdentityEvent, UiPhase, UiState, UiStateController};
pub use self::user::{User, UserId, UserValidationError};
