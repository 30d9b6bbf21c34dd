//! Chat input blade library.
//!
//! The blade's view model talks to an identity service and a messaging
//! service through the ports in [`domain::ports`]. [`composition`] wires
//! concrete implementations from configuration; [`outbound`] holds the
//! production adapters.

pub mod composition;
pub mod domain;
pub mod outbound;
