//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::SessionStateError;

use crate::sessions::PhaseKind;

/// Errors emitted by the game flow controller.
///
/// A rejected command never changes the controller's state.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("`{command}` is not allowed while {phase}")]
    InvalidTransition {
        command: &'static str,
        phase: PhaseKind,
    },
    #[error(transparent)]
    State(#[from] SessionStateError),
}
