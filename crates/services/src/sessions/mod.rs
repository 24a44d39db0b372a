mod plan;
mod progress;
mod service;
mod view;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use plan::{SessionPlan, SessionSelector};
pub use progress::SessionProgress;
pub use service::{GameCommand, GameFlow, PhaseKind};
pub use view::{ChallengeView, FeedbackKind, FeedbackView, Screen};
