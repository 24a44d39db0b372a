#![forbid(unsafe_code)]

pub mod error;
pub mod question_source;
pub mod sessions;

pub use error::SessionError;
pub use question_source::{QuestionSource, fallback_question};

pub use sessions::{
    ChallengeView, FeedbackKind, FeedbackView, GameCommand, GameFlow, PhaseKind, Screen,
    SessionPlan, SessionProgress, SessionSelector,
};
