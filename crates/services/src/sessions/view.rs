//! Render-ready snapshots of the game, one per screen.

use serde::Serialize;

use quiz_core::model::{AttemptOutcome, ReportSummary, SessionState};

/// What the presentation layer should show after a command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    Home,
    Challenge(ChallengeView),
    Feedback(FeedbackView),
    Report(ReportSummary),
}

/// The question currently being asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChallengeView {
    /// 1-based position of this question in the session.
    pub number: usize,
    pub total: usize,
    pub score: u32,
    pub attempts: u32,
    pub content: Option<String>,
    pub question: String,
    pub options: Vec<String>,
}

impl ChallengeView {
    /// Snapshot the session's current question, if any.
    #[must_use]
    pub fn of(session: &SessionState) -> Option<Self> {
        let question = session.current_question()?;
        Some(Self {
            number: session.current_index(),
            total: session.total_questions(),
            score: session.score(),
            attempts: session.current_attempts(),
            content: question.content().map(str::to_owned),
            question: question.question().to_owned(),
            options: question.options().to_vec(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Correct,
    Retry,
    Failed,
}

impl FeedbackKind {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            FeedbackKind::Correct => "Correct!",
            FeedbackKind::Retry => "Not Quite",
            FeedbackKind::Failed => "System Compromised!",
        }
    }
}

/// Result of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackView {
    pub kind: FeedbackKind,
    pub submitted: String,
    pub score: u32,
    pub attempts: u32,
    pub max_attempts: u32,
    pub attempts_remaining: u32,
    /// Hidden on retry so the answer is not given away.
    pub explanation: Option<String>,
}

impl FeedbackView {
    #[must_use]
    pub fn new(
        session: &SessionState,
        outcome: AttemptOutcome,
        submitted: &str,
        max_attempts: u32,
    ) -> Self {
        let (kind, attempts_remaining) = match outcome {
            AttemptOutcome::Correct => (FeedbackKind::Correct, 0),
            AttemptOutcome::Retry { attempts_remaining } => {
                (FeedbackKind::Retry, attempts_remaining)
            }
            AttemptOutcome::Failed => (FeedbackKind::Failed, 0),
        };
        let explanation = match kind {
            FeedbackKind::Retry => None,
            FeedbackKind::Correct | FeedbackKind::Failed => session
                .current_question()
                .map(|q| q.explanation().to_owned()),
        };

        Self {
            kind,
            submitted: submitted.to_owned(),
            score: session.score(),
            attempts: session.current_attempts(),
            max_attempts,
            attempts_remaining,
            explanation,
        }
    }
}
