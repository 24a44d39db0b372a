use thiserror::Error;

use crate::model::QuestionRecord;

/// Name used when the player leaves the name blank.
pub const DEFAULT_PLAYER_NAME: &str = "Player";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionStateError {
    #[error("no question is currently presented")]
    NoCurrentQuestion,

    #[error("current question is already resolved")]
    ChallengeResolved,
}

/// Result of judging one submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Correct,
    /// Wrong, but the same question may be answered again.
    Retry { attempts_remaining: u32 },
    /// Wrong and out of attempts.
    Failed,
}

impl AttemptOutcome {
    /// True when the question is settled and the session should move on.
    #[must_use]
    pub fn resolves_challenge(self) -> bool {
        !matches!(self, AttemptOutcome::Retry { .. })
    }
}

/// Mutable state of one play-through.
///
/// The selection is fixed at construction. Questions are presented in order via
/// `advance`, and each presented question tracks its own attempt count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    player_name: String,
    selected: Vec<QuestionRecord>,
    current_index: usize,
    score: u32,
    current_attempts: u32,
    current: Option<usize>,
    resolved: bool,
}

impl SessionState {
    /// Start a fresh session over `selected`. A blank name becomes `DEFAULT_PLAYER_NAME`.
    #[must_use]
    pub fn new(player_name: &str, selected: Vec<QuestionRecord>) -> Self {
        let trimmed = player_name.trim();
        let player_name = if trimmed.is_empty() {
            DEFAULT_PLAYER_NAME.to_owned()
        } else {
            trimmed.to_owned()
        };

        Self {
            player_name,
            selected,
            current_index: 0,
            score: 0,
            current_attempts: 0,
            current: None,
            resolved: false,
        }
    }

    #[must_use]
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    #[must_use]
    pub fn selected_questions(&self) -> &[QuestionRecord] {
        &self.selected
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.selected.len()
    }

    /// Number of questions presented so far, including the current one.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn current_attempts(&self) -> u32 {
        self.current_attempts
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuestionRecord> {
        self.current.and_then(|i| self.selected.get(i))
    }

    /// True once every selected question has been presented.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.current_index >= self.selected.len()
    }

    /// Present the next question, resetting the attempt counter.
    ///
    /// Returns `None` and clears the current question when the selection is exhausted.
    pub fn advance(&mut self) -> Option<&QuestionRecord> {
        if self.is_exhausted() {
            self.current = None;
            return None;
        }

        let index = self.current_index;
        self.current = Some(index);
        self.current_attempts = 0;
        self.resolved = false;
        self.current_index += 1;
        self.selected.get(index)
    }

    /// Judge `submitted` against the current question.
    ///
    /// Every call counts as one attempt. A correct answer adds one point; the
    /// `max_attempts`-th wrong answer fails the question.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::NoCurrentQuestion` before the first `advance` or after exhaustion.
    /// Returns `SessionStateError::ChallengeResolved` if the question was already answered or failed.
    pub fn record_attempt(
        &mut self,
        submitted: &str,
        max_attempts: u32,
    ) -> Result<AttemptOutcome, SessionStateError> {
        let correct = self
            .current_question()
            .ok_or(SessionStateError::NoCurrentQuestion)?
            .is_correct(submitted);
        if self.resolved {
            return Err(SessionStateError::ChallengeResolved);
        }

        self.current_attempts = self.current_attempts.saturating_add(1);

        let outcome = if correct {
            self.score = self.score.saturating_add(1);
            AttemptOutcome::Correct
        } else if self.current_attempts >= max_attempts {
            AttemptOutcome::Failed
        } else {
            AttemptOutcome::Retry {
                attempts_remaining: max_attempts - self.current_attempts,
            }
        };

        self.resolved = outcome.resolves_challenge();
        Ok(outcome)
    }
}
