use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("max attempts must be > 0")]
    InvalidMaxAttempts,

    #[error("minimum question count must be > 0")]
    InvalidMinQuestions,

    #[error("question count bounds must satisfy min <= default <= max")]
    InvalidQuestionBounds,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Tunables for a quiz session.
///
/// Defaults:
/// - 3 attempts per challenge before it is marked failed
/// - 1..=50 questions per session, 25 suggested
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSettings {
    max_attempts: u32,
    min_questions: usize,
    max_questions: usize,
    default_questions: usize,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            min_questions: 1,
            max_questions: 50,
            default_questions: 25,
        }
    }
}

impl QuizSettings {
    /// Creates custom quiz settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if attempts are zero or the question bounds are inconsistent.
    pub fn new(
        max_attempts: u32,
        min_questions: usize,
        max_questions: usize,
        default_questions: usize,
    ) -> Result<Self, SettingsError> {
        if max_attempts == 0 {
            return Err(SettingsError::InvalidMaxAttempts);
        }
        if min_questions == 0 {
            return Err(SettingsError::InvalidMinQuestions);
        }
        if !(min_questions..=max_questions).contains(&default_questions) {
            return Err(SettingsError::InvalidQuestionBounds);
        }

        Ok(Self {
            max_attempts,
            min_questions,
            max_questions,
            default_questions,
        })
    }

    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    #[must_use]
    pub fn min_questions(&self) -> usize {
        self.min_questions
    }

    #[must_use]
    pub fn max_questions(&self) -> usize {
        self.max_questions
    }

    #[must_use]
    pub fn default_questions(&self) -> usize {
        self.default_questions
    }

    /// Clamp a requested question count into the allowed range.
    #[must_use]
    pub fn clamp_questions(&self, requested: usize) -> usize {
        requested.clamp(self.min_questions, self.max_questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let s = QuizSettings::default();
        let rebuilt = QuizSettings::new(
            s.max_attempts(),
            s.min_questions(),
            s.max_questions(),
            s.default_questions(),
        )
        .unwrap();
        assert_eq!(s, rebuilt);
    }

    #[test]
    fn rejects_bad_bounds() {
        assert_eq!(
            QuizSettings::new(0, 1, 50, 25).unwrap_err(),
            SettingsError::InvalidMaxAttempts
        );
        assert_eq!(
            QuizSettings::new(3, 0, 50, 25).unwrap_err(),
            SettingsError::InvalidMinQuestions
        );
        assert_eq!(
            QuizSettings::new(3, 10, 5, 7).unwrap_err(),
            SettingsError::InvalidQuestionBounds
        );
    }

    #[test]
    fn clamps_requested_count() {
        let s = QuizSettings::default();
        assert_eq!(s.clamp_questions(0), 1);
        assert_eq!(s.clamp_questions(12), 12);
        assert_eq!(s.clamp_questions(500), 50);
    }
}
