use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyQuestion,

    #[error("question must offer at least one option")]
    EmptyOptions,

    #[error("option {index} cannot be empty")]
    EmptyOption { index: usize },

    #[error("answer cannot be empty")]
    EmptyAnswer,

    #[error("explanation cannot be empty")]
    EmptyExplanation,
}

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Unvalidated question as it appears in a question bank.
///
/// Every field is optional so a single malformed record can be reported and
/// dropped without failing the whole bank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl QuestionDraft {
    /// Validate the draft into an immutable `QuestionRecord`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` naming the first required field that is missing or blank.
    pub fn validate(self) -> Result<QuestionRecord, QuestionError> {
        let question = non_blank(self.question).ok_or(QuestionError::EmptyQuestion)?;

        let options = self.options.unwrap_or_default();
        if options.is_empty() {
            return Err(QuestionError::EmptyOptions);
        }
        if let Some(index) = options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { index });
        }

        let answer = non_blank(self.answer).ok_or(QuestionError::EmptyAnswer)?;
        let explanation = non_blank(self.explanation).ok_or(QuestionError::EmptyExplanation)?;

        Ok(QuestionRecord {
            question,
            options,
            answer,
            explanation,
            content: non_blank(self.content),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// A validated multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionRecord {
    question: String,
    options: Vec<String>,
    answer: String,
    explanation: String,
    content: Option<String>,
}

impl QuestionRecord {
    /// Built-in question served when no bank can be read.
    #[must_use]
    pub fn builtin_fallback() -> Self {
        Self {
            question: "Is HTTPS more secure than HTTP?".to_owned(),
            options: vec!["Yes".to_owned(), "No".to_owned()],
            answer: "Yes".to_owned(),
            explanation: "HTTPS encrypts traffic; HTTP does not.".to_owned(),
            content: None,
        }
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Optional scenario text shown above the question.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Exact match after trimming and case-folding both sides. No partial credit.
    #[must_use]
    pub fn is_correct(&self, submitted: &str) -> bool {
        normalize_answer(&self.answer) == normalize_answer(submitted)
    }
}

/// Trim surrounding whitespace and lowercase.
#[must_use]
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().to_lowercase()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
