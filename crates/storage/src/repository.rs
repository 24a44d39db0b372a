use std::path::PathBuf;

use quiz_core::model::QuestionDraft;
use thiserror::Error;

/// Errors surfaced by question bank adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("failed to read question bank {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse question bank {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("question bank {} must be a JSON array of records", path.display())]
    NotAnArray { path: PathBuf },
}

/// A bank entry that could not be decoded into a `QuestionDraft`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub index: usize,
    pub reason: String,
}

/// Raw contents of a question bank.
///
/// `drafts` keeps bank order; domain validation happens in the services layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedBank {
    pub drafts: Vec<QuestionDraft>,
    pub rejected: Vec<RejectedRecord>,
}

impl LoadedBank {
    /// Total number of entries seen in the bank, decoded or not.
    #[must_use]
    pub fn entries(&self) -> usize {
        self.drafts.len() + self.rejected.len()
    }
}

/// Repository contract for question banks.
pub trait QuestionRepository: Send + Sync {
    /// Read every entry of the bank.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the bank cannot be read or is not a list of records.
    fn load_bank(&self) -> Result<LoadedBank, StorageError>;
}

/// Simple in-memory bank for testing and prototyping.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    drafts: Vec<QuestionDraft>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self { drafts: Vec::new() }
    }

    #[must_use]
    pub fn with_drafts(drafts: Vec<QuestionDraft>) -> Self {
        Self { drafts }
    }

    pub fn push(&mut self, draft: QuestionDraft) {
        self.drafts.push(draft);
    }
}

impl QuestionRepository for InMemoryRepository {
    fn load_bank(&self) -> Result<LoadedBank, StorageError> {
        Ok(LoadedBank {
            drafts: self.drafts.clone(),
            rejected: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_returns_drafts_in_order() {
        let mut repo = InMemoryRepository::new();
        for q in ["one", "two"] {
            repo.push(QuestionDraft {
                question: Some(q.into()),
                ..QuestionDraft::default()
            });
        }

        let bank = repo.load_bank().unwrap();
        assert_eq!(bank.entries(), 2);
        assert_eq!(bank.drafts[1].question.as_deref(), Some("two"));
    }
}
