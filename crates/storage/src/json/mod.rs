use std::path::{Path, PathBuf};

use quiz_core::model::QuestionDraft;
use serde_json::Value;
use tracing::{debug, warn};

use crate::repository::{LoadedBank, QuestionRepository, RejectedRecord, StorageError};

/// Question bank stored as a JSON array of records on disk.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QuestionRepository for JsonFileRepository {
    fn load_bank(&self) -> Result<LoadedBank, StorageError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), bytes = raw.len(), "read question bank");
        decode_bank(&raw, &self.path)
    }
}

/// Decode bank text. Entries are decoded one by one so a bad entry only costs itself.
///
/// # Errors
///
/// Returns `StorageError::Parse` for invalid JSON and `StorageError::NotAnArray`
/// when the top level is not an array.
pub fn decode_bank(raw: &str, origin: &Path) -> Result<LoadedBank, StorageError> {
    let value: Value = serde_json::from_str(raw).map_err(|source| StorageError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;
    let Value::Array(entries) = value else {
        return Err(StorageError::NotAnArray {
            path: origin.to_path_buf(),
        });
    };

    let mut bank = LoadedBank::default();
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<QuestionDraft>(entry) {
            Ok(draft) => bank.drafts.push(draft),
            Err(e) => {
                warn!(path = %origin.display(), index, error = %e, "discarding undecodable bank entry");
                bank.rejected.push(RejectedRecord {
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }
    Ok(bank)
}
