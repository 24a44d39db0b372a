use std::sync::Arc;

use quiz_core::model::QuestionRecord;
use rand::Rng;
use rand::seq::SliceRandom;
use storage::repository::QuestionRepository;
use tracing::{info, warn};

/// The question served when the bank cannot be read.
#[must_use]
pub fn fallback_question() -> QuestionRecord {
    QuestionRecord::builtin_fallback()
}

/// Supplies the pool of validated questions for a game.
///
/// Loading never fails: read or parse errors degrade to a single built-in question.
#[derive(Clone)]
pub struct QuestionSource {
    repo: Arc<dyn QuestionRepository>,
}

impl QuestionSource {
    #[must_use]
    pub fn new(repo: Arc<dyn QuestionRepository>) -> Self {
        Self { repo }
    }

    /// Load, validate and shuffle the bank.
    #[must_use]
    pub fn load(&self) -> Vec<QuestionRecord> {
        self.load_with_rng(&mut rand::rng())
    }

    /// Same as `load`, with the shuffle driven by `rng`.
    pub fn load_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<QuestionRecord> {
        let bank = match self.repo.load_bank() {
            Ok(bank) => bank,
            Err(e) => {
                warn!(error = %e, "question bank unavailable; using built-in question");
                return vec![fallback_question()];
            }
        };

        let entries = bank.entries();
        let mut pool: Vec<QuestionRecord> = bank
            .drafts
            .into_iter()
            .enumerate()
            .filter_map(|(position, draft)| match draft.validate() {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(position, error = %e, "discarding invalid question");
                    None
                }
            })
            .collect();
        pool.shuffle(rng);

        info!(entries, usable = pool.len(), "question bank loaded");
        pool
    }
}
