use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use quiz_core::model::QuestionRecord;

/// Selection result for a session build.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub questions: Vec<QuestionRecord>,
    pub requested: usize,
    pub available: usize,
}

impl SessionPlan {
    /// Total number of questions in this plan.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Returns true when no questions were selected for this session.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Draws the questions for one session from the loaded pool.
pub struct SessionSelector<'a> {
    pool: &'a [QuestionRecord],
}

impl<'a> SessionSelector<'a> {
    #[must_use]
    pub fn new(pool: &'a [QuestionRecord]) -> Self {
        Self { pool }
    }

    /// Pick `min(requested, pool size)` distinct questions in random order.
    ///
    /// When that count is zero the plan degrades to the first pool entry,
    /// or to nothing if the pool itself is empty.
    pub fn select<R: Rng + ?Sized>(self, requested: usize, rng: &mut R) -> SessionPlan {
        let available = self.pool.len();
        let take = requested.min(available);

        let questions = if take == 0 {
            self.pool.iter().take(1).cloned().collect()
        } else {
            let mut shuffled = self.pool.to_vec();
            shuffled.shuffle(rng);
            shuffled.truncate(take);
            shuffled
        };

        debug!(requested, available, selected = questions.len(), "session plan built");
        SessionPlan {
            questions,
            requested,
            available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionDraft;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn pool(size: usize) -> Vec<QuestionRecord> {
        (0..size)
            .map(|i| {
                QuestionDraft {
                    question: Some(format!("Q{i}")),
                    options: Some(vec!["a".into(), "b".into()]),
                    answer: Some("a".into()),
                    explanation: Some("e".into()),
                    content: None,
                }
                .validate()
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn selects_min_of_requested_and_pool_without_repeats() {
        let mut rng = StdRng::seed_from_u64(42);
        for m in 1..=6 {
            let pool = pool(m);
            let known: HashSet<&str> = pool.iter().map(QuestionRecord::question).collect();
            for n in 1..=8 {
                let plan = SessionSelector::new(&pool).select(n, &mut rng);
                assert_eq!(plan.total(), n.min(m));
                let picked: HashSet<&str> =
                    plan.questions.iter().map(QuestionRecord::question).collect();
                assert_eq!(picked.len(), plan.total());
                assert!(picked.is_subset(&known));
            }
        }
    }

    #[test]
    fn zero_request_falls_back_to_first_entry() {
        let pool = pool(3);
        let plan = SessionSelector::new(&pool).select(0, &mut StdRng::seed_from_u64(1));
        assert_eq!(plan.questions, vec![pool[0].clone()]);
        assert_eq!((plan.requested, plan.available), (0, 3));
    }

    #[test]
    fn empty_pool_gives_empty_plan() {
        let plan = SessionSelector::new(&[]).select(10, &mut StdRng::seed_from_u64(1));
        assert!(plan.is_empty());
        assert_eq!(plan.available, 0);
    }
}
