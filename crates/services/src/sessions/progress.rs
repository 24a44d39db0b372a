use quiz_core::model::SessionState;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub presented: usize,
    pub remaining: usize,
    pub score: u32,
}

impl SessionProgress {
    #[must_use]
    pub fn of(session: &SessionState) -> Self {
        let total = session.total_questions();
        let presented = session.current_index();
        Self {
            total,
            presented,
            remaining: total.saturating_sub(presented),
            score: session.score(),
        }
    }
}
