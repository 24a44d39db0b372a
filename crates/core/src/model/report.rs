use serde::Serialize;
use std::fmt;

use crate::model::SessionState;

/// Qualitative proficiency label derived from the final percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tier {
    Beginner,
    Novice,
    Intermediate,
    Expert,
}

impl Tier {
    /// Inclusive lower bounds, checked highest first: 80 Expert, 60 Intermediate, 40 Novice.
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            Tier::Expert
        } else if percentage >= 60.0 {
            Tier::Intermediate
        } else if percentage >= 40.0 {
            Tier::Novice
        } else {
            Tier::Beginner
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Tier::Beginner => "Beginner",
            Tier::Novice => "Novice",
            Tier::Intermediate => "Intermediate",
            Tier::Expert => "Expert",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Final report for a finished session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    player_name: String,
    total_questions: u32,
    correct_answers: u32,
    wrong_answers: u32,
    percentage: f64,
    tier: Tier,
}

impl ReportSummary {
    /// Build the report from a session's selection size and score.
    #[must_use]
    pub fn compute(session: &SessionState) -> Self {
        let total = u32::try_from(session.total_questions()).unwrap_or(u32::MAX);
        Self::from_counts(session.player_name(), total, session.score())
    }

    /// Build the report from raw counts.
    ///
    /// `correct_answers` is capped at `total_questions` so the wrong count never underflows.
    #[must_use]
    pub fn from_counts(
        player_name: impl Into<String>,
        total_questions: u32,
        correct_answers: u32,
    ) -> Self {
        let correct_answers = correct_answers.min(total_questions);
        let wrong_answers = total_questions - correct_answers;
        let percentage = if total_questions > 0 {
            f64::from(correct_answers) / f64::from(total_questions) * 100.0
        } else {
            0.0
        };

        Self {
            player_name: player_name.into(),
            total_questions,
            correct_answers,
            wrong_answers,
            percentage,
            tier: Tier::from_percentage(percentage),
        }
    }

    #[must_use]
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    #[must_use]
    pub fn wrong_answers(&self) -> u32 {
        self.wrong_answers
    }

    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    #[must_use]
    pub fn tier(&self) -> Tier {
        self.tier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_are_inclusive_lower_bounds() {
        assert_eq!(Tier::from_percentage(100.0), Tier::Expert);
        assert_eq!(Tier::from_percentage(80.0), Tier::Expert);
        assert_eq!(Tier::from_percentage(79.9), Tier::Intermediate);
        assert_eq!(Tier::from_percentage(60.0), Tier::Intermediate);
        assert_eq!(Tier::from_percentage(59.9), Tier::Novice);
        assert_eq!(Tier::from_percentage(40.0), Tier::Novice);
        assert_eq!(Tier::from_percentage(39.9), Tier::Beginner);
        assert_eq!(Tier::from_percentage(0.0), Tier::Beginner);
    }

    #[test]
    fn empty_session_reports_zero_percent() {
        let report = ReportSummary::from_counts("Ada", 0, 0);
        assert_eq!(report.total_questions(), 0);
        assert_eq!(report.wrong_answers(), 0);
        assert!(report.percentage().abs() < f64::EPSILON);
        assert_eq!(report.tier(), Tier::Beginner);
    }

    #[test]
    fn counts_always_add_up() {
        for total in 0..=6_u32 {
            for correct in 0..=total {
                let report = ReportSummary::from_counts("p", total, correct);
                assert_eq!(
                    report.correct_answers() + report.wrong_answers(),
                    report.total_questions()
                );
            }
        }
    }

    #[test]
    fn three_of_five_is_intermediate() {
        let report = ReportSummary::from_counts("p", 5, 3);
        assert!((report.percentage() - 60.0).abs() < 1e-9);
        assert_eq!(report.tier(), Tier::Intermediate);
        assert_eq!(report.tier().to_string(), "Intermediate");
    }
}
