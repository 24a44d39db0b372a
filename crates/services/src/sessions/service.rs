use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use quiz_core::model::{QuestionRecord, QuizSettings, ReportSummary, SessionState};

use super::plan::SessionSelector;
use super::progress::SessionProgress;
use super::view::{ChallengeView, FeedbackKind, FeedbackView, Screen};
use crate::error::SessionError;

//
// ─── COMMANDS & PHASES ─────────────────────────────────────────────────────────
//

/// User actions forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameCommand {
    Start {
        player_name: String,
        requested_count: usize,
    },
    Submit {
        answer: String,
    },
    Skip,
    /// Acknowledge feedback.
    Next,
    Home,
}

impl GameCommand {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GameCommand::Start { .. } => "start",
            GameCommand::Submit { .. } => "submit",
            GameCommand::Skip => "skip",
            GameCommand::Next => "next",
            GameCommand::Home => "home",
        }
    }
}

/// Which screen the controller is on, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Idle,
    InChallenge,
    Feedback,
    Report,
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PhaseKind::Idle => "idle",
            PhaseKind::InChallenge => "in a challenge",
            PhaseKind::Feedback => "showing feedback",
            PhaseKind::Report => "showing the report",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Default)]
enum GamePhase {
    #[default]
    Idle,
    InChallenge(SessionState),
    Feedback {
        session: SessionState,
        view: FeedbackView,
    },
    Report(ReportSummary),
}

impl GamePhase {
    fn kind(&self) -> PhaseKind {
        match self {
            GamePhase::Idle => PhaseKind::Idle,
            GamePhase::InChallenge(_) => PhaseKind::InChallenge,
            GamePhase::Feedback { .. } => PhaseKind::Feedback,
            GamePhase::Report(_) => PhaseKind::Report,
        }
    }
}

//
// ─── GAME FLOW ─────────────────────────────────────────────────────────────────
//

/// Owns one game: the question pool, the settings and the live session.
///
/// Flow: `Idle → InChallenge → Feedback → InChallenge … → Report → Idle`.
/// Feedback for a wrong answer with attempts left returns to the same question;
/// feedback for a correct or failed answer moves on.
pub struct GameFlow {
    pool: Vec<QuestionRecord>,
    settings: QuizSettings,
    phase: GamePhase,
    rng: StdRng,
}

impl GameFlow {
    #[must_use]
    pub fn new(pool: Vec<QuestionRecord>, settings: QuizSettings) -> Self {
        Self::with_rng(pool, settings, StdRng::from_os_rng())
    }

    /// Build a flow whose question draws come from `rng`.
    #[must_use]
    pub fn with_rng(pool: Vec<QuestionRecord>, settings: QuizSettings, rng: StdRng) -> Self {
        Self {
            pool,
            settings,
            phase: GamePhase::Idle,
            rng,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    #[must_use]
    pub fn phase(&self) -> PhaseKind {
        self.phase.kind()
    }

    /// The live session, while one is being played.
    #[must_use]
    pub fn session(&self) -> Option<&SessionState> {
        match &self.phase {
            GamePhase::InChallenge(session) | GamePhase::Feedback { session, .. } => Some(session),
            GamePhase::Idle | GamePhase::Report(_) => None,
        }
    }

    #[must_use]
    pub fn progress(&self) -> Option<SessionProgress> {
        self.session().map(SessionProgress::of)
    }

    /// Re-render the current phase.
    #[must_use]
    pub fn screen(&self) -> Screen {
        match &self.phase {
            GamePhase::Idle => Screen::Home,
            GamePhase::InChallenge(session) => {
                ChallengeView::of(session).map_or(Screen::Home, Screen::Challenge)
            }
            GamePhase::Feedback { view, .. } => Screen::Feedback(view.clone()),
            GamePhase::Report(report) => Screen::Report(report.clone()),
        }
    }

    /// Apply one user action.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` when the command does not apply to the
    /// current phase. The state is left untouched in that case.
    pub fn dispatch(&mut self, command: GameCommand) -> Result<Screen, SessionError> {
        debug!(command = command.name(), phase = %self.phase.kind(), "dispatch");
        match command {
            GameCommand::Start {
                player_name,
                requested_count,
            } => self.start_session(&player_name, requested_count),
            GameCommand::Submit { answer } => self.submit_answer(&answer),
            GameCommand::Skip => self.skip(),
            GameCommand::Next => self.next(),
            GameCommand::Home => Ok(self.go_home()),
        }
    }

    /// Start a new session with a fresh random selection. Only valid from `Idle`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `Idle`.
    pub fn start_session(
        &mut self,
        player_name: &str,
        requested_count: usize,
    ) -> Result<Screen, SessionError> {
        if !matches!(self.phase, GamePhase::Idle) {
            return Err(self.rejected("start"));
        }

        let plan = SessionSelector::new(&self.pool).select(requested_count, &mut self.rng);
        let (requested, available) = (plan.requested, plan.available);
        let session = SessionState::new(player_name, plan.questions);
        info!(
            player = session.player_name(),
            requested,
            available,
            selected = session.total_questions(),
            "session started"
        );
        Ok(self.advance(session))
    }

    /// Judge an answer for the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `InChallenge`.
    pub fn submit_answer(&mut self, answer: &str) -> Result<Screen, SessionError> {
        let mut session = match std::mem::take(&mut self.phase) {
            GamePhase::InChallenge(session) => session,
            other => return Err(self.restore(other, "submit")),
        };

        let max_attempts = self.settings.max_attempts();
        let outcome = match session.record_attempt(answer, max_attempts) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.phase = GamePhase::InChallenge(session);
                return Err(e.into());
            }
        };

        let view = FeedbackView::new(&session, outcome, answer, max_attempts);
        debug!(
            kind = ?view.kind,
            attempts = view.attempts,
            score = view.score,
            "answer judged"
        );
        self.phase = GamePhase::Feedback {
            session,
            view: view.clone(),
        };
        Ok(Screen::Feedback(view))
    }

    /// Leave the current question unanswered and move on.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `InChallenge`.
    pub fn skip(&mut self) -> Result<Screen, SessionError> {
        match std::mem::take(&mut self.phase) {
            GamePhase::InChallenge(session) => Ok(self.advance(session)),
            other => Err(self.restore(other, "skip")),
        }
    }

    /// Acknowledge feedback: retry the same question, or move on once it is settled.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `Feedback`.
    pub fn next(&mut self) -> Result<Screen, SessionError> {
        match std::mem::take(&mut self.phase) {
            GamePhase::Feedback { session, view } => {
                if view.kind == FeedbackKind::Retry {
                    let screen = ChallengeView::of(&session).map_or(Screen::Home, Screen::Challenge);
                    self.phase = GamePhase::InChallenge(session);
                    Ok(screen)
                } else {
                    Ok(self.advance(session))
                }
            }
            other => Err(self.restore(other, "next")),
        }
    }

    /// Drop any session and return to the home screen. Valid from every phase.
    pub fn go_home(&mut self) -> Screen {
        if !matches!(self.phase, GamePhase::Idle) {
            debug!(from = %self.phase.kind(), "returning home");
        }
        self.phase = GamePhase::Idle;
        Screen::Home
    }

    fn advance(&mut self, mut session: SessionState) -> Screen {
        if session.advance().is_some() {
            let screen = ChallengeView::of(&session).map_or(Screen::Home, Screen::Challenge);
            self.phase = GamePhase::InChallenge(session);
            return screen;
        }

        let report = ReportSummary::compute(&session);
        info!(
            player = report.player_name(),
            score = report.correct_answers(),
            total = report.total_questions(),
            percentage = report.percentage(),
            tier = %report.tier(),
            "session complete"
        );
        self.phase = GamePhase::Report(report.clone());
        Screen::Report(report)
    }

    fn rejected(&self, command: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            command,
            phase: self.phase.kind(),
        }
    }

    fn restore(&mut self, phase: GamePhase, command: &'static str) -> SessionError {
        self.phase = phase;
        self.rejected(command)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{QuestionDraft, Tier};

    fn question(i: usize) -> QuestionRecord {
        QuestionDraft {
            question: Some(format!("Q{i}")),
            options: Some(vec![format!("right{i}"), "wrong".into()]),
            answer: Some(format!("right{i}")),
            explanation: Some(format!("explained {i}")),
            content: None,
        }
        .validate()
        .unwrap()
    }

    fn flow(pool_size: usize) -> GameFlow {
        GameFlow::with_rng(
            (0..pool_size).map(question).collect(),
            QuizSettings::default(),
            StdRng::seed_from_u64(9),
        )
    }

    fn current_answer(flow: &GameFlow) -> String {
        flow.session()
            .and_then(SessionState::current_question)
            .map(|q| q.answer().to_owned())
            .unwrap()
    }

    #[test]
    fn submit_while_idle_is_rejected_without_side_effects() {
        let mut game = flow(3);
        let err = game
            .dispatch(GameCommand::Submit {
                answer: "x".into(),
            })
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidTransition {
                command: "submit",
                phase: PhaseKind::Idle
            }
        ));
        assert_eq!(game.phase(), PhaseKind::Idle);
    }

    #[test]
    fn pool_size_counts_loaded_questions() {
        assert_eq!(flow(5).pool_size(), 5);
        assert_eq!(flow(0).pool_size(), 0);
    }

    #[test]
    fn start_presents_first_question() {
        let mut game = flow(5);
        let Screen::Challenge(view) = game.start_session("Ada", 3).unwrap() else {
            panic!("expected challenge");
        };
        assert_eq!(view.number, 1);
        assert_eq!(view.total, 3);
        assert_eq!(view.score, 0);
        assert_eq!(game.phase(), PhaseKind::InChallenge);
    }

    #[test]
    fn start_twice_is_rejected() {
        let mut game = flow(5);
        game.start_session("Ada", 3).unwrap();
        assert!(game.start_session("Ada", 3).is_err());
        assert_eq!(game.progress().unwrap().presented, 1);
    }

    #[test]
    fn wrong_answer_with_attempts_left_returns_to_same_question() {
        let mut game = flow(5);
        game.start_session("Ada", 2).unwrap();
        let before = current_answer(&game);

        let Screen::Feedback(fb) = game.submit_answer("nope").unwrap() else {
            panic!("expected feedback");
        };
        assert_eq!(fb.kind, FeedbackKind::Retry);
        assert_eq!(fb.attempts_remaining, 2);
        assert!(fb.explanation.is_none());

        let Screen::Challenge(view) = game.next().unwrap() else {
            panic!("expected challenge");
        };
        assert_eq!(view.attempts, 1);
        assert_eq!(view.number, 1);
        assert_eq!(current_answer(&game), before);
    }

    #[test]
    fn three_wrong_answers_fail_the_challenge() {
        let mut game = flow(5);
        game.start_session("Ada", 2).unwrap();

        for _ in 0..2 {
            game.submit_answer("nope").unwrap();
            game.next().unwrap();
        }
        let Screen::Feedback(fb) = game.submit_answer("nope").unwrap() else {
            panic!("expected feedback");
        };
        assert_eq!(fb.kind, FeedbackKind::Failed);
        assert_eq!(fb.attempts, 3);
        assert_eq!(fb.score, 0);
        assert!(fb.explanation.is_some());

        let Screen::Challenge(view) = game.next().unwrap() else {
            panic!("expected the second challenge");
        };
        assert_eq!(view.number, 2);
        assert_eq!(view.attempts, 0);
    }

    #[test]
    fn skip_advances_without_scoring() {
        let mut game = flow(2);
        game.start_session("Ada", 2).unwrap();
        game.skip().unwrap();
        let Screen::Report(report) = game.skip().unwrap() else {
            panic!("expected report");
        };
        assert_eq!(report.correct_answers(), 0);
        assert_eq!(report.wrong_answers(), 2);
        assert_eq!(report.tier(), Tier::Beginner);
    }

    #[test]
    fn skip_is_rejected_during_feedback() {
        let mut game = flow(2);
        game.start_session("Ada", 2).unwrap();
        game.submit_answer("nope").unwrap();
        assert!(game.skip().is_err());
        assert_eq!(game.phase(), PhaseKind::Feedback);
    }

    #[test]
    fn empty_pool_goes_straight_to_report() {
        let mut game = flow(0);
        let Screen::Report(report) = game.start_session("", 10).unwrap() else {
            panic!("expected report");
        };
        assert_eq!(report.player_name(), "Player");
        assert_eq!(report.total_questions(), 0);
        assert!(report.percentage().abs() < f64::EPSILON);
        assert_eq!(game.phase(), PhaseKind::Report);
    }

    #[test]
    fn go_home_is_idempotent() {
        let mut game = flow(3);
        game.start_session("Ada", 3).unwrap();
        assert_eq!(game.go_home(), Screen::Home);
        assert_eq!(game.go_home(), Screen::Home);
        assert_eq!(game.phase(), PhaseKind::Idle);
        assert!(game.session().is_none());
    }

    #[test]
    fn screen_rerenders_current_phase() {
        let mut game = flow(3);
        assert_eq!(game.screen(), Screen::Home);
        let shown = game.start_session("Ada", 1).unwrap();
        assert_eq!(game.screen(), shown);
    }
}
