mod question;
mod report;
mod session;
mod settings;

pub use question::{QuestionDraft, QuestionError, QuestionRecord, normalize_answer};
pub use report::{ReportSummary, Tier};
pub use session::{AttemptOutcome, DEFAULT_PLAYER_NAME, SessionState, SessionStateError};
pub use settings::{QuizSettings, SettingsError};
