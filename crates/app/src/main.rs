use std::fmt;
use std::sync::Arc;

use quiz_core::model::QuizSettings;
use services::{GameFlow, QuestionSource};
use storage::JsonFileRepository;

mod console;
mod telemetry;

use console::Console;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidBankPath { raw: String },
    InvalidQuestions { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidBankPath { raw } => write!(f, "invalid --bank value: {raw:?}"),
            ArgsError::InvalidQuestions { raw } => write!(f, "invalid --questions value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct Args {
    bank_path: String,
    questions: Option<usize>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--bank <path>] [--questions <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --bank bank.json");
    eprintln!("  --questions 25");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_BANK_PATH, QUIZ_QUESTIONS, LOG_LEVEL, LOG_FORMAT");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut bank_path =
            std::env::var("QUIZ_BANK_PATH").unwrap_or_else(|_| "bank.json".into());
        let mut questions = std::env::var("QUIZ_QUESTIONS")
            .ok()
            .and_then(|value| value.parse::<usize>().ok());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--bank" => {
                    let value = require_value(args, "--bank")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidBankPath { raw: value });
                    }
                    bank_path = value;
                }
                "--questions" => {
                    let value = require_value(args, "--questions")?;
                    let parsed: usize = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidQuestions { raw: value.clone() })?;
                    questions = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            bank_path,
            questions,
        })
    }

    /// Settings with the suggested question count taken from the arguments.
    fn settings(&self) -> Result<QuizSettings, quiz_core::Error> {
        let defaults = QuizSettings::default();
        let Some(requested) = self.questions else {
            return Ok(defaults);
        };
        let settings = QuizSettings::new(
            defaults.max_attempts(),
            defaults.min_questions(),
            defaults.max_questions(),
            defaults.clamp_questions(requested),
        )?;
        Ok(settings)
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let settings = args.settings()?;

    // The bank is read once per launch; every session draws from the same pool.
    let source = QuestionSource::new(Arc::new(JsonFileRepository::new(&args.bank_path)));
    let default_questions = settings.default_questions();
    let mut game = GameFlow::new(source.load(), settings);
    tracing::info!(
        bank = %args.bank_path,
        questions = game.pool_size(),
        "question pool ready"
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Console::new(stdin.lock(), stdout.lock(), default_questions).run(&mut game)?;
    Ok(())
}

fn main() {
    telemetry::init_tracing();
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
