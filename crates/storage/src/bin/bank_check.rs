use std::fmt;

use storage::{JsonFileRepository, QuestionRepository};

#[derive(Debug, Clone)]
struct Args {
    bank_path: String,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidBankPath { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidBankPath { raw } => write!(f, "invalid --bank value: {raw:?}"),
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

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut bank_path =
            std::env::var("QUIZ_BANK_PATH").unwrap_or_else(|_| "bank.json".into());

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--bank" => {
                    let value = require_value(&mut args, "--bank")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidBankPath { raw: value });
                    }
                    bank_path = value;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { bank_path })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin bank_check -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --bank <path>             Question bank JSON file (default: bank.json)");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  QUIZ_BANK_PATH");
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let repo = JsonFileRepository::new(&args.bank_path);
    let bank = repo.load_bank()?;

    let mut valid = 0_usize;
    let mut problems = Vec::new();
    for rejected in &bank.rejected {
        problems.push(format!("entry {}: {}", rejected.index, rejected.reason));
    }
    for (position, draft) in bank.drafts.into_iter().enumerate() {
        match draft.validate() {
            Ok(_) => valid += 1,
            Err(e) => problems.push(format!("decoded record {position}: {e}")),
        }
    }

    println!("{}: {valid} usable question(s)", repo.path().display());
    for problem in &problems {
        println!("  dropped {problem}");
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
