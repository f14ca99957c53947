use std::fmt;

use chrono::{DateTime, Utc};
use med_core::model::{QuestionKey, QuizId};
use storage::repository::{ProgressRecord, ProgressRepository, Storage};

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    quiz_id: QuizId,
    answered: u32,
    grouped: bool,
    now: Option<DateTime<Utc>>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidAnswered { raw: String },
    InvalidDbUrl { raw: String },
    InvalidNow { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidAnswered { raw } => write!(f, "invalid --answered value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidNow { raw } => {
                write!(f, "invalid --now value (expected RFC3339): {raw}")
            }
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
        let mut db_url =
            std::env::var("MED_DB_URL").unwrap_or_else(|_| "sqlite:dev.sqlite3".into());
        let mut quiz_id = QuizId::new(
            std::env::var("MED_QUIZ_ID").unwrap_or_else(|_| "jaundice-quiz".into()),
        );
        let mut answered = 3_u32;
        let mut grouped = false;
        let mut now: Option<DateTime<Utc>> = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--quiz-id" => {
                    let value = require_value(&mut args, "--quiz-id")?;
                    quiz_id = QuizId::new(value);
                }
                "--answered" => {
                    let value = require_value(&mut args, "--answered")?;
                    answered = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidAnswered { raw: value.clone() })?;
                }
                "--grouped" => {
                    grouped = true;
                }
                "--now" => {
                    let value = require_value(&mut args, "--now")?;
                    let parsed = DateTime::parse_from_rfc3339(&value)
                        .map_err(|_| ArgsError::InvalidNow { raw: value.clone() })?
                        .with_timezone(&Utc);
                    now = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            quiz_id,
            answered,
            grouped,
            now,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>     SQLite URL (default: sqlite:dev.sqlite3)");
    eprintln!("  --quiz-id <id>        Quiz id to seed (default: jaundice-quiz)");
    eprintln!("  --answered <n>        Number of answered questions to fabricate (default: 3)");
    eprintln!("  --grouped             Use case-grouped answer keys instead of flat ones");
    eprintln!("  --now <rfc3339>       Fixed current time for deterministic seeding");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  MED_DB_URL, MED_QUIZ_ID");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;
    let now = args.now.unwrap_or_else(Utc::now);

    let answered = args.answered as usize;
    let selected_answers = (0..answered)
        .map(|index| {
            let key = if args.grouped {
                QuestionKey::grouped(0, index)
            } else {
                QuestionKey::flat(index)
            };
            (key, 0_usize)
        })
        .collect();

    // The score column is fabricated alongside; the app recomputes it from
    // the answers at load, so any value here is only seed data.
    let record = ProgressRecord {
        current_case: 0,
        current_question: answered.saturating_sub(1),
        selected_answers,
        score: args.answered,
        completed: false,
        last_updated: now,
    };
    storage.progress.put(&args.quiz_id, &record).await?;

    println!(
        "Seeded quiz {} with {} answered questions into {}",
        args.quiz_id, args.answered, args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
