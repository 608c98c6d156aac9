use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use clap::Parser;
use env_logger::Env;
use log::info;
use tokio::sync::mpsc;

use mcq_core::model::Term;
use services::sessions::QUESTION_TIME_LIMIT;
use services::{AppServices, Clock, NarrationMode, PlayerConfig, SilentSpeech, SpeechEngine};

mod input;
mod render;
mod shell;
mod speech;

use shell::Shell;
use speech::ConsoleSpeech;

const BUILTIN_BANK: &str = include_str!("../data/question_bank.txt");

#[derive(Parser, Debug)]
#[command(name = "mcq")]
#[command(version, about = "Timed multiple-choice quizzes in the terminal", long_about = None)]
struct Args {
    /// SQLite database for bookmarks and theme.
    #[arg(long, env = "MCQ_DB_URL", default_value = "sqlite://mcq.sqlite3")]
    db: String,
    /// Keep preferences in memory only.
    #[arg(long)]
    ephemeral: bool,
    /// Question bank to load instead of the built-in one.
    #[arg(long, env = "MCQ_BANK", value_name = "FILE")]
    bank: Option<PathBuf>,
    /// Seconds allowed per question.
    #[arg(long, default_value_t = QUESTION_TIME_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
    time_limit: u32,
    #[arg(long)]
    auto_play: bool,
    #[arg(long)]
    read_aloud: bool,
    /// Never print narration; auto-play still advances.
    #[arg(long)]
    mute: bool,
    /// Jump straight into a quiz (needs --term).
    #[arg(long, requires = "term")]
    subject: Option<String>,
    #[arg(long, requires = "subject")]
    term: Option<Term>,
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

#[derive(Debug)]
enum SetupError {
    InvalidDbUrl { raw: String },
    ReadBank { path: PathBuf, source: std::io::Error },
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            SetupError::ReadBank { path, source } => {
                write!(f, "could not read {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SetupError {}

fn load_bank(path: Option<&Path>) -> Result<Cow<'static, str>, SetupError> {
    let Some(path) = path else {
        return Ok(Cow::Borrowed(BUILTIN_BANK));
    };
    std::fs::read_to_string(path)
        .map(Cow::Owned)
        .map_err(|source| SetupError::ReadBank {
            path: path.to_path_buf(),
            source,
        })
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| SetupError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(SetupError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level.as_str()))
        .init();

    let bank = load_bank(args.bank.as_deref())?;
    let clock = Clock::system();
    let services = if args.ephemeral {
        info!("[Setup] Using in-memory preferences.");
        AppServices::in_memory(&bank, clock)?
    } else {
        // Open + migrate SQLite at startup so the library crates never touch the filesystem.
        let db_url = normalize_sqlite_url(args.db);
        prepare_sqlite_file(&db_url)?;
        AppServices::new_sqlite(&db_url, &bank, clock).await?
    };

    let config = PlayerConfig {
        time_limit: args.time_limit,
        mode: NarrationMode {
            read_aloud: args.read_aloud,
            auto_play: args.auto_play,
        },
        ..PlayerConfig::default()
    };
    let (speech_tx, speech_rx) = mpsc::unbounded_channel();
    let engine: Box<dyn SpeechEngine> = if args.mute {
        Box::new(SilentSpeech)
    } else {
        Box::new(ConsoleSpeech::new(speech_tx))
    };

    let mut shell = Shell::new(services.player(engine, config).await);
    match args.subject.zip(args.term) {
        Some((subject, term)) => shell.open(&subject, term),
        None => shell.show(),
    }

    shell::run(shell, speech_rx).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn jump_flags_require_each_other() {
        assert!(Args::try_parse_from(["mcq", "--subject", "CS101"]).is_err());

        let args = Args::try_parse_from(["mcq", "--subject", "CS101", "--term", "final"]).unwrap();
        assert_eq!(args.term, Some(Term::Final));
        assert_eq!(args.time_limit, QUESTION_TIME_LIMIT);
    }

    #[test]
    fn zero_time_limit_is_rejected() {
        assert!(Args::try_parse_from(["mcq", "--time-limit", "0"]).is_err());
    }

    #[test]
    fn builtin_bank_parses_every_record() {
        let services = AppServices::in_memory(BUILTIN_BANK, Clock::system()).unwrap();
        let catalog = services.catalog();

        assert_eq!(catalog.report().dropped(), 0);
        assert_eq!(
            catalog.subjects(),
            vec!["CS101", "ENG001", "ENG101", "ISL202", "MGT211", "MTH001"]
        );
        for subject in catalog.subjects() {
            assert_eq!(catalog.terms_for(&subject), Term::ALL.to_vec());
        }
    }

    #[test]
    fn relative_sqlite_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:data/mcq.sqlite3".into());
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("data/mcq.sqlite3"));
        assert_eq!(normalize_sqlite_url("sqlite::memory:".into()), "sqlite::memory:");
    }

    #[test]
    fn memory_url_needs_no_file() {
        assert!(prepare_sqlite_file("sqlite::memory:").is_ok());
        assert!(prepare_sqlite_file("postgres://x").is_err());
    }
}
