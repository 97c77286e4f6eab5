//! Interactive student record manager.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Start logging, initialize the store, then hand stdin to the form session.

mod command;
mod render;
mod repl;

use clap::Parser;
use log::error;
use rollbook_core::{default_log_level, init_logging, StudentForm, StudentStore, DEFAULT_DB_FILE_NAME};
use std::path::PathBuf;
use std::process::ExitCode;

const LOG_DIR_NAME: &str = "rollbook-logs";

#[derive(Parser)]
#[command(version, about = "Manage student records from an interactive prompt", long_about = None)]
struct Cli {
    /// SQLite file holding the student table; created when missing
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "ROLLBOOK_DB_PATH",
        default_value = DEFAULT_DB_FILE_NAME
    )]
    db: PathBuf,

    /// Log level; defaults to debug for debug builds and info otherwise
    #[arg(long, value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error"])]
    log_level: Option<String>,

    /// Directory for rolling log files
    #[arg(long, value_name = "DIR", env = "ROLLBOOK_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    let log_dir = resolve_log_dir(cli.log_dir);
    if let Err(err) = init_logging(level, &log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let store = match StudentStore::open(&cli.db) {
        Ok(store) => store,
        Err(err) => {
            error!("event=store_open module=cli status=error error={err}");
            eprintln!(
                "error: cannot open student database `{}`: {err}",
                cli.db.display()
            );
            return ExitCode::FAILURE;
        }
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    match repl::run_repl(StudentForm::new(store), stdin.lock(), stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=session_end module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn resolve_log_dir(configured: Option<PathBuf>) -> PathBuf {
    match configured {
        Some(dir) if dir.is_relative() => std::env::current_dir()
            .map(|cwd| cwd.join(&dir))
            .unwrap_or(dir),
        Some(dir) => dir,
        None => std::env::temp_dir().join(LOG_DIR_NAME),
    }
}
