//! # clical - terminal calendar
//!
//! An interactive month calendar for the terminal with short tasks attached
//! to minute-precision date-times.
//!
//! ## Quick Start
//!
//! ```bash
//! # Open the calendar on today
//! clical
//!
//! # Open a specific date
//! clical --year 2025 --month Feb --day 14
//!
//! # Attach a task, then list it by selecting the day in the grid
//! clical task add --date "2025-02-14 18:30" "dinner reservation"
//!
//! # Remove it again
//! clical task delete --date "2025-02-14 18:30"
//!
//! # Recolour the interface
//! clical config --cursor-color cyan --task-title magenta
//! ```
//!
//! ## Keys
//!
//! Arrow keys move the selection between days; Ctrl+N / Ctrl+P page to the
//! next / previous month; `q`, `Esc` or Ctrl+C leave.
//!
//! Data is stored locally in `~/.clical/calendar.json`; a log file sits next
//! to it (filter with `RUST_LOG`).

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use chrono::Local;
use clap::Parser;

pub mod calendar;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod store;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod run;
}

use cli::Cli;
use cmd::Commands;
use config::DisplayConfig;
use error::CalError;
use store::Store;

const DATA_DIR: &str = ".clical";
const DB_FILE: &str = "calendar.json";
const LOG_FILE: &str = "clical.log";

fn main() {
    let cli = Cli::parse();

    let data_dir = data_dir();
    if let Err(e) = fs::create_dir_all(&data_dir) {
        eprintln!("failed to create data directory {}: {}", data_dir.display(), e);
        process::exit(1);
    }
    init_logging(&data_dir);

    let store = Store::new(data_dir.join(DB_FILE));
    if let Err(err) = run(cli, store) {
        tracing::error!(%err, "exiting");
        eprintln!("error: {err}");
        process::exit(err.exit_code());
    }
}

fn run(cli: Cli, store: Store) -> Result<(), CalError> {
    store.init()?;

    // one-shot subcommands never enter the interactive loop
    if let Some(command) = cli.command {
        return match command {
            Commands::Task { action } => cmd::cmd_task(&store, action),
            Commands::Config {
                bg_color,
                cursor_color,
                task_color,
                task_title,
                calendar_color,
            } => cmd::cmd_config(
                &store,
                bg_color,
                cursor_color,
                task_color,
                task_title,
                calendar_color,
            ),
            Commands::Completions { shell } => {
                cmd::cmd_completions(shell);
                Ok(())
            }
        };
    }

    let today = Local::now().date_naive();
    let start = calendar::resolve_start_date(today, cli.year, cli.month, cli.day)?;
    let config = DisplayConfig::effective(store.load_config()?);
    tui::run::run_tui(store, config, start)
}

/// The fixed per-user data directory; not overridable from the command line.
fn data_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(DATA_DIR)
}

/// Log to a file in the data directory. The interactive loop owns stdout, so
/// diagnostics must go elsewhere.
fn init_logging(dir: &Path) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    match File::options().create(true).append(true).open(dir.join(LOG_FILE)) {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .init();
        }
        Err(e) => eprintln!("failed to open log file: {e}"),
    }
}
