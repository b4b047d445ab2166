//! One-shot subcommand handlers.
//!
//! These run a single storage mutation and return without ever touching the
//! terminal; the interactive loop is bypassed entirely.

use clap::Subcommand;
use clap_complete::{generate, Shell};

use chrono::NaiveDateTime;

use crate::config::{ColorName, ConfigPatch};
use crate::error::{CalError, StoreError};
use crate::store::Store;

#[derive(Subcommand)]
pub enum Commands {
    /// Add and delete tasks.
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Configure the interface colours. Only the supplied flags change;
    /// colours take effect on the next start.
    Config {
        /// Background colour.
        #[arg(long, value_enum)]
        bg_color: Option<ColorName>,
        /// Colour of the selected-day cursor.
        #[arg(long, value_enum)]
        cursor_color: Option<ColorName>,
        /// Colour of the task lines in the side panel.
        #[arg(long, value_enum)]
        task_color: Option<ColorName>,
        /// Colour of the side panel title.
        #[arg(long, value_enum)]
        task_title: Option<ColorName>,
        /// Colour of the calendar grid text.
        #[arg(long, value_enum)]
        calendar_color: Option<ColorName>,
    },

    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task at a minute-precision date-time.
    Add {
        /// Date-time in the format "YYYY-MM-DD HH:MM", 24h clock.
        #[arg(long)]
        date: String,
        /// Description of the task.
        description: String,
    },
    /// Delete the task at exactly the given date-time.
    Delete {
        /// Date-time in the format "YYYY-MM-DD HH:MM", 24h clock.
        #[arg(long)]
        date: String,
    },
}

/// Parse a user-supplied minute-precision date-time. Validation happens
/// before any storage call.
pub fn parse_date_time(input: &str) -> Result<NaiveDateTime, CalError> {
    NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M").map_err(|_| CalError::InvalidDateTime {
        input: input.to_string(),
    })
}

pub fn cmd_task(store: &Store, action: TaskAction) -> Result<(), CalError> {
    match action {
        TaskAction::Add { date, description } => cmd_task_add(store, &date, &description),
        TaskAction::Delete { date } => cmd_task_delete(store, &date),
    }
}

fn cmd_task_add(store: &Store, date: &str, description: &str) -> Result<(), CalError> {
    let when = parse_date_time(date)?;
    match store.add_task(when, description) {
        Ok(()) => {
            tracing::info!(date, "task added");
            Ok(())
        }
        // occupied slot: logged, nothing written, still a clean exit
        Err(StoreError::Conflict { stamp }) => {
            tracing::warn!(%stamp, "task already exists, nothing added");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn cmd_task_delete(store: &Store, date: &str) -> Result<(), CalError> {
    let when = parse_date_time(date)?;
    match store.delete_task(when)? {
        0 => tracing::info!(date, "no task found to delete"),
        _ => tracing::info!(date, "task deleted"),
    }
    Ok(())
}

pub fn cmd_config(
    store: &Store,
    bg_color: Option<ColorName>,
    cursor_color: Option<ColorName>,
    task_color: Option<ColorName>,
    task_title: Option<ColorName>,
    calendar_color: Option<ColorName>,
) -> Result<(), CalError> {
    let patch = ConfigPatch {
        bg_color: bg_color.map(ColorName::slot),
        cursor_color: cursor_color.map(ColorName::slot),
        task_color: task_color.map(ColorName::slot),
        task_title: task_title.map(ColorName::slot),
        calendar_color: calendar_color.map(ColorName::slot),
    };
    if patch.is_empty() {
        tracing::info!("no colour flags supplied, leaving configuration as is");
    } else {
        tracing::info!(?patch, "updating colour configuration");
    }
    store.save_config(&patch)?;
    Ok(())
}

pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn temp_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("calendar.json"));
        store.init().unwrap();
        (dir, store)
    }

    #[test]
    fn date_times_need_minute_precision() {
        assert!(parse_date_time("2025-01-17 09:00").is_ok());
        assert!(parse_date_time("2025-01-17").is_err());
        assert!(parse_date_time("2025-01-17 09:00:00").is_err());
        assert!(parse_date_time("17.01.2025 09:00").is_err());
        assert!(parse_date_time("2025-02-30 09:00").is_err());
    }

    #[test]
    fn malformed_date_exits_2_without_touching_storage() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("calendar.json"));
        let err = cmd_task(
            &store,
            TaskAction::Add {
                date: "not-a-date".into(),
                description: "x".into(),
            },
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(!store.path().exists());

        let err = cmd_task(
            &store,
            TaskAction::Delete {
                date: "13:00".into(),
            },
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(!store.path().exists());
    }

    #[test]
    fn conflicting_add_is_logged_and_swallowed() {
        let (_dir, store) = temp_store();
        let add = |desc: &str| {
            cmd_task(
                &store,
                TaskAction::Add {
                    date: "2025-01-17 09:00".into(),
                    description: desc.into(),
                },
            )
        };
        add("standup").unwrap();
        add("retro").unwrap();

        let tasks = store
            .tasks_for_day(NaiveDate::from_ymd_opt(2025, 1, 17).unwrap())
            .unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].description, "standup");
    }

    #[test]
    fn delete_tolerates_a_missing_target() {
        let (_dir, store) = temp_store();
        cmd_task(
            &store,
            TaskAction::Delete {
                date: "2025-01-17 09:00".into(),
            },
        )
        .unwrap();
    }

    #[test]
    fn config_flags_map_to_slots() {
        let (_dir, store) = temp_store();
        cmd_config(&store, Some(ColorName::Blue), None, None, None, None).unwrap();
        // one slot alone is not a usable configuration
        assert_eq!(store.load_config().unwrap(), None);

        cmd_config(
            &store,
            None,
            Some(ColorName::Cyan),
            Some(ColorName::Green),
            Some(ColorName::Magenta),
            Some(ColorName::White),
        )
        .unwrap();
        let config = store.load_config().unwrap().unwrap();
        assert_eq!(config.bg_color, 4);
        assert_eq!(config.cursor_color, 6);
        assert_eq!(config.calendar_color, 7);
    }
}
