//! Error types shared across the CLI and the TUI.

use crate::calendar::MonthName;

/// Errors raised by the persistence store.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// A task already occupies the requested date-time.
    #[error("a task already exists at {stamp}")]
    Conflict { stamp: String },
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("storage contains an unreadable timestamp {stamp:?}")]
    BadStamp { stamp: String },
}

/// Top-level application error.
///
/// Validation failures map to exit code 2, matching clap's own usage-error
/// status; everything else exits 1.
#[derive(thiserror::Error, Debug)]
pub enum CalError {
    #[error("invalid date-time {input:?}, expected \"YYYY-MM-DD HH:MM\"")]
    InvalidDateTime { input: String },

    #[error("day {day} is out of range for {month} {year}")]
    DayOutOfRange { day: u32, month: MonthName, year: i32 },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CalError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CalError::InvalidDateTime { .. } | CalError::DayOutOfRange { .. } => 2,
            CalError::Store(_) | CalError::Io(_) => 1,
        }
    }
}
