use clap::Parser;

use crate::calendar::MonthName;
use crate::cmd::Commands;

/// Interactive month calendar for the terminal.
/// Run with no arguments to open the current month; tasks for the selected
/// day are listed next to the grid.
#[derive(Parser)]
#[command(name = "clical", version, about = "Terminal calendar with per-minute tasks")]
pub struct Cli {
    /// Year to open the calendar on.
    #[arg(long)]
    pub year: Option<i32>,

    /// Month to open the calendar on, as a three-letter abbreviation.
    #[arg(long, value_enum)]
    pub month: Option<MonthName>,

    /// Day of the month to open the calendar on.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=31))]
    pub day: Option<u32>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
