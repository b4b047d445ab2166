//! Month-grid text layout and date arithmetic.
//!
//! The grid is the conventional 20-column month layout, weeks starting on
//! Monday:
//!
//! ```text
//!     January 2025
//! Mo Tu We Th Fr Sa Su
//!        1  2  3  4  5
//!  6  7  8  9 10 11 12
//! ...
//! ```
//!
//! Day cells are three columns wide (two right-justified digits plus a
//! separator), which is what the cursor arithmetic in the TUI steps across.

use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;

use crate::error::CalError;

/// Width of one day cell, including the separating space.
pub const DAY_CELL: usize = 3;

/// Index of the first week row (rows 0 and 1 are the title and weekday
/// header).
pub const FIRST_WEEK_ROW: usize = 2;

const WEEK_WIDTH: usize = 7 * DAY_CELL - 1;

/// Month abbreviations accepted on the command line. `Avg` selects August.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "PascalCase")]
pub enum MonthName {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Avg,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl MonthName {
    /// Month number, 1-based.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn from_number(month: u32) -> Option<MonthName> {
        match month {
            1 => Some(MonthName::Jan),
            2 => Some(MonthName::Feb),
            3 => Some(MonthName::Mar),
            4 => Some(MonthName::Apr),
            5 => Some(MonthName::May),
            6 => Some(MonthName::Jun),
            7 => Some(MonthName::Jul),
            8 => Some(MonthName::Avg),
            9 => Some(MonthName::Sep),
            10 => Some(MonthName::Oct),
            11 => Some(MonthName::Nov),
            12 => Some(MonthName::Dec),
            _ => None,
        }
    }
}

impl std::fmt::Display for MonthName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            MonthName::Jan => "Jan",
            MonthName::Feb => "Feb",
            MonthName::Mar => "Mar",
            MonthName::Apr => "Apr",
            MonthName::May => "May",
            MonthName::Jun => "Jun",
            MonthName::Jul => "Jul",
            MonthName::Avg => "Avg",
            MonthName::Sep => "Sep",
            MonthName::Oct => "Oct",
            MonthName::Nov => "Nov",
            MonthName::Dec => "Dec",
        })
    }
}

/// The rendered text layout of one month.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    lines: Vec<String>,
}

impl MonthGrid {
    pub fn new(year: i32, month: u32) -> Self {
        let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
        let last_day = days_in_month(year, month);
        let start_col = first.weekday().num_days_from_monday() as usize;

        let title = format!("{} {}", first.format("%B"), year);
        let mut lines = vec![
            format!("{:^width$}", title, width = WEEK_WIDTH)
                .trim_end()
                .to_string(),
            "Mo Tu We Th Fr Sa Su".to_string(),
        ];

        let mut cells: Vec<String> = vec!["  ".to_string(); start_col];
        for day in 1..=last_day {
            cells.push(format!("{:>2}", day));
            if cells.len() == 7 {
                lines.push(cells.join(" "));
                cells.clear();
            }
        }
        if !cells.is_empty() {
            cells.resize(7, "  ".to_string());
            lines.push(cells.join(" "));
        }

        MonthGrid { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn rows(&self) -> usize {
        self.lines.len()
    }

    /// Width of a week row; cursor columns run `0..row_width()` in steps of
    /// [`DAY_CELL`].
    pub fn row_width(&self) -> usize {
        self.lines
            .get(FIRST_WEEK_ROW)
            .map_or(0, |line| line.len())
    }

    /// The day value at a grid position, if the two characters there form a
    /// day token. Header rows and blank padding cells yield `None`.
    pub fn day_at(&self, row: usize, col: usize) -> Option<u32> {
        if row < FIRST_WEEK_ROW {
            return None;
        }
        let token = self.lines.get(row)?.get(col..col + 2)?;
        match token.trim().parse::<u32>() {
            Ok(day) if day >= 1 => Some(day),
            _ => None,
        }
    }

    /// Cell-aligned position of `day` within the grid.
    pub fn locate(&self, day: u32) -> Option<(usize, usize)> {
        for row in FIRST_WEEK_ROW..self.rows() {
            for col in (0..self.row_width()).step_by(DAY_CELL) {
                if self.day_at(row, col) == Some(day) {
                    return Some((row, col));
                }
            }
        }
        None
    }
}

/// Number of days in the given month, leap-year aware.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap()
        .signed_duration_since(NaiveDate::from_ymd_opt(year, month, 1).unwrap())
        .num_days() as u32
}

/// Shift a date by whole months, clamping the day-of-month to the length of
/// the target month (Jan 31 + 1 month = Feb 28/29).
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 + months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Resolve the initially displayed date from the optional CLI overrides.
///
/// Overrides apply in a fixed order: year, then month, then day. While year
/// and month are applied the carried day-of-month is clamped to the target
/// month; an explicit day override is instead validated and rejected when it
/// exceeds the month's last day.
pub fn resolve_start_date(
    today: NaiveDate,
    year: Option<i32>,
    month: Option<MonthName>,
    day: Option<u32>,
) -> Result<NaiveDate, CalError> {
    let year = year.unwrap_or_else(|| today.year());
    let month = month.map(MonthName::number).unwrap_or_else(|| today.month());
    let last_day = days_in_month(year, month);

    let day = match day {
        Some(day) if day > last_day => {
            return Err(CalError::DayOutOfRange {
                day,
                // month came from a MonthName or an existing date
                month: MonthName::from_number(month).unwrap(),
                year,
            });
        }
        Some(day) => day,
        None => today.day().min(last_day),
    };

    Ok(NaiveDate::from_ymd_opt(year, month, day).unwrap())
}
