//! Calendar application state for the terminal user interface.
//!
//! `CalendarApp` owns the view state: the selected date, the rendered month
//! grid, and the cursor position within the grid's character layout. Input
//! handling moves the cursor cell by cell; rendering draws the grid with the
//! selected day highlighted and the selected day's tasks in a side panel.

use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};

use crate::calendar::{add_months, MonthGrid, DAY_CELL, FIRST_WEEK_ROW};
use crate::config::DisplayConfig;
use crate::error::CalError;
use crate::store::{Store, TaskEntry};
use crate::tui::colors::slot_color;

/// Direction of a single-cell cursor move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDir {
    Up,
    Down,
    Left,
    Right,
}

/// Main application state for the interactive calendar.
pub struct CalendarApp {
    store: Store,
    config: DisplayConfig,
    date: NaiveDate,
    grid: MonthGrid,
    cursor: (usize, usize),
    tasks: Vec<TaskEntry>,
}

impl CalendarApp {
    pub fn new(store: Store, config: DisplayConfig, start: NaiveDate) -> Result<Self, CalError> {
        let grid = MonthGrid::new(start.year(), start.month());
        // a valid date always has a cell in its own month's grid
        let cursor = grid.locate(start.day()).unwrap();
        let mut app = CalendarApp {
            store,
            config,
            date: start,
            grid,
            cursor,
            tasks: Vec::new(),
        };
        app.refresh_tasks()?;
        Ok(app)
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.date
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub fn tasks(&self) -> &[TaskEntry] {
        &self.tasks
    }

    /// Draw/input loop. Returns once the user asks to leave; the caller
    /// restores the terminal.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), CalError> {
        loop {
            terminal.draw(|f| self.render(f))?;
            if self.handle_input()? {
                return Ok(());
            }
        }
    }

    fn handle_input(&mut self) -> Result<bool, CalError> {
        if !event::poll(Duration::from_millis(200))? {
            return Ok(false);
        }
        let Event::Key(key) = event::read()? else {
            return Ok(false);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(false);
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
            KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.change_month(1)?;
            }
            KeyCode::Char('p') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.change_month(-1)?;
            }
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Up => {
                self.try_move(MoveDir::Up)?;
            }
            KeyCode::Down => {
                self.try_move(MoveDir::Down)?;
            }
            KeyCode::Left => {
                self.try_move(MoveDir::Left)?;
            }
            KeyCode::Right => {
                self.try_move(MoveDir::Right)?;
            }
            _ => {}
        }
        Ok(false)
    }

    /// Attempt a single-cell cursor move. A move is accepted only when the
    /// destination stays inside the week rows and holds a day token; rejected
    /// moves leave the whole view state untouched.
    pub fn try_move(&mut self, dir: MoveDir) -> Result<bool, CalError> {
        let (row, col) = self.cursor;
        let target = match dir {
            MoveDir::Up => (row > FIRST_WEEK_ROW).then(|| (row - 1, col)),
            MoveDir::Down => (row + 1 < self.grid.rows()).then(|| (row + 1, col)),
            MoveDir::Left => (col >= DAY_CELL).then(|| (row, col - DAY_CELL)),
            MoveDir::Right => {
                (col + DAY_CELL < self.grid.row_width()).then(|| (row, col + DAY_CELL))
            }
        };
        let Some((new_row, new_col)) = target else {
            tracing::debug!(?dir, "move rejected at grid edge");
            return Ok(false);
        };
        let Some(day) = self.grid.day_at(new_row, new_col) else {
            tracing::debug!(?dir, new_row, new_col, "move rejected, blank cell");
            return Ok(false);
        };
        let Some(date) = self.date.with_day(day) else {
            return Ok(false);
        };
        self.cursor = (new_row, new_col);
        self.date = date;
        self.refresh_tasks()?;
        Ok(true)
    }

    /// Page to an adjacent month. Always succeeds: the grid is regenerated
    /// and the day-of-month carried over, clamped to the new month's length.
    pub fn change_month(&mut self, months: i32) -> Result<(), CalError> {
        self.date = add_months(self.date, months);
        self.grid = MonthGrid::new(self.date.year(), self.date.month());
        self.cursor = self.grid.locate(self.date.day()).unwrap();
        tracing::debug!(date = %self.date, "month changed");
        self.refresh_tasks()
    }

    /// Re-read the selected day's tasks. Called on every accepted state
    /// change so the panel never shows stale rows.
    fn refresh_tasks(&mut self) -> Result<(), CalError> {
        self.tasks = self.store.tasks_for_day(self.date)?;
        Ok(())
    }

    fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(28), Constraint::Min(0)])
            .split(f.area());
        self.render_grid(f, chunks[0]);
        self.render_tasks(f, chunks[1]);
    }

    fn render_grid(&self, f: &mut Frame, area: Rect) {
        let bg = slot_color(self.config.bg_color);
        let grid_style = Style::default()
            .fg(slot_color(self.config.calendar_color))
            .bg(bg);
        let cursor_style = Style::default()
            .fg(slot_color(self.config.cursor_color))
            .bg(bg)
            .add_modifier(Modifier::REVERSED);

        let (cursor_row, cursor_col) = self.cursor;
        let mut text: Vec<Line> = vec![Line::default()];
        for (row, raw) in self.grid.lines().iter().enumerate() {
            if row == cursor_row {
                let before = &raw[..cursor_col];
                let token = &raw[cursor_col..cursor_col + 2];
                let after = &raw[cursor_col + 2..];
                text.push(Line::from(vec![
                    Span::styled(before.to_string(), grid_style),
                    Span::styled(token.to_string(), cursor_style),
                    Span::styled(after.to_string(), grid_style),
                ]));
            } else {
                text.push(Line::from(Span::styled(raw.clone(), grid_style)));
            }
        }
        f.render_widget(Paragraph::new(text), area);
    }

    fn render_tasks(&self, f: &mut Frame, area: Rect) {
        let bg = slot_color(self.config.bg_color);
        let title_style = Style::default()
            .fg(slot_color(self.config.task_title))
            .bg(bg);
        let task_style = Style::default()
            .fg(slot_color(self.config.task_color))
            .bg(bg);

        let mut text = vec![
            Line::default(),
            Line::from(Span::styled("Tasks:", title_style)),
        ];
        for entry in &self.tasks {
            text.push(Line::from(Span::styled(
                format!("{}: {}", entry.when.format("%H:%M"), entry.description),
                task_style,
            )));
        }
        f.render_widget(Paragraph::new(text), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn app_at(year: i32, month: u32, day: u32) -> (tempfile::TempDir, CalendarApp) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("calendar.json"));
        store.init().unwrap();
        let start = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        let app = CalendarApp::new(store, DisplayConfig::default(), start).unwrap();
        (dir, app)
    }

    fn stamp(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn cursor_starts_on_the_selected_day() {
        let (_dir, app) = app_at(2025, 1, 15);
        let (row, col) = app.cursor();
        assert_eq!(app.grid.day_at(row, col), Some(15));
    }

    #[test]
    fn up_from_the_first_week_row_is_rejected() {
        // Jan 1, 2025 sits in the first week row
        let (_dir, mut app) = app_at(2025, 1, 1);
        let before = app.cursor();
        assert!(!app.try_move(MoveDir::Up).unwrap());
        assert_eq!(app.cursor(), before);
        assert_eq!(app.selected_date(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn moves_into_blank_cells_are_rejected() {
        // Jan 2025 starts on Wednesday: left of day 1 is padding
        let (_dir, mut app) = app_at(2025, 1, 1);
        let before = app.cursor();
        assert!(!app.try_move(MoveDir::Left).unwrap());
        assert_eq!(app.cursor(), before);

        // below day 31 there is no week row at all
        let (_dir, mut app) = app_at(2025, 1, 31);
        assert!(!app.try_move(MoveDir::Down).unwrap());
        assert_eq!(app.selected_date().day(), 31);
    }

    #[test]
    fn accepted_moves_change_the_selected_date() {
        let (_dir, mut app) = app_at(2025, 1, 15);
        assert!(app.try_move(MoveDir::Right).unwrap());
        assert_eq!(app.selected_date().day(), 16);
        assert!(app.try_move(MoveDir::Down).unwrap());
        assert_eq!(app.selected_date().day(), 23);
        assert!(app.try_move(MoveDir::Up).unwrap());
        assert!(app.try_move(MoveDir::Left).unwrap());
        assert_eq!(app.selected_date().day(), 15);
    }

    #[test]
    fn cursor_never_lands_on_a_blank_cell() {
        let (_dir, mut app) = app_at(2025, 1, 15);
        for dir in [
            MoveDir::Right,
            MoveDir::Right,
            MoveDir::Right,
            MoveDir::Down,
            MoveDir::Down,
            MoveDir::Right,
            MoveDir::Right,
            MoveDir::Right,
            MoveDir::Right,
            MoveDir::Up,
            MoveDir::Left,
            MoveDir::Down,
            MoveDir::Down,
            MoveDir::Down,
        ] {
            app.try_move(dir).unwrap();
            let (row, col) = app.cursor();
            let day = app.grid.day_at(row, col);
            assert_eq!(day, Some(app.selected_date().day()));
        }
    }

    #[test]
    fn repeated_right_stops_at_the_row_edge() {
        let (_dir, mut app) = app_at(2025, 1, 15);
        for _ in 0..20 {
            app.try_move(MoveDir::Right).unwrap();
            let (row, col) = app.cursor();
            assert!(app.grid.day_at(row, col).is_some());
        }
        // Jan 15, 2025 is a Wednesday; its week ends on Sunday the 19th
        assert_eq!(app.selected_date().day(), 19);
    }

    #[test]
    fn month_paging_preserves_the_day_of_month() {
        let (_dir, mut app) = app_at(2024, 1, 15);
        app.change_month(1).unwrap();
        assert_eq!(
            app.selected_date(),
            NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()
        );
        app.change_month(-1).unwrap();
        assert_eq!(
            app.selected_date(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );

        let (row, col) = app.cursor();
        assert_eq!(app.grid.day_at(row, col), Some(15));
    }

    #[test]
    fn month_paging_clamps_short_months() {
        let (_dir, mut app) = app_at(2025, 1, 31);
        app.change_month(1).unwrap();
        assert_eq!(
            app.selected_date(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
    }

    #[test]
    fn task_panel_follows_the_selected_day() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("calendar.json"));
        store.init().unwrap();
        store.add_task(stamp("2025-01-16 09:00"), "standup").unwrap();
        store.add_task(stamp("2025-01-16 12:30"), "lunch").unwrap();
        store.add_task(stamp("2025-01-15 08:00"), "gym").unwrap();

        let start = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let mut app = CalendarApp::new(store, DisplayConfig::default(), start).unwrap();
        assert_eq!(app.tasks().len(), 1);

        app.try_move(MoveDir::Right).unwrap();
        let times: Vec<String> = app
            .tasks()
            .iter()
            .map(|t| t.when.format("%H:%M").to_string())
            .collect();
        assert_eq!(times, ["09:00", "12:30"]);
    }
}
