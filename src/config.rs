//! Display configuration: colour slots, defaults, and the persisted record.
//!
//! Five slots control the interface colours. The persisted record is
//! all-or-nothing on read: unless every slot has been saved at some point,
//! the whole record is ignored and the hard-coded defaults apply. Writes are
//! partial; only the fields present in a [`ConfigPatch`] are touched.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Colours accepted on the command line, in slot-number order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorName {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl ColorName {
    /// The slot number stored in the config record.
    pub fn slot(self) -> u8 {
        match self {
            ColorName::Black => 0,
            ColorName::Red => 1,
            ColorName::Green => 2,
            ColorName::Yellow => 3,
            ColorName::Blue => 4,
            ColorName::Magenta => 5,
            ColorName::Cyan => 6,
            ColorName::White => 7,
        }
    }
}

/// Fully-resolved colour configuration used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub bg_color: u8,
    pub cursor_color: u8,
    pub task_color: u8,
    pub task_title: u8,
    pub calendar_color: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            bg_color: 0,
            cursor_color: 1,
            task_color: 1,
            task_title: 3,
            calendar_color: 0,
        }
    }
}

impl DisplayConfig {
    /// Two-tier lookup: the persisted record when complete, else defaults.
    pub fn effective(stored: Option<DisplayConfig>) -> Self {
        match stored {
            Some(config) => config,
            None => {
                tracing::info!("no complete user configuration, using defaults");
                DisplayConfig::default()
            }
        }
    }
}

/// The single persisted config record. Slots start out null and stay null
/// until explicitly set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRecord {
    pub bg_color: Option<u8>,
    pub cursor_color: Option<u8>,
    pub task_color: Option<u8>,
    pub task_title: Option<u8>,
    pub calendar_color: Option<u8>,
}

impl ConfigRecord {
    /// `Some` only when every slot is populated.
    pub fn complete(&self) -> Option<DisplayConfig> {
        Some(DisplayConfig {
            bg_color: self.bg_color?,
            cursor_color: self.cursor_color?,
            task_color: self.task_color?,
            task_title: self.task_title?,
            calendar_color: self.calendar_color?,
        })
    }

    /// Overwrite the slots named by `patch`, leaving the rest as they are.
    pub fn apply(&mut self, patch: &ConfigPatch) {
        if let Some(c) = patch.bg_color {
            self.bg_color = Some(c);
        }
        if let Some(c) = patch.cursor_color {
            self.cursor_color = Some(c);
        }
        if let Some(c) = patch.task_color {
            self.task_color = Some(c);
        }
        if let Some(c) = patch.task_title {
            self.task_title = Some(c);
        }
        if let Some(c) = patch.calendar_color {
            self.calendar_color = Some(c);
        }
    }
}

/// A partial configuration update built from CLI flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigPatch {
    pub bg_color: Option<u8>,
    pub cursor_color: Option<u8>,
    pub task_color: Option<u8>,
    pub task_title: Option<u8>,
    pub calendar_color: Option<u8>,
}

impl ConfigPatch {
    pub fn is_empty(&self) -> bool {
        self.bg_color.is_none()
            && self.cursor_color.is_none()
            && self.task_color.is_none()
            && self.task_title.is_none()
            && self.calendar_color.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_numbers_follow_declaration_order() {
        assert_eq!(ColorName::Black.slot(), 0);
        assert_eq!(ColorName::Yellow.slot(), 3);
        assert_eq!(ColorName::White.slot(), 7);
    }

    #[test]
    fn incomplete_record_is_not_a_config() {
        let record = ConfigRecord {
            bg_color: Some(4),
            ..ConfigRecord::default()
        };
        assert_eq!(record.complete(), None);
        assert_eq!(
            DisplayConfig::effective(record.complete()),
            DisplayConfig::default()
        );
    }

    #[test]
    fn apply_touches_only_supplied_fields() {
        let mut record = ConfigRecord {
            cursor_color: Some(2),
            ..ConfigRecord::default()
        };
        record.apply(&ConfigPatch {
            bg_color: Some(7),
            ..ConfigPatch::default()
        });
        assert_eq!(record.bg_color, Some(7));
        assert_eq!(record.cursor_color, Some(2));
        assert_eq!(record.task_color, None);
    }

    #[test]
    fn full_record_wins_over_defaults() {
        let record = ConfigRecord {
            bg_color: Some(0),
            cursor_color: Some(6),
            task_color: Some(2),
            task_title: Some(5),
            calendar_color: Some(7),
        };
        let config = DisplayConfig::effective(record.complete());
        assert_eq!(config.cursor_color, 6);
        assert_eq!(config.calendar_color, 7);
    }
}
