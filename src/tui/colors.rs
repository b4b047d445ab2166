//! Colour-slot mapping for the terminal user interface.

use ratatui::style::Color;

/// Map a configured colour slot to a terminal colour.
///
/// Slot numbers follow the classic eight-colour order; slot 0 (black) maps
/// to the terminal default so unthemed setups keep their native scheme.
pub fn slot_color(slot: u8) -> Color {
    match slot {
        1 => Color::Red,
        2 => Color::Green,
        3 => Color::Yellow,
        4 => Color::Blue,
        5 => Color::Magenta,
        6 => Color::Cyan,
        7 => Color::White,
        _ => Color::Reset,
    }
}
