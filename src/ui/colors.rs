//! Color theme definitions for the UI.
//!
//! Fixed theme colors plus lookup of configured color resources.

use ratatui::style::Color;

use apprate::{ResourceKey, ResourceTable};

/// Primary accent color (used for titles, highlights)
pub const PRIMARY: Color = Color::Rgb(56, 189, 248); // Bright cyan
/// Background for the selected button
pub const SELECTION: Color = Color::Rgb(99, 102, 241); // Indigo
/// Text on selection
pub const SELECTION_TEXT: Color = Color::White;
/// Muted text color
pub const MUTED: Color = Color::Rgb(148, 163, 184); // Brighter gray
/// Warning color
pub const WARNING: Color = Color::Rgb(251, 191, 36); // Bright amber
/// Success color
pub const SUCCESS: Color = Color::Rgb(74, 222, 128); // Bright green
/// Border color
pub const BORDER: Color = Color::Rgb(129, 140, 248); // Light indigo
/// Key highlight color (for keyboard shortcuts)
pub const KEY: Color = Color::Rgb(244, 114, 182); // Bright pink
/// Accent color for note descriptions
pub const ACCENT: Color = Color::Rgb(192, 132, 252); // Bright purple

/// Resolves a configured color key, falling back when the key is unset,
/// unknown or not a `#rrggbb` value.
pub fn resolve(resources: &ResourceTable, key: Option<&ResourceKey>, fallback: Color) -> Color {
    key.and_then(|key| resources.color(key))
        .and_then(parse_hex)
        .unwrap_or(fallback)
}

fn parse_hex(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
