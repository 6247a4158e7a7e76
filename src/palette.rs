//! Colors and the fixed palette of selectable shape colors.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default palette, in button order
pub const DEFAULT_COLORS: [&str; 5] = ["#1E90FF", "#FF1493", "#32CD32", "#FF8C00", "#4B0082"];

/// Names for the default palette entries
const KNOWN_NAMES: [(&str, &str); 5] = [
    ("#1E90FF", "DodgerBlue"),
    ("#FF1493", "DeepPink"),
    ("#32CD32", "LimeGreen"),
    ("#FF8C00", "DarkOrange"),
    ("#4B0082", "Indigo"),
];

/// 24-bit RGB color, written as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uppercase `#RRGGBB` form
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Convert to ratatui Color for terminal rendering
    pub fn to_ratatui(self) -> ratatui::style::Color {
        ratatui::style::Color::Rgb(self.r, self.g, self.b)
    }

    /// Display name for the status bar
    pub fn name(self) -> String {
        let hex = self.to_hex();
        KNOWN_NAMES
            .iter()
            .find(|(known, _)| *known == hex)
            .map(|(_, name)| (*name).to_string())
            .unwrap_or(hex)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("expected #RRGGBB, got {s:?}"));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| format!("bad color {s:?}: {e}"))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// The default palette colors
pub fn default_colors() -> Vec<Color> {
    DEFAULT_COLORS
        .iter()
        .filter_map(|hex| hex.parse().ok())
        .collect()
}

/// Border drawn around a palette button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    /// The active color
    Highlighted,
    Plain,
}

/// One clickable color swatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteButton {
    pub color: Color,
    pub border: Border,
}

/// Ordered set of color buttons, at most one highlighted
#[derive(Debug, Clone, Default)]
pub struct Palette {
    buttons: Vec<PaletteButton>,
}

impl Palette {
    /// One plain button per color, in order
    pub fn new(colors: impl IntoIterator<Item = Color>) -> Self {
        Self {
            buttons: colors
                .into_iter()
                .map(|color| PaletteButton {
                    color,
                    border: Border::Plain,
                })
                .collect(),
        }
    }

    /// Re-draw every border: highlighted for `color`, plain for the rest.
    /// Returns the index of the highlighted button, if `color` is in the palette.
    pub fn highlight(&mut self, color: Color) -> Option<usize> {
        let mut active = None;
        for (i, button) in self.buttons.iter_mut().enumerate() {
            button.border = if button.color == color && active.is_none() {
                active = Some(i);
                Border::Highlighted
            } else {
                Border::Plain
            };
        }
        active
    }

    /// Index of the highlighted button
    pub fn active_index(&self) -> Option<usize> {
        self.buttons
            .iter()
            .position(|b| b.border == Border::Highlighted)
    }

    pub fn active_color(&self) -> Option<Color> {
        self.active_index().map(|i| self.buttons[i].color)
    }

    pub fn first(&self) -> Option<Color> {
        self.buttons.first().map(|b| b.color)
    }

    pub fn get(&self, index: usize) -> Option<&PaletteButton> {
        self.buttons.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PaletteButton> {
        self.buttons.iter()
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_hex() {
        let color: Color = "#1e90ff".parse().unwrap();
        assert_eq!(color, Color::rgb(0x1E, 0x90, 0xFF));
        assert_eq!(color.to_hex(), "#1E90FF");
        assert_eq!(color.name(), "DodgerBlue");
        assert_eq!(Color::rgb(1, 2, 3).name(), "#010203");
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!("#12345".parse::<Color>().is_err());
        assert!("#GG0000".parse::<Color>().is_err());
        assert!("".parse::<Color>().is_err());
    }

    #[test]
    fn highlight_marks_exactly_one() {
        let colors = default_colors();
        let mut palette = Palette::new(colors.clone());
        assert_eq!(palette.active_index(), None);

        for (i, color) in colors.iter().enumerate() {
            assert_eq!(palette.highlight(*color), Some(i));
            let highlighted = palette
                .iter()
                .filter(|b| b.border == Border::Highlighted)
                .count();
            assert_eq!(highlighted, 1);
            assert_eq!(palette.active_color(), Some(*color));
        }
    }

    #[test]
    fn unknown_color_clears_highlight() {
        let mut palette = Palette::new(default_colors());
        palette.highlight(palette.first().unwrap());
        assert_eq!(palette.highlight(Color::rgb(0, 0, 0)), None);
        assert_eq!(palette.active_index(), None);
    }
}
