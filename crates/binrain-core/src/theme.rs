//! Color themes for the rain and page accents.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Color theme for the rain and the page accents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorTheme {
    #[default]
    Azure,
    Cyan,
    Green,
    Magenta,
    Amber,
    White,
}

impl ColorTheme {
    /// Cycle to the next color theme.
    pub fn next(self) -> Self {
        match self {
            ColorTheme::Azure => ColorTheme::Cyan,
            ColorTheme::Cyan => ColorTheme::Green,
            ColorTheme::Green => ColorTheme::Magenta,
            ColorTheme::Magenta => ColorTheme::Amber,
            ColorTheme::Amber => ColorTheme::White,
            ColorTheme::White => ColorTheme::Azure,
        }
    }

    /// Fully opaque color of a rain glyph.
    pub fn rain_rgb(self) -> (u8, u8, u8) {
        match self {
            ColorTheme::Azure => (38, 105, 249),
            ColorTheme::Cyan => (0, 229, 255),
            ColorTheme::Green => (0, 200, 70),
            ColorTheme::Magenta => (220, 60, 200),
            ColorTheme::Amber => (255, 176, 0),
            ColorTheme::White => (230, 230, 230),
        }
    }

    /// Page background the rain is blended over.
    pub fn background_rgb(self) -> (u8, u8, u8) {
        (8, 10, 20)
    }

    /// Convert the rain color to a Ratatui color.
    pub fn color(self) -> Color {
        let (r, g, b) = self.rain_rgb();
        Color::Rgb(r, g, b)
    }

    /// Background as a Ratatui color.
    pub fn background(self) -> Color {
        let (r, g, b) = self.background_rgb();
        Color::Rgb(r, g, b)
    }

    /// Display name shown in the help line.
    pub fn name(self) -> &'static str {
        match self {
            ColorTheme::Azure => "azure",
            ColorTheme::Cyan => "cyan",
            ColorTheme::Green => "green",
            ColorTheme::Magenta => "magenta",
            ColorTheme::Amber => "amber",
            ColorTheme::White => "white",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_returns_to_start() {
        let mut theme = ColorTheme::default();
        for _ in 0..6 {
            theme = theme.next();
        }
        assert_eq!(theme, ColorTheme::Azure);
    }

    #[test]
    fn test_default_rain_color() {
        assert_eq!(ColorTheme::default().color(), Color::Rgb(38, 105, 249));
    }
}
