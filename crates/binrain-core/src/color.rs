//! Color utility functions.

use ratatui::style::Color;

/// Blend `fg` over `bg` with the given opacity (0.0-1.0).
///
/// Terminals have no alpha channel, so translucent glyphs are emulated by
/// mixing toward the background color.
pub fn blend(fg: (u8, u8, u8), bg: (u8, u8, u8), opacity: f32) -> Color {
    let (r, g, b) = mix(fg, bg, opacity);
    Color::Rgb(r, g, b)
}

/// Linear mix of two RGB triples; `amount` 1.0 yields `fg`.
pub fn mix(fg: (u8, u8, u8), bg: (u8, u8, u8), amount: f32) -> (u8, u8, u8) {
    let amount = amount.clamp(0.0, 1.0);
    let channel = |f: u8, b: u8| -> u8 {
        let f = f32::from(f);
        let b = f32::from(b);
        (b + (f - b) * amount).round() as u8
    };
    (channel(fg.0, bg.0), channel(fg.1, bg.1), channel(fg.2, bg.2))
}
