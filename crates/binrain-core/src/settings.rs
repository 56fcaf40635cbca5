//! Tunables for the rain and the intro sequence.

use std::time::Duration;

/// Glyph cell size in pixels.
pub const DEFAULT_CELL_SIZE: u16 = 16;

/// Maximum number of glyphs in a column trail.
pub const DEFAULT_TRAIL_LENGTH: usize = 20;

/// Time between rain ticks (~30 FPS).
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(25);

/// Chance that an off-screen column jumps back to the top on a given tick.
pub const DEFAULT_RESET_PROBABILITY: f64 = 0.025;

/// The two symbols a rain trail is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs([char; 2]);

impl Glyphs {
    pub const fn new(first: char, second: char) -> Self {
        Self([first, second])
    }

    /// Parse a string of exactly two characters.
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(a), Some(b), None) => Some(Self::new(a, b)),
            _ => None,
        }
    }

    /// Select a glyph: `false` picks the first symbol, `true` the second.
    pub fn pick(&self, second: bool) -> char {
        self.0[usize::from(second)]
    }

    pub fn contains(&self, c: char) -> bool {
        self.0.contains(&c)
    }

    pub fn as_array(&self) -> [char; 2] {
        self.0
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        Self::new('0', '1')
    }
}

/// Rain animator configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainSettings {
    /// Width and height of one glyph cell, in pixels.
    pub cell_size: u16,
    /// Maximum trail length per column.
    pub trail_length: usize,
    /// Fixed tick interval.
    pub tick_interval: Duration,
    /// Symbols the trails are drawn from.
    pub glyphs: Glyphs,
    /// Per-tick reset chance once a column is past the bottom edge.
    pub reset_probability: f64,
}

impl Default for RainSettings {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            trail_length: DEFAULT_TRAIL_LENGTH,
            tick_interval: DEFAULT_TICK_INTERVAL,
            glyphs: Glyphs::default(),
            reset_probability: DEFAULT_RESET_PROBABILITY,
        }
    }
}

/// Timings of the intro reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntroTiming {
    /// Delay between start and the drawing becoming visible.
    pub reveal_delay: Duration,
    /// How long each segment takes to draw.
    pub stroke_duration: Duration,
    /// Delay between consecutive segments starting.
    pub stagger: Duration,
    /// Pause after the last segment is drawn.
    pub pause: Duration,
    /// Duration of the intro container's hide transition.
    pub fade: Duration,
}

impl IntroTiming {
    /// Start delay of the segment at `index`, relative to the reveal.
    pub fn stroke_delay(&self, index: usize) -> Duration {
        self.stagger
            .saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
    }
}

impl Default for IntroTiming {
    fn default() -> Self {
        Self {
            reveal_delay: Duration::from_millis(200),
            stroke_duration: Duration::from_millis(500),
            stagger: Duration::from_millis(300),
            pause: Duration::from_millis(500),
            fade: Duration::from_millis(1000),
        }
    }
}

/// Drawing surface size in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Viewport covering a terminal area where each cell is `cell_size` pixels square.
    pub fn from_cells(cols: u16, rows: u16, cell_size: u16) -> Self {
        Self {
            width: u32::from(cols) * u32::from(cell_size),
            height: u32::from(rows) * u32::from(cell_size),
        }
    }

    /// Number of glyph columns that fit across the viewport.
    pub fn column_count(&self, cell_size: u16) -> usize {
        if cell_size == 0 {
            return 0;
        }
        (self.width / u32::from(cell_size)) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyphs_parse() {
        assert_eq!(Glyphs::parse("01"), Some(Glyphs::new('0', '1')));
        assert_eq!(Glyphs::parse("ab"), Some(Glyphs::new('a', 'b')));
        assert_eq!(Glyphs::parse("0"), None);
        assert_eq!(Glyphs::parse("012"), None);
        assert_eq!(Glyphs::parse(""), None);
    }

    #[test]
    fn test_glyphs_pick() {
        let glyphs = Glyphs::default();
        assert_eq!(glyphs.pick(false), '0');
        assert_eq!(glyphs.pick(true), '1');
        assert!(glyphs.contains('1'));
        assert!(!glyphs.contains('2'));
    }

    #[test]
    fn test_column_count() {
        assert_eq!(Viewport::new(1600, 900).column_count(16), 100);
        assert_eq!(Viewport::new(1615, 900).column_count(16), 100);
        assert_eq!(Viewport::new(0, 900).column_count(16), 0);
        assert_eq!(Viewport::new(1600, 900).column_count(0), 0);
    }

    #[test]
    fn test_viewport_from_cells() {
        assert_eq!(Viewport::from_cells(80, 24, 16), Viewport::new(1280, 384));
    }

    #[test]
    fn test_stroke_delay() {
        let timing = IntroTiming::default();
        assert_eq!(timing.stroke_delay(0), Duration::ZERO);
        assert_eq!(timing.stroke_delay(3), Duration::from_millis(900));
    }
}
