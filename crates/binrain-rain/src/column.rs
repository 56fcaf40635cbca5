//! Per-column rain state.

use std::collections::VecDeque;

use binrain_core::{RainSettings, Viewport};
use rand::Rng;

/// State for a single rain column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Vertical offset of the trail head, in pixels.
    pub position: f32,
    /// Trail glyphs, newest first.
    pub trail: VecDeque<char>,
}

impl Column {
    /// Create a column at `position` with an empty trail.
    pub fn new(position: f32) -> Self {
        Self {
            position,
            trail: VecDeque::new(),
        }
    }

    /// Opacity of the glyph at `trail_index` for the current trail length.
    ///
    /// The head is fully opaque and the tail fades toward zero.
    pub fn opacity(&self, trail_index: usize) -> f32 {
        if self.trail.is_empty() {
            return 0.0;
        }
        1.0 - trail_index as f32 / self.trail.len() as f32
    }

    /// Vertical offset of the glyph at `trail_index`.
    pub fn glyph_y(&self, trail_index: usize, cell_size: u16) -> f32 {
        self.position - (trail_index as f32 * f32::from(cell_size))
    }

    /// Advance the column by one tick.
    ///
    /// Pushes a fresh glyph at the head, evicts from the tail beyond the
    /// configured length and moves down one cell. Past the bottom edge the
    /// column jumps back to the top with `reset_probability`.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R, settings: &RainSettings, height: f32) {
        self.trail.push_front(settings.glyphs.pick(rng.random()));
        self.trail.truncate(settings.trail_length);
        self.position += f32::from(settings.cell_size);

        if self.position > height && rng.random_bool(settings.reset_probability) {
            self.position = 0.0;
        }
    }
}

/// Create one column per glyph slot, each at a random height.
pub fn init_columns<R: Rng + ?Sized>(
    viewport: Viewport,
    settings: &RainSettings,
    rng: &mut R,
) -> Vec<Column> {
    let height = viewport.height as f32;
    (0..viewport.column_count(settings.cell_size))
        .map(|_| {
            let position = if height > 0.0 {
                rng.random_range(0.0..height)
            } else {
                0.0
            };
            Column::new(position)
        })
        .collect()
}
