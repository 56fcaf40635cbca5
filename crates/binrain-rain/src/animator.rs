//! The rain animator.

use binrain_core::{RainSettings, Viewport};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::column::{Column, init_columns};
use crate::surface::GlyphSurface;

/// Falling glyph trails over a fixed viewport.
///
/// Columns are allocated once. A terminal resize does not recompute them;
/// the surface clips whatever falls outside.
#[derive(Debug)]
pub struct RainAnimator {
    settings: RainSettings,
    viewport: Viewport,
    columns: Vec<Column>,
    rng: StdRng,
    ticks: u64,
}

impl RainAnimator {
    /// Create an animator seeded from the operating system.
    pub fn new(viewport: Viewport, settings: RainSettings) -> Self {
        Self::with_rng(viewport, settings, StdRng::from_os_rng())
    }

    /// Create an animator with a fixed seed, for reproducible rain.
    pub fn with_seed(viewport: Viewport, settings: RainSettings, seed: u64) -> Self {
        Self::with_rng(viewport, settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(viewport: Viewport, settings: RainSettings, mut rng: StdRng) -> Self {
        let columns = init_columns(viewport, &settings, &mut rng);
        tracing::debug!(
            columns = columns.len(),
            width = viewport.width,
            height = viewport.height,
            "rain initialized"
        );
        Self {
            settings,
            viewport,
            columns,
            rng,
            ticks: 0,
        }
    }

    /// Repaint the surface and advance every column by one step.
    pub fn tick<S: GlyphSurface + ?Sized>(&mut self, surface: &mut S) {
        surface.clear();

        let cell_size = self.settings.cell_size;
        let height = self.viewport.height as f32;

        for (index, col) in self.columns.iter_mut().enumerate() {
            let x = index as f32 * f32::from(cell_size);
            for (trail_index, &glyph) in col.trail.iter().enumerate() {
                surface.draw_glyph(
                    x,
                    col.glyph_y(trail_index, cell_size),
                    glyph,
                    col.opacity(trail_index),
                );
            }
            col.advance(&mut self.rng, &self.settings, height);
        }

        self.ticks += 1;
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Ticks run since creation.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Surface that records every call in order.
    #[derive(Default)]
    struct Recorder {
        clears: usize,
        glyphs: Vec<(f32, f32, char, f32)>,
    }

    impl GlyphSurface for Recorder {
        fn clear(&mut self) {
            self.clears += 1;
            self.glyphs.clear();
        }

        fn draw_glyph(&mut self, x: f32, y: f32, glyph: char, opacity: f32) {
            self.glyphs.push((x, y, glyph, opacity));
        }
    }

    fn viewport() -> Viewport {
        Viewport::new(1600, 900)
    }

    #[test]
    fn test_first_tick_scenario() {
        let mut rain = RainAnimator::with_seed(viewport(), RainSettings::default(), 1);
        assert_eq!(rain.columns().len(), 100);
        let before: Vec<f32> = rain.columns().iter().map(|c| c.position).collect();

        let mut surface = Recorder::default();
        rain.tick(&mut surface);

        // Nothing to draw on the first tick: every trail starts empty.
        assert_eq!(surface.clears, 1);
        assert!(surface.glyphs.is_empty());

        for (col, start) in rain.columns().iter().zip(before) {
            assert_eq!(col.trail.len(), 1);
            let moved = start + 16.0;
            assert!(col.position == moved || (moved > 900.0 && col.position == 0.0));
        }
    }

    #[test]
    fn test_trails_bounded_after_many_ticks() {
        let settings = RainSettings::default();
        let mut rain = RainAnimator::with_seed(viewport(), settings, 9);
        let mut surface = Recorder::default();
        for _ in 0..200 {
            rain.tick(&mut surface);
            for col in rain.columns() {
                assert!(col.trail.len() <= settings.trail_length);
                assert!(settings.glyphs.contains(col.trail[0]));
            }
        }
        assert_eq!(rain.tick_count(), 200);
    }

    #[test]
    fn test_render_positions_and_opacity() {
        let settings = RainSettings::default();
        let mut rain = RainAnimator::with_seed(Viewport::new(32, 900), settings, 5);
        let mut surface = Recorder::default();
        for _ in 0..4 {
            rain.tick(&mut surface);
        }

        // The fourth tick painted the three-glyph trails left by the third.
        assert_eq!(surface.glyphs.len(), 6);
        let snapshot = rain.columns().to_vec();
        rain.tick(&mut surface);

        let mut drawn = surface.glyphs.iter();
        for (index, col) in snapshot.iter().enumerate() {
            let len = col.trail.len() as f32;
            for (k, &glyph) in col.trail.iter().enumerate() {
                let &(x, y, g, opacity) = drawn.next().expect("glyph drawn");
                assert_eq!(x, index as f32 * 16.0);
                assert_eq!(y, col.position - k as f32 * 16.0);
                assert_eq!(g, glyph);
                assert_eq!(opacity, 1.0 - k as f32 / len);
            }
        }
        assert!(drawn.next().is_none());
    }

    #[test]
    fn test_zero_width_is_noop() {
        let mut rain = RainAnimator::with_seed(Viewport::new(0, 900), RainSettings::default(), 1);
        let mut surface = Recorder::default();
        rain.tick(&mut surface);
        assert!(rain.columns().is_empty());
        assert!(surface.glyphs.is_empty());
    }

    #[test]
    fn test_same_seed_same_rain() {
        let mut a = RainAnimator::with_seed(viewport(), RainSettings::default(), 77);
        let mut b = RainAnimator::with_seed(viewport(), RainSettings::default(), 77);
        let mut surface = Recorder::default();
        for _ in 0..50 {
            a.tick(&mut surface);
            b.tick(&mut surface);
        }
        assert_eq!(a.columns(), b.columns());
    }
}
