//! Runs the intro sequence against the timeline and renders the drawing.

use std::time::Duration;

use binrain_core::{ColorTheme, IntroTiming, blend, mix};
use ratatui::{
    Frame,
    layout::Rect,
    symbols::Marker,
    widgets::canvas::{Canvas, Line as CanvasLine},
};

use crate::drawing::{Drawing, Point};
use crate::sequence::{IntroEffect, IntroPhase, IntroSequence};
use crate::timeline::Timeline;

/// How much the finished drawing is lifted toward white.
const DRAWN_GLOW: f32 = 0.35;

/// Things the rest of the application has to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroOutcome {
    StartRain,
    ShowMainContent,
    PersistIntroSeen,
}

/// The intro as a whole: drawing, state machine and clock.
#[derive(Debug, Clone)]
pub struct IntroDriver {
    drawing: Drawing,
    sequence: IntroSequence,
    timeline: Timeline,
    drawing_visible: bool,
    drawn: bool,
}

impl IntroDriver {
    pub fn new(drawing: Drawing, timing: IntroTiming) -> Self {
        let sequence = IntroSequence::new(timing, drawing.segment_count());
        Self {
            drawing,
            sequence,
            timeline: Timeline::new(),
            drawing_visible: false,
            drawn: false,
        }
    }

    /// Kick off the sequence at `now`.
    pub fn start(&mut self, now: Duration, intro_seen: bool) -> Vec<IntroOutcome> {
        let effects = self.sequence.start(intro_seen);
        let mut outcomes = Vec::new();
        self.apply(now, effects, &mut outcomes);
        outcomes.extend(self.update(now));
        outcomes
    }

    /// Feed every completion up to `now` through the sequence.
    pub fn update(&mut self, now: Duration) -> Vec<IntroOutcome> {
        let mut outcomes = Vec::new();
        loop {
            let fired = self.timeline.poll(now);
            if fired.is_empty() {
                break;
            }
            for (at, signal) in fired {
                tracing::trace!(?signal, at_ms = at.as_millis() as u64, "intro signal");
                let effects = self.sequence.handle(signal);
                self.apply(at, effects, &mut outcomes);
            }
        }
        outcomes
    }

    fn apply(&mut self, at: Duration, effects: Vec<IntroEffect>, outcomes: &mut Vec<IntroOutcome>) {
        for effect in effects {
            match effect {
                IntroEffect::Schedule { after, signal } => self.timeline.schedule(at + after, signal),
                IntroEffect::ShowDrawing => self.drawing_visible = true,
                IntroEffect::StartStroke {
                    index,
                    delay,
                    duration,
                } => self.timeline.start_stroke(index, at + delay, duration),
                IntroEffect::MarkDrawn => {
                    tracing::debug!("intro drawing complete");
                    self.drawn = true;
                }
                IntroEffect::HideIntro { duration } => self.timeline.start_fade(at, duration),
                IntroEffect::PersistIntroSeen => outcomes.push(IntroOutcome::PersistIntroSeen),
                IntroEffect::ShowMainContent => outcomes.push(IntroOutcome::ShowMainContent),
                IntroEffect::StartRain => outcomes.push(IntroOutcome::StartRain),
            }
        }
    }

    pub fn phase(&self) -> IntroPhase {
        self.sequence.phase()
    }

    pub fn is_main_visible(&self) -> bool {
        self.sequence.is_main_visible()
    }

    pub fn is_drawing_visible(&self) -> bool {
        self.drawing_visible
    }

    pub fn is_drawn(&self) -> bool {
        self.drawn
    }

    /// Next time something completes, for sizing the event poll timeout.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timeline.next_deadline()
    }

    /// Whether the intro needs redrawing at `now`.
    pub fn is_animating(&self, now: Duration) -> bool {
        self.timeline.is_animating(now)
    }

    pub fn stroke_progress(&self, index: usize, now: Duration) -> f64 {
        self.timeline.stroke_progress(index, now)
    }

    /// Render the drawing, centered in `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect, now: Duration, theme: ColorTheme) {
        if !self.drawing_visible {
            return;
        }
        let opacity = self.timeline.fade_opacity(now);
        if opacity <= 0.0 {
            return;
        }

        let stroke_rgb = if self.drawn {
            mix((255, 255, 255), theme.rain_rgb(), DRAWN_GLOW)
        } else {
            theme.rain_rgb()
        };
        let color = blend(stroke_rgb, theme.background_rgb(), opacity as f32);

        let width = self.drawing.width();
        let height = self.drawing.height();
        let lines: Vec<(Point, Point)> = self
            .drawing
            .segments()
            .iter()
            .enumerate()
            .flat_map(|(index, segment)| segment.visible_lines(self.stroke_progress(index, now)))
            .collect();

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                // Canvas y grows upward; drawing y grows downward.
                for (a, b) in &lines {
                    ctx.draw(&CanvasLine::new(a.x, height - a.y, b.x, height - b.y, color));
                }
            });

        frame.render_widget(canvas, fit_area(area, width, height));
    }
}

/// Largest centered rect with the drawing's aspect ratio.
///
/// A braille cell is 2 dots wide and 4 tall, and terminal cells are about
/// twice as tall as wide, so one row holds half as many drawing units as a
/// column.
fn fit_area(area: Rect, width: f64, height: f64) -> Rect {
    let max_cols = f64::from(area.width.saturating_sub(4).max(1));
    let max_rows = f64::from(area.height.saturating_sub(2).max(1));

    let mut cols = max_cols;
    let mut rows = cols * height / (2.0 * width);
    if rows > max_rows {
        rows = max_rows;
        cols = rows * 2.0 * width / height;
    }

    let cols = (cols.round() as u16).clamp(1, area.width.max(1));
    let rows = (rows.round() as u16).clamp(1, area.height.max(1));
    Rect {
        x: area.x + (area.width.saturating_sub(cols)) / 2,
        y: area.y + (area.height.saturating_sub(rows)) / 2,
        width: cols.min(area.width),
        height: rows.min(area.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn driver() -> IntroDriver {
        IntroDriver::new(Drawing::builtin().unwrap(), IntroTiming::default())
    }

    #[test]
    fn test_skip_when_seen() {
        let mut intro = driver();
        let outcomes = intro.start(ms(0), true);
        assert_eq!(
            outcomes,
            vec![IntroOutcome::StartRain, IntroOutcome::ShowMainContent]
        );
        assert_eq!(intro.phase(), IntroPhase::Hidden);
        assert!(!intro.is_drawing_visible());
        assert_eq!(intro.next_deadline(), None);
    }

    #[test]
    fn test_missing_drawing_skips_without_persisting() {
        let mut intro = IntroDriver::new(Drawing::default(), IntroTiming::default());
        let outcomes = intro.start(ms(0), false);
        assert!(outcomes.contains(&IntroOutcome::ShowMainContent));
        assert!(!outcomes.contains(&IntroOutcome::PersistIntroSeen));
        assert!(intro.is_main_visible());
    }

    #[test]
    fn test_reveal_timeline() {
        let mut intro = driver();
        assert!(intro.start(ms(0), false).is_empty());

        intro.update(ms(199));
        assert!(!intro.is_drawing_visible());
        intro.update(ms(200));
        assert!(intro.is_drawing_visible());

        // Segment i starts at 200 + 300 * i and runs 500 ms.
        assert_eq!(intro.stroke_progress(1, ms(500)), 0.0);
        assert_eq!(intro.stroke_progress(1, ms(750)), 0.5);
        assert_eq!(intro.stroke_progress(0, ms(700)), 1.0);

        // Six segments: the last ends at 200 + 1500 + 500.
        intro.update(ms(2199));
        assert_eq!(intro.phase(), IntroPhase::Revealing);
        intro.update(ms(2200));
        assert_eq!(intro.phase(), IntroPhase::Revealed);
        assert!(intro.is_drawn());

        assert!(intro.update(ms(2699)).is_empty());
        assert_eq!(intro.update(ms(2700)), vec![IntroOutcome::PersistIntroSeen]);
        assert_eq!(intro.phase(), IntroPhase::Hidden);
        assert!(!intro.is_main_visible());

        assert!(intro.update(ms(3699)).is_empty());
        assert_eq!(
            intro.update(ms(3700)),
            vec![IntroOutcome::ShowMainContent, IntroOutcome::StartRain]
        );
        assert!(intro.is_main_visible());
        assert_eq!(intro.next_deadline(), None);
    }

    #[test]
    fn test_stalled_clock_keeps_order() {
        let mut intro = driver();
        intro.start(ms(0), false);
        assert_eq!(
            intro.update(ms(60_000)),
            vec![
                IntroOutcome::PersistIntroSeen,
                IntroOutcome::ShowMainContent,
                IntroOutcome::StartRain,
            ]
        );
    }

    #[test]
    fn test_fit_area_keeps_aspect() {
        let area = Rect::new(0, 0, 100, 40);
        let fitted = fit_area(area, 140.0, 60.0);
        assert_eq!(fitted.width, 96);
        assert!(fitted.height <= 38);
        assert!(fitted.x + fitted.width <= area.width);
        assert!(fitted.y + fitted.height <= area.height);
    }
}
