//! The handwriting intro shown before the portfolio page.
//!
//! A [`Drawing`] is a set of stroke segments parsed from SVG path data.
//! [`IntroSequence`] is the state machine that decides what happens next;
//! it never looks at the clock. [`Timeline`] owns the clock side: one-shot
//! timers, stroke animations and the hide fade, reporting each completion
//! exactly once. [`IntroDriver`] wires the two together and renders the
//! drawing.

mod drawing;
mod driver;
mod sequence;
mod timeline;

pub use drawing::{Drawing, DrawingError, Point, Segment};
pub use driver::{IntroDriver, IntroOutcome};
pub use sequence::{IntroEffect, IntroPhase, IntroSequence, IntroSignal};
pub use timeline::{Timeline, ease_in_out};
