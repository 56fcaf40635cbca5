//! Binary rain rendering for the binrain portfolio.
//!
//! The [`RainAnimator`] owns one [`Column`] per glyph slot and repaints a
//! [`GlyphSurface`] on every tick. [`GlyphGrid`] is the terminal surface: it
//! keeps the last painted frame and renders it as a Ratatui widget.
//! [`Ticker`] drives the animator at a fixed interval, independent of how
//! often the terminal is redrawn.

mod animator;
mod column;
mod surface;
mod ticker;

pub use animator::RainAnimator;
pub use column::Column;
pub use surface::{GlyphGrid, GlyphSurface, PaintedGlyph};
pub use ticker::Ticker;
