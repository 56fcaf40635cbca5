//! Core types shared by the binrain crates.

mod color;
mod settings;
mod theme;

pub use color::{blend, mix};
pub use settings::{Glyphs, IntroTiming, RainSettings, Viewport};
pub use theme::ColorTheme;
