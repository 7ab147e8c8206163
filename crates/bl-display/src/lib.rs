//! LED scoreboard composition from bitlines glyphs.

pub mod canvas;
pub mod glyphs;
pub mod scoreboard;
pub mod text;
pub mod xbm;

pub use canvas::DisplayCanvas;
pub use glyphs::GlyphSet;
pub use scoreboard::Scoreboard;
