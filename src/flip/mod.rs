//! Flip animation engine for the animated widget variant.
//!
//! The engine's resources (a digit glyph atlas and a panel style file) ship
//! embedded in the binary and are loaded on a background thread exactly once
//! per runtime. Widgets queue on the bootstrap until the resources are
//! ready, then construct one [`FlipPanel`] per time unit; the panels own the
//! character-flip transitions.

pub mod assets;
pub mod bootstrap;
pub mod panel;

pub use assets::{FlipAssets, FlipGlyph, PanelChrome};
pub use bootstrap::{FlipBootstrap, LoadStatus};
pub use panel::{FlipPanel, FlipPhase, FLIP_FRAMES};
