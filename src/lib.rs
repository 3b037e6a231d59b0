pub mod config;
pub mod engine;
pub mod error;
pub mod renderer;
pub mod scene;
pub mod ui;

pub use config::{LabelConfig, TextStyle, UnderlineStyle};
pub use engine::Color;
pub use error::UnderlineError;
pub use scene::{SceneGraph, SceneHost, TextDisplay};
pub use ui::underline::UnderlineText;

/// Glyph advance of the built-in monospace font, in atlas pixels.
pub const DEFAULT_GLYPH_W: u32 = 16;
/// Line height of the built-in monospace font, in atlas pixels.
pub const DEFAULT_GLYPH_H: u32 = 24;
