// ── Error types ─────────────────────────────────────────────────────────────

use crate::scene::NodeId;

/// Failures reported by [`UnderlineText`](crate::ui::underline::UnderlineText)
/// and the [`SceneHost`](crate::scene::SceneHost) operations it drives.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnderlineError {
    /// The inclusive range `[start, end]` does not fit a text of `len` chars.
    #[error("invalid underline range [{start}, {end}] for text of {len} chars")]
    InvalidRange { start: usize, end: usize, len: usize },

    /// A text style referenced a font id that was never registered.
    #[error("font {0} is not registered")]
    UnknownFont(usize),

    /// The node was destroyed or belongs to another scene.
    #[error("scene node {0:?} does not exist")]
    MissingNode(NodeId),
}

/// Failures while loading a [`Font`](crate::renderer::text::Font) from disk.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed glyph map: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unreadable atlas image: {0}")]
    Image(#[from] image::ImageError),
}

/// Failures while loading a [`LabelConfig`](crate::config::LabelConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
