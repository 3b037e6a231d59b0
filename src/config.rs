// ── Styles & label configuration ─────────────────────────────────────────────

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::Color;
use crate::error::{ConfigError, FontError};
use crate::renderer::text::Font;
use crate::{DEFAULT_GLYPH_H, DEFAULT_GLYPH_W};

// ── TextStyle ─────────────────────────────────────────────────────────────────

/// Appearance and wrapping settings of a text node.
///
/// Every field has a default, so `{}` is a valid JSON style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Id returned by `SceneGraph::add_font`.
    pub font_id: usize,
    /// Rendered line height in pixels.
    pub font_size: f32,
    /// Tint applied to every glyph quad.
    pub fill: Color,
    /// Whether lines are wrapped at `word_wrap_width`.
    pub word_wrap: bool,
    /// Maximum visible line width in pixels when `word_wrap` is on.
    pub word_wrap_width: f32,
    /// Extra vertical pixels between successive lines.
    pub line_spacing: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_id: 0,
            font_size: 24.0,
            fill: Color::WHITE,
            word_wrap: true,
            word_wrap_width: 320.0,
            line_spacing: 0.0,
        }
    }
}

// ── UnderlineStyle ────────────────────────────────────────────────────────────

/// Stroke used for underline segments.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnderlineStyle {
    /// Stroke thickness in pixels.
    pub thickness: f32,
    pub color: Color,
    /// Fraction of a line's height at which the stroke sits, measured from
    /// the top of that line.
    pub baseline_ratio: f32,
}

impl Default for UnderlineStyle {
    fn default() -> Self {
        Self {
            thickness: 2.0,
            color: Color::UNDERLINE_RED,
            baseline_ratio: 0.8,
        }
    }
}

// ── FontSource ────────────────────────────────────────────────────────────────

/// A bitmap font on disk: the character-keyed glyph map and its atlas image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontSource {
    pub glyphs: PathBuf,
    pub atlas: PathBuf,
}

// ── LabelConfig ───────────────────────────────────────────────────────────────

/// Everything needed to build an underlined label: its text, placement,
/// styles and the inclusive `[start, end]` ranges to underline.
///
/// Without a `font` section the built-in monospace font is used.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelConfig {
    pub text: String,
    #[serde(default)]
    pub font: Option<FontSource>,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub style: TextStyle,
    #[serde(default)]
    pub underline: UnderlineStyle,
    #[serde(default)]
    pub ranges: Vec<(usize, usize)>,
}

impl LabelConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        log::debug!("loaded label config from {:?}", path.as_ref());
        Self::from_json(&json)
    }

    /// Load the configured font, or build the default monospace one.
    pub fn load_font(&self) -> Result<Font, FontError> {
        match &self.font {
            Some(source) => Font::from_atlas_files(&source.glyphs, &source.atlas),
            None => Ok(Font::monospace(DEFAULT_GLYPH_W, DEFAULT_GLYPH_H)),
        }
    }
}
