use std::rc::Rc;

use glam::Vec2;

use crate::config::TextStyle;
use crate::renderer::text::{Font, Vertex, generate_text_mesh, measure_line};
use crate::scene::TextDisplay;
use crate::ui::{TextLayer, wrap_lines};

// ── BitmapText ────────────────────────────────────────────────────────────────

/// Text primitive of the scene graph: a string rendered with a bitmap font,
/// optionally word-wrapped.
///
/// Owns a cached vertex/index mesh that is only regenerated when the text,
/// style or wrap flag changes, or when the node is drawn at a new origin.
#[derive(Debug)]
pub struct BitmapText {
    font: Rc<Font>,
    style: TextStyle,
    text: String,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    origin: Vec2,
    dirty: bool,
}

impl BitmapText {
    pub fn new(font: Rc<Font>, text: &str, style: TextStyle) -> Self {
        Self {
            font,
            style,
            text: text.to_owned(),
            vertices: Vec::new(),
            indices: Vec::new(),
            origin: Vec2::ZERO,
            dirty: true,
        }
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Replace font and style together; the font must match `style.font_id`.
    pub fn set_style(&mut self, font: Rc<Font>, style: TextStyle) {
        self.font = font;
        self.style = style;
        self.dirty = true;
    }

    /// Height of one rendered line, without spacing.
    pub fn line_height(&self) -> f32 {
        self.style.font_size
    }

    /// The current text split into display lines under the current wrap
    /// settings.  Lines keep their trailing whitespace.
    fn lines(&self) -> Vec<String> {
        if self.style.word_wrap {
            wrap_lines(&self.text, &self.font, self.style.font_size, self.style.word_wrap_width)
        } else {
            self.text.split_inclusive('\n').map(str::to_owned).collect()
        }
    }

    /// Append this node's geometry, placed at `origin`, into `layer`.
    pub fn draw(&mut self, origin: Vec2, layer: &mut TextLayer) {
        if self.dirty || self.origin != origin {
            self.vertices.clear();
            self.indices.clear();
            let step = self.line_height() + self.style.line_spacing;
            for (row, line) in self.lines().iter().enumerate() {
                let start = origin + Vec2::new(0.0, row as f32 * step);
                let (verts, idxs) = generate_text_mesh(
                    line.trim_end_matches('\n'),
                    &self.font,
                    start,
                    self.style.font_size,
                    self.style.line_spacing,
                    self.style.fill,
                );
                let base = self.vertices.len() as u32;
                self.vertices.extend_from_slice(&verts);
                self.indices.extend(idxs.iter().map(|i| i + base));
            }
            self.origin = origin;
            self.dirty = false;
        }
        layer.append(&self.vertices, &self.indices);
    }
}

impl TextDisplay for BitmapText {
    fn text(&self) -> &str {
        &self.text
    }

    /// If `text` is identical to the current string, nothing changes.
    fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text = text.to_owned();
            self.dirty = true;
        }
    }

    fn word_wrap(&self) -> bool {
        self.style.word_wrap
    }

    fn set_word_wrap(&mut self, enabled: bool) {
        if self.style.word_wrap != enabled {
            self.style.word_wrap = enabled;
            self.dirty = true;
        }
    }

    fn line_spacing(&self) -> f32 {
        self.style.line_spacing
    }

    /// Width of the widest line and the height of all lines plus the
    /// spacing between them.  Empty text still occupies one line.
    ///
    /// Trailing spaces count towards the width: the mesh advances over
    /// them, so a prefix ending in a space measures up to the next glyph.
    fn size(&self) -> Vec2 {
        let lines = self.lines();
        let width = lines
            .iter()
            .map(|l| measure_line(l.trim_end_matches(['\n', '\r']), &self.font, self.style.font_size))
            .fold(0.0f32, f32::max);
        let rows = lines.len().max(1) as f32;
        let height = rows * self.line_height() + (rows - 1.0) * self.style.line_spacing;
        Vec2::new(width, height)
    }

    fn wrapped_lines(&self) -> Vec<String> {
        self.lines()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
