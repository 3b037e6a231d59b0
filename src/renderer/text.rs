use std::collections::HashMap;
use std::path::Path;

use glam::Vec2;
use serde::Deserialize;

use crate::engine::Color;
use crate::error::FontError;

// ── Vertex ──────────────────────────────────────────────────────────────────

/// Corner of a glyph quad.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    /// Atlas coordinates, normalised to `[0, 1]`.
    pub tex_coords: [f32; 2],
    /// Fill color multiplied with the atlas sample.
    pub color: [f32; 4],
}

// ── Glyph ────────────────────────────────────────────────────────────────────

/// Placement of one character inside a font atlas, in atlas pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Pen-relative offset of the quad's top-left corner.
    pub x_offset: i32,
    pub y_offset: i32,
    /// Pen movement after this glyph.
    pub x_advance: u32,
}

impl Glyph {
    /// A glyph that fills its whole `width × height` cell and advances by
    /// its width.
    fn cell(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height, x_offset: 0, y_offset: 0, x_advance: width }
    }

    /// `[u0, v0, u1, v1]` of this glyph in an atlas of the given size.
    fn uv_rect(&self, atlas_w: f32, atlas_h: f32) -> [f32; 4] {
        [
            self.x as f32 / atlas_w,
            self.y as f32 / atlas_h,
            (self.x + self.width) as f32 / atlas_w,
            (self.y + self.height) as f32 / atlas_h,
        ]
    }
}

// ── Font ─────────────────────────────────────────────────────────────────────

/// Bitmap font: a glyph table plus the size of the atlas it indexes.
#[derive(Debug, Clone)]
pub struct Font {
    pub glyphs: HashMap<char, Glyph>,
    /// Atlas pixels between baselines; `font_size` is expressed against it.
    pub line_height: u32,
    pub texture_width: u32,
    pub texture_height: u32,
}

#[derive(Deserialize)]
struct AtlasRect {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

impl Font {
    /// Factor from atlas pixels to screen pixels at `font_size`.  Zero for a
    /// font without a line height.
    pub fn scale(&self, font_size: f32) -> f32 {
        match self.line_height {
            0 => 0.0,
            h => font_size / h as f32,
        }
    }

    /// Parse a glyph map keyed by character:
    ///
    /// ```json
    /// { "A": { "x": 0, "y": 0, "w": 16, "h": 24 }, "B": { ... } }
    /// ```
    ///
    /// Keys longer than one character are ignored; extra fields per entry
    /// are allowed.  The line height is the tallest glyph.
    pub fn from_atlas_json(
        json: &str,
        texture_width: u32,
        texture_height: u32,
    ) -> Result<Self, serde_json::Error> {
        let rects: HashMap<String, AtlasRect> = serde_json::from_str(json)?;

        let mut glyphs = HashMap::with_capacity(rects.len());
        let mut line_height = 0;
        for (key, r) in rects {
            let mut chars = key.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                log::debug!("skipping atlas key {key:?}");
                continue;
            };
            line_height = line_height.max(r.h);
            glyphs.insert(ch, Glyph::cell(r.x, r.y, r.w, r.h));
        }

        Ok(Self { glyphs, line_height, texture_width, texture_height })
    }

    /// Load a glyph map from `json_path`.  The atlas size comes from the
    /// header of the image at `png_path`; its pixels are not decoded.
    pub fn from_atlas_files(
        json_path: impl AsRef<Path>,
        png_path: impl AsRef<Path>,
    ) -> Result<Self, FontError> {
        let json = std::fs::read_to_string(json_path.as_ref())?;
        let (w, h) = image::image_dimensions(png_path.as_ref())?;
        let font = Self::from_atlas_json(&json, w, h)?;
        log::debug!(
            "font {:?}: {} glyphs, atlas {w}x{h}",
            json_path.as_ref(),
            font.glyphs.len()
        );
        Ok(font)
    }

    /// Grid font for printable ASCII (`' '..='~'`), 16 cells per atlas row,
    /// every cell `advance × line_height`.
    pub fn monospace(advance: u32, line_height: u32) -> Self {
        const COLS: u32 = 16;

        let mut glyphs = HashMap::new();
        for (i, ch) in (' '..='~').enumerate() {
            let (col, row) = (i as u32 % COLS, i as u32 / COLS);
            glyphs.insert(ch, Glyph::cell(col * advance, row * line_height, advance, line_height));
        }

        let rows = (glyphs.len() as u32).div_ceil(COLS);
        Self {
            glyphs,
            line_height,
            texture_width: COLS * advance,
            texture_height: rows * line_height,
        }
    }
}

// ── Layout ───────────────────────────────────────────────────────────────────

/// Pen advance of `text` on one line at `font_size`.  `'\n'` and `'\r'`
/// and characters missing from the font add nothing.
pub fn measure_line(text: &str, font: &Font, font_size: f32) -> f32 {
    let scale = font.scale(font_size);
    text.chars()
        .filter(|ch| !matches!(ch, '\n' | '\r'))
        .filter_map(|ch| font.glyphs.get(&ch))
        .map(|g| g.x_advance as f32 * scale)
        .sum()
}

/// Lay `text` out from `origin` (top-left of the first line) and return its
/// quads: four vertices per visible glyph, ordered TL, TR, BL, BR, and six
/// indices `(0, 1, 2)`, `(1, 3, 2)` relative to that glyph.
///
/// `'\n'` returns the pen to `origin.x` and moves it down one scaled line
/// plus `line_spacing`.  Whitespace moves the pen without emitting a quad.
/// Unknown characters are dropped.
pub fn generate_text_mesh(
    text: &str,
    font: &Font,
    origin: Vec2,
    font_size: f32,
    line_spacing: f32,
    fill: Color,
) -> (Vec<Vertex>, Vec<u32>) {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    let scale = font.scale(font_size);
    if scale == 0.0 {
        return (vertices, indices);
    }
    let (atlas_w, atlas_h) = (font.texture_width as f32, font.texture_height as f32);
    let row_step = font.line_height as f32 * scale + line_spacing;

    let mut pen = origin;
    for ch in text.chars() {
        if ch == '\n' {
            pen = Vec2::new(origin.x, pen.y + row_step);
            continue;
        }
        let Some(glyph) = font.glyphs.get(&ch) else { continue };
        let advance = glyph.x_advance as f32 * scale;
        if ch.is_whitespace() {
            pen.x += advance;
            continue;
        }

        let min = pen + Vec2::new(glyph.x_offset as f32, glyph.y_offset as f32) * scale;
        let max = min + Vec2::new(glyph.width as f32, glyph.height as f32) * scale;
        let [u0, v0, u1, v1] = glyph.uv_rect(atlas_w, atlas_h);

        let base = vertices.len() as u32;
        for (position, tex_coords) in [
            ([min.x, min.y], [u0, v0]),
            ([max.x, min.y], [u1, v0]),
            ([min.x, max.y], [u0, v1]),
            ([max.x, max.y], [u1, v1]),
        ] {
            vertices.push(Vertex { position, tex_coords, color: fill.0 });
        }
        indices.extend([0, 1, 2, 1, 3, 2].map(|i| base + i));

        pen.x += advance;
    }

    (vertices, indices)
}
