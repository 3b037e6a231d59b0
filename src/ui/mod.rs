// ── UI types & pure helpers ──────────────────────────────────────────────────

pub mod underline;

use crate::renderer::text::{Font, Vertex};

/// Greedy pixel-width word wrap, as performed by [`BitmapText`] when word
/// wrapping is enabled.
///
/// Every returned line keeps the whitespace that followed its last word
/// (including a terminating `'\n'`), so `lines.concat() == text` always
/// holds and global character indices can be recovered by summing line
/// lengths.  A line is broken when appending the next word would push its
/// visible width (trailing whitespace excluded) past `max_width`.  A word
/// wider than `max_width` on its own is split between characters, keeping
/// at least one character per line.  `max_width <= 0` disables wrapping;
/// explicit `'\n'` breaks are always honoured.
///
/// [`BitmapText`]: crate::scene::BitmapText
pub fn wrap_lines(text: &str, font: &Font, font_size: f32, max_width: f32) -> Vec<String> {
    let scale = font.scale(font_size);
    let advance = |ch: char| -> f32 {
        font.glyphs.get(&ch).map_or(0.0, |g| g.x_advance as f32 * scale)
    };

    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.split_inclusive('\n') {
        if max_width <= 0.0 {
            lines.push(paragraph.to_owned());
            continue;
        }

        let mut current = String::new();
        let mut current_w = 0.0f32;

        for token in tokens(paragraph) {
            let word = token.trim_end_matches(char::is_whitespace);
            let trailing = &token[word.len()..];
            let word_w: f32 = word.chars().map(advance).sum();

            if !current.is_empty() && current_w + word_w > max_width {
                lines.push(std::mem::take(&mut current));
                current_w = 0.0;
            }

            if current.is_empty() && word_w > max_width {
                // Force-split a single word that exceeds max_width.
                for ch in word.chars() {
                    let w = advance(ch);
                    if !current.is_empty() && current_w + w > max_width {
                        lines.push(std::mem::take(&mut current));
                        current_w = 0.0;
                    }
                    current.push(ch);
                    current_w += w;
                }
            } else {
                current.push_str(word);
                current_w += word_w;
            }

            current.push_str(trailing);
            current_w += trailing.chars().map(advance).sum::<f32>();
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// Split a paragraph into `word + trailing whitespace` tokens.  Leading
/// whitespace forms a token with an empty word.
fn tokens(paragraph: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_trailing = false;
    for (i, ch) in paragraph.char_indices() {
        if ch.is_whitespace() {
            in_trailing = true;
        } else if in_trailing {
            out.push(&paragraph[start..i]);
            start = i;
            in_trailing = false;
        }
    }
    if start < paragraph.len() {
        out.push(&paragraph[start..]);
    }
    out
}

/// Number of characters in `line` once trailing whitespace is dropped.
pub fn visible_len(line: &str) -> usize {
    line.trim_end().chars().count()
}

/// Slice `s` by character positions `[start, end)`, clamped to its length.
pub fn char_slice(s: &str, start: usize, end: usize) -> &str {
    let byte_at = |n: usize| s.char_indices().nth(n).map_or(s.len(), |(b, _)| b);
    let (start, end) = (byte_at(start), byte_at(end));
    if start >= end { "" } else { &s[start..end] }
}

// ── TextLayer ─────────────────────────────────────────────────────────────────

/// Plain-data container for variable-width bitmap font rendering.
/// Accumulates the vertex/index buffers that `BitmapText::draw` writes into
/// each frame.  No GPU state — fully testable.
#[derive(Debug, Default)]
pub struct TextLayer {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl TextLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a mesh, offsetting its indices by the vertices already present
    /// so several text nodes can share a single vertex/index buffer.
    pub fn append(&mut self, vertices: &[Vertex], indices: &[u32]) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(vertices);
        self.indices.extend(indices.iter().map(|i| i + base));
    }

    /// Clear accumulated geometry. Call once per frame before drawing text.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
