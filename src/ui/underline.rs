//! Text label that draws underlines beneath character ranges of its
//! word-wrapped text.
//!
//! [`UnderlineText`] keeps the label's display lines as produced by the
//! host's wrap algorithm.  An underline request over global character
//! indices is split per display line, each piece is measured with the
//! label's own font and style, and a [`LineSegment`] is attached as a child
//! of the text node so it follows the label's transform.
//!
//! Like the other widgets, the label stores only handles; every operation
//! takes the [`SceneHost`] that owns the nodes.
//!
//! ```ignore
//! let mut scene = SceneGraph::new();
//! scene.add_font(Font::monospace(10, 20));
//! let mut label = UnderlineText::new(&mut scene, 0.0, 0.0, "Hello world", TextStyle::default())?;
//! label.add_underline(&mut scene, 6, 10)?; // "world"
//! ```

use glam::Vec2;

use crate::config::{TextStyle, UnderlineStyle};
use crate::error::UnderlineError;
use crate::renderer::line::LineSegment;
use crate::scene::{NodeId, SceneHost, TextDisplay};
use crate::ui::{char_slice, visible_len};

/// Pixel size of a measured string.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextDimensions {
    pub width: f32,
    pub height: f32,
}

/// One drawn underline segment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Underline {
    /// Line node attached under the label's text node.
    pub node: NodeId,
    /// Display line the segment sits on.
    pub line: usize,
    /// Offset of the segment's left end from the text node's origin.
    pub offset: Vec2,
    pub width: f32,
}

// ── UnderlineText ─────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct UnderlineText {
    group: NodeId,
    node: NodeId,
    wraps: Vec<String>,
    underlines: Vec<Underline>,
    style: UnderlineStyle,
}

impl UnderlineText {
    /// Create the label at `(x, y)` inside a fresh top-level group.
    pub fn new<H: SceneHost>(
        host: &mut H,
        x: f32,
        y: f32,
        text: &str,
        style: TextStyle,
    ) -> Result<Self, UnderlineError> {
        let group = host.add_group(None)?;
        let node = match host.add_text(group, Vec2::new(x, y), text, style) {
            Ok(node) => node,
            Err(e) => {
                host.destroy(group);
                return Err(e);
            }
        };

        let mut label = Self {
            group,
            node,
            wraps: Vec::new(),
            underlines: Vec::new(),
            style: UnderlineStyle::default(),
        };
        label.refresh_wraps(host)?;
        Ok(label)
    }

    pub fn with_underline_style(mut self, style: UnderlineStyle) -> Self {
        self.style = style;
        self
    }

    /// Stroke used for segments drawn from now on.
    pub fn set_underline_style(&mut self, style: UnderlineStyle) {
        self.style = style;
    }

    pub fn underline_style(&self) -> &UnderlineStyle {
        &self.style
    }

    /// The text node.  Underline segments are its children.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The group holding the text node.
    pub fn group(&self) -> NodeId {
        self.group
    }

    /// Segments currently drawn, in creation order.
    pub fn underlines(&self) -> &[Underline] {
        &self.underlines
    }

    fn display<'h, H: SceneHost>(&self, host: &'h H) -> Result<&'h H::Text, UnderlineError> {
        host.text(self.node).ok_or(UnderlineError::MissingNode(self.node))
    }

    fn display_mut<'h, H: SceneHost>(&self, host: &'h mut H) -> Result<&'h mut H::Text, UnderlineError> {
        host.text_mut(self.node).ok_or(UnderlineError::MissingNode(self.node))
    }

    pub fn text<'h, H: SceneHost>(&self, host: &'h H) -> Result<&'h str, UnderlineError> {
        Ok(self.display(host)?.text())
    }

    /// Replace the text.  Existing underlines are removed since their
    /// geometry no longer matches, and the display lines are recomputed.
    pub fn set_text<H: SceneHost>(&mut self, host: &mut H, text: &str) -> Result<(), UnderlineError> {
        self.clear_underlines(host);
        self.display_mut(host)?.set_text(text);
        self.refresh_wraps(host)
    }

    /// Replace the text style.  Same invalidation as [`set_text`](Self::set_text).
    pub fn set_style<H: SceneHost>(&mut self, host: &mut H, style: TextStyle) -> Result<(), UnderlineError> {
        self.clear_underlines(host);
        host.set_text_style(self.node, style)?;
        self.refresh_wraps(host)
    }

    // ── Wrap-line indexer ─────────────────────────────────────────────────

    /// Re-read the display lines from the host.  Needed after any change
    /// made to the text node behind this label's back.
    pub fn refresh_wraps<H: SceneHost>(&mut self, host: &H) -> Result<(), UnderlineError> {
        self.wraps = self.display(host)?.wrapped_lines();
        log::debug!("label {:?}: {} display lines", self.node, self.wraps.len());
        Ok(())
    }

    /// Display lines, top to bottom.  Each keeps the whitespace that ended it.
    pub fn wrapped_lines(&self) -> &[String] {
        &self.wraps
    }

    /// Global character index of the first character of display line `line`:
    /// the summed lengths of all lines above it.
    pub fn wrap_start_index(&self, line: usize) -> usize {
        self.wraps
            .iter()
            .take(line)
            .map(|l| l.chars().count())
            .sum()
    }

    // ── Range-to-line mapper ──────────────────────────────────────────────

    /// Underline global characters `start..=end`.
    ///
    /// The range is split into at most one segment per display line and
    /// appended to any segments already drawn; overlapping requests are not
    /// merged.  Pieces that cover only trailing whitespace draw nothing.
    /// Returns the segments added by this call.
    pub fn add_underline<H: SceneHost>(
        &mut self,
        host: &mut H,
        start: usize,
        end: usize,
    ) -> Result<&[Underline], UnderlineError> {
        let len = self.display(host)?.text().chars().count();
        if start > end || end >= len {
            log::warn!("rejected underline [{start}, {end}] on text of {len} chars");
            return Err(UnderlineError::InvalidRange { start, end, len });
        }

        let first_new = self.underlines.len();
        for i in 0..self.wraps.len() {
            let line_start = self.wrap_start_index(i);
            let line_len = self.wraps[i].chars().count();
            let line_end = line_start + line_len;
            let span = line_start..line_end;

            // Local `[from, to)` within line `i`; `end` is inclusive.
            let local = if span.contains(&start) {
                Some((start - line_start, end - line_start + 1))
            } else if span.contains(&end) {
                Some((0, end - line_start + 1))
            } else if start < line_start && end >= line_end {
                Some((0, line_len))
            } else {
                None
            };

            let Some((from, to)) = local else { continue };
            log::trace!("line {i} [{line_start}, {line_end}): local [{from}, {to})");
            if let Some(underline) = self.draw_underline(host, i, from, to)? {
                self.underlines.push(underline);
            }
        }

        log::debug!(
            "underline [{start}, {end}] drew {} segment(s)",
            self.underlines.len() - first_new
        );
        Ok(&self.underlines[first_new..])
    }

    // ── Segment renderer ──────────────────────────────────────────────────

    /// Draw `[from, to)` of display line `line`, with `to` clamped to the
    /// line's visible length.
    fn draw_underline<H: SceneHost>(
        &self,
        host: &mut H,
        line: usize,
        from: usize,
        to: usize,
    ) -> Result<Option<Underline>, UnderlineError> {
        let text = &self.wraps[line];
        let to = to.min(visible_len(text));
        if from >= to {
            return Ok(None);
        }

        let dims = self.text_dimensions(host, char_slice(text, from, to))?;
        let offset_x = self.text_dimensions(host, char_slice(text, 0, from))?.width;
        let spacing = self.display(host)?.line_spacing();
        let offset_y =
            dims.height * self.style.baseline_ratio + (dims.height + spacing) * line as f32;

        let offset = Vec2::new(offset_x, offset_y);
        let segment = LineSegment {
            length: dims.width,
            thickness: self.style.thickness,
            color: self.style.color,
        };
        let node = host.add_line(self.node, offset, segment)?;
        Ok(Some(Underline { node, line, offset, width: dims.width }))
    }

    // ── Measurement ───────────────────────────────────────────────────────

    /// Size of `text` rendered with this label's font and style on a single
    /// line.  The label's own text and wrap flag are swapped out for the
    /// measurement and restored before returning.
    pub fn text_dimensions<H: SceneHost>(
        &self,
        host: &mut H,
        text: &str,
    ) -> Result<TextDimensions, UnderlineError> {
        let display = self.display_mut(host)?;
        let original = display.text().to_owned();
        let wrap = display.word_wrap();

        display.set_word_wrap(false);
        display.set_text(text);
        let size = display.size();
        display.set_text(&original);
        display.set_word_wrap(wrap);

        Ok(TextDimensions { width: size.x, height: size.y })
    }

    // ── Teardown ──────────────────────────────────────────────────────────

    /// Destroy every drawn segment.  Calling it again is a no-op.
    pub fn clear_underlines<H: SceneHost>(&mut self, host: &mut H) {
        if self.underlines.is_empty() {
            return;
        }
        log::debug!("clearing {} underline(s)", self.underlines.len());
        for underline in self.underlines.drain(..) {
            host.destroy(underline.node);
        }
    }

    /// Destroy the label: its underlines, its text node and its group.
    pub fn destroy<H: SceneHost>(mut self, host: &mut H) {
        self.clear_underlines(host);
        host.destroy(self.group);
    }
}
