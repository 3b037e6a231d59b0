pub mod line;
pub mod text;

use glam::Vec2;

use line::{LineVertex, tessellate};

use crate::scene::{NodeId, NodeKind, SceneGraph};
use crate::ui::TextLayer;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a (xor, then multiply) over `data`.
fn fnv1a_64(data: &[u8]) -> u64 {
    data.iter()
        .fold(FNV_OFFSET, |h, &b| (h ^ b as u64).wrapping_mul(FNV_PRIME))
}

/// CPU-side geometry for one frame: text quads and underline strokes,
/// ready to be uploaded to vertex buffers.
#[derive(Debug, Default)]
pub struct Frame {
    pub text: TextLayer,
    pub lines: Vec<LineVertex>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk `scene` depth-first in creation order, placing every node at its
    /// world position.  Children draw after their parent, so underlines
    /// land on top of the text they decorate.
    pub fn build(scene: &mut SceneGraph) -> Self {
        let mut frame = Self::new();
        frame.rebuild(scene);
        frame
    }

    /// Clear and refill this frame from `scene`, reusing its allocations.
    pub fn rebuild(&mut self, scene: &mut SceneGraph) {
        self.text.clear();
        self.lines.clear();

        let mut stack: Vec<(NodeId, Vec2)> =
            scene.roots().iter().rev().map(|r| (*r, Vec2::ZERO)).collect();

        while let Some((id, parent_pos)) = stack.pop() {
            let Some(node) = scene.node_mut(id) else { continue };
            let pos = parent_pos + node.position;

            match &mut node.kind {
                NodeKind::Group => {}
                NodeKind::Text(text) => text.draw(pos, &mut self.text),
                NodeKind::Line(segment) => self.lines.extend(tessellate(segment, pos)),
            }

            stack.extend(node.children.iter().rev().map(|c| (*c, pos)));
        }

        log::trace!(
            "frame: {} text vertices, {} line vertices",
            self.text.vertices.len(),
            self.lines.len()
        );
    }

    /// Line vertices as raw bytes for a GPU vertex buffer.
    pub fn line_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lines)
    }

    /// Hash of the line vertex bytes; equal hashes mean the upload can be
    /// skipped.
    pub fn line_hash(&self) -> u64 {
        fnv1a_64(self.line_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv1a_matches_reference_values() {
        assert_eq!(fnv1a_64(b""), 0xcbf29ce484222325);
        assert_eq!(fnv1a_64(b"a"), 0xaf63dc4c8601ec8c);
        assert_eq!(fnv1a_64(b"foobar"), 0x85944171f73967e8);
    }
}
