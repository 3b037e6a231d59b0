//! Host side of the underline label: the interfaces it talks to and a small
//! retained scene graph implementing them.
//!
//! Nodes are owned by the graph and addressed through generational
//! [`NodeId`] handles, so a handle kept after `destroy` can never reach a
//! node that later reuses the same slot.  Destroying a node destroys its
//! whole subtree.

mod text_node;

pub use text_node::BitmapText;

use std::rc::Rc;

use glam::Vec2;

use crate::config::TextStyle;
use crate::error::UnderlineError;
use crate::renderer::line::LineSegment;
use crate::renderer::text::Font;

// ---------------------------------------------------------------------------
// NodeId — generational index
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    id: u32,
    generation: u32,
}

impl NodeId {
    pub fn id(self) -> u32 {
        self.id
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

// ---------------------------------------------------------------------------
// Host interfaces
// ---------------------------------------------------------------------------

/// A text-display object: settable text and wrap flag, measurable size, and
/// the line breakdown its wrap algorithm produced for the current text.
pub trait TextDisplay {
    fn text(&self) -> &str;
    fn set_text(&mut self, text: &str);
    fn word_wrap(&self) -> bool;
    fn set_word_wrap(&mut self, enabled: bool);
    /// Extra pixels between successive rendered lines.
    fn line_spacing(&self) -> f32;
    /// Rendered `(width, height)` in pixels under the current settings.
    fn size(&self) -> Vec2;
    /// Display lines of the current text; concatenated they equal `text()`.
    fn wrapped_lines(&self) -> Vec<String>;
}

/// Scene-graph operations needed by widgets built on top of the host:
/// grouping, text and line primitives, parent/child attachment and
/// explicit destruction.
pub trait SceneHost {
    type Text: TextDisplay;

    /// Create an empty group, at the top level when `parent` is `None`.
    fn add_group(&mut self, parent: Option<NodeId>) -> Result<NodeId, UnderlineError>;

    fn add_text(
        &mut self,
        parent: NodeId,
        position: Vec2,
        text: &str,
        style: TextStyle,
    ) -> Result<NodeId, UnderlineError>;

    /// Attach a line primitive at `position`, relative to `parent`.
    fn add_line(
        &mut self,
        parent: NodeId,
        position: Vec2,
        line: LineSegment,
    ) -> Result<NodeId, UnderlineError>;

    fn set_text_style(&mut self, node: NodeId, style: TextStyle) -> Result<(), UnderlineError>;

    fn text(&self, node: NodeId) -> Option<&Self::Text>;
    fn text_mut(&mut self, node: NodeId) -> Option<&mut Self::Text>;
    fn line(&self, node: NodeId) -> Option<&LineSegment>;

    /// Position relative to the parent node.
    fn position(&self, node: NodeId) -> Option<Vec2>;

    fn contains(&self, node: NodeId) -> bool;

    /// Destroy `node` and its subtree. Returns `false` for a dead handle.
    fn destroy(&mut self, node: NodeId) -> bool;
}

// ---------------------------------------------------------------------------
// Node storage
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum NodeKind {
    Group,
    Text(BitmapText),
    Line(LineSegment),
}

#[derive(Debug)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub position: Vec2,
    pub kind: NodeKind,
}

#[derive(Debug, Default)]
struct NodeAllocator {
    generations: Vec<u32>,
    free: Vec<u32>,
}

impl NodeAllocator {
    fn allocate(&mut self) -> NodeId {
        if let Some(id) = self.free.pop() {
            NodeId { id, generation: self.generations[id as usize] }
        } else {
            let id = self.generations.len() as u32;
            self.generations.push(0);
            NodeId { id, generation: 0 }
        }
    }

    fn deallocate(&mut self, node: NodeId) -> bool {
        if !self.is_alive(node) {
            return false;
        }
        self.generations[node.id as usize] += 1;
        self.free.push(node.id);
        true
    }

    fn is_alive(&self, node: NodeId) -> bool {
        let idx = node.id as usize;
        idx < self.generations.len() && self.generations[idx] == node.generation
    }
}

// ---------------------------------------------------------------------------
// SceneGraph
// ---------------------------------------------------------------------------

/// Retained scene graph with a font registry.
#[derive(Debug, Default)]
pub struct SceneGraph {
    allocator: NodeAllocator,
    nodes: Vec<Option<Node>>,
    roots: Vec<NodeId>,
    fonts: Vec<Rc<Font>>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a font and return its id for use in [`TextStyle::font_id`].
    pub fn add_font(&mut self, font: Font) -> usize {
        let id = self.fonts.len();
        self.fonts.push(Rc::new(font));
        id
    }

    pub fn font(&self, id: usize) -> Option<&Font> {
        self.fonts.get(id).map(Rc::as_ref)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        if !self.allocator.is_alive(id) {
            return None;
        }
        self.nodes.get(id.id as usize)?.as_ref()
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if !self.allocator.is_alive(id) {
            return None;
        }
        self.nodes.get_mut(id.id as usize)?.as_mut()
    }

    /// Top-level nodes in creation order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], |n| n.children.as_slice())
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move `node` relative to its parent.
    pub fn set_position(&mut self, id: NodeId, position: Vec2) -> Result<(), UnderlineError> {
        let node = self.node_mut(id).ok_or(UnderlineError::MissingNode(id))?;
        node.position = position;
        Ok(())
    }

    /// Sum of the positions of `id` and all of its ancestors.
    pub fn world_position(&self, id: NodeId) -> Option<Vec2> {
        let mut node = self.node(id)?;
        let mut pos = node.position;
        while let Some(parent) = node.parent {
            node = self.node(parent)?;
            pos += node.position;
        }
        Some(pos)
    }

    fn font_rc(&self, id: usize) -> Result<Rc<Font>, UnderlineError> {
        self.fonts.get(id).cloned().ok_or(UnderlineError::UnknownFont(id))
    }

    fn insert(&mut self, parent: Option<NodeId>, position: Vec2, kind: NodeKind) -> Result<NodeId, UnderlineError> {
        if let Some(p) = parent {
            if !self.allocator.is_alive(p) {
                return Err(UnderlineError::MissingNode(p));
            }
        }

        let id = self.allocator.allocate();
        let idx = id.id as usize;
        if idx >= self.nodes.len() {
            self.nodes.resize_with(idx + 1, || None);
        }
        self.nodes[idx] = Some(Node { parent, children: Vec::new(), position, kind });

        match parent.and_then(|p| self.node_mut(p)) {
            Some(p) => p.children.push(id),
            None => self.roots.push(id),
        }
        Ok(id)
    }
}

impl SceneHost for SceneGraph {
    type Text = BitmapText;

    fn add_group(&mut self, parent: Option<NodeId>) -> Result<NodeId, UnderlineError> {
        self.insert(parent, Vec2::ZERO, NodeKind::Group)
    }

    fn add_text(
        &mut self,
        parent: NodeId,
        position: Vec2,
        text: &str,
        style: TextStyle,
    ) -> Result<NodeId, UnderlineError> {
        let font = self.font_rc(style.font_id)?;
        self.insert(Some(parent), position, NodeKind::Text(BitmapText::new(font, text, style)))
    }

    fn add_line(
        &mut self,
        parent: NodeId,
        position: Vec2,
        line: LineSegment,
    ) -> Result<NodeId, UnderlineError> {
        self.insert(Some(parent), position, NodeKind::Line(line))
    }

    fn set_text_style(&mut self, node: NodeId, style: TextStyle) -> Result<(), UnderlineError> {
        let font = self.font_rc(style.font_id)?;
        let text = self.text_mut(node).ok_or(UnderlineError::MissingNode(node))?;
        text.set_style(font, style);
        Ok(())
    }

    fn text(&self, node: NodeId) -> Option<&BitmapText> {
        match &self.node(node)?.kind {
            NodeKind::Text(t) => Some(t),
            _ => None,
        }
    }

    fn text_mut(&mut self, node: NodeId) -> Option<&mut BitmapText> {
        match &mut self.node_mut(node)?.kind {
            NodeKind::Text(t) => Some(t),
            _ => None,
        }
    }

    fn line(&self, node: NodeId) -> Option<&LineSegment> {
        match &self.node(node)?.kind {
            NodeKind::Line(l) => Some(l),
            _ => None,
        }
    }

    fn position(&self, node: NodeId) -> Option<Vec2> {
        self.node(node).map(|n| n.position)
    }

    fn contains(&self, node: NodeId) -> bool {
        self.allocator.is_alive(node)
    }

    fn destroy(&mut self, node: NodeId) -> bool {
        let Some(parent) = self.node(node).map(|n| n.parent) else {
            return false;
        };

        match parent.and_then(|p| self.node_mut(p)) {
            Some(p) => p.children.retain(|c| *c != node),
            None => self.roots.retain(|r| *r != node),
        }

        // Depth-first teardown of the detached subtree.
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(removed) = self.nodes.get_mut(id.id as usize).and_then(Option::take) {
                stack.extend(removed.children);
            }
            self.allocator.deallocate(id);
        }
        true
    }
}
