//! Layout tree: the box tree that mirrors the DOM tree.
//!
//! Boxes live in an arena; parent, previous-sibling and child links are
//! arena indices. Boxes refer back to DOM nodes by [`NodeId`] and never own
//! them.

use arena::{Arena, Idx};
use common::Rect;
use dom::NodeId;
use font::FontKey;

/// A handle into the layout arena.
pub type LayoutBoxId = Idx<LayoutBox>;

// ─────────────────────────────────────────────────────────────────────────────
// LayoutBoxKind / LayoutMode
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutBoxKind {
    /// The single root box anchored inside the viewport margins.
    Document,
    /// A box generated for one DOM node.
    Block,
}

/// How a box arranges its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Children are block boxes stacked vertically.
    #[default]
    Block,
    /// The node's subtree is flowed into lines of placed words; no child
    /// boxes are created.
    Inline,
}

/// A word positioned by inline layout, in document coordinates.
///
/// `y` is the top of the word's ascent.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub x: f32,
    pub y: f32,
    pub word: String,
    pub font: FontKey,
}

// ─────────────────────────────────────────────────────────────────────────────
// LayoutBox
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct LayoutBox {
    /// The DOM node this box was generated for.
    pub node: NodeId,
    pub kind: LayoutBoxKind,
    pub mode: LayoutMode,
    pub parent: Option<LayoutBoxId>,
    /// The sibling box immediately before this one; its bottom edge is this
    /// box's top edge.
    pub previous: Option<LayoutBoxId>,
    pub children: Vec<LayoutBoxId>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Words placed by inline layout. Empty in block mode.
    pub words: Vec<PlacedWord>,
}

impl LayoutBox {
    pub fn new(
        node: NodeId,
        kind: LayoutBoxKind,
        parent: Option<LayoutBoxId>,
        previous: Option<LayoutBoxId>,
    ) -> Self {
        Self {
            node,
            kind,
            mode: LayoutMode::Block,
            parent,
            previous,
            children: Vec::new(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            words: Vec::new(),
        }
    }

    /// The box's border rectangle.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.x, self.y, self.width, self.height)
    }

    /// Bottom edge, where the next sibling starts.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// LayoutTree
// ─────────────────────────────────────────────────────────────────────────────

/// The complete layout tree.
#[derive(Debug, Default)]
pub struct LayoutTree {
    /// Arena storing all layout boxes.
    pub boxes: Arena<LayoutBox>,

    /// The document box.
    pub root: Option<LayoutBoxId>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self {
            boxes: Arena::new(),
            root: None,
        }
    }

    pub fn alloc(&mut self, layout_box: LayoutBox) -> LayoutBoxId {
        self.boxes.alloc(layout_box)
    }

    pub fn get(&self, id: LayoutBoxId) -> Option<&LayoutBox> {
        self.boxes.get(id)
    }

    pub fn get_mut(&mut self, id: LayoutBoxId) -> Option<&mut LayoutBox> {
        self.boxes.get_mut(id)
    }

    pub fn append_child(&mut self, parent: LayoutBoxId, child: LayoutBoxId) {
        if let Some(parent_box) = self.boxes.get_mut(parent) {
            parent_box.children.push(child);
        }
    }

    pub fn children(&self, id: LayoutBoxId) -> &[LayoutBoxId] {
        self.boxes
            .get(id)
            .map(|b| b.children.as_slice())
            .unwrap_or(&[])
    }

    /// The document box, if layout has run.
    pub fn document(&self) -> Option<&LayoutBox> {
        self.root.and_then(|id| self.boxes.get(id))
    }

    /// Height of the laid-out document, 0 before layout.
    pub fn height(&self) -> f32 {
        self.document().map_or(0.0, |doc| doc.height)
    }

    /// All boxes in pre-order starting at the document box.
    pub fn pre_order(&self) -> Vec<LayoutBoxId> {
        let mut out = Vec::new();
        let mut stack: Vec<LayoutBoxId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        out
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
