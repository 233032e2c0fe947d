//! # Layout Engine
//!
//! Builds a geometry tree from a DOM tree: a document box inset by the
//! page margins, one block box per DOM node in block mode, and lines of
//! placed words for boxes in inline mode.

pub mod block;
pub mod inline;
pub mod tree;

pub use block::{layout_block, layout_mode, LayoutContext, BLOCK_ELEMENTS};
pub use inline::{layout_inline_content, InlineContent};
pub use tree::{LayoutBox, LayoutBoxId, LayoutBoxKind, LayoutMode, LayoutTree, PlacedWord};

use dom::{Dom, NodeId};
use font::FontCache;

/// Viewport size and page spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub width: f32,
    pub height: f32,
    /// Horizontal page margin.
    pub h_step: f32,
    /// Vertical page margin, also the gap after a paragraph.
    pub v_step: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
            h_step: 13.0,
            v_step: 18.0,
        }
    }
}

/// Lay out the tree rooted at `root` for the given viewport.
///
/// The document box is `width − 2·h_step` wide, anchored at
/// (`h_step`, `v_step`), and takes the height of its only child, the block
/// box for `root`. Layout never fails and is a pure function of its inputs
/// and the metrics provider behind `fonts`.
pub fn layout(dom: &Dom, root: NodeId, config: &LayoutConfig, fonts: &mut FontCache) -> LayoutTree {
    let mut tree = LayoutTree::new();

    let mut document = LayoutBox::new(root, LayoutBoxKind::Document, None, None);
    document.x = config.h_step;
    document.y = config.v_step;
    document.width = config.width - 2.0 * config.h_step;
    let doc = tree.alloc(document);
    tree.root = Some(doc);

    let child = tree.alloc(LayoutBox::new(root, LayoutBoxKind::Block, Some(doc), None));
    tree.append_child(doc, child);

    let mut ctx = LayoutContext {
        dom,
        fonts,
        v_step: config.v_step,
    };
    layout_block(&mut tree, &mut ctx, child);

    let height = tree.boxes[child].height;
    tree.boxes[doc].height = height;
    log::debug!(
        "layout: {} boxes, document height {height}",
        tree.boxes.len()
    );
    tree
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
