//! # Paint Crate
//!
//! Display list generation from the layout tree, and replay of the list
//! onto a [`Canvas`].
//!
//! Items are emitted in document order: a box's own background, then its
//! words, then its children. Every item knows its vertical extent in
//! document coordinates so a renderer can skip off-screen items without
//! walking the tree again.

use common::{Color, Rect};
use dom::Dom;
use font::{FontCache, FontKey};
use layout::{LayoutBoxId, LayoutBoxKind, LayoutTree};

/// Fill drawn behind preformatted blocks.
pub const PRE_BACKGROUND: Color = Color::GRAY;

// ─────────────────────────────────────────────────────────────────────────────
// DisplayItem
// ─────────────────────────────────────────────────────────────────────────────

/// A single paint command in the display list.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayItem {
    /// Fill a rectangle with a solid color.
    SolidRect { rect: Rect, color: Color },

    /// Draw one word with its top-left corner at (`rect.left`, `rect.top`).
    ///
    /// `rect.bottom` is the top plus the font's line spacing.
    TextRun {
        rect: Rect,
        text: String,
        font: FontKey,
    },
}

impl DisplayItem {
    pub fn rect(&self) -> Rect {
        match self {
            Self::SolidRect { rect, .. } | Self::TextRun { rect, .. } => *rect,
        }
    }

    pub fn top(&self) -> f32 {
        self.rect().top
    }

    pub fn bottom(&self) -> f32 {
        self.rect().bottom
    }

    /// Does the item reach into the band `[scroll, scroll + viewport_height]`?
    pub fn is_visible(&self, scroll: f32, viewport_height: f32) -> bool {
        self.rect().overlaps_band(scroll, scroll + viewport_height)
    }

    /// Issue this command on `canvas`, shifted up by `scroll`.
    pub fn execute(&self, scroll: f32, canvas: &mut dyn Canvas) {
        match self {
            Self::SolidRect { rect, color } => {
                canvas.create_rectangle(rect.translate_y(-scroll), *color);
            }
            Self::TextRun { rect, text, font } => {
                canvas.create_text(rect.left, rect.top - scroll, text, *font);
            }
        }
    }
}

/// An ordered list of paint commands.
pub type DisplayList = Vec<DisplayItem>;

// ─────────────────────────────────────────────────────────────────────────────
// Canvas
// ─────────────────────────────────────────────────────────────────────────────

/// A drawing surface in screen coordinates.
pub trait Canvas {
    /// Draw `text` with its top-left corner at (`x`, `y`).
    fn create_text(&mut self, x: f32, y: f32, text: &str, font: FontKey);

    /// Fill `rect` with `color`, no outline.
    fn create_rectangle(&mut self, rect: Rect, color: Color);
}

// ─────────────────────────────────────────────────────────────────────────────
// Build display list
// ─────────────────────────────────────────────────────────────────────────────

/// Build a display list from a layout tree.
///
/// `fonts` supplies the word widths and line spacing for text extents.
pub fn build_display_list(layout_tree: &LayoutTree, dom: &Dom, fonts: &mut FontCache) -> DisplayList {
    let mut list = DisplayList::new();
    if let Some(root_id) = layout_tree.root {
        paint_layout_box(layout_tree, dom, fonts, root_id, &mut list);
    }
    list
}

fn paint_layout_box(
    tree: &LayoutTree,
    dom: &Dom,
    fonts: &mut FontCache,
    box_id: LayoutBoxId,
    list: &mut DisplayList,
) {
    let Some(layout_box) = tree.get(box_id) else {
        return;
    };

    if layout_box.kind == LayoutBoxKind::Block && dom.tag_name(layout_box.node) == Some("pre") {
        list.push(DisplayItem::SolidRect {
            rect: layout_box.rect(),
            color: PRE_BACKGROUND,
        });
    }

    for word in &layout_box.words {
        let linespace = fonts.get(word.font).metrics.linespace;
        let width = fonts.measure(&word.word, word.font);
        list.push(DisplayItem::TextRun {
            rect: Rect::from_origin_size(word.x, word.y, width, linespace),
            text: word.word.clone(),
            font: word.font,
        });
    }

    for &child in &layout_box.children {
        paint_layout_box(tree, dom, fonts, child, list);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
