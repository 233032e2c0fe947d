//! Block layout: mode inference and vertical stacking of child boxes.

use dom::{Dom, NodeId};
use font::FontCache;

use crate::inline::layout_inline_content;
use crate::tree::{LayoutBox, LayoutBoxId, LayoutBoxKind, LayoutMode, LayoutTree};

/// Tags whose elements force their parent into block mode.
pub const BLOCK_ELEMENTS: &[&str] = &[
    "html", "body", "article", "section", "nav", "aside", "h1", "h2", "h3", "h4", "h5", "h6",
    "hgroup", "header", "footer", "address", "p", "hr", "pre", "blockquote", "ol", "ul", "menu",
    "li", "dl", "dt", "dd", "figure", "figcaption", "main", "div", "table", "form", "fieldset",
    "legend", "details", "summary",
];

/// Decide how the box for `node` arranges its content.
///
/// Text is inline. An element with at least one block-level element child
/// is block, even with text siblings. Any other element with children is
/// inline, and an empty element is an empty block.
pub fn layout_mode(dom: &Dom, node: NodeId) -> LayoutMode {
    let Some(n) = dom.get(node) else {
        return LayoutMode::Block;
    };
    if n.is_text() {
        return LayoutMode::Inline;
    }
    let has_block_child = n.children.iter().any(|&child| {
        dom.tag_name(child)
            .is_some_and(|tag| BLOCK_ELEMENTS.contains(&tag))
    });
    if has_block_child || n.children.is_empty() {
        LayoutMode::Block
    } else {
        LayoutMode::Inline
    }
}

/// Shared inputs for one layout pass.
pub struct LayoutContext<'a> {
    pub dom: &'a Dom,
    pub fonts: &'a mut FontCache,
    pub v_step: f32,
}

/// Lay out `box_id` and its subtree.
///
/// The parent (and previous sibling, if any) must already be positioned.
/// Child boxes are created here; the box's height is known on return.
pub fn layout_block(tree: &mut LayoutTree, ctx: &mut LayoutContext<'_>, box_id: LayoutBoxId) {
    let (node, parent, previous) = {
        let b = &tree.boxes[box_id];
        (b.node, b.parent, b.previous)
    };
    let (x, width, parent_y) = parent
        .map(|p| {
            let p = &tree.boxes[p];
            (p.x, p.width, p.y)
        })
        .unwrap_or_default();
    let y = previous.map_or(parent_y, |prev| tree.boxes[prev].bottom());
    let mode = layout_mode(ctx.dom, node);

    {
        let b = &mut tree.boxes[box_id];
        b.x = x;
        b.y = y;
        b.width = width;
        b.mode = mode;
    }

    let height = match mode {
        LayoutMode::Block => {
            let mut previous = None;
            for &child in ctx.dom.children(node) {
                let child_box = tree.alloc(LayoutBox::new(
                    child,
                    LayoutBoxKind::Block,
                    Some(box_id),
                    previous,
                ));
                tree.append_child(box_id, child_box);
                previous = Some(child_box);
            }
            let children = tree.children(box_id).to_vec();
            for &child in &children {
                layout_block(tree, ctx, child);
            }
            children.iter().map(|&c| tree.boxes[c].height).sum()
        }
        LayoutMode::Inline => {
            let content =
                layout_inline_content(ctx.dom, node, ctx.fonts, (x, y), width, ctx.v_step);
            tree.boxes[box_id].words = content.words;
            content.height
        }
    };
    tree.boxes[box_id].height = height;
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: the first element with `tag` under the root.
    fn find(dom: &Dom, tag: &str) -> NodeId {
        let root = dom.root().unwrap();
        dom.get_elements_by_tag(root, tag)[0]
    }

    #[test]
    fn text_is_inline() {
        let dom = html::parse("hello");
        let body = find(&dom, "body");
        let text = dom.children(body)[0];
        assert_eq!(layout_mode(&dom, text), LayoutMode::Inline);
    }

    #[test]
    fn text_only_children_are_inline() {
        let dom = html::parse("<div>a <b>b</b> c</div>");
        assert_eq!(layout_mode(&dom, find(&dom, "div")), LayoutMode::Inline);
    }

    #[test]
    fn any_block_child_makes_block() {
        let dom = html::parse("<div>text<p>x</p>more</div>");
        assert_eq!(layout_mode(&dom, find(&dom, "div")), LayoutMode::Block);
    }

    #[test]
    fn empty_element_is_block() {
        let dom = html::parse("<div></div>");
        assert_eq!(layout_mode(&dom, find(&dom, "div")), LayoutMode::Block);
        assert_eq!(layout_mode(&dom, find(&dom, "head")), LayoutMode::Block);
    }

    #[test]
    fn html_root_is_block() {
        let dom = html::parse("<p>x</p>");
        assert_eq!(layout_mode(&dom, dom.root().unwrap()), LayoutMode::Block);
    }
}
