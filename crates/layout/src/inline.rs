//! Inline formatting: word flow, line breaking and baseline alignment.
//!
//! An inline box flattens its DOM subtree into words. Words accumulate on a
//! pending line until one does not fit; the line is then flushed, which
//! aligns every word on a shared baseline and moves the cursor down.

use dom::{Dom, NodeData, NodeId};
use font::{Font, FontCache, FontKey, FontStyle, FontWeight};

use crate::tree::PlacedWord;

/// Extra leading applied above the tallest ascent and below the deepest
/// descent of a line.
const LEADING: f32 = 1.25;

/// Words and resulting height of one inline box.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineContent {
    pub words: Vec<PlacedWord>,
    /// Final vertical cursor, relative to the box's top edge.
    pub height: f32,
}

/// Flow the subtree of `node` into a box at (`x`, `y`) of the given width.
///
/// `v_step` is the extra gap left after a closing `p`.
pub fn layout_inline_content(
    dom: &Dom,
    node: NodeId,
    fonts: &mut FontCache,
    (x, y): (f32, f32),
    width: f32,
    v_step: f32,
) -> InlineContent {
    let mut flow = WordFlow {
        fonts,
        origin_x: x,
        origin_y: y,
        width,
        v_step,
        cursor_x: 0.0,
        cursor_y: 0.0,
        line: Vec::new(),
        words: Vec::new(),
    };
    flow.recurse(dom, node, FontKey::default());
    flow.flush();
    InlineContent {
        words: flow.words,
        height: flow.cursor_y,
    }
}

/// The font in effect inside an element with the given tag.
///
/// Font state is a value: leaving the element restores the caller's copy.
pub fn open_tag(tag: &str, font: FontKey) -> FontKey {
    match tag {
        "i" => FontKey {
            style: FontStyle::Italic,
            ..font
        },
        "b" => FontKey {
            weight: FontWeight::Bold,
            ..font
        },
        "small" => FontKey {
            size: font.size.saturating_sub(2),
            ..font
        },
        "big" => FontKey {
            size: font.size + 4,
            ..font
        },
        _ => font,
    }
}

struct WordFlow<'a> {
    fonts: &'a mut FontCache,
    origin_x: f32,
    origin_y: f32,
    width: f32,
    v_step: f32,
    cursor_x: f32,
    cursor_y: f32,
    /// Pending line: offset from the left edge, word, font.
    line: Vec<(f32, String, Font)>,
    words: Vec<PlacedWord>,
}

impl WordFlow<'_> {
    fn recurse(&mut self, dom: &Dom, node: NodeId, font: FontKey) {
        let Some(n) = dom.get(node) else {
            return;
        };
        match &n.data {
            NodeData::Text { data } => {
                for word in data.split_whitespace() {
                    self.word(word, font);
                }
            }
            NodeData::Element(el) => {
                let tag = el.tag_name.as_str();
                let inner = open_tag(tag, font);
                if tag == "br" {
                    self.flush();
                }
                for &child in &n.children {
                    self.recurse(dom, child, inner);
                }
                if tag == "p" {
                    self.flush();
                    self.cursor_y += self.v_step;
                }
            }
        }
    }

    fn word(&mut self, word: &str, key: FontKey) {
        let font = self.fonts.get(key);
        let w = self.fonts.measure(word, key);
        if self.cursor_x + w > self.width {
            self.flush();
        }
        self.line.push((self.cursor_x, word.to_string(), font));
        self.cursor_x += w + font.space_width;
    }

    fn flush(&mut self) {
        if self.line.is_empty() {
            return;
        }
        let max_ascent = self
            .line
            .iter()
            .map(|(_, _, f)| f.metrics.ascent)
            .fold(0.0, f32::max);
        let max_descent = self
            .line
            .iter()
            .map(|(_, _, f)| f.metrics.descent)
            .fold(0.0, f32::max);
        let baseline = self.cursor_y + LEADING * max_ascent;

        for (rel_x, word, font) in self.line.drain(..) {
            self.words.push(PlacedWord {
                x: self.origin_x + rel_x,
                y: self.origin_y + baseline - font.metrics.ascent,
                word,
                font: font.key,
            });
        }

        self.cursor_y = baseline + LEADING * max_descent;
        self.cursor_x = 0.0;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
