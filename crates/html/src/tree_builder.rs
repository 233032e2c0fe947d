//! Tree builder: constructs a [`Dom`] from a stream of [`HtmlToken`]s.
//!
//! Keeps a stack of open elements. Before every tag, every text run and at
//! end of input the implicit-tag rules run, so that the finished tree always
//! has an `html` root whose children are exactly one `head` followed by
//! exactly one `body`.

use crate::token::HtmlToken;
use crate::tokenizer::Tokenizer;
use dom::node::{Attr, NodeId};
use dom::Dom;

/// Elements that never have content and are never pushed on the stack.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements that belong inside `head` when they appear before the body.
pub const HEAD_ELEMENTS: &[&str] = &[
    "base", "basefont", "bgsound", "noscript", "link", "meta", "title", "style", "script",
];

fn is_head_element(tag: Option<&str>) -> bool {
    tag.is_some_and(|t| HEAD_ELEMENTS.contains(&t))
}

// ---------------------------------------------------------------------------
// Tree builder
// ---------------------------------------------------------------------------

/// Builds a DOM tree from markup tokens.
pub struct TreeBuilder {
    pub dom: Dom,
    open_elements: Vec<NodeId>,
    head_pointer: Option<NodeId>,
    body_pointer: Option<NodeId>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    /// Create a new tree builder with an empty DOM and an empty stack.
    pub fn new() -> Self {
        Self {
            dom: Dom::new(),
            open_elements: Vec::new(),
            head_pointer: None,
            body_pointer: None,
        }
    }

    /// Feed one token.
    pub fn process_token(&mut self, token: HtmlToken) {
        match token {
            HtmlToken::Text(text) => self.add_text(&text),
            HtmlToken::Tag { name, attrs } => {
                let attrs = attrs
                    .into_iter()
                    .map(|(name, value)| Attr { name, value })
                    .collect();
                self.add_tag(&name, attrs);
            }
        }
    }

    /// Close every open element and return the finished DOM.
    ///
    /// The root is always an `html` element, even for empty input.
    pub fn finish(mut self) -> Dom {
        self.implicit_tags(None);
        if self.body_pointer.is_none() {
            // Input ended inside a head-only element such as an unclosed
            // `<title>`; the body is still required.
            log::trace!("implicit <body> at end of input");
            self.open_elements.truncate(1);
            self.open_section("body", Vec::new());
        }
        if let Some(&root) = self.open_elements.first() {
            self.dom.set_root(root);
        }
        self.open_elements.clear();
        log::debug!("tree builder finished with {} nodes", self.dom.nodes.len());
        self.dom
    }

    // -----------------------------------------------------------------------
    // Token handlers
    // -----------------------------------------------------------------------

    fn add_text(&mut self, text: &str) {
        if text.chars().all(char::is_whitespace) {
            return;
        }
        self.implicit_tags(None);
        let node = self.dom.create_text(text);
        if let Some(parent) = self.current_node() {
            self.dom.append_child(parent, node);
        }
    }

    fn add_tag(&mut self, name: &str, attrs: Vec<Attr>) {
        if name.starts_with('!') {
            log::trace!("discarding <{name}>");
            return;
        }
        self.implicit_tags(Some(name));

        if name.starts_with('/') {
            // Closers pop the current element whatever its name, but the
            // root is never closed.
            if self.open_elements.len() > 1 {
                self.open_elements.pop();
            } else {
                log::trace!("ignoring <{name}> at the root");
            }
        } else if self.open_elements.len() == 1 && (name == "head" || name == "body") {
            self.open_section(name, attrs);
        } else if VOID_ELEMENTS.contains(&name) {
            let node = self.dom.create_element(name, attrs);
            if let Some(parent) = self.current_node() {
                self.dom.append_child(parent, node);
            }
        } else {
            self.insert_element(name, attrs);
        }
    }

    /// Insert the structure the author left out.
    ///
    /// `tag` is the name of the tag about to be handled, or `None` for text
    /// and end of input.
    fn implicit_tags(&mut self, tag: Option<&str>) {
        loop {
            if self.open_elements.is_empty() {
                if tag == Some("html") {
                    break;
                }
                log::trace!("implicit <html>");
                self.insert_element("html", Vec::new());
            } else if self.open_elements.len() == 1 {
                if tag == Some("head") {
                    break;
                }
                if self.head_pointer.is_none() {
                    // An empty head is materialized even when the content
                    // belongs in the body; the next rule closes it again.
                    log::trace!("implicit <head>");
                    self.open_section("head", Vec::new());
                } else if matches!(tag, Some("body" | "/html")) {
                    break;
                } else if is_head_element(tag) {
                    self.open_section("head", Vec::new());
                } else {
                    log::trace!("implicit <body>");
                    self.open_section("body", Vec::new());
                }
            } else if self.stack_is(&["html", "head"])
                && tag != Some("/head")
                && !is_head_element(tag)
            {
                log::trace!("implicit </head>");
                self.open_elements.pop();
            } else {
                break;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn current_node(&self) -> Option<NodeId> {
        self.open_elements.last().copied()
    }

    /// Does the open-element stack hold exactly these tag names?
    fn stack_is(&self, names: &[&str]) -> bool {
        self.open_elements.len() == names.len()
            && self
                .open_elements
                .iter()
                .zip(names)
                .all(|(&id, name)| self.dom.tag_name(id) == Some(*name))
    }

    /// Create an element, append it to the current node (or make it the
    /// root when the stack is empty) and push it.
    fn insert_element(&mut self, tag: &str, attrs: Vec<Attr>) -> NodeId {
        let node = self.dom.create_element(tag, attrs);
        match self.current_node() {
            Some(parent) => self.dom.append_child(parent, node),
            None => self.dom.set_root(node),
        }
        self.open_elements.push(node);
        node
    }

    /// Open `head` or `body` under the root, reusing the existing one.
    fn open_section(&mut self, tag: &str, attrs: Vec<Attr>) {
        let pointer = if tag == "head" {
            self.head_pointer
        } else {
            self.body_pointer
        };
        match pointer {
            Some(existing) => self.open_elements.push(existing),
            None => {
                let node = self.insert_element(tag, attrs);
                if tag == "head" {
                    self.head_pointer = Some(node);
                } else {
                    self.body_pointer = Some(node);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parse a markup string into a DOM tree.
pub fn parse(text: &str) -> Dom {
    let mut builder = TreeBuilder::new();
    for token in Tokenizer::new(text) {
        builder.process_token(token);
    }
    builder.finish()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
