//! DOM node model.
//!
//! All nodes live in an `Arena<Node>` and are referenced by `NodeId`.
//! Each node owns an ordered child list; the parent link is a plain handle
//! used only for upward lookups.

use std::fmt;

/// A handle into the arena that identifies a DOM node.
pub type NodeId = arena::Idx<Node>;

// ---------------------------------------------------------------------------
// Attribute
// ---------------------------------------------------------------------------

/// A single attribute on an element (e.g. `class="foo"`).
///
/// `value` is stored exactly as written after the `=`, quotes included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

// ---------------------------------------------------------------------------
// Element data
// ---------------------------------------------------------------------------

/// Data specific to element nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementData {
    /// Lowercase tag name.
    pub tag_name: String,
    /// Attributes in first-seen order; names are unique and case-folded.
    pub attrs: Vec<Attr>,
}

impl ElementData {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            attrs: Vec::new(),
        }
    }

    /// Set an attribute, replacing the value of an existing one in place.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value.to_string(),
            None => self.attrs.push(Attr {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// The raw attribute value, quotes included.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// The attribute value with one layer of surrounding quotes removed.
    ///
    /// Only values of at least two characters that start with `'` or `"`
    /// and end with the same character are stripped.
    pub fn attr_unquoted(&self, name: &str) -> Option<&str> {
        self.attr(name).map(unquote)
    }
}

fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            return &value[1..value.len() - 1];
        }
    }
    value
}

// ---------------------------------------------------------------------------
// Node data
// ---------------------------------------------------------------------------

/// The payload that distinguishes element and text nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeData {
    Element(ElementData),
    Text { data: String },
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A single node in the DOM tree.
#[derive(Clone, Debug)]
pub struct Node {
    pub data: NodeData,
    /// `None` only for the root and for nodes not yet attached.
    pub parent: Option<NodeId>,
    /// Children in insertion order. Always empty for text nodes.
    pub children: Vec<NodeId>,
}

impl Node {
    /// Create a new detached node.
    pub fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text { .. })
    }

    /// If this is an element, return a reference to its [`ElementData`].
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            NodeData::Text { .. } => None,
        }
    }

    /// The tag name for elements, `None` for text.
    pub fn tag_name(&self) -> Option<&str> {
        self.as_element().map(|e| e.tag_name.as_str())
    }

    /// The text content for text nodes, `None` for elements.
    pub fn text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text { data } => Some(data),
            NodeData::Element(_) => None,
        }
    }
}

/// Elements print as `<tag>`, text as a quoted string.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            NodeData::Element(e) => write!(f, "<{}>", e.tag_name),
            NodeData::Text { data } => write!(f, "{data:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_attr_replaces_existing() {
        let mut el = ElementData::new("a");
        el.set_attr("href", "one");
        el.set_attr("class", "x");
        el.set_attr("href", "two");
        assert_eq!(el.attrs.len(), 2);
        assert_eq!(el.attrs[0].name, "href");
        assert_eq!(el.attr("href"), Some("two"));
    }

    #[test]
    fn attr_keeps_quotes_but_unquoted_strips_them() {
        let mut el = ElementData::new("a");
        el.set_attr("href", "\"/index.html\"");
        el.set_attr("title", "'x'");
        el.set_attr("alt", "\"");
        el.set_attr("id", "plain");
        assert_eq!(el.attr("href"), Some("\"/index.html\""));
        assert_eq!(el.attr_unquoted("href"), Some("/index.html"));
        assert_eq!(el.attr_unquoted("title"), Some("x"));
        assert_eq!(el.attr_unquoted("alt"), Some("\""));
        assert_eq!(el.attr_unquoted("id"), Some("plain"));
        assert_eq!(el.attr_unquoted("missing"), None);
    }

    #[test]
    fn empty_quoted_value_unquotes_to_empty() {
        let mut el = ElementData::new("input");
        el.set_attr("value", "''");
        assert_eq!(el.attr_unquoted("value"), Some(""));
    }

    #[test]
    fn display_forms() {
        let el = Node::new(NodeData::Element(ElementData::new("p")));
        let text = Node::new(NodeData::Text { data: "hi".into() });
        assert_eq!(el.to_string(), "<p>");
        assert_eq!(text.to_string(), "\"hi\"");
        assert_eq!(el.tag_name(), Some("p"));
        assert_eq!(text.tag_name(), None);
        assert_eq!(text.text(), Some("hi"));
    }
}
