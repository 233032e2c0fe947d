//! DOM tree operations.
//!
//! The [`Dom`] struct owns an `Arena<Node>` and keeps parent/child links
//! consistent while the tree builder appends nodes.

use std::fmt::Write as _;

use arena::Arena;

use crate::node::{Attr, ElementData, Node, NodeData, NodeId};

// ---------------------------------------------------------------------------
// Dom
// ---------------------------------------------------------------------------

/// The complete DOM tree.
#[derive(Default)]
pub struct Dom {
    pub nodes: Arena<Node>,
    root: Option<NodeId>,
}

impl Dom {
    /// Create an empty DOM (no root yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// The root element, once the builder has set one.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, root: NodeId) {
        self.root = Some(root);
    }

    // =======================================================================
    // Node creation
    // =======================================================================

    /// Create a detached element.
    ///
    /// Later attributes with a name already present overwrite the earlier
    /// value, keeping the first position.
    pub fn create_element(&mut self, tag_name: &str, attrs: Vec<Attr>) -> NodeId {
        let mut data = ElementData::new(tag_name);
        for attr in attrs {
            data.set_attr(&attr.name, &attr.value);
        }
        self.nodes.alloc(Node::new(NodeData::Element(data)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, data: &str) -> NodeId {
        self.nodes.alloc(Node::new(NodeData::Text {
            data: data.to_string(),
        }))
    }

    // =======================================================================
    // Tree mutation
    // =======================================================================

    /// Append `child` as the last child of `parent`.
    ///
    /// A child that is already attached is first removed from its current
    /// parent, so it never appears twice.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child {
            return;
        }
        if let Some(old_parent) = self.nodes.get(child).and_then(|n| n.parent) {
            if let Some(p) = self.nodes.get_mut(old_parent) {
                p.children.retain(|&c| c != child);
            }
        }
        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parent = Some(parent);
        }
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(child);
        }
    }

    // =======================================================================
    // Accessors
    // =======================================================================

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Children of `id` in insertion order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Tag name of an element, `None` for text or an unknown id.
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.tag_name())
    }

    /// Content of a text node, `None` for elements or an unknown id.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.text())
    }

    // =======================================================================
    // Traversal
    // =======================================================================

    /// All descendants of `node` in pre-order (not including `node`).
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        out
    }

    /// Elements with tag `tag` in the subtree rooted at `root`, pre-order,
    /// `root` included.
    pub fn get_elements_by_tag(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        std::iter::once(root)
            .chain(self.descendants(root))
            .filter(|&id| self.tag_name(id) == Some(tag))
            .collect()
    }

    /// Render the subtree as an indented listing, one node per line.
    ///
    /// ```text
    ///  <html>
    ///    <body>
    ///      <p>
    ///        "hi"
    /// ```
    pub fn dump(&self, root: NodeId) -> String {
        let mut out = String::new();
        self.dump_into(root, 0, &mut out);
        out
    }

    fn dump_into(&self, id: NodeId, indent: usize, out: &mut String) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let _ = writeln!(out, "{:indent$} {node}", "", indent = indent);
        for &child in &node.children {
            self.dump_into(child, indent + 2, out);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// ```text
    /// html
    /// ├── head
    /// └── body
    ///     ├── p ("First")
    ///     └── div
    ///         └── p ("Second")
    /// ```
    fn build_sample_tree() -> (Dom, NodeId, NodeId, NodeId, NodeId, NodeId) {
        let mut dom = Dom::new();
        let html = dom.create_element("html", Vec::new());
        let head = dom.create_element("head", Vec::new());
        let body = dom.create_element("body", Vec::new());
        let p1 = dom.create_element("p", Vec::new());
        let t1 = dom.create_text("First");
        let div = dom.create_element("div", Vec::new());
        let p2 = dom.create_element("p", Vec::new());
        let t2 = dom.create_text("Second");

        dom.append_child(html, head);
        dom.append_child(html, body);
        dom.append_child(body, p1);
        dom.append_child(p1, t1);
        dom.append_child(body, div);
        dom.append_child(div, p2);
        dom.append_child(p2, t2);
        dom.set_root(html);

        (dom, html, body, p1, div, p2)
    }

    #[test]
    fn append_child_sets_links() {
        let mut dom = Dom::new();
        let parent = dom.create_element("div", Vec::new());
        let c1 = dom.create_element("span", Vec::new());
        let c2 = dom.create_text("hi");
        dom.append_child(parent, c1);
        dom.append_child(parent, c2);

        assert_eq!(dom.children(parent), &[c1, c2]);
        assert_eq!(dom.parent(c1), Some(parent));
        assert_eq!(dom.parent(c2), Some(parent));
        assert_eq!(dom.parent(parent), None);
    }

    #[test]
    fn reappending_moves_instead_of_duplicating() {
        let mut dom = Dom::new();
        let a = dom.create_element("a", Vec::new());
        let b = dom.create_element("b", Vec::new());
        let child = dom.create_text("x");
        dom.append_child(a, child);
        dom.append_child(a, child);
        assert_eq!(dom.children(a), &[child]);
        dom.append_child(b, child);
        assert!(dom.children(a).is_empty());
        assert_eq!(dom.children(b), &[child]);
        assert_eq!(dom.parent(child), Some(b));
    }

    #[test]
    fn duplicate_attribute_names_keep_last_value() {
        let mut dom = Dom::new();
        let attrs = vec![
            Attr { name: "id".into(), value: "one".into() },
            Attr { name: "id".into(), value: "two".into() },
        ];
        let el = dom.create_element("div", attrs);
        let data = dom.get(el).unwrap().as_element().unwrap();
        assert_eq!(data.attrs.len(), 1);
        assert_eq!(data.attr("id"), Some("two"));
    }

    #[test]
    fn descendants_are_pre_order() {
        let (dom, html, body, p1, div, p2) = build_sample_tree();
        let tags: Vec<String> = dom
            .descendants(html)
            .into_iter()
            .map(|id| dom.get(id).unwrap().to_string())
            .collect();
        assert_eq!(
            tags,
            vec!["<head>", "<body>", "<p>", "\"First\"", "<div>", "<p>", "\"Second\""]
        );
        assert_eq!(dom.get_elements_by_tag(html, "p"), vec![p1, p2]);
        assert_eq!(dom.get_elements_by_tag(div, "div"), vec![div]);
        assert_eq!(dom.parent(p2), Some(div));
        assert_eq!(dom.parent(div), Some(body));
    }

    #[test]
    fn text_and_tag_accessors() {
        let (dom, html, _body, p1, _div, _p2) = build_sample_tree();
        let text = dom.children(p1)[0];
        assert_eq!(dom.tag_name(html), Some("html"));
        assert_eq!(dom.tag_name(text), None);
        assert_eq!(dom.text(text), Some("First"));
        assert_eq!(dom.root(), Some(html));
        assert!(dom.children(text).is_empty());
    }

    #[test]
    fn dump_indents_by_depth() {
        let (dom, html, ..) = build_sample_tree();
        let dump = dom.dump(html);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines[0], " <html>");
        assert_eq!(lines[1], "   <head>");
        assert_eq!(lines[3], "     <p>");
        assert_eq!(lines[4], "       \"First\"");
        assert_eq!(lines.len(), 8);
    }
}
