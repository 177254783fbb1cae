//! A minimal element tree standing in for the browser document.
//!
//! Nodes live in an arena owned by [`Document`] and are addressed by
//! [`NodeId`] handles. Detached nodes are never reclaimed. Text updates on a
//! node that only holds text reuse its text node.

use std::collections::BTreeMap;

use crate::config::ScrollBehavior;

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct NodeId(usize);

#[derive(Eq, PartialEq, Debug, Clone)]
enum NodeData {
    Element {
        tag: String,
        classes: Vec<String>,
        attributes: BTreeMap<String, String>,
    },
    Text(String),
}

#[derive(Eq, PartialEq, Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

/// Scroll position of whoever is looking at the document.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct Viewport {
    pub offset: u32,
    pub last_scroll: Option<ScrollBehavior>,
}

// Elements that never carry children in the serialized markup.
const VOID_TAGS: [&str; 6] = ["br", "hr", "img", "input", "link", "meta"];

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    viewport: Viewport,
}

impl Document {
    pub fn new(root_tag: &str) -> Document {
        Document {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Element {
                    tag: root_tag.to_string(),
                    classes: Vec::new(),
                    attributes: BTreeMap::new(),
                },
            }],
            viewport: Viewport::default(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.push_node(
            parent,
            NodeData::Element {
                tag: tag.to_string(),
                classes: Vec::new(),
                attributes: BTreeMap::new(),
            },
        )
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push_node(parent, NodeData::Text(text.to_string()))
    }

    fn push_node(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            data,
        });
        if let Some(p) = self.nodes.get_mut(parent.0) {
            p.children.push(id);
        }
        id
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match self.nodes.get(node.0).map(|n| &n.data) {
            Some(NodeData::Element { tag, .. }) => Some(tag.as_str()),
            _ => None,
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        match self.nodes.get(node.0).map(|n| &n.data) {
            Some(NodeData::Element { classes, .. }) => classes.as_slice(),
            _ => &[],
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(Node {
            data: NodeData::Element { classes, .. },
            ..
        }) = self.nodes.get_mut(node.0)
        {
            if !classes.iter().any(|c| c == class) {
                classes.push(class.to_string());
            }
        }
    }

    /// Returns true if the class was present.
    pub fn remove_class(&mut self, node: NodeId, class: &str) -> bool {
        if let Some(Node {
            data: NodeData::Element { classes, .. },
            ..
        }) = self.nodes.get_mut(node.0)
        {
            let before = classes.len();
            classes.retain(|c| c != class);
            return classes.len() != before;
        }
        false
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match self.nodes.get(node.0).map(|n| &n.data) {
            Some(NodeData::Element { attributes, .. }) => attributes.get(name).map(|s| s.as_str()),
            _ => None,
        }
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(Node {
            data: NodeData::Element { attributes, .. },
            ..
        }) = self.nodes.get_mut(node.0)
        {
            attributes.insert(name.to_string(), value.to_string());
        }
    }

    /// Replaces all the children of `node` with a single text node.
    ///
    /// A lone text child is overwritten in place, so updating the same
    /// counter repeatedly does not grow the arena.
    pub fn set_text_content(&mut self, node: NodeId, text: &str) {
        let only_child = match self.nodes.get(node.0) {
            Some(n) if n.children.len() == 1 => Some(n.children[0]),
            Some(_) => None,
            None => return,
        };
        if let Some(c) = only_child {
            if let Some(Node {
                data: NodeData::Text(s),
                ..
            }) = self.nodes.get_mut(c.0)
            {
                *s = text.to_string();
                return;
            }
        }

        let old_children = match self.nodes.get_mut(node.0) {
            Some(n) => std::mem::take(&mut n.children),
            None => return,
        };
        for c in old_children {
            if let Some(child) = self.nodes.get_mut(c.0) {
                child.parent = None;
            }
        }
        self.append_text(node, text);
    }

    pub fn text_content(&self, node: NodeId) -> String {
        let mut res = String::new();
        self.collect_text(node, &mut res);
        res
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        if let Some(n) = self.nodes.get(node.0) {
            match &n.data {
                NodeData::Text(s) => out.push_str(s),
                NodeData::Element { .. } => {
                    for c in n.children.iter() {
                        self.collect_text(*c, out);
                    }
                }
            }
        }
    }

    /// The node itself or its nearest ancestor satisfying `pred`.
    pub fn closest_where<F>(&self, node: NodeId, pred: F) -> Option<NodeId>
    where
        F: Fn(NodeId) -> bool,
    {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if self.tag(id).is_some() && pred(id) {
                return Some(id);
            }
            cur = self.parent(id);
        }
        None
    }

    pub fn closest(&self, node: NodeId, class: &str) -> Option<NodeId> {
        self.closest_where(node, |id| self.has_class(id, class))
    }

    /// All the elements attached under `node` (included), in document order.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut res: Vec<NodeId> = Vec::new();
        let mut stack: Vec<NodeId> = vec![node];
        while let Some(id) = stack.pop() {
            if self.tag(id).is_none() {
                continue;
            }
            res.push(id);
            for c in self.children(id).iter().rev() {
                stack.push(*c);
            }
        }
        res
    }

    pub fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|id| self.has_class(*id, class))
            .collect()
    }

    pub fn element_by_id(&self, id_value: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|id| self.attribute(*id, "id") == Some(id_value))
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scroll_to(&mut self, offset: u32, behavior: ScrollBehavior) {
        self.viewport = Viewport {
            offset,
            last_scroll: Some(behavior),
        };
    }

    /// Serializes the tree under the root element.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_node(self.root(), 0, &mut out);
        out
    }

    fn write_node(&self, node: NodeId, depth: usize, out: &mut String) {
        let n = match self.nodes.get(node.0) {
            Some(n) => n,
            None => return,
        };
        let ind = "  ".repeat(depth);
        match &n.data {
            NodeData::Text(s) => {
                out.push_str(&ind);
                out.push_str(&escape_html(s));
                out.push('\n');
            }
            NodeData::Element {
                tag,
                classes,
                attributes,
            } => {
                out.push_str(&ind);
                out.push('<');
                out.push_str(tag);
                if !classes.is_empty() {
                    out.push_str(&format!(" class=\"{}\"", escape_html(&classes.join(" "))));
                }
                for (k, v) in attributes.iter() {
                    out.push_str(&format!(" {}=\"{}\"", k, escape_html(v)));
                }
                out.push('>');
                if VOID_TAGS.contains(&tag.as_str()) {
                    out.push('\n');
                    return;
                }
                // Single text children stay on the same line.
                match n.children.as_slice() {
                    [] => {}
                    [only] if self.tag(*only).is_none() => {
                        out.push_str(&escape_html(&self.text_content(*only)));
                    }
                    children => {
                        out.push('\n');
                        for c in children {
                            self.write_node(*c, depth + 1, out);
                        }
                        out.push_str(&ind);
                    }
                }
                out.push_str(&format!("</{}>\n", tag));
            }
        }
    }
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new("div");
        let list = doc.append_element(doc.root(), "ol");
        doc.add_class(list, "options");
        let item = doc.append_element(list, "li");
        doc.add_class(item, "correct");
        let text = doc.append_text(item, "Paris");
        (doc, list, item, text)
    }

    #[test]
    fn closest_walks_up_from_text_nodes() {
        let (doc, list, item, text) = sample();
        assert_eq!(doc.closest(text, "options"), Some(list));
        assert_eq!(doc.closest(item, "correct"), Some(item));
        assert_eq!(doc.closest(item, "missing"), None);
    }

    #[test]
    fn classes_are_not_duplicated() {
        let (mut doc, _, item, _) = sample();
        doc.add_class(item, "selected-correct");
        doc.add_class(item, "selected-correct");
        assert_eq!(doc.classes(item), &["correct", "selected-correct"]);
        assert!(doc.remove_class(item, "selected-correct"));
        assert!(!doc.remove_class(item, "selected-correct"));
    }

    #[test]
    fn set_text_content_replaces_children() {
        let (mut doc, list, item, _) = sample();
        doc.set_text_content(item, "London");
        assert_eq!(doc.text_content(list), "London");
        assert_eq!(doc.children(item).len(), 1);
    }

    #[test]
    fn repeated_text_updates_reuse_the_text_node() {
        let mut doc = Document::new("div");
        let counter = doc.append_element(doc.root(), "span");
        doc.append_text(counter, "0/3");
        let before = doc.nodes.len();
        for i in 0..1000 {
            doc.set_text_content(counter, &format!("{}/3", i % 4));
        }
        assert_eq!(doc.nodes.len(), before);
        assert_eq!(doc.text_content(counter), "3/3");

        // Mixed content is replaced by a single new text node.
        let p = doc.append_element(doc.root(), "p");
        doc.append_element(p, "b");
        doc.append_text(p, "tail");
        doc.set_text_content(p, "plain");
        assert_eq!(doc.children(p).len(), 1);
        assert_eq!(doc.text_content(p), "plain");
    }

    #[test]
    fn descendants_are_in_document_order() {
        let mut doc = Document::new("body");
        let a = doc.append_element(doc.root(), "p");
        let b = doc.append_element(a, "span");
        let c = doc.append_element(doc.root(), "p");
        assert_eq!(doc.descendants(doc.root()), vec![doc.root(), a, b, c]);
    }

    #[test]
    fn serializes_with_escaping() {
        let (mut doc, _, item, _) = sample();
        doc.set_attribute(item, "data-x", "a\"b");
        doc.set_text_content(item, "<b> & co");
        let html = doc.to_html();
        assert!(html.contains("<li class=\"correct\" data-x=\"a&quot;b\">&lt;b&gt; &amp; co</li>"));
        assert!(html.starts_with("<div>\n  <ol class=\"options\">\n"));
    }
}
