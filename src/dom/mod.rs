//! Arena markup tree.
//!
//! A `Document` owns every node; nodes are addressed by a copyable
//! `NodeId`. Detached nodes stay in the arena but are unreachable from
//! the root.
//!
//! ```text
//! Document (root)
//! ├── Raw("<?xml ...?>")
//! └── Element(svg)
//!     ├── Text("\n  ")
//!     └── Element(rect)
//!         └── Element(animate)
//! ```
//!
//! Text nodes hold raw markup (entities undecoded) and are written back
//! verbatim. Attribute values are decoded on parse and escaped on render.

mod parse;
mod render;

pub use parse::{parse, parse_html, parse_xml};
pub use render::render;

use rustc_hash::FxHashMap;
use std::path::Path;

/// Handle to a node in a `Document`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Markup syntax of a document, decides parser and serializer rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupFormat {
    /// `.svg`, `.xml`, `.xhtml` - parsed with quick-xml.
    Xml,
    /// Everything else - parsed with tl.
    Html,
}

impl MarkupFormat {
    /// Detect format from file extension.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("svg" | "xml" | "xhtml") => Self::Xml,
            _ => Self::Html,
        }
    }
}

/// Element tag plus ordered attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing the value in place if present.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, slot)) => *slot = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }
}

/// Node payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Document,
    Element(Element),
    /// Character data as written in the source (entities undecoded).
    Text(String),
    /// Markup copied verbatim: comments, doctype, declarations, CDATA.
    Raw(String),
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Markup document tree.
#[derive(Debug, Clone)]
pub struct Document {
    format: MarkupFormat,
    nodes: Vec<Node>,
    /// First element carrying each id, in document order.
    ids: FxHashMap<String, NodeId>,
}

impl Document {
    /// Create an empty document holding only the root node.
    pub fn new(format: MarkupFormat) -> Self {
        Self {
            format,
            nodes: vec![Node {
                data: NodeData::Document,
                parent: None,
                children: Vec::new(),
            }],
            ids: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn format(&self) -> MarkupFormat {
        self.format
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0].data {
            NodeData::Element(elem) => Some(elem),
            _ => None,
        }
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|elem| elem.tag.as_str())
    }

    /// Tag comparison: exact for XML, ASCII case-insensitive for HTML.
    pub fn is_tag(&self, id: NodeId, tag: &str) -> bool {
        self.tag(id).is_some_and(|t| self.tag_eq(t, tag))
    }

    fn tag_eq(&self, a: &str, b: &str) -> bool {
        match self.format {
            MarkupFormat::Xml => a == b,
            MarkupFormat::Html => a.eq_ignore_ascii_case(b),
        }
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|elem| elem.attr(name))
    }

    /// Set an attribute on an element node. Non-elements are ignored.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        let value = value.into();
        if name == "id" && self.is_attached(id) {
            if let Some(old) = self.attr(id, "id").map(str::to_string)
                && self.ids.get(&old) == Some(&id)
            {
                self.ids.remove(&old);
            }
            self.ids.entry(value.clone()).or_insert(id);
        }
        if let NodeData::Element(elem) = &mut self.nodes[id.0].data {
            elem.set_attr(name, value);
        }
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Element children of a node, in order.
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|child| self.element(*child).is_some())
    }

    /// All nodes below `id` in document order (pre-order), excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Every attached element with the given tag, in document order.
    #[cfg(test)]
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|id| self.is_tag(*id, tag))
            .collect()
    }

    pub fn first_element_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|id| self.is_tag(*id, tag))
    }

    /// First attached element carrying the id.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    /// Check whether any attached element uses the id.
    #[inline]
    pub fn contains_id(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(NodeData::Element(Element::new(tag)))
    }

    /// Append a detached node to `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes[child.0].parent.is_none());
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        self.index_subtree(child);
    }

    /// Append raw markup text, merging with a trailing text node.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        if let Some(last) = self.nodes[parent.0].children.last().copied()
            && let NodeData::Text(existing) = &mut self.nodes[last.0].data
        {
            existing.push_str(text);
            return;
        }
        let node = self.alloc(NodeData::Text(text.to_string()));
        self.nodes[node.0].parent = Some(parent);
        self.nodes[parent.0].children.push(node);
    }

    /// Append verbatim markup (comment, doctype, ...).
    pub fn append_raw(&mut self, parent: NodeId, raw: String) {
        let node = self.alloc(NodeData::Raw(raw));
        self.append_child(parent, node);
    }

    /// Concatenated raw text of all text descendants.
    #[cfg(test)]
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .into_iter()
            .filter_map(|node| match self.data(node) {
                NodeData::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Remove a node (and its subtree) from the tree.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes[id.0].parent.take() else {
            return;
        };
        self.nodes[parent.0].children.retain(|child| *child != id);

        for node in std::iter::once(id).chain(self.descendants(id)) {
            if let Some(value) = self.attr(node, "id").map(str::to_string)
                && self.ids.get(&value) == Some(&node)
            {
                self.ids.remove(&value);
            }
        }
    }

    /// Check whether a node is still reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root() {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Register ids of a freshly attached subtree (first occurrence wins).
    fn index_subtree(&mut self, id: NodeId) {
        for node in std::iter::once(id).chain(self.descendants(id)) {
            if let Some(value) = self.attr(node, "id").map(str::to_string) {
                self.ids.entry(value).or_insert(node);
            }
        }
    }
}
