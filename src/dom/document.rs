//! In-memory DOM tree.
//!
//! Nodes live in a flat `Vec` and are addressed by [`NodeId`]. Parent and
//! child links are stored on each node; nodes are never freed.

use crate::core::DomHost;
use crate::dom::element::DomElement;
use crate::errors::{LazyLoadError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeData {
    Doctype(String),
    Element(DomElement),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub data: NodeData,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// A parsed page or a hand-built fragment
///
/// `roots` holds the top-level nodes in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self, data: NodeData) -> NodeId {
        self.push_node(None, data)
    }

    // Parent must already exist; used when importing a tree in pre-order.
    pub(crate) fn push_node(&mut self, parent: Option<NodeId>, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// Create a detached element; it starts out as a top-level node
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.allocate(NodeData::Element(DomElement::new(tag_name)))
    }

    pub fn insert_element(&mut self, element: DomElement) -> NodeId {
        self.allocate(NodeData::Element(element))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.allocate(NodeData::Text(text.to_string()))
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.allocate(NodeData::Comment(text.to_string()))
    }

    pub fn create_doctype(&mut self, name: &str) -> NodeId {
        self.allocate(NodeData::Doctype(name.to_string()))
    }

    /// Append `child` as the last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node(parent)?;
        self.node(child)?;
        if parent == child || self.is_ancestor(child, parent) {
            return Err(LazyLoadError::InvalidTree(format!(
                "{:?} cannot be appended to its own subtree",
                child
            )));
        }

        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    fn detach(&mut self, id: NodeId) {
        match self.nodes[id.0].parent.take() {
            Some(parent) => self.nodes[parent.0].children.retain(|c| *c != id),
            None => self.roots.retain(|r| *r != id),
        }
    }

    fn is_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        while let Some(parent) = self.nodes[node.0].parent {
            if parent == ancestor {
                return true;
            }
            node = parent;
        }
        false
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| LazyLoadError::element_not_found(id))
    }

    pub fn element(&self, id: NodeId) -> Result<&DomElement> {
        match &self.node(id)?.data {
            NodeData::Element(element) => Ok(element),
            _ => Err(LazyLoadError::element_not_found(id)),
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Result<&mut DomElement> {
        match self.nodes.get_mut(id.0).map(|node| &mut node.data) {
            Some(NodeData::Element(element)) => Ok(element),
            _ => Err(LazyLoadError::element_not_found(id)),
        }
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every element in document order
    pub fn elements(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            if matches!(node.data, NodeData::Element(_)) {
                out.push(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    pub fn elements_by_tag(&self, tag_name: &str) -> Vec<NodeId> {
        self.elements()
            .into_iter()
            .filter(|id| {
                self.element(*id)
                    .map(|element| element.is(tag_name))
                    .unwrap_or(false)
            })
            .collect()
    }
}

impl DomHost for Document {
    type Handle = NodeId;

    fn tag_name(&self, element: NodeId) -> Result<String> {
        Ok(self.element(element)?.tag_name.clone())
    }

    fn staged_value(&self, element: NodeId, key: &str) -> Result<Option<String>> {
        Ok(self.element(element)?.staged(key).map(str::to_string))
    }

    fn attribute(&self, element: NodeId, name: &str) -> Result<Option<String>> {
        Ok(self.element(element)?.attribute(name).map(str::to_string))
    }

    fn set_attribute(&mut self, element: NodeId, name: &str, value: &str) -> Result<()> {
        self.element_mut(element)?.set_attribute(name, value);
        Ok(())
    }

    fn style_property(&self, element: NodeId, property: &str) -> Result<Option<String>> {
        Ok(self.element(element)?.style_property(property))
    }

    fn set_style_property(&mut self, element: NodeId, property: &str, value: &str) -> Result<()> {
        self.element_mut(element)?.set_style_property(property, value);
        Ok(())
    }

    fn parent(&self, element: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(element)?.parent)
    }

    fn children(&self, element: NodeId) -> Result<Vec<NodeId>> {
        Ok(self
            .node(element)?
            .children
            .iter()
            .copied()
            .filter(|child| matches!(self.nodes[child.0].data, NodeData::Element(_)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_child_links_both_ways() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        let img = doc.create_element("img");
        doc.append_child(div, img).unwrap();

        assert_eq!(doc.parent(img).unwrap(), Some(div));
        assert_eq!(doc.children(div).unwrap(), vec![img]);
        assert_eq!(doc.roots(), &[div]);
    }

    #[test]
    fn test_append_child_reparents() {
        let mut doc = Document::new();
        let first = doc.create_element("div");
        let second = doc.create_element("div");
        let img = doc.create_element("img");
        doc.append_child(first, img).unwrap();
        doc.append_child(second, img).unwrap();

        assert!(doc.children(first).unwrap().is_empty());
        assert_eq!(doc.children(second).unwrap(), vec![img]);
    }

    #[test]
    fn test_append_into_own_subtree_is_rejected() {
        let mut doc = Document::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        doc.append_child(outer, inner).unwrap();

        assert!(matches!(
            doc.append_child(inner, outer),
            Err(LazyLoadError::InvalidTree(_))
        ));
        assert!(doc.append_child(outer, outer).is_err());
    }

    #[test]
    fn test_children_skip_text_nodes() {
        let mut doc = Document::new();
        let picture = doc.create_element("picture");
        let text = doc.create_text("\n  ");
        let source = doc.create_element("source");
        doc.append_child(picture, text).unwrap();
        doc.append_child(picture, source).unwrap();

        assert_eq!(doc.children(picture).unwrap(), vec![source]);
        assert_eq!(doc.node(picture).unwrap().children.len(), 2);
    }

    #[test]
    fn test_unknown_handle_is_element_not_found() {
        let doc = Document::new();
        let err = doc.tag_name(NodeId(7)).unwrap_err();
        assert!(matches!(err, LazyLoadError::ElementNotFound(_)));
    }

    #[test]
    fn test_text_node_is_not_an_element() {
        let mut doc = Document::new();
        let text = doc.create_text("hello");
        assert!(doc.element(text).is_err());
        assert!(doc.staged_value(text, "src").is_err());
    }

    #[test]
    fn test_elements_in_document_order() {
        let mut doc = Document::new();
        let picture = doc.create_element("picture");
        let source = doc.create_element("source");
        let img = doc.create_element("img");
        let after = doc.create_element("iframe");
        doc.append_child(picture, source).unwrap();
        doc.append_child(picture, img).unwrap();

        assert_eq!(doc.elements(), vec![picture, source, img, after]);
        assert_eq!(doc.elements_by_tag("IMG"), vec![img]);
    }
}
