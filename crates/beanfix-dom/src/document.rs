use beanfix_core::{TextRange, TextSize};

use crate::model::DocumentError;
use crate::tree::{Attribute, DocumentTree, NodeId};

#[derive(Debug, Clone, PartialEq, Eq)]
struct NodeData {
    name: String,
    namespace: Option<String>,
    attributes: Vec<Attribute>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    range: TextRange,
}

/// Owned, immutable snapshot of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
    nodes: Vec<NodeData>,
    root: Option<NodeId>,
}

impl Document {
    /// Parse well-formed XML.
    pub fn parse(text: impl Into<String>) -> Result<Self, DocumentError> {
        crate::xml::parse(text.into())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

impl DocumentTree for Document {
    fn text(&self) -> &str {
        &self.text
    }

    fn root(&self) -> Option<NodeId> {
        self.root
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    fn local_name(&self, node: NodeId) -> &str {
        &self.node(node).name
    }

    fn namespace(&self, node: NodeId) -> Option<&str> {
        self.node(node).namespace.as_deref()
    }

    fn attributes(&self, node: NodeId) -> &[Attribute] {
        &self.node(node).attributes
    }

    fn range(&self, node: NodeId) -> TextRange {
        self.node(node).range
    }
}

/// Assembles a [`Document`] element by element.
///
/// Elements must be added parents first; the first element without a parent
/// becomes the document root.
#[derive(Debug)]
pub struct DocumentBuilder {
    text: String,
    nodes: Vec<NodeData>,
    root: Option<NodeId>,
}

impl DocumentBuilder {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            nodes: Vec::new(),
            root: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Add an element spanning `range` (absolute) under `parent`.
    pub fn element(
        &mut self,
        parent: Option<NodeId>,
        name: impl Into<String>,
        namespace: Option<&str>,
        range: TextRange,
    ) -> NodeId {
        let id = NodeId::from_raw(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            name: name.into(),
            namespace: namespace.map(str::to_owned),
            attributes: Vec::new(),
            parent,
            children: Vec::new(),
            range,
        });
        match parent {
            Some(parent) => {
                if let Some(data) = self.nodes.get_mut(parent.index()) {
                    data.children.push(id);
                }
            }
            None => {
                self.root.get_or_insert(id);
            }
        }
        id
    }

    /// Add an element covering the first occurrence of `source` at or after
    /// `search_from`. Convenient when `text` was written by hand.
    pub fn element_at(
        &mut self,
        parent: Option<NodeId>,
        name: impl Into<String>,
        namespace: Option<&str>,
        source: &str,
        search_from: TextSize,
    ) -> Result<NodeId, DocumentError> {
        let start = u32::from(search_from) as usize;
        let offset = self
            .text
            .get(start..)
            .and_then(|rest| rest.find(source))
            .map(|found| start + found)
            .ok_or_else(|| DocumentError::InvalidStructure {
                message: format!("{source:?} does not occur in the document text"),
            })?;
        let range = TextRange::at(
            TextSize::from(offset as u32),
            TextSize::of(source),
        );
        Ok(self.element(parent, name, namespace, range))
    }

    pub fn attribute(&mut self, node: NodeId, attribute: Attribute) -> &mut Self {
        if let Some(data) = self.nodes.get_mut(node.index()) {
            data.attributes.push(attribute);
        }
        self
    }

    /// Check every range against the text and produce the snapshot.
    pub fn build(self) -> Result<Document, DocumentError> {
        let text_len = TextSize::of(self.text.as_str());
        let in_bounds = |range: TextRange| {
            range.end() <= text_len
                && self.text.is_char_boundary(u32::from(range.start()) as usize)
                && self.text.is_char_boundary(u32::from(range.end()) as usize)
        };

        for node in &self.nodes {
            if !in_bounds(node.range) {
                return Err(DocumentError::InvalidStructure {
                    message: format!("element <{}> range {:?} is outside the text", node.name, node.range),
                });
            }
            for attr in &node.attributes {
                let absolute = attr.region + node.range.start();
                if !in_bounds(absolute) || !node.range.contains_range(absolute) {
                    return Err(DocumentError::InvalidStructure {
                        message: format!(
                            "attribute {:?} of <{}> region {:?} is outside its element",
                            attr.name, node.name, attr.region
                        ),
                    });
                }
            }
        }

        Ok(Document {
            text: self.text,
            nodes: self.nodes,
            root: self.root,
        })
    }
}
