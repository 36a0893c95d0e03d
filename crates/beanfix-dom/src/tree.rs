use beanfix_core::TextRange;

/// Index of an element inside one document snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn to_raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// One attribute of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Local name, without prefix.
    pub name: String,
    /// Namespace URI for prefixed attributes.
    pub namespace: Option<String>,
    pub value: String,
    /// Raw value region, quotes included, relative to the owning element's
    /// start offset.
    pub region: TextRange,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>, region: TextRange) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            value: value.into(),
            region,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    #[inline]
    pub fn is_unqualified(&self) -> bool {
        self.namespace.is_none()
    }
}

/// Read-only traversal and offset queries over a document snapshot.
///
/// Offsets are UTF-8 byte offsets into [`DocumentTree::text`].
pub trait DocumentTree: Send + Sync {
    fn text(&self) -> &str;

    /// The document element, if the document has one.
    fn root(&self) -> Option<NodeId>;

    /// Element children in document order.
    fn children(&self, node: NodeId) -> &[NodeId];

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn local_name(&self, node: NodeId) -> &str;

    fn namespace(&self, node: NodeId) -> Option<&str>;

    fn attributes(&self, node: NodeId) -> &[Attribute];

    /// Whole element, from `<` of the start tag through the end tag.
    fn range(&self, node: NodeId) -> TextRange;

    /// First unqualified attribute called `name`.
    fn attribute(&self, node: NodeId, name: &str) -> Option<&Attribute> {
        self.attributes(node)
            .iter()
            .find(|attr| attr.is_unqualified() && attr.name == name)
    }

    fn attribute_value(&self, node: NodeId, name: &str) -> Option<&str> {
        self.attribute(node, name).map(|attr| attr.value.as_str())
    }
}

impl<'t> dyn DocumentTree + 't {
    /// `node` and everything below it, pre-order.
    pub fn descendants(&self, node: NodeId) -> Descendants<'_, 't> {
        Descendants {
            tree: self,
            stack: vec![node],
        }
    }

    /// Nearest ancestor (or `node` itself) named `local_name`.
    pub fn ancestor_named(&self, node: NodeId, local_name: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            if self.local_name(id) == local_name {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a, 't> {
    tree: &'a (dyn DocumentTree + 't),
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_, '_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(node).iter().rev().copied());
        Some(node)
    }
}
