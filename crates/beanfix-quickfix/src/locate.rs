//! Re-associating diagnostics with document elements.
//!
//! Diagnostics carry no node identity, only names and values, so every
//! lookup here is a search over the current snapshot.

use beanfix_dom::{Attribute, DocumentTree, NodeId};

pub const BEAN_ELEMENT: &str = "bean";

/// First `bean` element, in document order, whose `name` or `id` equals
/// `bean_name`.
pub fn locate_bean(tree: &dyn DocumentTree, bean_name: &str) -> Option<NodeId> {
    let root = tree.root()?;
    tree.descendants(root).find(|&node| {
        tree.local_name(node) == BEAN_ELEMENT
            && (tree.attribute_value(node, "name") == Some(bean_name)
                || tree.attribute_value(node, "id") == Some(bean_name))
    })
}

/// Every unqualified `attribute_name="value"` at or below `scope`, pre-order.
pub fn find_attributes<'t>(
    tree: &'t dyn DocumentTree,
    scope: NodeId,
    attribute_name: &'t str,
    value: &'t str,
) -> impl Iterator<Item = (NodeId, &'t Attribute)> + 't {
    tree.descendants(scope).filter_map(move |node| {
        tree.attributes(node)
            .iter()
            .find(|attr| attr.is_unqualified() && attr.name == attribute_name && attr.value == value)
            .map(|attr| (node, attr))
    })
}

/// First match of [`find_attributes`].
pub fn find_attribute<'t>(
    tree: &'t dyn DocumentTree,
    scope: NodeId,
    attribute_name: &'t str,
    value: &'t str,
) -> Option<(NodeId, &'t Attribute)> {
    find_attributes(tree, scope, attribute_name, value).next()
}

/// `node` itself if it is a bean, otherwise its nearest bean ancestor.
pub fn enclosing_bean(tree: &dyn DocumentTree, node: NodeId) -> Option<NodeId> {
    tree.ancestor_named(node, BEAN_ELEMENT)
}

/// Outermost bean containing `node` (inner beans live inside properties and
/// constructor arguments of their owner).
pub fn top_level_bean(tree: &dyn DocumentTree, node: NodeId) -> Option<NodeId> {
    let mut found = None;
    let mut current = enclosing_bean(tree, node);
    while let Some(bean) = current {
        found = Some(bean);
        current = tree.parent(bean).and_then(|parent| enclosing_bean(tree, parent));
    }
    found
}

/// The direct child of the document element that contains `node`.
pub fn top_level_element(tree: &dyn DocumentTree, node: NodeId) -> Option<NodeId> {
    let root = tree.root()?;
    let mut current = node;
    loop {
        let parent = tree.parent(current)?;
        if parent == root {
            return Some(current);
        }
        current = parent;
    }
}
