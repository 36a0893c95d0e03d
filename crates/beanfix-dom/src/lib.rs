//! Read-only view of bean-definition documents.
//!
//! The quick-fix engine never mutates documents. It sees them through
//! [`DocumentTree`], a traversal/offset capability, and obtains them (plus
//! their staleness) from a [`DocumentModel`] supplied by the host.
//!
//! [`Document`] is an owned snapshot implementing [`DocumentTree`]. It is
//! produced either from well-formed XML ([`Document::parse`]) or assembled by
//! hand with [`DocumentBuilder`], which is how hosts with their own
//! error-tolerant parser (or tests that need malformed attributes) feed it.

mod document;
mod model;
mod tree;
mod xml;

pub use document::{Document, DocumentBuilder};
pub use model::{DocumentError, DocumentModel, MemoryDocumentModel, ResourceRef};
pub use tree::{Attribute, Descendants, DocumentTree, NodeId};

/// Namespace URI of the core bean-definition schema.
pub const BEANS_NAMESPACE: &str = "http://www.springframework.org/schema/beans";
/// Namespace URI of the `p:` property shortcut attributes.
pub const P_NAMESPACE: &str = "http://www.springframework.org/schema/p";
/// Namespace URI of the `c:` constructor-argument shortcut attributes.
pub const C_NAMESPACE: &str = "http://www.springframework.org/schema/c";
