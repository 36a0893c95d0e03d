use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::Document;
use crate::tree::DocumentTree;

/// Host-side identity of a document (a workspace path or URI).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceRef(String);

impl ResourceRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("unknown resource {0}")]
    NotFound(ResourceRef),
    #[error("document {resource} is unavailable: {message}")]
    Unavailable {
        resource: ResourceRef,
        message: String,
    },
    #[error("failed to parse XML: {source}")]
    Xml {
        #[source]
        source: roxmltree::Error,
    },
    #[error("invalid document structure: {message}")]
    InvalidStructure { message: String },
}

/// Host collaborator that owns documents and knows whether they have unsaved
/// changes.
pub trait DocumentModel: Send + Sync {
    fn document(&self, resource: &ResourceRef) -> Result<Arc<dyn DocumentTree>, DocumentError>;

    /// `true` when the live document differs from the snapshot diagnostics
    /// were computed against.
    fn is_dirty(&self, resource: &ResourceRef) -> Result<bool, DocumentError>;
}

#[derive(Debug)]
struct Entry {
    document: Arc<Document>,
    dirty: bool,
    failure: Option<String>,
}

/// Simple in-memory document model for unit tests and embedders that already
/// hold snapshots.
#[derive(Debug, Default)]
pub struct MemoryDocumentModel {
    entries: RwLock<HashMap<ResourceRef, Entry>>,
}

impl MemoryDocumentModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a clean snapshot.
    pub fn insert(&self, resource: ResourceRef, document: Document) {
        self.entries.write().insert(
            resource,
            Entry {
                document: Arc::new(document),
                dirty: false,
                failure: None,
            },
        );
    }

    pub fn set_dirty(&self, resource: &ResourceRef, dirty: bool) {
        if let Some(entry) = self.entries.write().get_mut(resource) {
            entry.dirty = dirty;
        }
    }

    /// Make every query for `resource` fail with `message` (`None` clears).
    pub fn set_failure(&self, resource: &ResourceRef, message: Option<&str>) {
        if let Some(entry) = self.entries.write().get_mut(resource) {
            entry.failure = message.map(str::to_owned);
        }
    }

    pub fn snapshot(&self, resource: &ResourceRef) -> Option<Arc<Document>> {
        self.entries
            .read()
            .get(resource)
            .map(|entry| Arc::clone(&entry.document))
    }

    fn with_entry<T>(
        &self,
        resource: &ResourceRef,
        f: impl FnOnce(&Entry) -> T,
    ) -> Result<T, DocumentError> {
        let entries = self.entries.read();
        let entry = entries
            .get(resource)
            .ok_or_else(|| DocumentError::NotFound(resource.clone()))?;
        if let Some(message) = &entry.failure {
            return Err(DocumentError::Unavailable {
                resource: resource.clone(),
                message: message.clone(),
            });
        }
        Ok(f(entry))
    }
}

impl DocumentModel for MemoryDocumentModel {
    fn document(&self, resource: &ResourceRef) -> Result<Arc<dyn DocumentTree>, DocumentError> {
        self.with_entry(resource, |entry| {
            let document: Arc<dyn DocumentTree> = entry.document.clone();
            document
        })
    }

    fn is_dirty(&self, resource: &ResourceRef) -> Result<bool, DocumentError> {
        self.with_entry(resource, |entry| entry.dirty)
    }
}
