//! Fix proposals and how they are applied.

use std::collections::{BTreeMap, BTreeSet};

use beanfix_config::ProposalStyleKind;
use beanfix_core::{apply_text_edits, EditError, TextEdit, TextRange};
use beanfix_dom::ResourceRef;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::java::{self, JavaChange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProposalKind {
    CreateClass,
    CreateBean,
    CreateMethod,
    CreateConstructor,
    AddProperty,
    Rename,
}

impl ProposalKind {
    /// Host command executing proposals of this kind.
    pub fn command(self) -> &'static str {
        match self {
            ProposalKind::CreateClass => "beanfix.createClass",
            ProposalKind::CreateBean => "beanfix.createBean",
            ProposalKind::CreateMethod => "beanfix.createMethod",
            ProposalKind::CreateConstructor => "beanfix.createConstructor",
            ProposalKind::AddProperty => "beanfix.addProperty",
            ProposalKind::Rename => "beanfix.rename",
        }
    }
}

/// A command the host executes on the proposal's behalf.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostCommand {
    pub command: String,
    pub arguments: Vec<serde_json::Value>,
}

/// Concrete effect computed by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixEffect {
    /// Edits to the diagnosed document.
    Document(Vec<TextEdit>),
    Java(JavaChange),
}

/// What applying a proposal does.
#[derive(Debug, Clone, PartialEq)]
pub enum FixAction {
    Document(Vec<TextEdit>),
    Java(JavaChange),
    Command(HostCommand),
}

/// Provider output, before a [`ProposalStyle`] decides how it is carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalDraft {
    pub label: String,
    pub kind: ProposalKind,
    /// Span the proposal is about (the attribute value, or the element).
    pub range: TextRange,
    pub missing_end_quote: bool,
    pub effect: FixEffect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FixProposal {
    pub resource: ResourceRef,
    pub label: String,
    pub kind: ProposalKind,
    pub range: TextRange,
    pub missing_end_quote: bool,
    pub action: FixAction,
}

#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("document {0} changed since the diagnostic was reported")]
    StaleDocument(ResourceRef),
    #[error("unknown document {0}")]
    UnknownResource(ResourceRef),
    #[error("type `{0}` has no source")]
    UnknownType(String),
    #[error("type `{0}` already exists")]
    TypeExists(String),
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error("host rejected the change: {0}")]
    Host(String),
}

/// Host side receiving applied proposals.
pub trait FixTarget {
    fn is_dirty(&self, resource: &ResourceRef) -> Result<bool, ApplyError>;
    fn apply_document_edits(
        &mut self,
        resource: &ResourceRef,
        edits: &[TextEdit],
    ) -> Result<(), ApplyError>;
    fn apply_java_change(&mut self, change: &JavaChange) -> Result<(), ApplyError>;
    fn execute_command(&mut self, command: &HostCommand) -> Result<(), ApplyError>;
}

impl FixProposal {
    /// Apply the proposal, refusing when the document has unsaved changes.
    pub fn apply(&self, target: &mut dyn FixTarget) -> Result<(), ApplyError> {
        if target.is_dirty(&self.resource)? {
            return Err(ApplyError::StaleDocument(self.resource.clone()));
        }
        match &self.action {
            FixAction::Document(edits) => target.apply_document_edits(&self.resource, edits),
            FixAction::Java(change) => target.apply_java_change(change),
            FixAction::Command(command) => target.execute_command(command),
        }
    }
}

/// How drafts become proposals.
pub trait ProposalStyle: Send + Sync {
    fn finish(&self, resource: &ResourceRef, draft: ProposalDraft) -> FixProposal;
}

pub fn style_for(kind: ProposalStyleKind) -> Box<dyn ProposalStyle> {
    match kind {
        ProposalStyleKind::Edits => Box::new(InlineEdits),
        ProposalStyleKind::Commands => Box::new(HostCommands),
    }
}

/// Proposals carry their edits.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineEdits;

impl ProposalStyle for InlineEdits {
    fn finish(&self, resource: &ResourceRef, draft: ProposalDraft) -> FixProposal {
        let action = match draft.effect {
            FixEffect::Document(edits) => FixAction::Document(edits),
            FixEffect::Java(change) => FixAction::Java(change),
        };
        FixProposal {
            resource: resource.clone(),
            label: draft.label,
            kind: draft.kind,
            range: draft.range,
            missing_end_quote: draft.missing_end_quote,
            action,
        }
    }
}

/// Proposals carry a serializable command for the host to run.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostCommands;

fn edit_json(edit: &TextEdit) -> serde_json::Value {
    json!({
        "start": u32::from(edit.range.start()),
        "end": u32::from(edit.range.end()),
        "text": edit.replacement,
    })
}

impl ProposalStyle for HostCommands {
    fn finish(&self, resource: &ResourceRef, draft: ProposalDraft) -> FixProposal {
        let change = match &draft.effect {
            FixEffect::Document(edits) => json!({
                "edits": edits.iter().map(edit_json).collect::<Vec<_>>(),
            }),
            FixEffect::Java(change) => json!({ "java": change }),
        };
        let argument = json!({
            "resource": resource,
            "label": draft.label,
            "kind": draft.kind,
            "range": {
                "start": u32::from(draft.range.start()),
                "end": u32::from(draft.range.end()),
            },
            "missingEndQuote": draft.missing_end_quote,
            "change": change,
        });
        FixProposal {
            resource: resource.clone(),
            action: FixAction::Command(HostCommand {
                command: draft.kind.command().to_owned(),
                arguments: vec![argument],
            }),
            label: draft.label,
            kind: draft.kind,
            range: draft.range,
            missing_end_quote: draft.missing_end_quote,
        }
    }
}

/// In-memory [`FixTarget`] recording everything applied to it.
#[derive(Debug, Default)]
pub struct MemoryFixTarget {
    documents: BTreeMap<ResourceRef, String>,
    dirty: BTreeSet<ResourceRef>,
    java_sources: BTreeMap<String, String>,
    commands: Vec<HostCommand>,
    indent: String,
}

impl MemoryFixTarget {
    pub fn new(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
            ..Self::default()
        }
    }

    pub fn add_document(&mut self, resource: ResourceRef, text: impl Into<String>) {
        self.dirty.remove(&resource);
        self.documents.insert(resource, text.into());
    }

    pub fn add_java_source(&mut self, type_name: impl Into<String>, source: impl Into<String>) {
        self.java_sources.insert(type_name.into(), source.into());
    }

    pub fn set_dirty(&mut self, resource: &ResourceRef, dirty: bool) {
        if dirty {
            self.dirty.insert(resource.clone());
        } else {
            self.dirty.remove(resource);
        }
    }

    pub fn document(&self, resource: &ResourceRef) -> Option<&str> {
        self.documents.get(resource).map(String::as_str)
    }

    pub fn java_source(&self, type_name: &str) -> Option<&str> {
        self.java_sources.get(type_name).map(String::as_str)
    }

    pub fn commands(&self) -> &[HostCommand] {
        &self.commands
    }
}

impl FixTarget for MemoryFixTarget {
    fn is_dirty(&self, resource: &ResourceRef) -> Result<bool, ApplyError> {
        if !self.documents.contains_key(resource) {
            return Err(ApplyError::UnknownResource(resource.clone()));
        }
        Ok(self.dirty.contains(resource))
    }

    /// Edited documents become dirty: later proposals computed against the
    /// old text must not apply.
    fn apply_document_edits(
        &mut self,
        resource: &ResourceRef,
        edits: &[TextEdit],
    ) -> Result<(), ApplyError> {
        let text = self
            .documents
            .get_mut(resource)
            .ok_or_else(|| ApplyError::UnknownResource(resource.clone()))?;
        *text = apply_text_edits(text, edits)?;
        self.dirty.insert(resource.clone());
        Ok(())
    }

    fn apply_java_change(&mut self, change: &JavaChange) -> Result<(), ApplyError> {
        match change {
            JavaChange::CreateType {
                qualified_name,
                source,
            } => {
                if self.java_sources.contains_key(qualified_name) {
                    return Err(ApplyError::TypeExists(qualified_name.clone()));
                }
                self.java_sources
                    .insert(qualified_name.clone(), source.clone());
            }
            JavaChange::InsertMember { type_name, member } => {
                let source = self
                    .java_sources
                    .get_mut(type_name)
                    .ok_or_else(|| ApplyError::UnknownType(type_name.clone()))?;
                *source = java::insert_member(source, member, &self.indent);
            }
        }
        Ok(())
    }

    fn execute_command(&mut self, command: &HostCommand) -> Result<(), ApplyError> {
        self.commands.push(command.clone());
        Ok(())
    }
}
