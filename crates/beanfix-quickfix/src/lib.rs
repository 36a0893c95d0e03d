//! Quick fixes for bean-definition diagnostics.
//!
//! Validation reports problems as flat [`DiagnosticRecord`]s: an error id,
//! string attributes and a line. Nothing in a record identifies a document
//! node, so [`QuickFixEngine`] re-locates the element and the attribute value
//! the record refers to, resolves its exact text span, and asks every
//! matching [`FixProvider`] in the [`FixProviderRegistry`] for proposals.
//!
//! ```text
//! DiagnosticRecord -> locate -> span -> registry lookup -> providers -> FixProposal
//!                                                 (TypeOracle, content assist)
//! ```
//!
//! Proposals are only computed against, and only applied to, documents
//! without unsaved changes.

#![forbid(unsafe_code)]

pub mod assist;
mod engine;
mod error;
pub mod java;
pub mod locate;
mod oracle;
mod proposal;
pub mod providers;
mod record;
mod registry;
mod shape;
mod span;
pub mod xml_edit;

pub use engine::{EngineSettings, QuickFixEngine};
pub use error::QuickfixError;
pub use java::JavaChange;
pub use oracle::{
    MemoryTypeOracle, MethodInfo, OracleError, TypeInfo, TypeOracle, Visibility, CONSTRUCTOR_NAME,
};
pub use proposal::{
    style_for, ApplyError, FixAction, FixEffect, FixProposal, FixTarget, HostCommand,
    HostCommands, InlineEdits, MemoryFixTarget, ProposalDraft, ProposalKind, ProposalStyle,
};
pub use providers::{FixContext, FixProvider, FixRequest};
pub use record::{
    DiagnosticRecord, ErrorId, RecordError, BEAN_KEY, BEAN_NAME_KEY, CLASS_KEY, ERROR_ID_KEY,
    METHOD_KEY, MISSING_PROPERTIES_PREFIX, NUM_ARGUMENT_KEY, PROPERTY_KEY,
};
pub use registry::{BindingScope, FixProviderRegistry, NamespaceMatch, ValidatorBinding};
pub use shape::BeanShape;
pub use span::{resolve_span, AttributeSpan, SpanError, SpanOptions};
