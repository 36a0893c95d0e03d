use beanfix_core::EditError;
use beanfix_dom::DocumentError;
use thiserror::Error;

use crate::oracle::OracleError;
use crate::record::RecordError;
use crate::span::SpanError;

/// Failure inside one fix computation. Never escapes the engine: it is logged
/// and the affected proposals are dropped.
#[derive(Debug, Error)]
pub enum QuickfixError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Oracle(#[from] OracleError),
    #[error(transparent)]
    Span(#[from] SpanError),
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Record(#[from] RecordError),
}
