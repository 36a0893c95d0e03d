//! Core shared text types for beanfix.
//!
//! Offsets are UTF-8 byte offsets into a single document snapshot. Diagnostics
//! report 1-based lines; [`LineIndex`] maps offsets back to them.

mod edit;
mod text;

pub use edit::{apply_text_edits, normalize_text_edits, EditError, TextEdit};
pub use text::{LineCol, LineIndex, TextRange, TextSize};
