//! Replacement edits over a text snapshot.

use thiserror::Error;

use crate::{TextRange, TextSize};

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TextEdit {
    pub range: TextRange,
    pub replacement: String,
}

impl TextEdit {
    pub fn new(range: TextRange, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    pub fn insert(offset: TextSize, text: impl Into<String>) -> Self {
        Self::new(TextRange::empty(offset), text)
    }

    pub fn replace(offset: TextSize, len: TextSize, text: impl Into<String>) -> Self {
        Self::new(TextRange::at(offset, len), text)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum EditError {
    #[error("edit range {range:?} is out of bounds for text length {text_len:?}")]
    RangeOutOfBounds { range: TextRange, text_len: TextSize },
    #[error("offset {offset:?} is not a UTF-8 character boundary")]
    InvalidUtf8Boundary { offset: TextSize },
    #[error("overlapping edits: {first:?} overlaps {second:?}")]
    OverlappingEdits { first: TextRange, second: TextRange },
}

/// Apply `edits` to `text`, all ranges referring to the original snapshot.
pub fn apply_text_edits(text: &str, edits: &[TextEdit]) -> Result<String, EditError> {
    let mut edits = edits.to_vec();
    normalize_text_edits(text, &mut edits)?;

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0usize;
    for edit in &edits {
        let start = u32::from(edit.range.start()) as usize;
        let end = u32::from(edit.range.end()) as usize;
        out.push_str(&text[cursor..start]);
        out.push_str(&edit.replacement);
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    Ok(out)
}

/// Sort `edits` by position and reject out-of-bounds, non-boundary and
/// overlapping ranges. Two inserts at the same offset count as overlapping.
pub fn normalize_text_edits(text: &str, edits: &mut [TextEdit]) -> Result<(), EditError> {
    edits.sort_by_key(|e| (e.range.start(), e.range.end()));

    let text_len = TextSize::of(text);
    for edit in edits.iter() {
        if edit.range.end() > text_len {
            return Err(EditError::RangeOutOfBounds {
                range: edit.range,
                text_len,
            });
        }
        for offset in [edit.range.start(), edit.range.end()] {
            if !text.is_char_boundary(u32::from(offset) as usize) {
                return Err(EditError::InvalidUtf8Boundary { offset });
            }
        }
    }

    for pair in edits.windows(2) {
        let (first, second) = (pair[0].range, pair[1].range);
        let same_insert = first.is_empty() && second.is_empty() && first.start() == second.start();
        if first.end() > second.start() || same_insert {
            return Err(EditError::OverlappingEdits { first, second });
        }
    }

    Ok(())
}
