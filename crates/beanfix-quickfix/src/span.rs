//! Attribute value spans.

use beanfix_core::{TextRange, TextSize};
use beanfix_dom::{DocumentTree, NodeId};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanOptions {
    /// Report the whole element instead of the attribute value (used when a
    /// fix inserts a sibling definition rather than editing the value).
    pub affects_whole_bean: bool,
}

/// Located text of one attribute value, quotes excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSpan {
    /// Absolute range of the value (or of the element, see [`SpanOptions`]).
    pub range: TextRange,
    pub text: String,
    /// `false` when the value was opened but never closed (`class='Foo`).
    pub has_closing_quote: bool,
    pub opening_quote: Option<char>,
}

impl AttributeSpan {
    pub fn offset(&self) -> TextSize {
        self.range.start()
    }

    pub fn len(&self) -> TextSize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Quote to append when a replacement must also close the value.
    pub fn missing_quote(&self) -> Option<char> {
        (!self.has_closing_quote).then(|| self.opening_quote.unwrap_or('"'))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpanError {
    #[error("attribute region {range:?} is outside the document text")]
    OutOfBounds { range: TextRange },
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

/// Resolve the raw `region` (relative to `node`'s start) to the value text.
pub fn resolve_span(
    tree: &dyn DocumentTree,
    node: NodeId,
    region: TextRange,
    options: SpanOptions,
) -> Result<AttributeSpan, SpanError> {
    let node_range = tree.range(node);
    let absolute = region
        .checked_add(node_range.start())
        .ok_or(SpanError::OutOfBounds { range: region })?;
    let raw = tree
        .text()
        .get(std::ops::Range::<usize>::from(absolute))
        .ok_or(SpanError::OutOfBounds { range: absolute })?;

    let leading = raw.len() - raw.trim_start().len();
    let mut start = absolute.start() + TextSize::from(leading as u32);
    let mut value = raw.trim();

    let opening_quote = value.chars().next().filter(|&c| is_quote(c));
    if let Some(quote) = opening_quote {
        value = &value[quote.len_utf8()..];
        start += TextSize::of(quote);
    }

    let closing = value
        .chars()
        .next_back()
        .filter(|&c| opening_quote.map_or(is_quote(c), |open| c == open));
    let has_closing_quote = match closing {
        Some(quote) => {
            value = &value[..value.len() - quote.len_utf8()];
            true
        }
        None => false,
    };

    let range = if options.affects_whole_bean {
        node_range
    } else {
        TextRange::at(start, TextSize::of(value))
    };
    Ok(AttributeSpan {
        range,
        text: value.to_owned(),
        has_closing_quote,
        opening_quote,
    })
}
