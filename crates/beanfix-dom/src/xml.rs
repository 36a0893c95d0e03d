//! Snapshot construction from well-formed XML.

use beanfix_core::{TextRange, TextSize};

use crate::document::{Document, DocumentBuilder};
use crate::model::DocumentError;
use crate::tree::{Attribute, NodeId};

pub(crate) fn parse(text: String) -> Result<Document, DocumentError> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let mut builder = DocumentBuilder::new(text.as_str());
    {
        let doc = roxmltree::Document::parse_with_options(&text, options).map_err(|source| {
            tracing::debug!(target: "beanfix.dom", error = %source, "document is not well-formed XML");
            DocumentError::Xml { source }
        })?;
        add_element(&mut builder, None, doc.root_element(), &text);
    }
    let document = builder.build()?;
    tracing::trace!(target: "beanfix.dom", elements = document.node_count(), "parsed document");
    Ok(document)
}

fn add_element(
    builder: &mut DocumentBuilder,
    parent: Option<NodeId>,
    node: roxmltree::Node<'_, '_>,
    text: &str,
) {
    let range = node.range();
    let start = range.start;
    let id = builder.element(
        parent,
        node.tag_name().name(),
        node.tag_name().namespace(),
        to_text_range(range),
    );

    for attr in node.attributes() {
        let region = quoted_region(text, attr.range_value());
        let relative = TextRange::new(
            TextSize::from((region.start - start) as u32),
            TextSize::from((region.end - start) as u32),
        );
        let mut attribute = Attribute::new(attr.name(), attr.value(), relative);
        if let Some(namespace) = attr.namespace() {
            attribute = attribute.with_namespace(namespace);
        }
        builder.attribute(id, attribute);
    }

    for child in node.children().filter(|n| n.is_element()) {
        add_element(builder, Some(id), child, text);
    }
}

/// Widen a value range to include the surrounding quotes.
fn quoted_region(text: &str, value: std::ops::Range<usize>) -> std::ops::Range<usize> {
    let bytes = text.as_bytes();
    let is_quote = |idx: usize| matches!(bytes.get(idx), Some(b'"' | b'\''));

    let start = if value.start > 0 && is_quote(value.start - 1) {
        value.start - 1
    } else {
        value.start
    };
    let end = if is_quote(value.end) {
        value.end + 1
    } else {
        value.end
    };
    start..end
}

fn to_text_range(range: std::ops::Range<usize>) -> TextRange {
    TextRange::new(
        TextSize::from(range.start as u32),
        TextSize::from(range.end as u32),
    )
}
