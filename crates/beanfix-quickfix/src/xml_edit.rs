//! Document edits produced by bean-definition fixes.

use beanfix_core::{LineIndex, TextEdit, TextRange, TextSize};
use beanfix_dom::{DocumentTree, NodeId};

/// Escape `value` for use inside a double-quoted attribute.
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn element_text(tree: &dyn DocumentTree, node: NodeId) -> &str {
    tree.text()
        .get(std::ops::Range::<usize>::from(tree.range(node)))
        .unwrap_or_default()
}

/// Tag name as written, prefix included (`bean`, `b:bean`).
fn qualified_tag(source: &str) -> &str {
    let rest = source.strip_prefix('<').unwrap_or(source);
    let end = rest
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .unwrap_or(rest.len());
    &rest[..end]
}

/// Insert an empty definition for `bean_id` after `sibling` (normally the
/// top-level element holding the reference), aligned with it.
pub fn insert_bean(tree: &dyn DocumentTree, sibling: NodeId, bean_id: &str) -> TextEdit {
    let range = tree.range(sibling);
    let index = LineIndex::new(tree.text());
    let indent = index.indentation(tree.text(), range.start());
    let tag = qualified_tag(element_text(tree, sibling));
    let tag = if tag.ends_with("bean") { tag } else { "bean" };
    TextEdit::insert(
        range.end(),
        format!(
            "\n{indent}<{tag} id=\"{}\" class=\"\"/>",
            escape_attribute(bean_id)
        ),
    )
}

/// Add `<property name="..." value=""/>` as the last child of `bean`.
pub fn insert_property(tree: &dyn DocumentTree, bean: NodeId, property: &str, unit: &str) -> TextEdit {
    let range = tree.range(bean);
    let text = tree.text();
    let source = element_text(tree, bean);
    let index = LineIndex::new(text);
    let indent = index.indentation(text, range.start());
    let tag = qualified_tag(source);
    let property_tag = match tag.split_once(':') {
        Some((prefix, _)) => format!("{prefix}:property"),
        None => "property".to_owned(),
    };
    let child = format!(
        "<{property_tag} name=\"{}\" value=\"\"/>",
        escape_attribute(property)
    );

    if source.ends_with("/>") {
        // Drop whitespace before `/>` too, so `<bean id="a" />` does not keep
        // a dangling space.
        let trimmed = source[..source.len() - 2].trim_end();
        let start = range.start() + TextSize::of(trimmed);
        return TextEdit::new(
            TextRange::new(start, range.end()),
            format!(">\n{indent}{unit}{child}\n{indent}</{tag}>"),
        );
    }

    let close = source.rfind("</").unwrap_or(source.len());
    let close_offset = range.start() + TextSize::from(close as u32);
    let line_start = source[..close].rfind('\n').map(|i| i + 1);
    match line_start {
        Some(line_start) if source[line_start..close].trim().is_empty() => TextEdit::insert(
            range.start() + TextSize::from(line_start as u32),
            format!("{indent}{unit}{child}\n"),
        ),
        _ => TextEdit::insert(close_offset, format!("\n{indent}{unit}{child}\n{indent}")),
    }
}
