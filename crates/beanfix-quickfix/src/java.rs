//! Java source generation for class and member creation fixes.
//!
//! Generated code is deliberately plain: `Object` parameters, empty bodies,
//! `return null;` where a value is required. The user is expected to fill it
//! in.

use serde::Serialize;

/// A change to Java sources, addressed by binary type name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum JavaChange {
    /// New top-level compilation unit.
    #[serde(rename_all = "camelCase")]
    CreateType {
        qualified_name: String,
        source: String,
    },
    /// Member (method, constructor or nested type) appended to the body of
    /// an existing type.
    #[serde(rename_all = "camelCase")]
    InsertMember { type_name: String, member: String },
}

pub fn is_java_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !is_ident_start(first) {
        return false;
    }
    chars.all(is_ident_continue)
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_ascii_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

/// `a.b.Outer$Inner` style names whose every segment is an identifier.
pub fn is_type_name(name: &str) -> bool {
    name.split(['.', '$']).all(is_java_identifier)
}

/// `Inner` for `a.b.Outer$Inner`, `Foo` for `a.b.Foo`.
pub fn simple_name(name: &str) -> &str {
    let tail = name.rsplit('.').next().unwrap_or(name);
    tail.rsplit('$').next().unwrap_or(tail)
}

pub fn package_name(name: &str) -> Option<&str> {
    name.rsplit_once('.').map(|(package, _)| package)
}

/// Split a nested binary name into its enclosing type and simple name.
pub fn split_nested(name: &str) -> Option<(&str, &str)> {
    name.rsplit_once('$')
}

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Bean property name for an accessor suffix: `Url` becomes `url`, `URL`
/// stays `URL`.
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if chars.next().is_some_and(char::is_uppercase) && first.is_uppercase() {
        return name.to_owned();
    }
    first.to_lowercase().chain(name.chars().skip(1)).collect()
}

pub fn setter_name(property: &str) -> String {
    format!("set{}", capitalize(property))
}

pub fn getter_name(property: &str) -> String {
    format!("get{}", capitalize(property))
}

pub fn property_of_setter(method: &str) -> Option<String> {
    let rest = method.strip_prefix("set")?;
    (!rest.is_empty()).then(|| decapitalize(rest))
}

/// `Object arg0, Object arg1, ...`
pub fn object_params(arity: usize) -> String {
    (0..arity)
        .map(|i| format!("Object arg{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `Foo(Object, Object)`, used in labels.
pub fn constructor_signature(class: &str, arity: usize) -> String {
    let params = vec!["Object"; arity].join(", ");
    format!("{}({params})", simple_name(class))
}

/// Where a member goes in `source`: just before the last closing brace, and
/// the indentation it should get.
pub fn insertion_point(source: &str, unit: &str) -> (usize, String) {
    let Some(close_brace) = source.rfind('}') else {
        return (source.len(), unit.to_owned());
    };

    let line_start = source[..close_brace]
        .rfind('\n')
        .map(|idx| idx + 1)
        .unwrap_or(0);
    let before_brace_on_line = &source[line_start..close_brace];
    let close_indent: String = before_brace_on_line
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect();

    let on_own_line = before_brace_on_line.trim().is_empty();

    // Keep an indented `}` aligned by inserting before its indentation.
    let insert_offset = if on_own_line { line_start } else { close_brace };
    let indent = if on_own_line {
        format!("{close_indent}{unit}")
    } else {
        unit.to_owned()
    };

    (insert_offset, indent)
}

/// Insert a member produced by one of the `*_stub` functions into `source`.
pub fn insert_member(source: &str, member: &str, unit: &str) -> String {
    let (offset, indent) = insertion_point(source, unit);
    let mut out = String::with_capacity(source.len() + member.len() + 8);
    out.push_str(&source[..offset]);
    if offset > 0 && !source[..offset].ends_with('\n') {
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&reindent(member, &indent));
    out.push('\n');
    out.push_str(&source[offset..]);
    out
}

/// Prefix every non-empty line of `text` with `indent`.
fn reindent(text: &str, indent: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn method_stub(
    name: &str,
    arity: usize,
    is_static: bool,
    return_type: Option<&str>,
    unit: &str,
) -> String {
    let static_kw = if is_static { "static " } else { "" };
    let params = object_params(arity);
    match return_type {
        Some(ty) => format!(
            "public {static_kw}{ty} {name}({params}) {{\n{unit}return null;\n}}"
        ),
        None => format!("public {static_kw}void {name}({params}) {{\n}}"),
    }
}

pub fn constructor_stub(class: &str, arity: usize) -> String {
    format!(
        "public {}({}) {{\n}}",
        simple_name(class),
        object_params(arity)
    )
}

pub fn setter_stub(property: &str) -> String {
    format!(
        "public void {}(Object {property}) {{\n}}",
        setter_name(property)
    )
}

pub fn getter_stub(property: &str, unit: &str) -> String {
    format!(
        "public Object {}() {{\n{unit}return null;\n}}",
        getter_name(property)
    )
}

/// Body lines of a generated class, unindented.
fn class_body(class: &str, properties: &[String], constructor_arity: usize, unit: &str) -> Vec<String> {
    let mut members = Vec::new();
    let fields: Vec<String> = properties
        .iter()
        .filter(|p| is_java_identifier(p))
        .map(|p| format!("private Object {p};"))
        .collect();
    if !fields.is_empty() {
        members.push(fields.join("\n"));
    }
    if constructor_arity > 0 {
        members.push(constructor_stub(class, constructor_arity));
    }
    for property in properties.iter().filter(|p| is_java_identifier(p)) {
        members.push(format!(
            "public void {}(Object {property}) {{\n{unit}this.{property} = {property};\n}}",
            setter_name(property)
        ));
    }
    members
}

fn class_declaration(
    modifiers: &str,
    class: &str,
    properties: &[String],
    constructor_arity: usize,
    unit: &str,
) -> String {
    let body = class_body(class, properties, constructor_arity, unit);
    let mut out = format!("{modifiers}class {} {{\n", simple_name(class));
    for (i, member) in body.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&reindent(member, unit));
        out.push('\n');
    }
    out.push('}');
    out
}

/// Compilation unit for a new top-level class.
pub fn class_source(
    qualified_name: &str,
    properties: &[String],
    constructor_arity: usize,
    unit: &str,
) -> String {
    let mut out = String::new();
    if let Some(package) = package_name(qualified_name) {
        out.push_str(&format!("package {package};\n\n"));
    }
    out.push_str(&class_declaration(
        "public ",
        qualified_name,
        properties,
        constructor_arity,
        unit,
    ));
    out.push('\n');
    out
}

/// Nested `static class` declaration, unindented.
pub fn nested_class_stub(
    binary_name: &str,
    properties: &[String],
    constructor_arity: usize,
    unit: &str,
) -> String {
    class_declaration(
        "public static ",
        binary_name,
        properties,
        constructor_arity,
        unit,
    )
}
