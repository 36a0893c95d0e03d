//! Fix providers: turn a located diagnostic into proposal drafts.

mod bean_element;
mod bean_ref;
mod class;
mod method;
mod property;

pub use bean_element::BeanElementProvider;
pub use bean_ref::BeanReferenceProvider;
pub use class::ClassAttributeProvider;
pub use method::MethodAttributeProvider;
pub use property::PropertyAttributeProvider;

use beanfix_core::TextEdit;
use beanfix_dom::{Attribute, DocumentTree, NodeId};

use crate::assist::{candidates, AssistContext, ProposalCalculator};
use crate::engine::EngineSettings;
use crate::error::QuickfixError;
use crate::java::{self, JavaChange};
use crate::oracle::{OracleError, TypeInfo, TypeOracle};
use crate::proposal::{FixEffect, ProposalDraft, ProposalKind};
use crate::record::DiagnosticRecord;
use crate::shape::BeanShape;
use crate::span::AttributeSpan;
use crate::xml_edit::escape_attribute;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    Setter,
    Getter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleKind {
    Init,
    Destroy,
}

impl LifecycleKind {
    pub fn attribute(self) -> &'static str {
        match self {
            LifecycleKind::Init => "init-method",
            LifecycleKind::Destroy => "destroy-method",
        }
    }
}

/// What the diagnostic asks to be fixed, with everything the providers need
/// to know about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixRequest {
    CreateClass {
        class_name: String,
    },
    CreateBean {
        bean_name: String,
    },
    CreateAccessor {
        class_name: String,
        property: String,
        kind: AccessorKind,
    },
    CreateLifecycleMethod {
        class_name: String,
        method: String,
        kind: LifecycleKind,
    },
    CreateFactoryMethod {
        class_name: String,
        method: String,
        is_static: bool,
        arity: usize,
    },
    AddRequiredProperties {
        class_name: String,
        properties: Vec<String>,
    },
    CreateConstructor {
        class_name: String,
        arity: usize,
    },
}

/// Everything known about one located diagnostic.
pub struct FixContext<'a> {
    pub record: &'a DiagnosticRecord,
    pub tree: &'a dyn DocumentTree,
    /// Element owning the anchor attribute.
    pub node: NodeId,
    pub attribute: &'a Attribute,
    pub span: &'a AttributeSpan,
    pub oracle: &'a dyn TypeOracle,
    pub settings: &'a EngineSettings,
    pub request: &'a FixRequest,
    /// Shape of the bean enclosing `node`.
    pub shape: &'a BeanShape,
}

impl<'a> FixContext<'a> {
    fn assist(&self, class_name: Option<&'a str>, static_methods: Option<bool>) -> AssistContext<'a> {
        AssistContext {
            tree: self.tree,
            node: self.node,
            oracle: self.oracle,
            class_name,
            static_methods,
            fuzzy: self.settings.fuzzy,
        }
    }
}

pub trait FixProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Drafts for `ctx.request`; requests a provider does not handle yield
    /// nothing.
    fn provide(&self, ctx: &FixContext<'_>) -> Result<Vec<ProposalDraft>, QuickfixError>;
}

/// "Change to '...'" drafts for names similar to the current value.
fn rename_drafts(
    ctx: &FixContext<'_>,
    calculator: &dyn ProposalCalculator,
    assist: &AssistContext<'_>,
) -> Vec<ProposalDraft> {
    let limit = ctx.settings.max_similar_candidates;
    if limit == 0 || ctx.span.text.is_empty() {
        return Vec::new();
    }
    let closing = ctx.span.missing_quote();
    candidates(&ctx.span.text, false, calculator, assist)
        .into_iter()
        .take(limit)
        .map(|candidate| {
            let mut replacement = escape_attribute(&candidate.name);
            replacement.extend(closing);
            ProposalDraft {
                label: format!("Change to '{}'", candidate.name),
                kind: ProposalKind::Rename,
                range: ctx.span.range,
                missing_end_quote: closing.is_some(),
                effect: FixEffect::Document(vec![TextEdit::new(ctx.span.range, replacement)]),
            }
        })
        .collect()
}

/// Outcome of resolving the class a member should be added to.
enum Owner {
    /// Source type members can be added to.
    Editable(TypeInfo),
    /// Resolved, but members cannot be added (compiled type).
    ReadOnly,
    /// Not resolvable: offer to create the class instead.
    Missing,
}

fn resolve_owner(ctx: &FixContext<'_>, class_name: &str) -> Owner {
    match ctx.oracle.resolve_type(class_name) {
        Ok(ty) if ty.is_binary => {
            tracing::debug!(
                target: "beanfix.quickfix",
                class = class_name,
                "class has no source; member proposals suppressed"
            );
            Owner::ReadOnly
        }
        Ok(ty) => Owner::Editable(ty),
        Err(err) => {
            if matches!(err, OracleError::Failed(_)) {
                tracing::warn!(
                    target: "beanfix.quickfix",
                    class = class_name,
                    error = %err,
                    "type lookup failed"
                );
            }
            Owner::Missing
        }
    }
}

/// Whether the oracle already knows a member the diagnostic says is
/// missing, in which case the diagnostic is stale.
fn member_exists(found: Result<crate::oracle::MethodInfo, OracleError>, what: &str) -> bool {
    match found {
        Ok(_) => {
            tracing::debug!(
                target: "beanfix.quickfix",
                member = what,
                "member already exists; proposal suppressed"
            );
            true
        }
        Err(OracleError::Failed(message)) => {
            tracing::warn!(target: "beanfix.quickfix", member = what, %message, "member lookup failed");
            false
        }
        Err(_) => false,
    }
}

fn create_class_draft(ctx: &FixContext<'_>, class_name: &str) -> Option<ProposalDraft> {
    if !java::is_type_name(class_name) {
        tracing::debug!(
            target: "beanfix.quickfix",
            class = class_name,
            "not a valid type name; no class proposal"
        );
        return None;
    }
    let unit = ctx.settings.indent.as_str();
    let properties = &ctx.shape.properties;
    let arity = ctx.shape.constructor_args;

    let change = match java::split_nested(class_name) {
        Some((outer, _)) => {
            let nested = java::nested_class_stub(class_name, properties, arity, unit);
            match resolve_owner(ctx, outer) {
                Owner::Editable(ty) => JavaChange::InsertMember {
                    type_name: ty.name,
                    member: nested,
                },
                Owner::ReadOnly => return None,
                Owner::Missing => {
                    let source = java::class_source(outer, &[], 0, unit);
                    JavaChange::CreateType {
                        qualified_name: outer.to_owned(),
                        source: java::insert_member(&source, &nested, unit),
                    }
                }
            }
        }
        None => JavaChange::CreateType {
            qualified_name: class_name.to_owned(),
            source: java::class_source(class_name, properties, arity, unit),
        },
    };

    Some(ProposalDraft {
        label: format!("Create class '{class_name}'"),
        kind: ProposalKind::CreateClass,
        range: ctx.span.range,
        missing_end_quote: false,
        effect: FixEffect::Java(change),
    })
}

fn insert_member_draft(
    ctx: &FixContext<'_>,
    owner: &TypeInfo,
    label: String,
    kind: ProposalKind,
    member: String,
) -> ProposalDraft {
    ProposalDraft {
        label,
        kind,
        range: ctx.span.range,
        missing_end_quote: false,
        effect: FixEffect::Java(JavaChange::InsertMember {
            type_name: owner.name.clone(),
            member,
        }),
    }
}
