use crate::error::QuickfixError;
use crate::java;
use crate::locate::enclosing_bean;
use crate::proposal::{FixEffect, ProposalDraft, ProposalKind};
use crate::xml_edit;

use super::{
    create_class_draft, insert_member_draft, member_exists, resolve_owner, FixContext,
    FixProvider, FixRequest, Owner,
};

/// Fixes concerning a bean element as a whole: required properties it does
/// not set and constructors its arguments do not match.
#[derive(Debug, Default, Clone, Copy)]
pub struct BeanElementProvider;

impl BeanElementProvider {
    fn add_properties(ctx: &FixContext<'_>, properties: &[String]) -> Vec<ProposalDraft> {
        let Some(bean) = enclosing_bean(ctx.tree, ctx.node) else {
            return Vec::new();
        };
        let unit = ctx.settings.indent.as_str();
        properties
            .iter()
            .filter(|name| {
                let present = ctx.shape.properties.contains(*name);
                if present {
                    tracing::debug!(
                        target: "beanfix.quickfix",
                        property = name.as_str(),
                        "property already set; proposal suppressed"
                    );
                }
                !present
            })
            .map(|name| ProposalDraft {
                label: format!("Add property '{name}'"),
                kind: ProposalKind::AddProperty,
                range: ctx.span.range,
                missing_end_quote: false,
                effect: FixEffect::Document(vec![xml_edit::insert_property(
                    ctx.tree, bean, name, unit,
                )]),
            })
            .collect()
    }

    fn add_constructor(ctx: &FixContext<'_>, class_name: &str, arity: usize) -> Vec<ProposalDraft> {
        match resolve_owner(ctx, class_name) {
            Owner::Missing => create_class_draft(ctx, class_name).into_iter().collect(),
            Owner::ReadOnly => Vec::new(),
            Owner::Editable(ty) => {
                let signature = java::constructor_signature(class_name, arity);
                if member_exists(ctx.oracle.find_constructor(&ty, arity), &signature) {
                    return Vec::new();
                }
                let label = format!(
                    "Add constructor '{signature}' in class '{class_name}'"
                );
                vec![insert_member_draft(
                    ctx,
                    &ty,
                    label,
                    ProposalKind::CreateConstructor,
                    java::constructor_stub(class_name, arity),
                )]
            }
        }
    }
}

impl FixProvider for BeanElementProvider {
    fn name(&self) -> &'static str {
        "bean-element"
    }

    fn provide(&self, ctx: &FixContext<'_>) -> Result<Vec<ProposalDraft>, QuickfixError> {
        Ok(match ctx.request {
            FixRequest::AddRequiredProperties { properties, .. } => {
                Self::add_properties(ctx, properties)
            }
            FixRequest::CreateConstructor { class_name, arity } => {
                Self::add_constructor(ctx, class_name, *arity)
            }
            _ => Vec::new(),
        })
    }
}
