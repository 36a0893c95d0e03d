use crate::assist::{FactoryMethodCalculator, LifecycleMethodCalculator};
use crate::error::QuickfixError;
use crate::java;
use crate::oracle::Visibility;
use crate::proposal::{ProposalDraft, ProposalKind};

use super::{
    create_class_draft, insert_member_draft, member_exists, rename_drafts, resolve_owner,
    FixContext, FixProvider, FixRequest, Owner,
};

/// `init-method`, `destroy-method` and `factory-method` values naming a
/// method the bean class does not declare.
#[derive(Debug, Default, Clone, Copy)]
pub struct MethodAttributeProvider;

impl FixProvider for MethodAttributeProvider {
    fn name(&self) -> &'static str {
        "method-attribute"
    }

    fn provide(&self, ctx: &FixContext<'_>) -> Result<Vec<ProposalDraft>, QuickfixError> {
        let (class_name, method, arity, is_static, returns, attribute) = match ctx.request {
            FixRequest::CreateLifecycleMethod {
                class_name,
                method,
                kind,
            } => (class_name, method, 0, false, None, kind.attribute()),
            FixRequest::CreateFactoryMethod {
                class_name,
                method,
                is_static,
                arity,
            } => (
                class_name,
                method,
                *arity,
                *is_static,
                Some("Object"),
                "factory-method",
            ),
            _ => return Ok(Vec::new()),
        };

        let mut drafts = if returns.is_some() {
            let assist = ctx.assist(Some(class_name.as_str()), Some(is_static));
            rename_drafts(ctx, &FactoryMethodCalculator, &assist)
        } else {
            let assist = ctx.assist(Some(class_name.as_str()), None);
            rename_drafts(ctx, &LifecycleMethodCalculator, &assist)
        };

        if !java::is_java_identifier(method) {
            return Ok(drafts);
        }
        match resolve_owner(ctx, class_name) {
            Owner::Missing => drafts.extend(create_class_draft(ctx, class_name)),
            Owner::ReadOnly => {}
            Owner::Editable(ty) => {
                let existing =
                    ctx.oracle
                        .find_method(&ty, method, Some(arity), Visibility::Private);
                if !member_exists(existing, method) {
                    let label = format!(
                        "Add missing {attribute} '{method}' in class '{class_name}'"
                    );
                    let stub = java::method_stub(
                        method,
                        arity,
                        is_static,
                        returns,
                        &ctx.settings.indent,
                    );
                    drafts.push(insert_member_draft(
                        ctx,
                        &ty,
                        label,
                        ProposalKind::CreateMethod,
                        stub,
                    ));
                }
            }
        }
        Ok(drafts)
    }
}
