use crate::error::QuickfixError;
use crate::proposal::ProposalDraft;

use super::{create_class_draft, FixContext, FixProvider, FixRequest};

/// Offers to create the class named by a `class` attribute.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClassAttributeProvider;

impl FixProvider for ClassAttributeProvider {
    fn name(&self) -> &'static str {
        "class-attribute"
    }

    fn provide(&self, ctx: &FixContext<'_>) -> Result<Vec<ProposalDraft>, QuickfixError> {
        let FixRequest::CreateClass { class_name } = ctx.request else {
            return Ok(Vec::new());
        };
        if ctx.oracle.resolve_type(class_name).is_ok() {
            tracing::debug!(
                target: "beanfix.quickfix",
                class = class_name.as_str(),
                "class already exists; proposal suppressed"
            );
            return Ok(Vec::new());
        }
        Ok(create_class_draft(ctx, class_name).into_iter().collect())
    }
}
