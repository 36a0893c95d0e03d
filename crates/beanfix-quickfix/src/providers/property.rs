use crate::assist::PropertyNameCalculator;
use crate::error::QuickfixError;
use crate::java;
use crate::oracle::Visibility;
use crate::proposal::{ProposalDraft, ProposalKind};

use super::{
    create_class_draft, insert_member_draft, member_exists, rename_drafts, resolve_owner,
    AccessorKind, FixContext, FixProvider, FixRequest, Owner,
};

/// `<property name="...">` naming a property without a setter or getter.
#[derive(Debug, Default, Clone, Copy)]
pub struct PropertyAttributeProvider;

impl FixProvider for PropertyAttributeProvider {
    fn name(&self) -> &'static str {
        "property-attribute"
    }

    fn provide(&self, ctx: &FixContext<'_>) -> Result<Vec<ProposalDraft>, QuickfixError> {
        let FixRequest::CreateAccessor {
            class_name,
            property,
            kind,
        } = ctx.request
        else {
            return Ok(Vec::new());
        };

        let assist = ctx.assist(Some(class_name.as_str()), None);
        let mut drafts = rename_drafts(ctx, &PropertyNameCalculator, &assist);

        if !java::is_java_identifier(property) {
            return Ok(drafts);
        }
        let unit = ctx.settings.indent.as_str();
        let (accessor, arity, stub, what) = match kind {
            AccessorKind::Setter => (
                java::setter_name(property),
                1,
                java::setter_stub(property),
                "setter",
            ),
            AccessorKind::Getter => (
                java::getter_name(property),
                0,
                java::getter_stub(property, unit),
                "getter",
            ),
        };

        match resolve_owner(ctx, class_name) {
            Owner::Missing => drafts.extend(create_class_draft(ctx, class_name)),
            Owner::ReadOnly => {}
            Owner::Editable(ty) => {
                let existing = ctx
                    .oracle
                    .find_method(&ty, &accessor, Some(arity), Visibility::Private);
                if !member_exists(existing, &accessor) {
                    let label = format!(
                        "Add missing {what} for property '{property}' in class '{class_name}'"
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
