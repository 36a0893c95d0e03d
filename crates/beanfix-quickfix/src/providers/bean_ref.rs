use crate::assist::BeanNameCalculator;
use crate::error::QuickfixError;
use crate::locate::top_level_element;
use crate::proposal::{FixEffect, ProposalDraft, ProposalKind};
use crate::span::{resolve_span, SpanOptions};
use crate::xml_edit;

use super::{rename_drafts, FixContext, FixProvider, FixRequest};

/// References (`ref`, `parent`, `factory-bean`, `<ref bean>`) to beans that
/// are not defined.
#[derive(Debug, Default, Clone, Copy)]
pub struct BeanReferenceProvider;

impl FixProvider for BeanReferenceProvider {
    fn name(&self) -> &'static str {
        "bean-reference"
    }

    fn provide(&self, ctx: &FixContext<'_>) -> Result<Vec<ProposalDraft>, QuickfixError> {
        let FixRequest::CreateBean { bean_name } = ctx.request else {
            return Ok(Vec::new());
        };

        let assist = ctx.assist(None, None);
        let mut drafts = rename_drafts(ctx, &BeanNameCalculator, &assist);
        if bean_name.trim().is_empty() {
            return Ok(drafts);
        }

        // The new definition goes after the top-level element holding the
        // reference; the proposal covers the referencing element.
        let sibling = top_level_element(ctx.tree, ctx.node).unwrap_or(ctx.node);
        let whole = resolve_span(
            ctx.tree,
            ctx.node,
            ctx.attribute.region,
            SpanOptions {
                affects_whole_bean: true,
            },
        )?;
        drafts.push(ProposalDraft {
            label: format!("Create bean '{bean_name}'"),
            kind: ProposalKind::CreateBean,
            range: whole.range,
            missing_end_quote: false,
            effect: FixEffect::Document(vec![xml_edit::insert_bean(ctx.tree, sibling, bean_name)]),
        });
        Ok(drafts)
    }
}
