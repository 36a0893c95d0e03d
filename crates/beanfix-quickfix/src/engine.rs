//! Diagnostic to proposal dispatch.

use std::collections::HashSet;
use std::sync::Arc;

use beanfix_config::QuickfixConfig;
use beanfix_core::LineIndex;
use beanfix_dom::{Attribute, DocumentModel, DocumentTree, NodeId};

use crate::error::QuickfixError;
use crate::locate::{enclosing_bean, find_attributes, locate_bean};
use crate::oracle::TypeOracle;
use crate::proposal::{style_for, FixProposal, InlineEdits, ProposalStyle};
use crate::providers::{AccessorKind, FixContext, FixRequest, LifecycleKind};
use crate::record::{
    DiagnosticRecord, ErrorId, BEAN_NAME_KEY, CLASS_KEY, METHOD_KEY, MISSING_PROPERTIES_PREFIX,
    NUM_ARGUMENT_KEY, PROPERTY_KEY,
};
use crate::registry::FixProviderRegistry;
use crate::shape::BeanShape;
use crate::span::{resolve_span, SpanOptions};

/// Tunables the providers read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub max_similar_candidates: usize,
    pub fuzzy: bool,
    /// Indentation unit for generated XML and Java.
    pub indent: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::from(&QuickfixConfig::default())
    }
}

impl From<&QuickfixConfig> for EngineSettings {
    fn from(config: &QuickfixConfig) -> Self {
        Self {
            max_similar_candidates: config.content_assist.max_similar_candidates,
            fuzzy: config.content_assist.fuzzy,
            indent: config.proposals.indent.clone(),
        }
    }
}

/// Resolves diagnostic records to fix proposals.
///
/// The engine holds no per-request state; every call re-reads the document
/// from the [`DocumentModel`]. Failures never escape: they are logged and
/// yield no proposals.
pub struct QuickFixEngine {
    registry: Arc<FixProviderRegistry>,
    documents: Arc<dyn DocumentModel>,
    oracle: Arc<dyn TypeOracle>,
    style: Box<dyn ProposalStyle>,
    settings: EngineSettings,
}

impl QuickFixEngine {
    pub fn new(
        registry: Arc<FixProviderRegistry>,
        documents: Arc<dyn DocumentModel>,
        oracle: Arc<dyn TypeOracle>,
    ) -> Self {
        Self {
            registry,
            documents,
            oracle,
            style: Box::new(InlineEdits),
            settings: EngineSettings::default(),
        }
    }

    pub fn with_config(
        registry: Arc<FixProviderRegistry>,
        documents: Arc<dyn DocumentModel>,
        oracle: Arc<dyn TypeOracle>,
        config: &QuickfixConfig,
    ) -> Self {
        Self {
            style: style_for(config.proposals.style),
            settings: EngineSettings::from(config),
            ..Self::new(registry, documents, oracle)
        }
    }

    pub fn with_style(mut self, style: Box<dyn ProposalStyle>) -> Self {
        self.style = style;
        self
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Cheap pre-check: whether `record` carries what a fix needs. The
    /// document is not consulted.
    pub fn has_proposals(&self, record: &DiagnosticRecord) -> bool {
        record.missing_required().is_none()
    }

    /// Proposals for `record`, in provider order. Empty when the document
    /// changed since validation, when the record is incomplete or cannot be
    /// located, and when a collaborator fails.
    pub fn proposals(&self, record: &DiagnosticRecord) -> Vec<FixProposal> {
        let span = tracing::debug_span!(
            target: "beanfix.quickfix",
            "proposals",
            error_id = %record.error_id(),
            resource = %record.resource(),
            line = record.line(),
        );
        let _guard = span.enter();

        match self.try_proposals(record) {
            Ok(proposals) => proposals,
            Err(err) => {
                tracing::warn!(target: "beanfix.quickfix", error = %err, "quick fix computation failed");
                Vec::new()
            }
        }
    }

    /// [`Self::proposals`] for each record; records never affect each other.
    pub fn proposals_batch(&self, records: &[DiagnosticRecord]) -> Vec<Vec<FixProposal>> {
        records.iter().map(|record| self.proposals(record)).collect()
    }

    fn try_proposals(&self, record: &DiagnosticRecord) -> Result<Vec<FixProposal>, QuickfixError> {
        let resource = record.resource();
        match self.documents.is_dirty(resource) {
            Ok(false) => {}
            Ok(true) => {
                tracing::debug!(target: "beanfix.quickfix", "document has unsaved changes");
                return Ok(Vec::new());
            }
            Err(err) => {
                tracing::warn!(target: "beanfix.quickfix", error = %err, "cannot check document state");
                return Ok(Vec::new());
            }
        }

        if let Some(missing) = record.missing_required() {
            tracing::debug!(target: "beanfix.quickfix", missing, "incomplete diagnostic");
            return Ok(Vec::new());
        }
        let Some(token) = record.token() else {
            return Ok(Vec::new());
        };

        let document = self.documents.document(resource)?;
        let tree: &dyn DocumentTree = &*document;
        let Some(root) = tree.root() else {
            return Ok(Vec::new());
        };

        let scope = match record.attribute(BEAN_NAME_KEY) {
            Some(bean_name) => match locate_bean(tree, bean_name) {
                Some(bean) => bean,
                None => {
                    tracing::debug!(target: "beanfix.quickfix", bean_name, "bean not found");
                    return Ok(Vec::new());
                }
            },
            None => root,
        };

        let error_id = record.error_id();
        let Some((node, attribute)) = anchor(tree, scope, record, token) else {
            tracing::debug!(target: "beanfix.quickfix", token, "diagnosed attribute not found");
            return Ok(Vec::new());
        };
        let span = resolve_span(
            tree,
            node,
            attribute.region,
            SpanOptions {
                affects_whole_bean: error_id.is_node_scoped(),
            },
        )?;

        let shape = enclosing_bean(tree, node)
            .map(|bean| BeanShape::of(tree, bean))
            .unwrap_or_default();
        let Some(request) = build_request(record, tree, node, &shape) else {
            tracing::debug!(target: "beanfix.quickfix", "diagnostic attributes are malformed");
            return Ok(Vec::new());
        };

        let attribute_name = (!error_id.is_node_scoped()).then_some(attribute.name.as_str());
        let providers =
            self.registry
                .lookup(tree.namespace(node), tree.local_name(node), attribute_name);
        let ctx = FixContext {
            record,
            tree,
            node,
            attribute,
            span: &span,
            oracle: &*self.oracle,
            settings: &self.settings,
            request: &request,
            shape: &shape,
        };

        let mut seen = HashSet::new();
        let mut proposals = Vec::new();
        for provider in providers {
            let drafts = match provider.provide(&ctx) {
                Ok(drafts) => drafts,
                Err(err) => {
                    tracing::warn!(
                        target: "beanfix.quickfix",
                        provider = provider.name(),
                        error = %err,
                        "fix provider failed"
                    );
                    continue;
                }
            };
            for draft in drafts {
                if seen.insert((draft.label.clone(), draft.range)) {
                    proposals.push(self.style.finish(resource, draft));
                }
            }
        }
        tracing::debug!(target: "beanfix.quickfix", count = proposals.len(), "proposals computed");
        Ok(proposals)
    }
}

/// The attribute holding the diagnosed token. Anchor attributes are tried in
/// order, only on the anchor element when the error names one; among several matches the one on the reported line wins, else the
/// first in document order.
fn anchor<'t>(
    tree: &'t dyn DocumentTree,
    scope: NodeId,
    record: &DiagnosticRecord,
    token: &'t str,
) -> Option<(NodeId, &'t Attribute)> {
    let element = record.error_id().anchor_element();
    for &name in record.error_id().anchor_attributes() {
        let matches: Vec<_> = find_attributes(tree, scope, name, token)
            .filter(|(node, _)| element.map_or(true, |e| tree.local_name(*node) == e))
            .collect();
        match matches.as_slice() {
            [] => continue,
            [only] => return Some(*only),
            [first, ..] => {
                if record.line() > 0 {
                    let index = LineIndex::new(tree.text());
                    let on_line = matches.iter().find(|(node, attr)| {
                        let offset = tree.range(*node).start() + attr.region.start();
                        index.line_of(offset) + 1 == record.line()
                    });
                    if let Some(found) = on_line {
                        return Some(*found);
                    }
                }
                return Some(*first);
            }
        }
    }
    None
}

fn build_request(
    record: &DiagnosticRecord,
    tree: &dyn DocumentTree,
    node: NodeId,
    shape: &BeanShape,
) -> Option<FixRequest> {
    let attr = |key: &str| record.attribute(key).map(str::to_owned);
    let request = match record.error_id() {
        ErrorId::ClassNotFound => FixRequest::CreateClass {
            class_name: attr(CLASS_KEY)?,
        },
        ErrorId::UndefinedReferencedBean => FixRequest::CreateBean {
            bean_name: record.token()?.to_owned(),
        },
        ErrorId::NoSetter | ErrorId::NoGetter => FixRequest::CreateAccessor {
            class_name: attr(CLASS_KEY)?,
            property: attr(PROPERTY_KEY)?,
            kind: if record.error_id() == ErrorId::NoSetter {
                AccessorKind::Setter
            } else {
                AccessorKind::Getter
            },
        },
        ErrorId::UndefinedInitMethod | ErrorId::UndefinedDestroyMethod => {
            FixRequest::CreateLifecycleMethod {
                class_name: attr(CLASS_KEY)?,
                method: attr(METHOD_KEY)?,
                kind: if record.error_id() == ErrorId::UndefinedInitMethod {
                    LifecycleKind::Init
                } else {
                    LifecycleKind::Destroy
                },
            }
        }
        ErrorId::UndefinedFactoryBeanMethod => {
            let bean = enclosing_bean(tree, node)?;
            FixRequest::CreateFactoryMethod {
                class_name: attr(CLASS_KEY)?,
                method: attr(METHOD_KEY)?,
                is_static: tree.attribute(bean, "factory-bean").is_none(),
                arity: shape.constructor_args,
            }
        }
        ErrorId::RequiredPropertyMissing => FixRequest::AddRequiredProperties {
            class_name: attr(CLASS_KEY)?,
            properties: record
                .numbered(MISSING_PROPERTIES_PREFIX)
                .into_iter()
                .map(str::to_owned)
                .collect(),
        },
        ErrorId::NoConstructor => FixRequest::CreateConstructor {
            class_name: attr(CLASS_KEY)?,
            arity: record.attribute(NUM_ARGUMENT_KEY)?.trim().parse().ok()?,
        },
    };
    Some(request)
}
