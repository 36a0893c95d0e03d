//! Content-assist bridge.
//!
//! Completion calculators know how to enumerate names that are valid at a
//! position (methods of a class, bean ids, ...). Quick fixes reuse them to
//! find the names an unresolved token was probably meant to be.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use beanfix_dom::{DocumentTree, NodeId};
use beanfix_fuzzy::{similarity, Similarity};

use crate::error::QuickfixError;
use crate::java;
use crate::locate::BEAN_ELEMENT;
use crate::oracle::{MethodInfo, TypeOracle};

/// One completion candidate. Two candidates are the same when both their
/// name and display text agree; the attached object is not compared.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub name: String,
    pub display_text: String,
    pub proposed_object: Option<String>,
}

impl Candidate {
    pub fn new(name: impl Into<String>, display_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_text: display_text.into(),
            proposed_object: None,
        }
    }

    pub fn with_object(mut self, object: impl Into<String>) -> Self {
        self.proposed_object = Some(object.into());
        self
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.display_text == other.display_text
    }
}

impl Eq for Candidate {}

impl Hash for Candidate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.display_text.hash(state);
    }
}

/// Sink calculators push raw candidates into.
#[derive(Debug, Default)]
pub struct ProposalRecorder {
    candidates: Vec<Candidate>,
}

impl ProposalRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, candidate: Candidate) {
        self.candidates.push(candidate);
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn into_candidates(self) -> Vec<Candidate> {
        self.candidates
    }
}

/// Where a calculator runs.
#[derive(Clone, Copy)]
pub struct AssistContext<'a> {
    pub tree: &'a dyn DocumentTree,
    /// Element owning the attribute being completed.
    pub node: NodeId,
    pub oracle: &'a dyn TypeOracle,
    /// Bean class the names belong to, when the calculator needs one.
    pub class_name: Option<&'a str>,
    /// Restrict method candidates to static (`Some(true)`) or instance
    /// (`Some(false)`) methods.
    pub static_methods: Option<bool>,
    /// When false only case-insensitive equality counts as similar.
    pub fuzzy: bool,
}

pub trait ProposalCalculator: Send + Sync {
    fn compute(
        &self,
        ctx: &AssistContext<'_>,
        recorder: &mut ProposalRecorder,
    ) -> Result<(), QuickfixError>;
}

/// Run `calculator` and keep the candidates matching `to_be_matched`.
///
/// Exact matching keeps calculator order; otherwise similar names are ranked
/// best-first (stable for ties). Duplicates are dropped either way.
pub fn candidates(
    to_be_matched: &str,
    exact_match: bool,
    calculator: &dyn ProposalCalculator,
    ctx: &AssistContext<'_>,
) -> Vec<Candidate> {
    let mut recorder = ProposalRecorder::new();
    if let Err(err) = calculator.compute(ctx, &mut recorder) {
        tracing::warn!(
            target: "beanfix.quickfix",
            token = to_be_matched,
            error = %err,
            "content assist calculator failed"
        );
        return Vec::new();
    }

    let raw = recorder.into_candidates();
    let matched: Vec<Candidate> = if exact_match {
        raw.into_iter().filter(|c| c.name == to_be_matched).collect()
    } else {
        let mut ranked: Vec<(Similarity, Candidate)> = raw
            .into_iter()
            .filter_map(|c| {
                let score = similarity(to_be_matched, &c.name)?;
                (ctx.fuzzy || score == Similarity::SameIgnoringCase).then_some((score, c))
            })
            .collect();
        ranked.sort_by_key(|(score, _)| *score);
        ranked.into_iter().map(|(_, c)| c).collect()
    };

    let mut seen = HashSet::new();
    matched
        .into_iter()
        .filter(|c| seen.insert(c.clone()))
        .collect()
}

fn class_methods(ctx: &AssistContext<'_>) -> Result<(String, Vec<MethodInfo>), QuickfixError> {
    let Some(class_name) = ctx.class_name else {
        return Ok((String::new(), Vec::new()));
    };
    let ty = ctx.oracle.resolve_type(class_name)?;
    let methods = ctx.oracle.methods(&ty)?;
    Ok((java::simple_name(class_name).to_owned(), methods))
}

/// No-argument methods, the shape of `init-method`/`destroy-method` targets.
#[derive(Debug, Default, Clone, Copy)]
pub struct LifecycleMethodCalculator;

impl ProposalCalculator for LifecycleMethodCalculator {
    fn compute(
        &self,
        ctx: &AssistContext<'_>,
        recorder: &mut ProposalRecorder,
    ) -> Result<(), QuickfixError> {
        let (class, methods) = class_methods(ctx)?;
        for method in methods {
            if method.arity == 0 && !method.is_constructor() {
                let display = format!("{}() - {class}", method.name);
                recorder.record(Candidate::new(method.name, display));
            }
        }
        Ok(())
    }
}

/// Non-void methods usable as `factory-method`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FactoryMethodCalculator;

impl ProposalCalculator for FactoryMethodCalculator {
    fn compute(
        &self,
        ctx: &AssistContext<'_>,
        recorder: &mut ProposalRecorder,
    ) -> Result<(), QuickfixError> {
        let (class, methods) = class_methods(ctx)?;
        for method in methods {
            let Some(returns) = method.return_type.as_deref() else {
                continue;
            };
            if ctx.static_methods.is_some_and(|s| s != method.is_static) {
                continue;
            }
            let display = format!("{}() {} - {class}", method.name, java::simple_name(returns));
            recorder.record(Candidate::new(method.name.clone(), display).with_object(returns));
        }
        Ok(())
    }
}

/// Writable properties, derived from one-argument setters.
#[derive(Debug, Default, Clone, Copy)]
pub struct PropertyNameCalculator;

impl ProposalCalculator for PropertyNameCalculator {
    fn compute(
        &self,
        ctx: &AssistContext<'_>,
        recorder: &mut ProposalRecorder,
    ) -> Result<(), QuickfixError> {
        let (class, methods) = class_methods(ctx)?;
        for method in methods.iter().filter(|m| m.arity == 1 && !m.is_static) {
            if let Some(property) = java::property_of_setter(&method.name) {
                let display = format!("{property} - {class}");
                recorder.record(Candidate::new(property, display));
            }
        }
        Ok(())
    }
}

/// Ids and aliases of every bean in the document.
#[derive(Debug, Default, Clone, Copy)]
pub struct BeanNameCalculator;

impl ProposalCalculator for BeanNameCalculator {
    fn compute(
        &self,
        ctx: &AssistContext<'_>,
        recorder: &mut ProposalRecorder,
    ) -> Result<(), QuickfixError> {
        let Some(root) = ctx.tree.root() else {
            return Ok(());
        };
        for bean in ctx
            .tree
            .descendants(root)
            .filter(|&n| ctx.tree.local_name(n) == BEAN_ELEMENT)
        {
            let class = ctx.tree.attribute_value(bean, "class").unwrap_or_default();
            let id = ctx.tree.attribute_value(bean, "id").into_iter();
            let aliases = ctx
                .tree
                .attribute_value(bean, "name")
                .into_iter()
                .flat_map(|names| names.split([',', ';', ' ']));
            for name in id.chain(aliases).filter(|name| !name.is_empty()) {
                let display = if class.is_empty() {
                    name.to_owned()
                } else {
                    format!("{name} [{}]", java::simple_name(class))
                };
                let mut candidate = Candidate::new(name, display);
                if !class.is_empty() {
                    candidate = candidate.with_object(class);
                }
                recorder.record(candidate);
            }
        }
        Ok(())
    }
}
