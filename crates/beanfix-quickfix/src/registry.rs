//! Declarative table mapping document positions to fix providers.

use std::sync::Arc;

use beanfix_dom::BEANS_NAMESPACE;

use crate::providers::{
    BeanElementProvider, BeanReferenceProvider, ClassAttributeProvider, FixProvider,
    MethodAttributeProvider, PropertyAttributeProvider,
};

/// Namespace condition of a binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceMatch {
    Exact(String),
    /// This namespace or none at all. DTD-declared bean files carry no
    /// `xmlns` but use the same vocabulary.
    ExactOrNone(String),
    /// Any namespace except this one, including none.
    Not(String),
}

impl NamespaceMatch {
    /// `"!uri"` negates, `"?uri"` also accepts no namespace, anything else
    /// is literal.
    pub fn parse(pattern: &str) -> Self {
        if let Some(uri) = pattern.strip_prefix('!') {
            NamespaceMatch::Not(uri.to_owned())
        } else if let Some(uri) = pattern.strip_prefix('?') {
            NamespaceMatch::ExactOrNone(uri.to_owned())
        } else {
            NamespaceMatch::Exact(pattern.to_owned())
        }
    }

    pub fn matches(&self, namespace: Option<&str>) -> bool {
        match self {
            NamespaceMatch::Exact(uri) => namespace == Some(uri.as_str()),
            NamespaceMatch::ExactOrNone(uri) => namespace.map_or(true, |ns| ns == uri),
            NamespaceMatch::Not(uri) => namespace != Some(uri.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingScope {
    /// Fires for diagnostics on an attribute value.
    Attribute,
    /// Fires for diagnostics on the element as a whole.
    Node,
}

#[derive(Clone)]
pub struct ValidatorBinding {
    pub namespace: NamespaceMatch,
    /// `None` matches any element.
    pub node_name: Option<String>,
    /// `None` matches any attribute. Ignored for node-scoped bindings.
    pub attribute_name: Option<String>,
    pub scope: BindingScope,
    pub provider: Arc<dyn FixProvider>,
}

impl ValidatorBinding {
    pub fn attribute(
        namespace: &str,
        node_name: Option<&str>,
        attribute_name: Option<&str>,
        provider: Arc<dyn FixProvider>,
    ) -> Self {
        Self {
            namespace: NamespaceMatch::parse(namespace),
            node_name: node_name.map(str::to_owned),
            attribute_name: attribute_name.map(str::to_owned),
            scope: BindingScope::Attribute,
            provider,
        }
    }

    pub fn node(namespace: &str, node_name: Option<&str>, provider: Arc<dyn FixProvider>) -> Self {
        Self {
            namespace: NamespaceMatch::parse(namespace),
            node_name: node_name.map(str::to_owned),
            attribute_name: None,
            scope: BindingScope::Node,
            provider,
        }
    }

    fn matches(&self, namespace: Option<&str>, node_name: &str, attribute: Option<&str>) -> bool {
        let scope_matches = match (self.scope, attribute) {
            (BindingScope::Attribute, Some(attribute)) => self
                .attribute_name
                .as_deref()
                .map_or(true, |name| name == attribute),
            (BindingScope::Node, None) => true,
            _ => false,
        };
        scope_matches
            && self.namespace.matches(namespace)
            && self.node_name.as_deref().map_or(true, |name| name == node_name)
    }
}

impl std::fmt::Debug for ValidatorBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorBinding")
            .field("namespace", &self.namespace)
            .field("node_name", &self.node_name)
            .field("attribute_name", &self.attribute_name)
            .field("scope", &self.scope)
            .field("provider", &self.provider.name())
            .finish()
    }
}

/// Registry of fix providers. Every matching binding fires; a provider
/// registered under several matching bindings is returned once.
#[derive(Debug, Default, Clone)]
pub struct FixProviderRegistry {
    bindings: Vec<ValidatorBinding>,
}

impl FixProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, binding: ValidatorBinding) -> &mut Self {
        self.bindings.push(binding);
        self
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Providers for an attribute (`Some`) or for the element itself (`None`),
    /// in registration order.
    pub fn lookup(
        &self,
        namespace: Option<&str>,
        node_name: &str,
        attribute: Option<&str>,
    ) -> Vec<Arc<dyn FixProvider>> {
        let mut found: Vec<Arc<dyn FixProvider>> = Vec::new();
        for binding in &self.bindings {
            if binding.matches(namespace, node_name, attribute)
                && !found.iter().any(|p| Arc::ptr_eq(p, &binding.provider))
            {
                found.push(Arc::clone(&binding.provider));
            }
        }
        found
    }

    /// Bindings for the core bean-definition vocabulary, with or without its
    /// namespace, and for elements of custom namespaces.
    pub fn with_defaults() -> Self {
        let class: Arc<dyn FixProvider> = Arc::new(ClassAttributeProvider);
        let method: Arc<dyn FixProvider> = Arc::new(MethodAttributeProvider);
        let property: Arc<dyn FixProvider> = Arc::new(PropertyAttributeProvider);
        let bean_ref: Arc<dyn FixProvider> = Arc::new(BeanReferenceProvider);
        let bean_element: Arc<dyn FixProvider> = Arc::new(BeanElementProvider);
        let beans = format!("?{BEANS_NAMESPACE}");
        let not_beans = format!("!{BEANS_NAMESPACE}");

        let mut registry = Self::new();
        registry.register(ValidatorBinding::attribute(
            &beans,
            Some("bean"),
            Some("class"),
            class.clone(),
        ));
        for attribute in ["init-method", "destroy-method", "factory-method"] {
            registry.register(ValidatorBinding::attribute(
                &beans,
                Some("bean"),
                Some(attribute),
                method.clone(),
            ));
        }
        registry.register(ValidatorBinding::attribute(
            &beans,
            Some("property"),
            Some("name"),
            property,
        ));
        for attribute in ["ref", "parent", "factory-bean"] {
            registry.register(ValidatorBinding::attribute(
                &beans,
                None,
                Some(attribute),
                bean_ref.clone(),
            ));
        }
        registry
            .register(ValidatorBinding::attribute(
                &beans,
                Some("ref"),
                Some("bean"),
                bean_ref.clone(),
            ))
            .register(ValidatorBinding::attribute(&not_beans, None, None, bean_ref))
            .register(ValidatorBinding::attribute(&not_beans, None, None, class))
            .register(ValidatorBinding::node(
                &beans,
                Some("bean"),
                bean_element.clone(),
            ))
            .register(ValidatorBinding::node(&not_beans, Some("bean"), bean_element));
        registry
    }
}
