//! What a bean definition says about its class: the properties it injects
//! and how many constructor arguments it passes.

use beanfix_dom::{DocumentTree, NodeId, C_NAMESPACE, P_NAMESPACE};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeanShape {
    /// Injected property names in document order, without duplicates.
    pub properties: Vec<String>,
    pub constructor_args: usize,
}

impl BeanShape {
    /// Shape of `bean` from its `<property>`/`<constructor-arg>` children and
    /// its `p:`/`c:` shortcut attributes.
    pub fn of(tree: &dyn DocumentTree, bean: NodeId) -> Self {
        let mut shape = BeanShape::default();

        for attr in tree.attributes(bean) {
            match attr.namespace.as_deref() {
                Some(P_NAMESPACE) => {
                    let name = attr.name.strip_suffix("-ref").unwrap_or(&attr.name);
                    shape.push_property(name);
                }
                Some(C_NAMESPACE) => shape.constructor_args += 1,
                _ => {}
            }
        }

        for &child in tree.children(bean) {
            match tree.local_name(child) {
                "property" => {
                    if let Some(name) = tree.attribute_value(child, "name") {
                        shape.push_property(name);
                    }
                }
                "constructor-arg" => shape.constructor_args += 1,
                _ => {}
            }
        }

        shape
    }

    fn push_property(&mut self, name: &str) {
        if !name.is_empty() && !self.properties.iter().any(|p| p == name) {
            self.properties.push(name.to_owned());
        }
    }
}
