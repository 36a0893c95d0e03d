use std::sync::Arc;

use beanfix_dom::{Document, MemoryDocumentModel, ResourceRef};
use beanfix_quickfix::{
    DiagnosticRecord, FixAction, FixProposal, FixProviderRegistry, MemoryTypeOracle,
    QuickFixEngine,
};

pub const BEANS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<beans xmlns="http://www.springframework.org/schema/beans"
       xmlns:p="http://www.springframework.org/schema/p">
    <bean id="service" class="com.x.Service" init-method="start">
        <property name="timeout" value="5"/>
        <property name="dataSource" ref="dataSorce"/>
    </bean>
    <bean id="dataSource" class="com.x.Foo"/>
    <bean id="factory" class="com.x.Factory" factory-method="create">
        <constructor-arg value="1"/>
    </bean>
</beans>
"#;

pub struct Fixture {
    pub documents: Arc<MemoryDocumentModel>,
    pub oracle: Arc<MemoryTypeOracle>,
    pub engine: QuickFixEngine,
    pub resource: ResourceRef,
}

impl Fixture {
    pub fn new(document: Document) -> Self {
        Self::with_registry(document, FixProviderRegistry::with_defaults())
    }

    pub fn with_registry(document: Document, registry: FixProviderRegistry) -> Self {
        let resource = ResourceRef::new("src/main/resources/beans.xml");
        let documents = Arc::new(MemoryDocumentModel::new());
        documents.insert(resource.clone(), document);
        let oracle = Arc::new(MemoryTypeOracle::new());
        let engine = QuickFixEngine::new(Arc::new(registry), documents.clone(), oracle.clone());
        Self {
            documents,
            oracle,
            engine,
            resource,
        }
    }

    pub fn beans() -> Self {
        Self::new(Document::parse(BEANS).unwrap())
    }

    pub fn record(&self, error_id: &str, line: u32, attributes: &[(&str, &str)]) -> DiagnosticRecord {
        DiagnosticRecord::from_marker(
            self.resource.clone(),
            line,
            std::iter::once(("errorId", error_id)).chain(attributes.iter().copied()),
        )
        .unwrap()
    }
}

pub fn labels(proposals: &[FixProposal]) -> Vec<&str> {
    proposals.iter().map(|p| p.label.as_str()).collect()
}

pub fn text_at<'a>(text: &'a str, proposal: &FixProposal) -> &'a str {
    &text[std::ops::Range::<usize>::from(proposal.range)]
}

pub fn java_member(proposal: &FixProposal) -> (&str, &str) {
    match &proposal.action {
        FixAction::Java(beanfix_quickfix::JavaChange::InsertMember { type_name, member }) => {
            (type_name.as_str(), member.as_str())
        }
        other => panic!("expected a member insertion, got {other:?}"),
    }
}
