use std::sync::Arc;

use beanfix_config::QuickfixConfig;
use beanfix_core::{TextRange, TextSize};
use beanfix_dom::{Attribute, DocumentBuilder, ResourceRef, BEANS_NAMESPACE};
use beanfix_quickfix::{
    ApplyError, FixAction, FixProviderRegistry, JavaChange, MemoryFixTarget, MethodInfo,
    ProposalKind, QuickFixEngine, TypeInfo,
};
use pretty_assertions::assert_eq;

use super::fixture::{java_member, labels, text_at, Fixture, BEANS};

#[test]
fn class_not_found_offers_exactly_one_create_class() {
    let fx = Fixture::beans();
    let record = fx.record(
        "CLASS_NOT_FOUND",
        8,
        &[("CLASS", "com.x.Foo"), ("BEAN_NAME", "dataSource")],
    );

    assert!(fx.engine.has_proposals(&record));
    let proposals = fx.engine.proposals(&record);
    assert_eq!(labels(&proposals), vec!["Create class 'com.x.Foo'"]);
    assert_eq!(proposals[0].kind, ProposalKind::CreateClass);
    assert_eq!(text_at(BEANS, &proposals[0]), "com.x.Foo");

    let FixAction::Java(JavaChange::CreateType {
        qualified_name,
        source,
    }) = &proposals[0].action
    else {
        panic!("expected a new type, got {:?}", proposals[0].action);
    };
    assert_eq!(qualified_name, "com.x.Foo");
    assert!(source.starts_with("package com.x;\n\npublic class Foo {"));

    let mut target = MemoryFixTarget::new("    ");
    target.add_document(fx.resource.clone(), BEANS);
    proposals[0].apply(&mut target).unwrap();
    assert!(target.java_source("com.x.Foo").is_some());
}

#[test]
fn class_proposal_carries_bean_properties_and_arguments() {
    let fx = Fixture::beans();
    let record = fx.record("CLASS_NOT_FOUND", 4, &[("CLASS", "com.x.Service")]);

    let proposals = fx.engine.proposals(&record);
    assert_eq!(labels(&proposals), vec!["Create class 'com.x.Service'"]);
    let FixAction::Java(JavaChange::CreateType { source, .. }) = &proposals[0].action else {
        panic!("expected a new type");
    };
    assert!(source.contains("private Object timeout;"));
    assert!(source.contains("public void setDataSource(Object dataSource) {"));
}

#[test]
fn existing_class_means_a_stale_diagnostic() {
    let fx = Fixture::beans();
    fx.oracle.add_type(TypeInfo::source("com.x.Foo"));
    let record = fx.record("CLASS_NOT_FOUND", 8, &[("CLASS", "com.x.Foo")]);
    assert!(fx.engine.proposals(&record).is_empty());
}

#[test]
fn nested_class_goes_into_its_enclosing_type() {
    let fx = Fixture::new(
        beanfix_dom::Document::parse(
            r#"<beans xmlns="http://www.springframework.org/schema/beans">
    <bean id="inner" class="com.x.Outer$Inner"/>
</beans>"#,
        )
        .unwrap(),
    );
    fx.oracle.add_type(TypeInfo::source("com.x.Outer"));
    let record = fx.record("CLASS_NOT_FOUND", 2, &[("CLASS", "com.x.Outer$Inner")]);

    let proposals = fx.engine.proposals(&record);
    assert_eq!(labels(&proposals), vec!["Create class 'com.x.Outer$Inner'"]);
    let (type_name, member) = java_member(&proposals[0]);
    assert_eq!(type_name, "com.x.Outer");
    assert_eq!(member, "public static class Inner {\n}");
}

#[test]
fn required_properties_yield_one_proposal_each_in_order() {
    let fx = Fixture::beans();
    let record = fx.record(
        "REQUIRED_PROPERTY_MISSING",
        8,
        &[
            ("CLASS", "com.x.Foo"),
            ("BEAN_NAME", "dataSource"),
            ("MISSING_PROPERTIES1", "a"),
            ("MISSING_PROPERTIES2", "b"),
        ],
    );

    let proposals = fx.engine.proposals(&record);
    assert_eq!(labels(&proposals), vec!["Add property 'a'", "Add property 'b'"]);
    assert_eq!(
        text_at(BEANS, &proposals[0]),
        r#"<bean id="dataSource" class="com.x.Foo"/>"#
    );

    let mut target = MemoryFixTarget::new("    ");
    target.add_document(fx.resource.clone(), BEANS);
    proposals[0].apply(&mut target).unwrap();
    let edited = target.document(&fx.resource).unwrap();
    assert!(edited.contains(
        "    <bean id=\"dataSource\" class=\"com.x.Foo\">\n        <property name=\"a\" value=\"\"/>\n    </bean>\n"
    ));

    // The document changed: the second proposal is now stale.
    assert!(matches!(
        proposals[1].apply(&mut target),
        Err(ApplyError::StaleDocument(_))
    ));
}

#[test]
fn dirty_documents_get_no_proposals() {
    let fx = Fixture::beans();
    let record = fx.record("CLASS_NOT_FOUND", 8, &[("CLASS", "com.x.Foo")]);
    fx.documents.set_dirty(&fx.resource, true);

    assert!(fx.engine.has_proposals(&record));
    assert!(fx.engine.proposals(&record).is_empty());
}

#[test]
fn incomplete_and_unlocatable_records_get_no_proposals() {
    let fx = Fixture::beans();

    let incomplete = fx.record("NO_SETTER", 5, &[("CLASS", "com.x.Service")]);
    assert!(!fx.engine.has_proposals(&incomplete));
    assert!(fx.engine.proposals(&incomplete).is_empty());

    let unknown_bean = fx.record(
        "CLASS_NOT_FOUND",
        8,
        &[("CLASS", "com.x.Foo"), ("BEAN_NAME", "nope")],
    );
    assert!(fx.engine.proposals(&unknown_bean).is_empty());

    let unknown_value = fx.record("CLASS_NOT_FOUND", 8, &[("CLASS", "com.x.Missing")]);
    assert!(fx.engine.proposals(&unknown_value).is_empty());

    let bad_arity = fx.record(
        "NO_CONSTRUCTOR",
        9,
        &[("CLASS", "com.x.Factory"), ("NUM_ARGUMENT", "two")],
    );
    assert!(fx.engine.has_proposals(&bad_arity));
    assert!(fx.engine.proposals(&bad_arity).is_empty());
}

#[test]
fn undefined_bean_reference() {
    let fx = Fixture::beans();
    let record = fx.record(
        "UNDEFINED_REFERENCED_BEAN",
        6,
        &[("BEAN", "dataSorce"), ("BEAN_NAME", "service")],
    );

    let proposals = fx.engine.proposals(&record);
    assert_eq!(
        labels(&proposals),
        vec!["Change to 'dataSource'", "Create bean 'dataSorce'"]
    );
    assert_eq!(text_at(BEANS, &proposals[0]), "dataSorce");
    assert_eq!(
        text_at(BEANS, &proposals[1]),
        r#"<property name="dataSource" ref="dataSorce"/>"#
    );

    let mut target = MemoryFixTarget::new("    ");
    target.add_document(fx.resource.clone(), BEANS);
    proposals[1].apply(&mut target).unwrap();
    assert!(target
        .document(&fx.resource)
        .unwrap()
        .contains("    </bean>\n    <bean id=\"dataSorce\" class=\"\"/>\n    <bean id=\"dataSource\""));

    let mut target = MemoryFixTarget::new("    ");
    target.add_document(fx.resource.clone(), BEANS);
    proposals[0].apply(&mut target).unwrap();
    assert!(target
        .document(&fx.resource)
        .unwrap()
        .contains(r#"<property name="dataSource" ref="dataSource"/>"#));
}

#[test]
fn init_method_renames_then_creates() {
    let fx = Fixture::beans();
    fx.oracle.add_method("com.x.Service", MethodInfo::new("startUp", 0));
    fx.oracle.add_method("com.x.Service", MethodInfo::new("stop", 0));
    let record = fx.record(
        "UNDEFINED_INIT_METHOD",
        4,
        &[("CLASS", "com.x.Service"), ("METHOD", "start"), ("BEAN_NAME", "service")],
    );

    let proposals = fx.engine.proposals(&record);
    assert_eq!(
        labels(&proposals),
        vec![
            "Change to 'startUp'",
            "Add missing init-method 'start' in class 'com.x.Service'",
        ]
    );
    let (type_name, member) = java_member(&proposals[1]);
    assert_eq!(type_name, "com.x.Service");
    assert_eq!(member, "public void start() {\n}");

    let mut target = MemoryFixTarget::new("    ");
    target.add_document(fx.resource.clone(), BEANS);
    target.add_java_source("com.x.Service", "package com.x;\n\npublic class Service {\n}\n");
    proposals[1].apply(&mut target).unwrap();
    assert_eq!(
        target.java_source("com.x.Service"),
        Some("package com.x;\n\npublic class Service {\n\n    public void start() {\n    }\n}\n")
    );
}

#[test]
fn binary_classes_only_get_renames() {
    let fx = Fixture::beans();
    fx.oracle.add_type(TypeInfo::binary("com.x.Service"));
    fx.oracle.add_method("com.x.Service", MethodInfo::new("startUp", 0));
    let record = fx.record(
        "UNDEFINED_INIT_METHOD",
        4,
        &[("CLASS", "com.x.Service"), ("METHOD", "start")],
    );
    assert_eq!(
        labels(&fx.engine.proposals(&record)),
        vec!["Change to 'startUp'"]
    );
}

#[test]
fn oracle_failure_falls_back_to_create_class() {
    let fx = Fixture::beans();
    fx.oracle.add_method("com.x.Service", MethodInfo::new("startUp", 0));
    fx.oracle.set_failure(Some("index offline"));
    let record = fx.record(
        "UNDEFINED_DESTROY_METHOD",
        4,
        &[("CLASS", "com.x.Service"), ("METHOD", "start")],
    );
    // No `destroy-method="start"` in the document.
    assert!(fx.engine.proposals(&record).is_empty());

    let record = fx.record(
        "UNDEFINED_INIT_METHOD",
        4,
        &[("CLASS", "com.x.Service"), ("METHOD", "start")],
    );
    assert_eq!(
        labels(&fx.engine.proposals(&record)),
        vec!["Create class 'com.x.Service'"]
    );
}

#[test]
fn factory_method_is_static_with_constructor_arity() {
    let fx = Fixture::beans();
    fx.oracle.add_type(TypeInfo::source("com.x.Factory"));
    let record = fx.record(
        "UNDEFINED_FACTORY_BEAN_METHOD",
        9,
        &[("CLASS", "com.x.Factory"), ("METHOD", "create")],
    );

    let proposals = fx.engine.proposals(&record);
    assert_eq!(
        labels(&proposals),
        vec!["Add missing factory-method 'create' in class 'com.x.Factory'"]
    );
    assert_eq!(
        java_member(&proposals[0]).1,
        "public static Object create(Object arg0) {\n    return null;\n}"
    );
}

#[test]
fn constructor_with_object_parameters() {
    let fx = Fixture::beans();
    fx.oracle.add_method("com.x.Factory", MethodInfo::constructor(0));
    let record = fx.record(
        "NO_CONSTRUCTOR",
        9,
        &[("CLASS", "com.x.Factory"), ("NUM_ARGUMENT", "2")],
    );

    let proposals = fx.engine.proposals(&record);
    assert_eq!(
        labels(&proposals),
        vec!["Add constructor 'Factory(Object, Object)' in class 'com.x.Factory'"]
    );
    assert_eq!(proposals[0].kind, ProposalKind::CreateConstructor);
    assert!(text_at(BEANS, &proposals[0]).starts_with("<bean id=\"factory\""));

    fx.oracle.add_method("com.x.Factory", MethodInfo::constructor(2));
    assert!(fx.engine.proposals(&record).is_empty());
}

#[test]
fn missing_setter() {
    let fx = Fixture::beans();
    fx.oracle.add_method("com.x.Service", MethodInfo::new("setTimeOut", 1));
    let record = fx.record(
        "NO_SETTER",
        5,
        &[("CLASS", "com.x.Service"), ("PROPERTY", "timeout")],
    );

    let proposals = fx.engine.proposals(&record);
    assert_eq!(
        labels(&proposals),
        vec![
            "Change to 'timeOut'",
            "Add missing setter for property 'timeout' in class 'com.x.Service'",
        ]
    );
    assert_eq!(
        java_member(&proposals[1]).1,
        "public void setTimeout(Object timeout) {\n}"
    );
}

#[test]
fn missing_getter_until_it_exists() {
    let fx = Fixture::beans();
    fx.oracle.add_type(TypeInfo::source("com.x.Service"));
    let record = fx.record(
        "NO_GETTER",
        5,
        &[("CLASS", "com.x.Service"), ("PROPERTY", "timeout")],
    );

    let proposals = fx.engine.proposals(&record);
    assert_eq!(
        labels(&proposals),
        vec!["Add missing getter for property 'timeout' in class 'com.x.Service'"]
    );
    assert_eq!(proposals[0].kind, ProposalKind::CreateMethod);
    assert_eq!(text_at(BEANS, &proposals[0]), "timeout");
    let (type_name, member) = java_member(&proposals[0]);
    assert_eq!(type_name, "com.x.Service");
    assert_eq!(member, "public Object getTimeout() {\n    return null;\n}");

    fx.oracle.add_method("com.x.Service", MethodInfo::new("getTimeout", 0));
    assert!(!labels(&fx.engine.proposals(&record))
        .iter()
        .any(|label| label.starts_with("Add missing getter")));
}

#[test]
fn destroy_method_renames_then_creates() {
    let text = r#"<beans xmlns="http://www.springframework.org/schema/beans">
    <bean id="pool" class="com.x.Pool" destroy-method="clos"/>
</beans>"#;
    let fx = Fixture::new(beanfix_dom::Document::parse(text).unwrap());
    fx.oracle.add_method("com.x.Pool", MethodInfo::new("close", 0));
    let record = fx.record(
        "UNDEFINED_DESTROY_METHOD",
        2,
        &[("CLASS", "com.x.Pool"), ("METHOD", "clos"), ("BEAN_NAME", "pool")],
    );

    let proposals = fx.engine.proposals(&record);
    assert_eq!(
        labels(&proposals),
        vec![
            "Change to 'close'",
            "Add missing destroy-method 'clos' in class 'com.x.Pool'",
        ]
    );
    assert_eq!(text_at(text, &proposals[0]), "clos");
    let (type_name, member) = java_member(&proposals[1]);
    assert_eq!(type_name, "com.x.Pool");
    assert_eq!(member, "public void clos() {\n}");

    let mut target = MemoryFixTarget::new("    ");
    target.add_document(fx.resource.clone(), text);
    proposals[0].apply(&mut target).unwrap();
    assert!(target
        .document(&fx.resource)
        .unwrap()
        .contains(r#"destroy-method="close""#));
}

#[test]
fn accessor_anchor_skips_beans_with_the_same_name() {
    let text = r#"<beans xmlns="http://www.springframework.org/schema/beans">
    <bean name="timeout" class="com.x.Other"/>
    <bean id="service" class="com.x.Service">
        <property name="timeout" value="5"/>
    </bean>
</beans>"#;
    let fx = Fixture::new(beanfix_dom::Document::parse(text).unwrap());
    fx.oracle.add_type(TypeInfo::source("com.x.Service"));
    let record = fx.record(
        "NO_SETTER",
        0,
        &[("CLASS", "com.x.Service"), ("PROPERTY", "timeout")],
    );

    let proposals = fx.engine.proposals(&record);
    assert_eq!(
        labels(&proposals),
        vec!["Add missing setter for property 'timeout' in class 'com.x.Service'"]
    );
    assert_eq!(
        &text[std::ops::Range::<usize>::from(proposals[0].range)],
        "timeout"
    );
    assert!(proposals[0].range.start() > TextSize::from(text.find("<property").unwrap() as u32));
}

#[test]
fn rename_closes_an_unterminated_value() {
    let text = "<beans>\n  <bean id=\"a\" class=\"com.x.Foo\" init-method='strt />\n</beans>";
    let bean_source = "<bean id=\"a\" class=\"com.x.Foo\" init-method='strt />";
    let bean_start = text.find(bean_source).unwrap();
    let relative = |needle: &str, len: usize| {
        let start = bean_source.find(needle).unwrap();
        TextRange::at(TextSize::from(start as u32), TextSize::from(len as u32))
    };

    let mut builder = DocumentBuilder::new(text);
    let beans = builder
        .element_at(None, "beans", Some(BEANS_NAMESPACE), text, TextSize::from(0))
        .unwrap();
    let bean = builder
        .element_at(
            Some(beans),
            "bean",
            Some(BEANS_NAMESPACE),
            bean_source,
            TextSize::from(bean_start as u32),
        )
        .unwrap();
    builder
        .attribute(bean, Attribute::new("id", "a", relative("\"a\"", 3)))
        .attribute(bean, Attribute::new("class", "com.x.Foo", relative("\"com.x.Foo\"", 11)))
        .attribute(bean, Attribute::new("init-method", "strt", relative("'strt", 5)));
    let fx = Fixture::new(builder.build().unwrap());
    fx.oracle.add_type(TypeInfo::binary("com.x.Foo"));
    fx.oracle.add_method("com.x.Foo", MethodInfo::new("start", 0));

    let record = fx.record(
        "UNDEFINED_INIT_METHOD",
        2,
        &[("CLASS", "com.x.Foo"), ("METHOD", "strt")],
    );
    let proposals = fx.engine.proposals(&record);
    assert_eq!(labels(&proposals), vec!["Change to 'start'"]);
    assert!(proposals[0].missing_end_quote);

    let mut target = MemoryFixTarget::new("  ");
    target.add_document(fx.resource.clone(), text);
    proposals[0].apply(&mut target).unwrap();
    assert_eq!(
        target.document(&fx.resource),
        Some("<beans>\n  <bean id=\"a\" class=\"com.x.Foo\" init-method='start' />\n</beans>")
    );
}

#[test]
fn batch_records_are_independent() {
    let fx = Fixture::beans();
    let good = fx.record("CLASS_NOT_FOUND", 8, &[("CLASS", "com.x.Foo")]);
    let incomplete = fx.record("NO_GETTER", 5, &[("CLASS", "com.x.Service")]);
    let elsewhere = beanfix_quickfix::DiagnosticRecord::new(
        beanfix_quickfix::ErrorId::ClassNotFound,
        ResourceRef::new("other.xml"),
        1,
    )
    .with_attribute("CLASS", "com.x.Foo");

    let results = fx.engine.proposals_batch(&[good.clone(), incomplete, elsewhere, good]);
    let counts: Vec<usize> = results.iter().map(Vec::len).collect();
    assert_eq!(counts, vec![1, 0, 0, 1]);
}

#[test]
fn command_style_from_config() {
    let fx = Fixture::beans();
    let config = QuickfixConfig::from_toml_str(
        r#"
[proposals]
style = "commands"
indent = "  "
"#,
    )
    .unwrap();
    let engine = QuickFixEngine::with_config(
        Arc::new(FixProviderRegistry::with_defaults()),
        fx.documents.clone(),
        fx.oracle.clone(),
        &config,
    );
    assert_eq!(engine.settings().indent, "  ");

    let record = fx.record("CLASS_NOT_FOUND", 8, &[("CLASS", "com.x.Foo")]);
    let proposals = engine.proposals(&record);
    assert_eq!(labels(&proposals), vec!["Create class 'com.x.Foo'"]);
    let FixAction::Command(command) = &proposals[0].action else {
        panic!("expected a command");
    };
    assert_eq!(command.command, "beanfix.createClass");
    assert_eq!(command.arguments[0]["change"]["java"]["kind"], "createType");
    assert_eq!(
        command.arguments[0]["change"]["java"]["qualifiedName"],
        "com.x.Foo"
    );
}

#[test]
fn similar_names_respect_the_configured_limit() {
    let fx = Fixture::beans();
    for name in ["startA", "startB", "startC"] {
        fx.oracle.add_method("com.x.Service", MethodInfo::new(name, 0));
    }
    let config = QuickfixConfig::from_toml_str("[content_assist]\nmax_similar_candidates = 2\n").unwrap();
    let engine = QuickFixEngine::with_config(
        Arc::new(FixProviderRegistry::with_defaults()),
        fx.documents.clone(),
        fx.oracle.clone(),
        &config,
    );
    let record = fx.record(
        "UNDEFINED_INIT_METHOD",
        4,
        &[("CLASS", "com.x.Service"), ("METHOD", "start")],
    );
    assert_eq!(
        labels(&engine.proposals(&record)),
        vec![
            "Change to 'startA'",
            "Change to 'startB'",
            "Add missing init-method 'start' in class 'com.x.Service'",
        ]
    );
}
