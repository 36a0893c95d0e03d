use beanfix_dom::Document;
use beanfix_quickfix::TypeInfo;
use pretty_assertions::assert_eq;

use super::fixture::{java_member, labels, text_at, Fixture};

/// Bean file declared through the DTD, so no element carries a namespace.
const DTD_BEANS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE beans PUBLIC "-//SPRING//DTD BEAN 2.0//EN" "http://www.springframework.org/dtd/spring-beans-2.0.dtd">
<beans>
    <bean id="service" class="com.x.Service" init-method="start">
        <property name="timeout" value="5"/>
    </bean>
</beans>
"#;

fn fixture() -> Fixture {
    Fixture::new(Document::parse(DTD_BEANS).unwrap())
}

#[test]
fn lifecycle_method_without_namespace() {
    let fx = fixture();
    fx.oracle.add_type(TypeInfo::source("com.x.Service"));
    let record = fx.record(
        "UNDEFINED_INIT_METHOD",
        4,
        &[("CLASS", "com.x.Service"), ("METHOD", "start"), ("BEAN_NAME", "service")],
    );

    let proposals = fx.engine.proposals(&record);
    assert_eq!(
        labels(&proposals),
        vec!["Add missing init-method 'start' in class 'com.x.Service'"]
    );
    assert_eq!(text_at(DTD_BEANS, &proposals[0]), "start");
    assert_eq!(java_member(&proposals[0]).1, "public void start() {\n}");
}

#[test]
fn accessor_without_namespace() {
    let fx = fixture();
    fx.oracle.add_type(TypeInfo::source("com.x.Service"));
    let record = fx.record(
        "NO_SETTER",
        5,
        &[("CLASS", "com.x.Service"), ("PROPERTY", "timeout")],
    );

    assert_eq!(
        labels(&fx.engine.proposals(&record)),
        vec!["Add missing setter for property 'timeout' in class 'com.x.Service'"]
    );
}

#[test]
fn class_and_element_fixes_without_namespace() {
    let fx = fixture();

    let missing_class = fx.record("CLASS_NOT_FOUND", 4, &[("CLASS", "com.x.Service")]);
    assert_eq!(
        labels(&fx.engine.proposals(&missing_class)),
        vec!["Create class 'com.x.Service'"]
    );

    let required = fx.record(
        "REQUIRED_PROPERTY_MISSING",
        4,
        &[("CLASS", "com.x.Service"), ("MISSING_PROPERTIES1", "a")],
    );
    assert_eq!(labels(&fx.engine.proposals(&required)), vec!["Add property 'a'"]);
}
