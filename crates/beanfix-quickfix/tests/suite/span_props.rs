use beanfix_core::{TextRange, TextSize};
use beanfix_dom::{Attribute, DocumentBuilder, DocumentTree};
use beanfix_quickfix::{resolve_span, SpanOptions};
use proptest::prelude::*;

/// `<bean class=VALUE/>` where VALUE is the raw attribute region, possibly
/// padded, unquoted or missing its closing quote.
fn raw_value() -> impl Strategy<Value = String> {
    (
        " {0,2}",
        prop_oneof![Just(""), Just("\""), Just("'")],
        "[A-Za-z0-9_.$]{0,12}",
        prop_oneof![Just(""), Just("\""), Just("'")],
        " {0,2}",
    )
        .prop_map(|(lead, open, body, close, trail)| format!("{lead}{open}{body}{close}{trail}"))
}

proptest! {
    #[test]
    fn span_text_matches_document(raw in raw_value()) {
        let element = format!("<bean class={raw}/>");
        let text = format!("<beans>\n  {element}\n</beans>");
        let region = TextRange::at(TextSize::from(12), TextSize::of(raw.as_str()));

        let mut builder = DocumentBuilder::new(text.as_str());
        let beans = builder
            .element_at(None, "beans", None, &text, TextSize::from(0))
            .unwrap();
        let bean = builder
            .element_at(Some(beans), "bean", None, &element, TextSize::from(0))
            .unwrap();
        builder.attribute(bean, Attribute::new("class", raw.trim(), region));
        let document = builder.build().unwrap();
        let tree: &dyn DocumentTree = &document;

        let span = resolve_span(tree, bean, region, SpanOptions::default()).unwrap();
        prop_assert_eq!(&text[std::ops::Range::<usize>::from(span.range)], span.text.as_str());
        prop_assert!(tree.range(bean).contains_range(span.range));
        prop_assert_eq!(span.text.trim(), span.text.as_str());

        let whole = resolve_span(tree, bean, region, SpanOptions { affects_whole_bean: true }).unwrap();
        prop_assert_eq!(whole.range, tree.range(bean));
        let again = resolve_span(tree, bean, region, SpanOptions::default()).unwrap();
        prop_assert_eq!(again, span);
    }
}
