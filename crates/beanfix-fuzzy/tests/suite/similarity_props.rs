use beanfix_fuzzy::{edit_distance, fuzzy_match, similarity, MatchKind, Similarity};
use proptest::prelude::*;

fn ident() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9]{0,12}"
}

proptest! {
    #[test]
    fn edit_distance_is_symmetric(a in ident(), b in ident()) {
        prop_assert_eq!(edit_distance(&a, &b), edit_distance(&b, &a));
    }

    #[test]
    fn edit_distance_obeys_triangle_inequality(a in ident(), b in ident(), c in ident()) {
        prop_assert!(edit_distance(&a, &c) <= edit_distance(&a, &b) + edit_distance(&b, &c));
    }

    #[test]
    fn every_name_prefixes_its_extensions(a in ident(), suffix in "[a-z]{1,6}") {
        let extended = format!("{a}{suffix}");
        prop_assert_eq!(fuzzy_match(&a, &extended).map(|s| s.kind), Some(MatchKind::Prefix));
        prop_assert_eq!(
            similarity(&a, &extended),
            Some(Similarity::Prefix { extra: suffix.len() })
        );
    }
}
