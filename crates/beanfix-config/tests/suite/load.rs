use beanfix_config::{ConfigError, ProposalStyleKind, QuickfixConfig};
use pretty_assertions::assert_eq;

#[test]
fn empty_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("beanfix.toml");
    std::fs::write(&path, "").unwrap();

    let config = QuickfixConfig::load(&path).unwrap();
    assert_eq!(config, QuickfixConfig::default());
    assert_eq!(config.content_assist.max_similar_candidates, 5);
    assert!(config.content_assist.fuzzy);
    assert_eq!(config.proposals.style, ProposalStyleKind::Edits);
    assert_eq!(config.proposals.indent, "    ");
}

#[test]
fn full_file_round_trips_every_section() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("beanfix.toml");
    std::fs::write(
        &path,
        r#"
[logging]
level = "debug"
json = true
stderr = false
file = "/tmp/beanfix.log"

[content_assist]
max_similar_candidates = 2
fuzzy = false

[proposals]
style = "commands"
indent = "\t"
"#,
    )
    .unwrap();

    let config = QuickfixConfig::load(&path).unwrap();
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);
    assert!(!config.logging.stderr);
    assert_eq!(
        config.logging.file.as_deref(),
        Some(std::path::Path::new("/tmp/beanfix.log"))
    );
    assert_eq!(config.content_assist.max_similar_candidates, 2);
    assert!(!config.content_assist.fuzzy);
    assert_eq!(config.proposals.style, ProposalStyleKind::Commands);
    assert_eq!(config.proposals.indent, "\t");
}

#[test]
fn unknown_keys_are_rejected() {
    let err = QuickfixConfig::from_toml_str("[proposals]\nstyel = \"edits\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)), "{err}");
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = QuickfixConfig::load(&path).unwrap_err();
    match err {
        ConfigError::Io { path: reported, .. } => {
            assert_eq!(reported, path.display().to_string())
        }
        other => panic!("expected io error, got {other:?}"),
    }
}
