// File: crates/grapher-core/tests/yaml.rs
// Purpose: YamlDocument loading, dot-path lookups, schema checks and saving.

use grapher_core::yaml::save_file;
use grapher_core::{Config, GrapherError, YamlDocument};

const DOC: &str = r#"
graph:
  title: Test
  x_axis:
    label: Time
    min: ~
data:
  sources:
    - file: a.csv
"#;

#[test]
fn dot_paths_resolve() {
    let doc = YamlDocument::load_str(DOC).unwrap();
    assert_eq!(doc.get("graph.title").and_then(|v| v.as_str()), Some("Test"));
    assert_eq!(doc.get("graph.x_axis.label").and_then(|v| v.as_str()), Some("Time"));
    assert!(doc.get("graph.missing").is_none());
    // traversing through a scalar yields nothing
    assert!(doc.get("graph.title.deeper").is_none());
    assert!(doc.get("data.sources").is_some_and(|v| v.is_sequence()));
}

#[test]
fn schema_requires_non_null_values() {
    let doc = YamlDocument::load_str(DOC).unwrap();
    assert!(doc.validate_schema(&["graph.title", "data.sources"]));
    assert!(!doc.validate_schema(&["graph.x_axis.min"]));
    assert!(!doc.validate_schema(&["output"]));
}

#[test]
fn load_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(YamlDocument::load_file(dir.path().join("x.yaml")).unwrap_err(), GrapherError::NotFound(_)));

    let bad = dir.path().join("bad.yaml");
    std::fs::write(&bad, "a: [1, 2\n").unwrap();
    assert!(matches!(YamlDocument::load_file(&bad).unwrap_err(), GrapherError::Yaml { .. }));

    let scalar = dir.path().join("scalar.yaml");
    std::fs::write(&scalar, "just text\n").unwrap();
    assert!(matches!(YamlDocument::load_file(&scalar).unwrap_err(), GrapherError::NotAMapping(_)));
}

#[test]
fn save_creates_directories_and_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/config.yaml");
    let mut config = Config::default();
    config.graph.title = "Saved".to_string();

    save_file(&config, &path).unwrap();
    let doc = YamlDocument::load_file(&path).unwrap();
    assert_eq!(doc.get("graph.title").and_then(|v| v.as_str()), Some("Saved"));
    assert_eq!(Config::from_yaml_file(&path).unwrap(), config);
}
