//! Integration tests for configuration loading.

use std::fs;
use std::path::PathBuf;

use ctdoc_cli::config::{AppConfig, load_config, resolve_kinds};
use ctdoc_model::DocumentKind;
use ctdoc_output::StyleProfile;

#[test]
fn test_full_config_is_parsed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ctdoc.toml");
    fs::write(
        &path,
        r#"
[workflow]
generate = ["user-guide", "crf"]
backup = false
max_pages = 40
dmp_enabled = true
batch_output_dir = "out/batch"

[style]
profile = "fda"

[system]
edc_system_name = "Medidata Rave"
support_email = "support@sponsor.example"
"#,
    )
    .unwrap();

    let config = load_config(Some(&path));
    assert!(!config.workflow.backup);
    assert_eq!(config.workflow.max_pages, Some(40));
    assert!(config.workflow.dmp_enabled);
    assert_eq!(
        config.workflow.batch_output_dir,
        Some(PathBuf::from("out/batch"))
    );
    assert_eq!(config.style.profile, StyleProfile::Fda);
    assert_eq!(config.system.edc_system_name, "Medidata Rave");
    assert_eq!(config.system.support_phone, "+1-800-XXX-XXXX");
    assert_eq!(
        config.document_kinds().unwrap(),
        vec![DocumentKind::Crf, DocumentKind::UserGuide]
    );
}

#[test]
fn test_partial_config_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ctdoc.toml");
    fs::write(&path, "[style]\nprofile = \"bestat\"\n").unwrap();

    let config = load_config(Some(&path));
    assert!(config.workflow.backup);
    assert!(config.workflow.generate.is_empty());
    assert_eq!(config.style.profile, StyleProfile::Bestat);
    assert_eq!(config.document_kinds().unwrap(), DocumentKind::ALL.to_vec());
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config(Some(&dir.path().join("absent.toml")));
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_unparseable_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ctdoc.toml");
    fs::write(&path, "[workflow\nbackup = maybe").unwrap();
    assert_eq!(load_config(Some(&path)), AppConfig::default());
}

#[test]
fn test_unknown_style_profile_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ctdoc.toml");
    fs::write(&path, "[style]\nprofile = \"corporate\"\n").unwrap();
    assert_eq!(load_config(Some(&path)).style.profile, StyleProfile::Standard);
}

#[test]
fn test_kinds_follow_execution_order_without_duplicates() {
    let kinds = resolve_kinds(&["dmp", "crf", "dmp", "dvp"]).unwrap();
    assert_eq!(
        kinds,
        vec![DocumentKind::Crf, DocumentKind::Dvp, DocumentKind::Dmp]
    );
}

#[test]
fn test_all_and_empty_select_everything() {
    assert_eq!(resolve_kinds(&["crf", "ALL"]).unwrap(), DocumentKind::ALL.to_vec());
    let none: [&str; 0] = [];
    assert_eq!(resolve_kinds(&none).unwrap(), DocumentKind::ALL.to_vec());
}

#[test]
fn test_unknown_kind_is_rejected() {
    let error = resolve_kinds(&["crf", "protocol"]).unwrap_err();
    assert_eq!(error.to_string(), "Unknown document kind: protocol");
}
