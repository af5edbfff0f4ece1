//! Integration tests for the config form backend.
//! Tests the Tauri command backend functions with real files in a temp dir.

use doc_qa_gui_lib::commands::{do_load_config, do_save_config, ConfigForm};
use predicates::prelude::*;
use std::io::Write as _;

/// Load config from a real YAML file in a temp dir; verify all form fields populated.
#[test]
fn load_config_from_real_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(
        f,
        r#"backend:
  url: "http://qa.internal:5000"
  host: "qa.internal"
  port: 5000
download:
  directory: "/home/user/Downloads""#
    )
    .unwrap();

    let form = do_load_config(path.to_str().unwrap()).expect("load should succeed");

    assert_eq!(form.backend_url, "http://qa.internal:5000");
    assert_eq!(form.backend_host, "qa.internal");
    assert_eq!(form.backend_port, 5000);
    assert_eq!(form.download_dir, "/home/user/Downloads");
}

#[test]
fn sparse_config_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "backend:\n  port: 8080\n").unwrap();

    let form = do_load_config(path.to_str().unwrap()).unwrap();
    assert_eq!(form.backend_url, "");
    assert_eq!(form.backend_host, "localhost");
    assert_eq!(form.backend_port, 8080);
    assert_eq!(form.download_dir, ".");
}

/// Save config creates directory and file when both are missing.
#[test]
fn save_creates_directory_and_file() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("new-dir").join("config.yaml");

    let parent_exists = predicate::path::exists();
    assert!(!parent_exists.eval(nested.parent().unwrap()));

    let form = ConfigForm {
        backend_url: String::new(),
        backend_host: "10.0.0.2".into(),
        backend_port: 5000,
        download_dir: "/tmp/summaries".into(),
    };

    do_save_config(nested.to_str().unwrap(), &form).expect("save should succeed");

    assert!(parent_exists.eval(nested.as_path()));
    let contents = std::fs::read_to_string(&nested).unwrap();
    assert!(predicate::str::contains("10.0.0.2").eval(&contents));
    // Empty URL means host-derived and is not written out.
    assert!(predicate::str::contains("url").not().eval(&contents));
}

/// Round-trip: save then load preserves all form field values.
#[test]
fn round_trip_preserves_form_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");

    let original = ConfigForm {
        backend_url: "http://round.trip:9000".into(),
        backend_host: "round.trip".into(),
        backend_port: 9000,
        download_dir: "/rt/downloads".into(),
    };

    do_save_config(path.to_str().unwrap(), &original).expect("save should succeed");
    let loaded = do_load_config(path.to_str().unwrap()).expect("load should succeed");

    assert_eq!(loaded, original);
}

/// Load from non-existent file returns an error (not a panic).
#[test]
fn load_missing_file_returns_error() {
    let result = do_load_config("/tmp/does-not-exist-ever/config.yaml");
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert!(predicate::str::is_match("(?i)(io|error|no such)")
        .unwrap()
        .eval(&err));
}
