use std::fs;
use std::time::Duration;

use tempfile::TempDir;
use webloc_app::config::{load_from, AppConfig, ConfigError};

#[test]
fn missing_fallback_gives_defaults() {
    let temp = TempDir::new().unwrap();
    let config = load_from(None, &temp.path().join("webloc_tidy.ron")).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn partial_file_keeps_other_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("webloc_tidy.ron");
    fs::write(&path, "(batch_size: 10, min_batch_interval_ms: 500)").unwrap();

    let config = load_from(None, &path).unwrap();
    assert_eq!(config.batch_size, 10);
    assert_eq!(config.max_attempts, 2);
    assert_eq!(config.batch_policy().min_interval, Duration::from_millis(500));
    assert!(config.remove_duplicates);
}

#[test]
fn explicit_path_wins_over_fallback() {
    let temp = TempDir::new().unwrap();
    let fallback = temp.path().join("webloc_tidy.ron");
    fs::write(&fallback, "(batch_size: 3)").unwrap();
    let explicit = temp.path().join("custom.ron");
    fs::write(
        &explicit,
        r#"(api_key: Some("sk-file"), service_model: "other/model", remove_duplicates: false)"#,
    )
    .unwrap();

    let config = load_from(Some(&explicit), &fallback).unwrap();
    assert_eq!(config.batch_size, 5);
    assert_eq!(config.api_key.as_deref(), Some("sk-file"));
    assert!(!config.remove_duplicates);

    let service = config.service_settings("sk-cli".to_string());
    assert_eq!(service.model, "other/model");
    assert_eq!(service.api_key, "sk-cli");
}

#[test]
fn explicit_path_must_exist() {
    let temp = TempDir::new().unwrap();
    let err = load_from(Some(&temp.path().join("nope.ron")), &temp.path().join("x.ron")).unwrap_err();
    assert!(matches!(err, ConfigError::Missing(_)));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.ron");
    fs::write(&path, "(batch_size: \"many\")").unwrap();
    let err = load_from(Some(&path), &path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}
