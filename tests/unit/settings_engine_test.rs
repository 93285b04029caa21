//! Integration-level unit tests for the SettingsEngine public API.
//!
//! These tests exercise the SettingsEngine through its public trait interface,
//! validating default loading, value persistence, validation and reset.

use jaydensbrowser::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use jaydensbrowser::types::errors::SettingsError;
use jaydensbrowser::types::settings::{BrowserSettings, DEFAULT_HOMEPAGE, DEFAULT_SEARCH_TEMPLATE};
use tempfile::TempDir;

/// Helper: create a SettingsEngine backed by a temp directory that lives for the
/// duration of the test (the caller holds the `TempDir` handle).
fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    let path = dir
        .path()
        .join("settings.json")
        .to_string_lossy()
        .to_string();
    SettingsEngine::new(Some(path))
}

#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();

    assert_eq!(settings, BrowserSettings::default());
    assert_eq!(settings.general.homepage, DEFAULT_HOMEPAGE);
    assert_eq!(settings.general.search_template, DEFAULT_SEARCH_TEMPLATE);
}

/// A change made through `set_value` is on disk for the next engine instance.
#[test]
fn test_set_value_persists_changes() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        engine
            .set_value(
                "general.search_template",
                serde_json::json!("https://duckduckgo.com/?q=%s"),
            )
            .unwrap();
    }

    let mut reader = engine_in_temp(&dir);
    let loaded = reader.load().unwrap();
    assert_eq!(loaded.general.search_template, "https://duckduckgo.com/?q=%s");
}

#[test]
fn test_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();
    engine.set_value("window.width", serde_json::json!(640)).unwrap();
    engine
        .set_value("developer.log_level", serde_json::json!("debug"))
        .unwrap();
    assert_eq!(engine.get_settings().window.width, 640);

    engine.reset().unwrap();

    assert_eq!(engine.get_settings(), &BrowserSettings::default());
    let mut reader = engine_in_temp(&dir);
    assert_eq!(reader.load().unwrap(), BrowserSettings::default());
}

#[test]
fn test_set_value_unknown_key_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let err = engine
        .set_value("general.language", serde_json::json!("ru"))
        .unwrap_err();
    assert!(matches!(err, SettingsError::InvalidKey(_)));

    let err = engine.set_value("", serde_json::json!(1)).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidKey(_)));
    assert!(!dir.path().join("settings.json").exists());
}

#[test]
fn test_set_value_wrong_type_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let err = engine
        .set_value("window.width", serde_json::json!("wide"))
        .unwrap_err();

    assert!(matches!(err, SettingsError::InvalidValue(_)));
    assert_eq!(engine.get_settings().window.width, 1200);
}

#[test]
fn test_malformed_file_is_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();
    let mut engine = engine_in_temp(&dir);

    let err = engine.load().unwrap_err();
    assert!(matches!(err, SettingsError::SerializationError(_)));
    assert_eq!(engine.get_settings(), &BrowserSettings::default());
}

#[test]
fn test_save_creates_missing_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a").join("b").join("settings.json");
    let engine = SettingsEngine::with_settings(
        path.to_string_lossy().to_string(),
        BrowserSettings::default(),
    );

    engine.save().unwrap();
    assert!(path.exists());
    assert_eq!(engine.get_config_path(), path.to_string_lossy());
}
