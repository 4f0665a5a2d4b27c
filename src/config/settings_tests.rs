#![allow(clippy::unwrap_used)]

use std::{fs, time::Duration};

use tempfile::NamedTempFile;

use super::settings::Settings;

#[test]
fn test_settings_default() {
    let settings = Settings::default();

    assert!(!settings.fallback_only);
    assert!(settings.color);
    assert_eq!(settings.spinner_interval_ms, 100);
    assert_eq!(settings.spinner_interval(), Duration::from_millis(100));
}

#[test]
fn test_settings_builder_matches_default() {
    assert_eq!(Settings::builder().build(), Settings::default());

    let settings = Settings::builder().fallback_only(true).build();
    assert!(settings.fallback_only);
    assert!(settings.color);
}

#[test]
fn test_load_from_missing_file_uses_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();
    let settings = Settings::load_from(&temp_dir.path().join("settings.json")).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_load_from_partial_file_fills_defaults() {
    let file = NamedTempFile::new().unwrap();
    fs::write(file.path(), r#"{ "fallback_only": true }"#).unwrap();

    let settings = Settings::load_from(file.path()).unwrap();
    assert!(settings.fallback_only);
    assert!(settings.color);
    assert_eq!(settings.spinner_interval_ms, 100);
}

#[test]
fn test_load_from_rejects_zero_interval() {
    let file = NamedTempFile::new().unwrap();
    fs::write(file.path(), r#"{ "spinner_interval_ms": 0 }"#).unwrap();

    let err = Settings::load_from(file.path()).unwrap_err();
    assert!(err.to_string().contains("spinner_interval_ms"));
}

#[test]
fn test_load_from_invalid_json() {
    let file = NamedTempFile::new().unwrap();
    fs::write(file.path(), "{ not json").unwrap();

    assert!(Settings::load_from(file.path()).is_err());
}

#[test]
fn test_save_then_load() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("settings.json");
    let settings = Settings::builder()
        .color(false)
        .spinner_interval_ms(250)
        .build();

    settings.save_to(&path).unwrap();
    assert_eq!(Settings::load_from(&path).unwrap(), settings);

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("\"spinner_interval_ms\": 250"));
}

#[test]
fn test_save_rejects_invalid_settings() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("settings.json");
    let settings = Settings::builder().spinner_interval_ms(0).build();

    assert!(settings.save_to(&path).is_err());
    assert!(!path.exists());
}
