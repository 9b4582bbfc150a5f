/*!
 * Tests for application configuration handling
 */

use anyhow::Result;
use locsync::app_config::{Config, LogLevel};
use std::fs;

use crate::common;

/// Test that a default config validates and carries sensible values
#[test]
fn test_config_default_shouldBeValid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.source_language, "en");
    assert!(!config.translate_english);
    assert!(config.database_path.is_none());
    assert!(config.update.source_path.is_none());
}

/// Test writing a config to disk and reading it back
#[test]
fn test_config_fileRoundTrip_shouldPreserveSettings() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.project_name = "my-site".to_string();
    config.translate_english = true;
    config.update.batch_size = 25;
    config.log_level = LogLevel::Debug;

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    let loaded: Config = serde_json::from_str(&fs::read_to_string(&config_path)?)?;
    assert!(loaded.validate().is_ok());
    assert_eq!(loaded.project_name, "my-site");
    assert!(loaded.translate_english);
    assert_eq!(loaded.update.batch_size, 25);
    assert_eq!(loaded.log_level, LogLevel::Debug);

    Ok(())
}

/// Test that a hand-written minimal config file gets defaults for the rest
#[test]
fn test_config_partialFile_shouldFillDefaults() -> Result<()> {
    let json = r#"{
        "project_name": "intranet",
        "update": { "source_path": "/srv/translations" }
    }"#;

    let config: Config = serde_json::from_str(json)?;
    assert_eq!(config.project_name, "intranet");
    assert_eq!(
        config.update.source_path.as_deref(),
        Some(std::path::Path::new("/srv/translations"))
    );
    assert_eq!(config.update.ttl_secs, 86_400);
    assert_eq!(config.update.batch_size, 200);
    assert_eq!(config.source_language, "en");

    Ok(())
}

/// Test that invalid settings are rejected by validation
#[test]
fn test_config_validate_shouldRejectInvalidSettings() {
    let mut config = Config::default();
    config.project_name = String::new();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.source_language = "   ".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.update.batch_size = 0;
    assert!(config.validate().is_err());
}
