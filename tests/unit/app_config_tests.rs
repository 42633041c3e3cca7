/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use std::fs;

use lingomem::app_config::{Config, LogLevel};

use crate::common::{create_temp_dir, create_test_file};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "es");
    assert!(config.memory.enabled);
    assert_eq!(config.memory.capacity, 1000);
    assert_eq!(config.batch.max_jobs, 20);
    assert_eq!(config.simulation.min_delay_ms, 500);
    assert_eq!(config.simulation.max_delay_ms, 1300);
    assert_eq!(config.history.max_entries, 50);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    config.source_language = "xyz1".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.memory.capacity = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.batch.max_jobs = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.simulation.min_delay_ms = 2000;
    assert!(config.validate().is_err());
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;

    assert_eq!(config, Config::default());
    assert!(path.exists());
    assert_eq!(Config::from_file(&path)?, config);
    Ok(())
}

#[test]
fn test_fromFile_withPartialJson_shouldFillDefaults() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = create_test_file(
        dir.path(),
        "conf.json",
        r#"{ "target_language": "fr", "batch": { "max_jobs": 5 }, "log_level": "debug" }"#,
    )?;

    let config = Config::from_file(&path)?;

    assert_eq!(config.target_language, "fr");
    assert_eq!(config.source_language, "en");
    assert_eq!(config.batch.max_jobs, 5);
    assert_eq!(config.batch.max_concurrent_items, 16);
    assert_eq!(config.log_level, LogLevel::Debug);
    Ok(())
}

#[test]
fn test_fromFile_withInvalidJson_shouldFail() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = create_test_file(dir.path(), "conf.json", "{ not json")?;
    assert!(Config::from_file(&path).is_err());
    Ok(())
}

#[test]
fn test_save_shouldRoundTripThroughFile() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = dir.path().join("saved.json");
    let mut config = Config::default();
    config.memory.capacity = 42;
    config.save(&path)?;

    let raw = fs::read_to_string(&path)?;
    assert!(raw.contains("\"capacity\": 42"));
    assert_eq!(Config::from_file(&path)?.memory.capacity, 42);
    Ok(())
}
