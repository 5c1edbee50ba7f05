/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use narrasub::app_config::{Config, GenerationMode, LogLevel, TimingConfig};
use narrasub::errors::ConfigError;
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.segmentation.max_chars, 499);
    assert_eq!(config.timing.words_per_minute, 150.0);
    assert_eq!(config.timing.gap_between_blocks_secs, 10.0);
    assert_eq!(config.mode, GenerationMode::Block);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.segmentation.max_chars = 0;
    assert_eq!(config.validate(), Err(ConfigError::ZeroMaxChars));
    config.segmentation.max_chars = 1;
    assert!(config.validate().is_ok());

    config.timing.words_per_minute = 0.0;
    assert!(matches!(config.validate(), Err(ConfigError::InvalidWordsPerMinute(_))));
    config.timing.words_per_minute = f64::NAN;
    assert!(matches!(config.validate(), Err(ConfigError::InvalidWordsPerMinute(_))));
    config.timing.words_per_minute = 150.0;

    config.timing.gap_between_blocks_secs = -1.0;
    assert_eq!(config.validate(), Err(ConfigError::InvalidGap(-1.0)));
    config.timing = TimingConfig::continuous(150.0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_deserialize_withPartialJson_shouldFillDefaults() -> Result<()> {
    let config: Config = serde_json::from_str(r#"{"segmentation": {"max_chars": 200}, "mode": "simple"}"#)?;

    assert_eq!(config.segmentation.max_chars, 200);
    assert_eq!(config.mode, GenerationMode::Simple);
    assert_eq!(config.timing, TimingConfig::default());
    Ok(())
}

#[test]
fn test_generationMode_fromStr_shouldParseCaseInsensitively() {
    assert_eq!("BLOCK".parse::<GenerationMode>().unwrap(), GenerationMode::Block);
    assert_eq!("simple".parse::<GenerationMode>().unwrap(), GenerationMode::Simple);
    assert!("scene".parse::<GenerationMode>().is_err());
    assert_eq!(GenerationMode::Simple.to_string(), "simple");
}

#[test]
fn test_loadOrDefault_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("narrasub.json");

    let config = Config::load_or_default(&path)?;
    assert_eq!(config, Config::default());
    assert!(path.exists());

    // Second load reads the file back
    let reloaded = Config::load_or_default(&path)?;
    assert_eq!(reloaded, config);
    Ok(())
}

#[test]
fn test_loadOrDefault_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "narrasub.json", "not json")?;
    assert!(Config::load_or_default(&path).is_err());
    Ok(())
}

#[test]
fn test_logLevel_toLevelFilter_shouldMapEachLevel() {
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}

#[test]
fn test_loadOrDefault_withMissingParentDir_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("settings").join("narrasub.json");

    let config = Config::load_or_default(&path)?;
    assert_eq!(config, Config::default());
    assert_eq!(Config::load_or_default(&path)?, config);
    Ok(())
}
