use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::ConfigError;
use crate::file_utils::FileManager;

/// Application configuration module
/// This module handles loading, validating and saving the settings that drive
/// segmentation, timing and output mode.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Segmentation settings
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Timing settings
    #[serde(default)]
    pub timing: TimingConfig,

    /// Generation mode
    #[serde(default)]
    pub mode: GenerationMode,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// How scenes are turned into subtitle entries
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Concatenate all scenes, segment, and derive timing from word counts
    #[default]
    Block,
    /// One entry per scene with the scene's own timing
    Simple,
}

impl std::fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Block => write!(f, "block"),
            Self::Simple => write!(f, "simple"),
        }
    }
}

impl std::str::FromStr for GenerationMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "block" => Ok(Self::Block),
            "simple" => Ok(Self::Simple),
            _ => Err(anyhow::anyhow!("Invalid generation mode: {}", s)),
        }
    }
}

/// Text segmentation settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SegmentationConfig {
    /// Maximum characters per subtitle block
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
        }
    }
}

/// Reading pace settings used to time blocks
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TimingConfig {
    /// Narration pace
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: f64,

    /// Silence inserted between consecutive blocks, in seconds
    #[serde(default = "default_gap_between_blocks_secs")]
    pub gap_between_blocks_secs: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: default_words_per_minute(),
            gap_between_blocks_secs: default_gap_between_blocks_secs(),
        }
    }
}

impl TimingConfig {
    /// Timing for continuous narration with no silence between blocks
    pub fn continuous(words_per_minute: f64) -> Self {
        Self {
            words_per_minute,
            gap_between_blocks_secs: 0.0,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

pub(crate) fn default_max_chars() -> usize {
    499
}

fn default_words_per_minute() -> f64 {
    150.0
}

fn default_gap_between_blocks_secs() -> f64 {
    10.0
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.segmentation.max_chars == 0 {
            return Err(ConfigError::ZeroMaxChars);
        }

        let wpm = self.timing.words_per_minute;
        if !wpm.is_finite() || wpm <= 0.0 {
            return Err(ConfigError::InvalidWordsPerMinute(wpm));
        }

        let gap = self.timing.gap_between_blocks_secs;
        if !gap.is_finite() || gap < 0.0 {
            return Err(ConfigError::InvalidGap(gap));
        }

        Ok(())
    }

    /// Load a configuration file, creating one with defaults if it is missing
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        FileManager::write_to_file(path, &config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            segmentation: SegmentationConfig::default(),
            timing: TimingConfig::default(),
            mode: GenerationMode::default(),
            log_level: LogLevel::default(),
        }
    }
}
