/*!
 * Error types for the narrasub application.
 *
 * The segmentation, timing and formatting core is total and never fails.
 * These types cover the edges around it: reading scene files, parsing SRT
 * text back into entries and validating configuration.
 */

use thiserror::Error;

/// Errors that can occur while parsing subtitle text
#[derive(Error, Debug, PartialEq)]
pub enum SubtitleError {
    /// A timestamp did not match `HH:MM:SS,mmm`
    #[error("Invalid timestamp format: {0}")]
    InvalidTimestamp(String),

    /// An entry ends before it starts
    #[error("Invalid time range in entry {seq_num}: end {end_ms}ms < start {start_ms}ms")]
    InvalidTimeRange {
        seq_num: usize,
        start_ms: u64,
        end_ms: u64,
    },

    /// Nothing parseable was found
    #[error("No valid subtitle entries were found in the SRT content")]
    NoEntries,
}

/// Errors that can occur while loading scene input
#[derive(Error, Debug)]
pub enum SceneError {
    /// The scene file is not a valid JSON scene list
    #[error("Malformed scene list: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A scene carries an unusable time range
    #[error("Scene {index} has an invalid time range: {start} -> {end}")]
    InvalidTimeRange { index: usize, start: f64, end: f64 },
}

/// Errors raised when validating configuration values
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("max_chars must be at least 1")]
    ZeroMaxChars,

    #[error("words_per_minute must be a positive number, got {0}")]
    InvalidWordsPerMinute(f64),

    #[error("gap_between_blocks_secs must be a non-negative number, got {0}")]
    InvalidGap(f64),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle parsing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from scene loading
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Error from configuration validation
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
