/*!
 * # narrasub - narration to subtitle blocks
 *
 * A Rust library that turns narration text into SRT subtitles.
 *
 * ## Features
 *
 * - Split narration into blocks under a character limit without ever
 *   breaking a word, keeping paragraphs and sentences together when possible
 * - Time blocks from a words-per-minute reading pace
 * - Block mode (segment and time the whole narration) and simple mode
 *   (one entry per scene with the scene's own timing)
 * - Render SRT and check rendered SRT against a character limit
 *
 * ## Architecture
 *
 * - `segmentation`: paragraph / sentence / word block packing
 * - `timing`: reading-pace durations and sequential layout
 * - `generator`: block and simple generation modes
 * - `subtitle_processor`: SRT entries, rendering and parsing
 * - `validation`: block length, block count and timecode checks
 * - `scenes`: scene input records
 * - `app_config`: Configuration management
 * - `app_controller`: File and folder level workflows
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * The segmentation, timing and formatting functions are pure: no I/O, no
 * shared state and no clock, so they can be called from any thread.
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod generator;
pub mod scenes;
pub mod segmentation;
pub mod subtitle_processor;
pub mod timing;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::{Config, GenerationMode, TimingConfig};
pub use errors::{AppError, ConfigError, SceneError, SubtitleError};
pub use generator::{generate_block_subtitles, generate_simple_subtitles, SubtitleGenerator};
pub use scenes::Scene;
pub use segmentation::{split_into_blocks, DEFAULT_MAX_CHARS};
pub use subtitle_processor::{format_srt, SubtitleCollection, SubtitleEntry};
pub use validation::{count_srt_blocks, validate_srt_block_lengths};
