use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::{Config, GenerationMode};
use crate::file_utils::{FileManager, FileType};
use crate::generator::SubtitleGenerator;
use crate::scenes;
use crate::subtitle_processor::SubtitleCollection;
use crate::validation::length::BlockLengthValidationResult;
use crate::validation::timecodes::TimecodeValidationResult;
use crate::validation::{count_srt_blocks, BlockLengthValidator, TimecodeValidator};

// @module: Application controller for subtitle generation and checks

/// Name of the summary log written into processed folders
const FOLDER_LOG_FILE: &str = "narrasub.log";

/// What happened to a single input file
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// Subtitles were written
    Written { output_path: PathBuf, entry_count: usize },
    /// Output already existed and overwriting was not forced
    Skipped { output_path: PathBuf },
}

/// Counts for a folder run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Outcome of checking an existing SRT file
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub block_count: usize,
    pub lengths: BlockLengthValidationResult,
    pub timecodes: TimecodeValidationResult,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.lengths.passed && self.timecodes.passed
    }
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn generator(&self) -> SubtitleGenerator {
        SubtitleGenerator::from_config(&self.config)
    }

    /// Generate subtitles for one scene or text file.
    /// Without an explicit output path the SRT is written next to the input.
    pub fn generate_file(&self, input_file: &Path, output_file: Option<&Path>, force_overwrite: bool) -> Result<GenerationOutcome> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_path = match output_file {
            Some(path) => path.to_path_buf(),
            None => {
                let output_dir = input_file.parent().unwrap_or(Path::new("."));
                FileManager::generate_output_path(input_file, output_dir, "srt")
            }
        };

        if output_path.exists() && !force_overwrite {
            warn!("Output file already exists: {:?}. Use -f to force overwrite.", output_path);
            return Ok(GenerationOutcome::Skipped { output_path });
        }

        let file_type = FileManager::detect_file_type(input_file);
        if !file_type.is_generation_input() {
            warn!("Unrecognized input type for {:?}, reading it as narration text", input_file);
        }

        let scenes = scenes::load_scenes(input_file)?;
        if self.config.mode == GenerationMode::Simple && file_type != FileType::SceneList {
            warn!("Simple mode on untimed text input: entries will have zero duration");
        }

        let entries = self.generator().entries(&scenes, self.config.mode);
        let entry_count = entries.len();
        if entry_count == 0 {
            warn!("No narration text found in {:?}", input_file);
        }

        let collection = SubtitleCollection::from_entries(input_file.to_path_buf(), entries);
        collection.write_to_srt(&output_path)?;

        info!("Wrote {} subtitle block(s) ({} mode): {:?}", entry_count, self.config.mode, output_path);
        Ok(GenerationOutcome::Written { output_path, entry_count })
    }

    /// Generate subtitles for every scene list and text file under a directory
    pub fn run_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let mut input_files = FileManager::find_files(input_dir, "json")?;
        input_files.append(&mut FileManager::find_files(input_dir, "txt")?);
        input_files.sort();

        if input_files.is_empty() {
            return Err(anyhow!("No scene or text files found in directory: {:?}", input_dir));
        }

        let folder_pb = ProgressBar::new(input_files.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(style.progress_chars("█▓▒░"));

        let mut summary = FolderSummary::default();

        for input_file in &input_files {
            let file_name = input_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            match self.generate_file(input_file, None, force_overwrite) {
                Ok(GenerationOutcome::Written { .. }) => summary.processed += 1,
                Ok(GenerationOutcome::Skipped { .. }) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.errors += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        let summary_message = format!(
            "Folder processing completed: {} processed, {} skipped, {} errors in {:.2}s",
            summary.processed, summary.skipped, summary.errors, start_time.elapsed().as_secs_f64()
        );
        info!("{}", summary_message);

        let log_path = input_dir.join(FOLDER_LOG_FILE);
        if let Err(e) = FileManager::append_to_log_file(&log_path, &summary_message) {
            warn!("Failed to write folder log to file: {}", e);
        }

        Ok(summary)
    }

    /// Check an SRT file against the configured block length and for timecode problems
    pub fn validate_file(&self, srt_file: &Path) -> Result<ValidationReport> {
        let content = FileManager::read_to_string(srt_file)?;

        let lengths = BlockLengthValidator::new(self.config.segmentation.max_chars).validate(&content);
        let entries = SubtitleCollection::parse_srt_string_unchecked(&content);
        let timecodes = TimecodeValidator::new().validate_entries(&entries);

        Ok(ValidationReport {
            block_count: count_srt_blocks(&content),
            lengths,
            timecodes,
        })
    }

    /// Count blocks in an SRT file
    pub fn count_file(&self, srt_file: &Path) -> Result<usize> {
        let content = FileManager::read_to_string(srt_file)?;
        Ok(count_srt_blocks(&content))
    }
}
