/*!
 * Subtitle generation from scenes.
 *
 * Two modes are supported:
 * - block mode: scene texts are concatenated, segmented under the character
 *   limit and timed from word counts; scene timings are ignored
 * - simple mode: one entry per scene using the scene's own timing, no segmentation
 */

use log::debug;

use crate::app_config::{Config, GenerationMode, TimingConfig};
use crate::scenes::Scene;
use crate::segmentation::{split_into_blocks, DEFAULT_MAX_CHARS};
use crate::subtitle_processor::{format_srt, SubtitleEntry};
use crate::timing::{assign_timings, secs_to_ms};

/// Join trimmed, non-empty scene texts with a blank line
pub fn join_scene_texts(scenes: &[Scene]) -> String {
    scenes
        .iter()
        .map(|scene| scene.text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Builds subtitle entries from scenes with a fixed segmentation and timing setup
#[derive(Debug, Clone)]
pub struct SubtitleGenerator {
    max_chars: usize,
    timing: TimingConfig,
}

impl Default for SubtitleGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHARS, TimingConfig::default())
    }
}

impl SubtitleGenerator {
    /// `max_chars` must be at least 1
    pub fn new(max_chars: usize, timing: TimingConfig) -> Self {
        Self { max_chars, timing }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.segmentation.max_chars, config.timing.clone())
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Block mode entries
    pub fn block_entries(&self, scenes: &[Scene]) -> Vec<SubtitleEntry> {
        let narration = join_scene_texts(scenes);
        let blocks = split_into_blocks(&narration, self.max_chars);
        debug!("Segmented {} scene(s) into {} block(s) of at most {} chars",
               scenes.len(), blocks.len(), self.max_chars);
        assign_timings(&blocks, &self.timing)
    }

    /// Simple mode entries: scene timing is kept as given
    pub fn simple_entries(&self, scenes: &[Scene]) -> Vec<SubtitleEntry> {
        scenes
            .iter()
            .enumerate()
            .map(|(i, scene)| {
                SubtitleEntry::new(
                    i + 1,
                    secs_to_ms(scene.start),
                    secs_to_ms(scene.end),
                    scene.text.trim().to_string(),
                )
            })
            .collect()
    }

    pub fn entries(&self, scenes: &[Scene], mode: GenerationMode) -> Vec<SubtitleEntry> {
        match mode {
            GenerationMode::Block => self.block_entries(scenes),
            GenerationMode::Simple => self.simple_entries(scenes),
        }
    }

    /// Render scenes straight to SRT text
    pub fn generate(&self, scenes: &[Scene], mode: GenerationMode) -> String {
        format_srt(&self.entries(scenes, mode))
    }
}

/// Block mode SRT for the given limit and timing
pub fn generate_block_subtitles(scenes: &[Scene], max_chars: usize, timing: &TimingConfig) -> String {
    SubtitleGenerator::new(max_chars, timing.clone()).generate(scenes, GenerationMode::Block)
}

/// Simple mode SRT, one entry per scene
pub fn generate_simple_subtitles(scenes: &[Scene]) -> String {
    SubtitleGenerator::default().generate(scenes, GenerationMode::Simple)
}
