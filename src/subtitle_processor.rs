use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;

// @module: SRT entries, rendering and parsing

// @const: SRT timing line regex, hours are unbounded
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2,}):(\d{2}):(\d{2}),(\d{3}) --> (\d{2,}):(\d{2}):(\d{2}),(\d{3})").unwrap()
});

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    // @field: Sequence number, 1-based
    pub seq_num: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Subtitle text
    pub text: String,
}

impl SubtitleEntry {
    /// Creates a new subtitle entry
    pub fn new(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Self {
        SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text,
        }
    }

    // @creates: Validated subtitle entry
    // @validates: start <= end
    pub fn new_validated(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> std::result::Result<Self, SubtitleError> {
        if end_time_ms < start_time_ms {
            return Err(SubtitleError::InvalidTimeRange {
                seq_num,
                start_ms: start_time_ms,
                end_ms: end_time_ms,
            });
        }

        Ok(SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text: text.trim().to_string(),
        })
    }

    /// Parse an SRT timestamp (HH:MM:SS,mmm) to milliseconds
    pub fn parse_timestamp(timestamp: &str) -> std::result::Result<u64, SubtitleError> {
        let invalid = || SubtitleError::InvalidTimestamp(timestamp.to_string());

        let parts: Vec<&str> = timestamp.trim().split(&[':', ','][..]).collect();
        if parts.len() != 4 {
            return Err(invalid());
        }

        let hours: u64 = parts[0].parse().map_err(|_| invalid())?;
        let minutes: u64 = parts[1].parse().map_err(|_| invalid())?;
        let seconds: u64 = parts[2].parse().map_err(|_| invalid())?;
        let millis: u64 = parts[3].parse().map_err(|_| invalid())?;

        if minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return Err(invalid());
        }

        hours
            .checked_mul(3_600_000)
            .and_then(|ms| ms.checked_add(minutes * 60_000 + seconds * 1_000 + millis))
            .ok_or_else(invalid)
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_time_ms)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm).
    /// Hours keep counting past 99 instead of wrapping.
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }

    /// Duration in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.end_time_ms.saturating_sub(self.start_time_ms)
    }

    /// Text as written into an SRT block.
    /// Blank lines would end the block early, so they are dropped.
    pub fn rendered_text(&self) -> String {
        self.text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.rendered_text())?;
        writeln!(f)
    }
}

/// Render entries as one SRT document
pub fn format_srt(entries: &[SubtitleEntry]) -> String {
    entries.iter().map(|entry| entry.to_string()).collect()
}

/// Collection of subtitle entries with metadata
#[derive(Debug, Clone)]
pub struct SubtitleCollection {
    /// File the entries were generated from or parsed out of
    pub source_file: PathBuf,

    /// List of subtitle entries
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    /// Create a new, empty subtitle collection
    pub fn new(source_file: PathBuf) -> Self {
        SubtitleCollection {
            source_file,
            entries: Vec::new(),
        }
    }

    /// Wrap already built entries
    pub fn from_entries(source_file: PathBuf, entries: Vec<SubtitleEntry>) -> Self {
        SubtitleCollection {
            source_file,
            entries,
        }
    }

    /// Read and parse an SRT file
    pub fn from_srt_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read subtitle file: {}", path.display()))?;
        let entries = Self::parse_srt_string(&content)
            .with_context(|| format!("Failed to parse subtitle file: {}", path.display()))?;

        Ok(Self::from_entries(path.to_path_buf(), entries))
    }

    /// Render the whole collection as SRT text
    pub fn to_srt_string(&self) -> String {
        format_srt(&self.entries)
    }

    /// Write subtitles to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;

        for entry in &self.entries {
            write!(file, "{}", entry)?;
        }

        debug!("Wrote {} entries to {}", self.entries.len(), path.display());
        Ok(())
    }

    /// End of the last entry, in milliseconds
    pub fn total_duration_ms(&self) -> u64 {
        self.entries.iter().map(|e| e.end_time_ms).max().unwrap_or(0)
    }

    /// Parse SRT format string into subtitle entries.
    /// Entries whose end precedes their start are skipped with a warning.
    pub fn parse_srt_string(content: &str) -> std::result::Result<Vec<SubtitleEntry>, SubtitleError> {
        let entries = Self::parse_entries(content, RangeCheck::Skip);

        if entries.is_empty() {
            warn!("No valid subtitle entries found in content");
            return Err(SubtitleError::NoEntries);
        }

        Ok(entries)
    }

    /// Parse SRT text for checking: inverted entries are kept as written and
    /// content without entries yields an empty list
    pub fn parse_srt_string_unchecked(content: &str) -> Vec<SubtitleEntry> {
        Self::parse_entries(content, RangeCheck::Keep)
    }

    fn parse_entries(content: &str, range_check: RangeCheck) -> Vec<SubtitleEntry> {
        let mut entries = Vec::new();

        // State variables for parsing
        let mut current_seq_num: Option<usize> = None;
        let mut current_times: Option<(u64, u64)> = None;
        let mut current_text = String::new();
        let mut discarding = false;

        let mut add_current_entry = |seq_num: usize, start_ms: u64, end_ms: u64, text: &str| {
            match range_check {
                RangeCheck::Keep => entries.push(SubtitleEntry::new(seq_num, start_ms, end_ms, text.trim().to_string())),
                RangeCheck::Skip => match SubtitleEntry::new_validated(seq_num, start_ms, end_ms, text.to_string()) {
                    Ok(entry) => entries.push(entry),
                    Err(e) => warn!("Skipping invalid subtitle entry {}: {}", seq_num, e),
                },
            }
        };

        for (line_idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();

            // Blank line finalizes a complete entry
            if trimmed.is_empty() {
                discarding = false;
                if let (Some(seq_num), Some((start_ms, end_ms))) = (current_seq_num, current_times) {
                    if !current_text.is_empty() {
                        add_current_entry(seq_num, start_ms, end_ms, &current_text);
                        current_seq_num = None;
                        current_times = None;
                        current_text.clear();
                    }
                }
                continue;
            }

            // Rest of an entry whose timing line could not be used
            if discarding {
                continue;
            }

            if current_seq_num.is_none() && current_text.is_empty() {
                if let Ok(num) = trimmed.parse::<usize>() {
                    current_seq_num = Some(num);
                    continue;
                }
            }

            if let (Some(seq_num), None) = (current_seq_num, current_times) {
                if let Some(caps) = TIMESTAMP_REGEX.captures(trimmed) {
                    match (Self::captures_to_ms(&caps, 1), Self::captures_to_ms(&caps, 5)) {
                        (Some(start_ms), Some(end_ms)) => current_times = Some((start_ms, end_ms)),
                        _ => {
                            warn!("Skipping subtitle entry {}: timestamp out of range at line {}: {}", seq_num, line_idx + 1, trimmed);
                            current_seq_num = None;
                            discarding = true;
                        }
                    }
                    continue;
                }
            }

            if current_seq_num.is_some() && current_times.is_some() {
                if !current_text.is_empty() {
                    current_text.push('\n');
                }
                current_text.push_str(trimmed);
            } else {
                warn!("Unexpected text at line {} before sequence number or timestamp: {}", line_idx + 1, trimmed);
            }
        }

        if let (Some(seq_num), Some((start_ms, end_ms))) = (current_seq_num, current_times) {
            if !current_text.is_empty() {
                add_current_entry(seq_num, start_ms, end_ms, &current_text);
            }
        }

        entries
    }

    /// Milliseconds for one side of a timing line, None when the hours overflow
    fn captures_to_ms(caps: &regex::Captures, start_idx: usize) -> Option<u64> {
        let group = |offset: usize| -> Option<u64> {
            caps.get(start_idx + offset)?.as_str().parse().ok()
        };

        group(0)?
            .checked_mul(3_600_000)?
            .checked_add(group(1)? * 60_000 + group(2)? * 1_000 + group(3)?)
    }
}

/// What to do with an entry whose end precedes its start
#[derive(Debug, Clone, Copy)]
enum RangeCheck {
    Skip,
    Keep,
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        writeln!(f, "Duration: {}", SubtitleEntry::format_timestamp(self.total_duration_ms()))?;
        Ok(())
    }
}
