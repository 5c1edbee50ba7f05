/*!
 * Timecode validation for subtitle entries.
 *
 * This module validates that timecodes are:
 * - Logically consistent (start <= end)
 * - In chronological order
 * - Non-overlapping between consecutive entries
 */

use log::debug;

use crate::subtitle_processor::SubtitleEntry;

/// Types of timecode issues
#[derive(Debug, Clone, PartialEq)]
pub enum TimecodeIssue {
    /// Start time is after end time
    InvalidTimeRange {
        start_ms: u64,
        end_ms: u64,
    },
    /// Starts before the previous entry started
    OutOfOrder {
        prev_seq_num: usize,
        prev_start_ms: u64,
    },
    /// Overlaps with the previous entry
    OverlapsWithEntry {
        other_seq_num: usize,
        overlap_ms: u64,
    },
}

impl std::fmt::Display for TimecodeIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimecodeIssue::InvalidTimeRange { start_ms, end_ms } => {
                write!(f, "Invalid time range: start {}ms > end {}ms", start_ms, end_ms)
            }
            TimecodeIssue::OutOfOrder { prev_seq_num, prev_start_ms } => {
                write!(
                    f,
                    "Starts before entry {} (which starts at {}ms)",
                    prev_seq_num, prev_start_ms
                )
            }
            TimecodeIssue::OverlapsWithEntry { other_seq_num, overlap_ms } => {
                write!(f, "Overlaps with entry {} by {}ms", other_seq_num, overlap_ms)
            }
        }
    }
}

/// Result of timecode validation for a single entry
#[derive(Debug, Clone)]
pub struct TimecodeEntryResult {
    /// Sequence number of the entry
    pub seq_num: usize,
    /// Whether the entry passed validation
    pub passed: bool,
    /// Issues found
    pub issues: Vec<TimecodeIssue>,
}

/// Result of validating all timecodes in a collection
#[derive(Debug, Clone)]
pub struct TimecodeValidationResult {
    /// Overall pass/fail status
    pub passed: bool,
    /// Results for each entry
    pub entry_results: Vec<TimecodeEntryResult>,
    /// Total number of issues
    pub total_issues: usize,
}

impl TimecodeValidationResult {
    /// Get all failed entries
    pub fn failed_entries(&self) -> Vec<&TimecodeEntryResult> {
        self.entry_results.iter().filter(|r| !r.passed).collect()
    }
}

/// Timecode validator for subtitle entries
#[derive(Debug, Clone, Default)]
pub struct TimecodeValidator;

impl TimecodeValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a single entry in isolation
    pub fn validate_entry(&self, entry: &SubtitleEntry) -> Vec<TimecodeIssue> {
        let mut issues = Vec::new();
        if entry.start_time_ms > entry.end_time_ms {
            issues.push(TimecodeIssue::InvalidTimeRange {
                start_ms: entry.start_time_ms,
                end_ms: entry.end_time_ms,
            });
        }
        issues
    }

    /// Validate entries in document order
    pub fn validate_entries(&self, entries: &[SubtitleEntry]) -> TimecodeValidationResult {
        let mut entry_results = Vec::with_capacity(entries.len());
        let mut previous: Option<&SubtitleEntry> = None;

        for entry in entries {
            let mut issues = self.validate_entry(entry);

            if let Some(prev) = previous {
                if entry.start_time_ms < prev.start_time_ms {
                    issues.push(TimecodeIssue::OutOfOrder {
                        prev_seq_num: prev.seq_num,
                        prev_start_ms: prev.start_time_ms,
                    });
                } else if entry.start_time_ms < prev.end_time_ms {
                    issues.push(TimecodeIssue::OverlapsWithEntry {
                        other_seq_num: prev.seq_num,
                        overlap_ms: prev.end_time_ms - entry.start_time_ms,
                    });
                }
            }

            entry_results.push(TimecodeEntryResult {
                seq_num: entry.seq_num,
                passed: issues.is_empty(),
                issues,
            });
            previous = Some(entry);
        }

        let total_issues: usize = entry_results.iter().map(|r| r.issues.len()).sum();
        debug!("Timecode validation: {} entries, {} issues", entries.len(), total_issues);

        TimecodeValidationResult {
            passed: total_issues == 0,
            entry_results,
            total_issues,
        }
    }
}
