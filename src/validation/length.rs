/*!
 * Block length validation for rendered SRT text.
 *
 * Rendered text is split on blank lines. Every chunk with at least three
 * lines (index, timing, text) has its text lines checked against the
 * character limit. Shorter chunks are not entries and are skipped.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::segmentation::char_len;

static BLANK_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\s*\n").unwrap()
});

/// Lines of a chunk needed before it counts as an entry
const MIN_ENTRY_LINES: usize = 3;

/// A block whose text is over the limit
#[derive(Debug, Clone, PartialEq)]
pub struct BlockLengthIssue {
    /// Position of the chunk in the document, 1-based
    pub block_number: usize,
    /// Index line as written in the document
    pub index_line: String,
    /// Characters in the text payload
    pub char_count: usize,
    /// Limit that was exceeded
    pub max_chars: usize,
}

impl std::fmt::Display for BlockLengthIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Block {} (index {}) has {} chars (max: {})",
            self.block_number, self.index_line, self.char_count, self.max_chars
        )
    }
}

/// Result of validating every block of a document
#[derive(Debug, Clone)]
pub struct BlockLengthValidationResult {
    /// Overall pass/fail status
    pub passed: bool,
    /// Entries whose text was measured
    pub blocks_checked: usize,
    /// Chunks with fewer than three lines
    pub blocks_skipped: usize,
    /// Every over-limit block
    pub issues: Vec<BlockLengthIssue>,
}

/// Checks rendered SRT text against a character limit
#[derive(Debug, Clone)]
pub struct BlockLengthValidator {
    max_chars: usize,
}

impl BlockLengthValidator {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// Stop at the first over-limit block
    pub fn is_valid(&self, srt: &str) -> bool {
        split_blocks(srt).all(|chunk| {
            entry_text(chunk).is_none_or(|text| char_len(&text) <= self.max_chars)
        })
    }

    /// Report every over-limit block
    pub fn validate(&self, srt: &str) -> BlockLengthValidationResult {
        let mut issues = Vec::new();
        let mut blocks_checked = 0;
        let mut blocks_skipped = 0;

        for (i, chunk) in split_blocks(srt).enumerate() {
            let Some(text) = entry_text(chunk) else {
                blocks_skipped += 1;
                continue;
            };

            blocks_checked += 1;
            let char_count = char_len(&text);
            if char_count > self.max_chars {
                issues.push(BlockLengthIssue {
                    block_number: i + 1,
                    index_line: chunk.lines().next().unwrap_or_default().trim().to_string(),
                    char_count,
                    max_chars: self.max_chars,
                });
            }
        }

        debug!("Checked {} block(s), skipped {}, {} over {} chars",
               blocks_checked, blocks_skipped, issues.len(), self.max_chars);

        BlockLengthValidationResult {
            passed: issues.is_empty(),
            blocks_checked,
            blocks_skipped,
            issues,
        }
    }
}

/// Non-empty blank-line-delimited chunks
fn split_blocks(srt: &str) -> impl Iterator<Item = &str> {
    BLANK_LINE_REGEX
        .split(srt)
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
}

/// Text payload of a chunk, or `None` when it has fewer than three lines
fn entry_text(chunk: &str) -> Option<String> {
    let lines: Vec<&str> = chunk.lines().collect();
    if lines.len() < MIN_ENTRY_LINES {
        return None;
    }
    Some(lines[2..].join("\n"))
}

/// True when no entry's text exceeds `max_chars`; vacuously true for no entries
pub fn validate_srt_block_lengths(srt: &str, max_chars: usize) -> bool {
    BlockLengthValidator::new(max_chars).is_valid(srt)
}

/// Number of non-empty blank-line-delimited blocks
pub fn count_srt_blocks(srt: &str) -> usize {
    split_blocks(srt).count()
}
