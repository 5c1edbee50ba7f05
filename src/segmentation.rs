/*!
 * Segmentation of narration text into subtitle-sized blocks.
 *
 * Text is packed greedily at three levels, each one only used when the
 * unit above it does not fit:
 * - paragraphs (separated by blank lines), joined with a blank line
 * - sentences (split after `.`, `!` or `?` followed by whitespace), joined with a space
 * - words (whitespace-delimited), joined with a space
 *
 * Words are never split. A single word longer than the limit becomes its own
 * oversized block.
 */

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

/// Default maximum characters per block
pub const DEFAULT_MAX_CHARS: usize = 499;

const PARAGRAPH_SEPARATOR: &str = "\n\n";
const SENTENCE_SEPARATOR: &str = " ";
const WORD_SEPARATOR: &str = " ";

// Two or more consecutive newlines, blank lines may carry stray whitespace
static PARAGRAPH_BREAK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\s*\n").unwrap()
});

// Sentence terminator followed by whitespace; the terminator stays with its sentence
static SENTENCE_BOUNDARY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.!?]\s+").unwrap()
});

/// Length of a string in characters, which is the unit every limit is expressed in
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Split text into blocks of at most `max_chars` characters.
///
/// Text that already fits (after trimming) is returned untouched as a single
/// block. Empty or whitespace-only text yields no blocks.
///
/// `max_chars` must be at least 1.
pub fn split_into_blocks(text: &str, max_chars: usize) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if char_len(trimmed) <= max_chars {
        return vec![trimmed.to_string()];
    }

    let mut packer = BlockPacker::new(max_chars);

    for paragraph in split_paragraphs(trimmed) {
        if char_len(paragraph) <= max_chars {
            packer.push(paragraph, PARAGRAPH_SEPARATOR);
            continue;
        }

        // An oversized paragraph starts on a fresh block so the paragraph
        // boundary survives as a block boundary
        packer.flush();
        debug!("Paragraph of {} chars exceeds {} chars, splitting into sentences",
               char_len(paragraph), max_chars);

        for sentence in split_sentences(paragraph) {
            if char_len(sentence) <= max_chars {
                packer.push(sentence, SENTENCE_SEPARATOR);
                continue;
            }

            for word in sentence.split_whitespace() {
                let word_len = char_len(word);
                if word_len > max_chars {
                    warn!("Word of {} chars exceeds the {} char block limit, keeping it whole",
                          word_len, max_chars);
                }
                packer.push(word, WORD_SEPARATOR);
            }
        }
    }

    enforce_limit(packer.finish(), max_chars)
}

/// Split text into non-empty trimmed paragraphs
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    PARAGRAPH_BREAK_REGEX
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Split a paragraph into non-empty trimmed sentences
pub fn split_sentences(paragraph: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_BOUNDARY_REGEX.find_iter(paragraph) {
        // Terminators are ASCII, so the byte after them is a char boundary
        let end = boundary.start() + 1;
        sentences.push(&paragraph[start..end]);
        start = boundary.end();
    }
    sentences.push(&paragraph[start..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Re-split at word level any block still above the limit
fn enforce_limit(blocks: Vec<String>, max_chars: usize) -> Vec<String> {
    let mut result = Vec::with_capacity(blocks.len());

    for block in blocks {
        if char_len(&block) <= max_chars || !block.contains(char::is_whitespace) {
            result.push(block);
            continue;
        }

        debug!("Block of {} chars still over limit, re-splitting by words", char_len(&block));
        let mut packer = BlockPacker::new(max_chars);
        for word in block.split_whitespace() {
            packer.push(word, WORD_SEPARATOR);
        }
        result.extend(packer.finish());
    }

    result
}

/// Greedy accumulator shared by every packing level
struct BlockPacker {
    max_chars: usize,
    blocks: Vec<String>,
    current: String,
    current_len: usize,
}

impl BlockPacker {
    fn new(max_chars: usize) -> Self {
        Self {
            max_chars,
            blocks: Vec::new(),
            current: String::new(),
            current_len: 0,
        }
    }

    /// Append `unit` to the open block if it fits, otherwise close the block and start a new one
    fn push(&mut self, unit: &str, separator: &str) {
        let unit_len = char_len(unit);

        if self.current.is_empty() {
            self.current.push_str(unit);
            self.current_len = unit_len;
            return;
        }

        let joined_len = self.current_len + char_len(separator) + unit_len;
        if joined_len <= self.max_chars {
            self.current.push_str(separator);
            self.current.push_str(unit);
            self.current_len = joined_len;
        } else {
            self.flush();
            self.current.push_str(unit);
            self.current_len = unit_len;
        }
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.blocks.push(std::mem::take(&mut self.current));
            self.current_len = 0;
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.blocks
    }
}
