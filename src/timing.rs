/*!
 * Reading-pace timing for subtitle blocks.
 */

use crate::app_config::TimingConfig;
use crate::subtitle_processor::SubtitleEntry;

/// Shortest time a block stays on screen
pub const MIN_BLOCK_DURATION_SECS: f64 = 2.0;

/// Number of whitespace-delimited words in a block
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Seconds needed to narrate `text` at `words_per_minute`, never below the minimum duration
pub fn estimate_duration_secs(text: &str, words_per_minute: f64) -> f64 {
    let words_per_second = words_per_minute / 60.0;
    (count_words(text) as f64 / words_per_second).max(MIN_BLOCK_DURATION_SECS)
}

/// Convert seconds to whole milliseconds
pub fn secs_to_ms(secs: f64) -> u64 {
    // Negative input saturates to zero, huge input to u64::MAX
    (secs * 1000.0).round() as u64
}

/// Lay blocks out back to back starting at zero.
///
/// Each block after the first starts `gap_between_blocks_secs` after the
/// previous one ends. No gap follows the last block.
pub fn assign_timings<S: AsRef<str>>(blocks: &[S], timing: &TimingConfig) -> Vec<SubtitleEntry> {
    let gap_ms = secs_to_ms(timing.gap_between_blocks_secs);
    let mut entries = Vec::with_capacity(blocks.len());
    let mut cursor_ms = 0u64;

    for (i, block) in blocks.iter().enumerate() {
        let text = block.as_ref();
        let duration_ms = secs_to_ms(estimate_duration_secs(text, timing.words_per_minute));

        let start_time_ms = cursor_ms;
        let end_time_ms = start_time_ms.saturating_add(duration_ms);
        entries.push(SubtitleEntry::new(i + 1, start_time_ms, end_time_ms, text.to_string()));

        cursor_ms = end_time_ms.saturating_add(gap_ms);
    }

    entries
}
