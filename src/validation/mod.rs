/*!
 * Validation of generated subtitles.
 *
 * - `length`: block length checks and block counting on rendered SRT text
 * - `timecodes`: ordering and overlap checks on parsed entries
 */

pub mod length;
pub mod timecodes;

// Re-export main types
pub use length::{count_srt_blocks, validate_srt_block_lengths, BlockLengthValidator};
pub use timecodes::TimecodeValidator;
