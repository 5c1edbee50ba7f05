/*!
 * Tests for splitting narration into blocks
 */

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use narrasub::segmentation::{char_len, split_into_blocks, split_paragraphs, DEFAULT_MAX_CHARS};
use crate::common;

/// Three 200-char single-word sentences
fn three_sentences() -> (String, String, String) {
    let s1 = format!("{}.", "a".repeat(199));
    let s2 = format!("{}!", "b".repeat(199));
    let s3 = format!("{}?", "c".repeat(199));
    (s1, s2, s3)
}

#[test]
fn test_splitIntoBlocks_withThreeSentencesOverLimit_shouldSplitAtSentenceBoundary() {
    let (s1, s2, s3) = three_sentences();
    let text = format!("{} {} {}", s1, s2, s3);
    assert_eq!(text.chars().filter(|c| !c.is_whitespace()).count(), 600);

    let blocks = split_into_blocks(&text, DEFAULT_MAX_CHARS);

    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0], format!("{} {}", s1, s2));
    assert_eq!(blocks[1], s3);
    assert!(blocks.iter().all(|b| char_len(b) <= DEFAULT_MAX_CHARS));
}

#[test]
fn test_splitIntoBlocks_withSingleOversizedWord_shouldKeepWordWhole() {
    let word = "w".repeat(600);
    let blocks = split_into_blocks(&word, DEFAULT_MAX_CHARS);
    assert_eq!(blocks, vec![word]);
}

#[test]
fn test_splitIntoBlocks_withSentenceWithoutTerminator_shouldFallBackToWords() {
    let text = vec!["narration"; 80].join(" ");
    let blocks = split_into_blocks(&text, 100);

    assert!(blocks.len() > 1);
    assert!(blocks.iter().all(|b| char_len(b) <= 100));
    assert_eq!(common::words_of(&blocks.join(" ")), common::words_of(&text));
}

#[test]
fn test_splitIntoBlocks_withBlankLinesHoldingSpaces_shouldTreatThemAsParagraphBreaks() {
    let text = "First paragraph here.\n   \t\nSecond paragraph here.";
    assert_eq!(split_paragraphs(text), vec!["First paragraph here.", "Second paragraph here."]);

    let blocks = split_into_blocks(text, 30);
    assert_eq!(blocks, vec!["First paragraph here.", "Second paragraph here."]);
}

#[test]
fn test_splitIntoBlocks_withMergedParagraphs_shouldNormalizeSeparators() {
    let text = "Alpha.\n\n\n\nBeta.\n\nGamma delta epsilon zeta eta theta.";
    let blocks = split_into_blocks(text, 20);
    assert_eq!(blocks[0], "Alpha.\n\nBeta.");
}

#[test]
fn test_splitIntoBlocks_withRandomText_shouldRespectLimit() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..200 {
        let word_count = rng.random_range(0..300);
        let text = common::random_narration(&mut rng, word_count);
        // Random words are at most 13 chars, so every limit here fits every word
        let max_chars = rng.random_range(13..=200);

        for block in split_into_blocks(&text, max_chars) {
            assert!(char_len(&block) <= max_chars, "block of {} chars over {}: {:?}",
                    char_len(&block), max_chars, block);
            assert!(!block.trim().is_empty());
        }
    }
}

#[test]
fn test_splitIntoBlocks_withRandomText_shouldPreserveWordSequence() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..200 {
        let word_count = rng.random_range(0..300);
        let text = common::random_narration(&mut rng, word_count);
        // Includes limits smaller than some words
        let max_chars = rng.random_range(1..=120);

        let blocks = split_into_blocks(&text, max_chars);
        let rejoined: Vec<String> = blocks.iter().flat_map(|b| common::words_of(b)).collect();
        assert_eq!(rejoined, common::words_of(&text));
    }
}

#[test]
fn test_splitIntoBlocks_withFittingRandomText_shouldReturnTrimmedInput() {
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..100 {
        let word_count = rng.random_range(1..60);
        let text = format!("  \n{}\n ", common::random_narration(&mut rng, word_count));
        let trimmed = text.trim();
        let max_chars = rng.random_range(1..=400);

        let blocks = split_into_blocks(&text, max_chars);
        if char_len(trimmed) <= max_chars {
            assert_eq!(blocks, vec![trimmed.to_string()]);
        } else if trimmed.contains(char::is_whitespace) {
            // A lone oversized word is the only text allowed through unchanged
            assert_ne!(blocks, vec![trimmed.to_string()]);
        }
    }
}

#[test]
fn test_splitIntoBlocks_withIdenticalInput_shouldBeDeterministic() {
    let mut rng = StdRng::seed_from_u64(11);
    let text = common::random_narration(&mut rng, 500);
    assert_eq!(split_into_blocks(&text, 80), split_into_blocks(&text, 80));
}
