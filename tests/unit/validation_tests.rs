/*!
 * Tests for block length validation, block counting and timecode checks
 */

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use narrasub::app_config::TimingConfig;
use narrasub::generator::SubtitleGenerator;
use narrasub::scenes::Scene;
use narrasub::subtitle_processor::{format_srt, SubtitleCollection};
use narrasub::validation::length::BlockLengthValidator;
use narrasub::validation::timecodes::TimecodeValidator;
use narrasub::validation::{count_srt_blocks, validate_srt_block_lengths};
use crate::common;

#[test]
fn test_countSrtBlocks_withFourEntries_shouldReturnFour() {
    assert_eq!(count_srt_blocks(common::SAMPLE_SRT), 4);
}

#[test]
fn test_countSrtBlocks_withMissingSeparator_shouldMergeEntries() {
    let merged = common::SAMPLE_SRT.replacen("There was a river.\n\n3", "There was a river.\n3", 1);
    assert_eq!(count_srt_blocks(&merged), 3);
}

#[test]
fn test_validateSrtBlockLengths_withMultilineEntry_shouldMeasureJoinedText() {
    // Entry 3 text is "It flooded every spring,\nand nobody minded." (43 chars)
    assert!(validate_srt_block_lengths(common::SAMPLE_SRT, 43));
    assert!(!validate_srt_block_lengths(common::SAMPLE_SRT, 42));

    let result = BlockLengthValidator::new(42).validate(common::SAMPLE_SRT);
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].block_number, 3);
    assert_eq!(result.blocks_checked, 4);
}

#[test]
fn test_validateSrtBlockLengths_withGeneratedOutput_shouldAlwaysPass() {
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..50 {
        let scenes: Vec<Scene> = (0..rng.random_range(1..6))
            .map(|i| {
                let words = rng.random_range(0..120);
                Scene::new(i + 1, common::random_narration(&mut rng, words), 0.0, 0.0)
            })
            .collect();
        let max_chars = rng.random_range(13..=300);

        let generator = SubtitleGenerator::new(max_chars, TimingConfig::default());
        let entries = generator.block_entries(&scenes);
        let srt = format_srt(&entries);

        assert!(validate_srt_block_lengths(&srt, max_chars));
        assert_eq!(count_srt_blocks(&srt), entries.len());
    }
}

#[test]
fn test_timecodeValidator_withGeneratedOutput_shouldPass() {
    let mut rng = StdRng::seed_from_u64(1);
    let scenes = vec![Scene::new(1, common::random_narration(&mut rng, 400), 0.0, 0.0)];

    let srt = SubtitleGenerator::new(80, TimingConfig::continuous(150.0))
        .generate(&scenes, narrasub::GenerationMode::Block);
    let entries = SubtitleCollection::parse_srt_string(&srt).unwrap();

    let result = TimecodeValidator::new().validate_entries(&entries);
    assert!(result.passed);
    assert_eq!(result.entry_results.len(), count_srt_blocks(&srt));
}

#[test]
fn test_timecodeValidator_withSampleSrt_shouldPass() {
    let entries = SubtitleCollection::parse_srt_string(common::SAMPLE_SRT).unwrap();
    assert!(TimecodeValidator::new().validate_entries(&entries).passed);
}
