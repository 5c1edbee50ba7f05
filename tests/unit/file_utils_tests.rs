/*!
 * Tests for file utility functions
 */

use std::path::Path;

use anyhow::Result;
use narrasub::file_utils::{FileManager, FileType};
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));
    assert!(FileManager::dir_exists(temp_dir.path()));

    Ok(())
}

#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that generate_output_path creates the correct path
#[test]
fn test_generate_output_path_withValidInputs_shouldCreateCorrectPath() {
    let output_path = FileManager::generate_output_path(
        Path::new("/tmp/input/story.json"),
        Path::new("/tmp/output"),
        "srt",
    );
    assert_eq!(output_path, Path::new("/tmp/output/story.srt"));

    let dotted = FileManager::generate_output_path("a/b.txt", "c", ".srt");
    assert_eq!(dotted, Path::new("c/b.srt"));
}

#[test]
fn test_find_files_withMixedExtensions_shouldReturnSortedMatches() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("nested");
    FileManager::ensure_dir(&nested)?;

    common::create_test_file(temp_dir.path(), "b.json", "[]")?;
    common::create_test_file(temp_dir.path(), "a.JSON", "[]")?;
    common::create_test_file(&nested, "c.json", "[]")?;
    common::create_test_file(temp_dir.path(), "notes.txt", "text")?;

    let files = FileManager::find_files(temp_dir.path(), "json")?;

    assert_eq!(files.len(), 3);
    let mut sorted = files.clone();
    sorted.sort();
    assert_eq!(files, sorted);
    Ok(())
}

#[test]
fn test_write_to_file_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("deep").join("dir").join("out.srt");

    FileManager::write_to_file(&path, "content")?;

    assert_eq!(FileManager::read_to_string(&path)?, "content");
    Ok(())
}

#[test]
fn test_append_to_log_file_shouldAppendTimestampedLines() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("run.log");

    FileManager::append_to_log_file(&path, "first")?;
    FileManager::append_to_log_file(&path, "second")?;

    let content = FileManager::read_to_string(&path)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with('[') && lines[0].ends_with("] first"));
    assert!(lines[1].ends_with("] second"));
    Ok(())
}

#[test]
fn test_detect_file_type_shouldClassifyByExtension() {
    assert_eq!(FileManager::detect_file_type("story.json"), FileType::SceneList);
    assert_eq!(FileManager::detect_file_type("story.TXT"), FileType::PlainText);
    assert_eq!(FileManager::detect_file_type("story.srt"), FileType::Subtitle);
    assert_eq!(FileManager::detect_file_type("story.mkv"), FileType::Unknown);
    assert!(FileType::PlainText.is_generation_input());
    assert!(!FileType::Subtitle.is_generation_input());
}
