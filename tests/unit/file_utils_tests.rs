/*!
 * Tests for file and directory utilities
 */

use std::fs;
use std::path::Path;
use anyhow::Result;
use annotrack::file_utils::{FileManager, EXPORT_EXTENSIONS, PER_TICK_SUFFIX};
use crate::common;

/// Test output naming
#[test]
fn test_generateOutputPath_withExport_shouldInsertSuffix() {
    let output = FileManager::generate_output_path("/data/session_01.txt", "/out", PER_TICK_SUFFIX, "csv");
    assert_eq!(output, Path::new("/out/session_01.per_t.csv"));
}

/// Test recursive, case-insensitive, sorted discovery
#[test]
fn test_findFiles_withNestedExports_shouldReturnSortedMatches() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    let nested = root.join("day2");
    fs::create_dir_all(&nested)?;

    common::create_test_file(&root, "b.txt", "")?;
    common::create_test_file(&root, "a.TSV", "")?;
    common::create_test_file(&root, "notes.md", "")?;
    common::create_test_file(&root, "a.per_t.csv", "")?;
    common::create_test_file(&nested, "c.txt", "")?;

    let found = FileManager::find_files(&root, &EXPORT_EXTENSIONS)?;

    assert_eq!(found, vec![root.join("a.TSV"), root.join("b.txt"), nested.join("c.txt")]);
    Ok(())
}

/// Test existence checks and directory creation
#[test]
fn test_ensureDir_withMissingDirectory_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().join("x").join("y");

    assert!(!FileManager::dir_exists(&dir));
    FileManager::ensure_dir(&dir)?;
    assert!(FileManager::dir_exists(&dir));
    assert!(!FileManager::file_exists(&dir));
    Ok(())
}

/// Test log appending
#[test]
fn test_appendToLogFile_withTwoWrites_shouldKeepBoth() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let log_path = temp_dir.path().join("logs").join("annotrack.log");

    FileManager::append_to_log_file(&log_path, "first")?;
    FileManager::append_to_log_file(&log_path, "second")?;

    let content = fs::read_to_string(&log_path)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with('[') && lines[0].ends_with("] first"));
    assert!(lines[1].ends_with("] second"));
    Ok(())
}
