/*!
 * End-to-end tests from annotation export to per-tick table
 */

use std::fs;
use anyhow::Result;
use annotrack::annotation::export::read_records;
use annotrack::errors::AnnotationError;
use annotrack::{process, PipelineConfig, TimeSliceRecord};
use crate::common;

const SAMPLE_OUTPUT: &str = "Time,Tier,Annotation
10,Gaze@CHI,ball
11,Gaze@CHI,ball
12,Gaze@CHI,ball
12,Laughter@CHI,laugh
13,Gaze@CHI,ball
13,Laughter@CHI,laugh
14,Gaze@CHI,ball
";

/// Test the whole pipeline on the sample session
#[test]
fn test_process_withSampleExport_shouldWritePerTickTable() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_export(&temp_dir.path().to_path_buf(), "session.txt")?;
    let output = temp_dir.path().join("annotations_per_t.csv");

    let summary = process(&input, &output, &PipelineConfig::default())?;

    assert_eq!(summary.rows_loaded, 6);
    // Gaze@MOT ends after the scene
    assert_eq!(summary.rows_in_scenes, 5);
    // Facial@MOT has an unparseable start
    assert_eq!(summary.rows_normalized, 4);
    assert_eq!(summary.max_tick, 30);
    assert_eq!(summary.records_written, 7);
    assert!(summary.output_path.is_absolute());
    assert_eq!(fs::read_to_string(&output)?, SAMPLE_OUTPUT);
    Ok(())
}

/// Test that a second run rewrites an identical file
#[test]
fn test_process_withSameInputTwice_shouldBeByteIdentical() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_export(&temp_dir.path().to_path_buf(), "session.txt")?;
    let output = temp_dir.path().join("out.csv");
    let config = PipelineConfig::default();

    process(&input, &output, &config)?;
    let first = fs::read(&output)?;
    process(&input, &output, &config)?;
    let second = fs::read(&output)?;

    assert_eq!(first, second);
    Ok(())
}

/// Test that an export without scenes is processed whole
#[test]
fn test_process_withoutSceneTier_shouldKeepAllRows() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = [
        common::export_line("Gaze@MOT", "00:00:00.000", "00:00:00.200", "00:00:00.200", "child"),
        common::export_line("Gaze@CHI", "00:01:00.000", "00:01:00.100", "00:00:00.100", "2_mom"),
    ]
    .concat();
    let input = common::create_test_file(&temp_dir.path().to_path_buf(), "no_scene.txt", &content)?;
    let output = temp_dir.path().join("out.csv");

    let summary = process(&input, &output, &PipelineConfig::default())?;

    assert_eq!(summary.rows_in_scenes, 2);
    assert_eq!(
        read_records(&output)?,
        vec![
            TimeSliceRecord::new(0, "Gaze@MOT", "child"),
            TimeSliceRecord::new(1, "Gaze@MOT", "child"),
            TimeSliceRecord::new(600, "Gaze@CHI", "mom"),
        ]
    );
    Ok(())
}

/// Test that no scene behaves like one scene covering the whole session
#[test]
fn test_process_withCoveringScene_shouldMatchNoSceneOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let annotations = [
        common::export_line("Gaze@MOT", "00:00:00.000", "00:00:00.300", "00:00:00.300", "child"),
        common::export_line("Round", "00:00:00.000", "00:00:01.000", "00:00:01.000", "1"),
        common::export_line("Laughter@CHI", "00:00:00.200", "00:00:00.500", "00:00:00.300", "4_laugh"),
        common::export_line("Gaze@CHI", "00:00:00.900", "00:00:01.000", "00:00:00.100", "ball"),
    ]
    .concat();
    let covering_scene = common::export_line("Scene", "00:00:00.000", "00:00:01.000", "00:00:01.000", "all");

    let without_scene = common::create_test_file(&dir, "without.txt", &annotations)?;
    let with_scene = common::create_test_file(&dir, "with.txt", &format!("{}{}", covering_scene, annotations))?;
    let config = PipelineConfig::default();

    process(&without_scene, dir.join("without.csv"), &config)?;
    process(&with_scene, dir.join("with.csv"), &config)?;

    assert_eq!(fs::read(dir.join("without.csv"))?, fs::read(dir.join("with.csv"))?);
    Ok(())
}

/// Test that a value reduced to nothing by prefix stripping is still exported
#[test]
fn test_process_withPrefixOnlyValue_shouldWriteEmptyAnnotation() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = common::export_line("Gaze@CHI", "00:00:01.000", "00:00:01.200", "00:00:00.200", "14_");
    let input = common::create_test_file(&temp_dir.path().to_path_buf(), "prefix.txt", &content)?;
    let output = temp_dir.path().join("out.csv");

    let summary = process(&input, &output, &PipelineConfig::default())?;

    assert_eq!(summary.records_written, 2);
    assert_eq!(fs::read_to_string(&output)?, "Time,Tier,Annotation\n10,Gaze@CHI,\n11,Gaze@CHI,\n");
    Ok(())
}

/// Test that a row inside two overlapping scenes is reported twice per tick
#[test]
fn test_process_withOverlappingScenes_shouldDuplicateRecords() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = [
        common::export_line("Scene", "00:00:00.000", "00:00:01.000", "00:00:01.000", "a"),
        common::export_line("Scene", "00:00:00.000", "00:00:02.000", "00:00:02.000", "b"),
        common::export_line("Laughter@CHI", "00:00:00.500", "00:00:00.700", "00:00:00.200", "laugh"),
    ]
    .concat();
    let input = common::create_test_file(&temp_dir.path().to_path_buf(), "overlap.txt", &content)?;
    let output = temp_dir.path().join("out.csv");

    process(&input, &output, &PipelineConfig::default())?;

    let records = read_records(&output)?;
    let ticks: Vec<u64> = records.iter().map(|r| r.tick).collect();
    assert_eq!(ticks, vec![5, 5, 6, 6]);
    Ok(())
}

/// Test a non-default tick length
#[test]
fn test_process_withHalfSecondTicks_shouldUseConfiguredTickLength() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_export(&temp_dir.path().to_path_buf(), "session.txt")?;
    let output = temp_dir.path().join("out.csv");
    let config = PipelineConfig { tick_ms: 500, ..PipelineConfig::default() };

    let summary = process(&input, &output, &config)?;

    // laughter 1200..1400 floors to the empty interval 2..2
    assert_eq!(summary.max_tick, 6);
    assert_eq!(read_records(&output)?, vec![TimeSliceRecord::new(2, "Gaze@CHI", "ball")]);
    Ok(())
}

/// Test that nothing left to expand is an explicit error
#[test]
fn test_process_withOnlyBrokenTimestamps_shouldReturnNoData() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = common::export_line("Gaze@CHI", "bad", "worse", "x", "ball");
    let input = common::create_test_file(&temp_dir.path().to_path_buf(), "broken.txt", &content)?;
    let output = temp_dir.path().join("out.csv");

    let err = process(&input, &output, &PipelineConfig::default()).unwrap_err();

    assert!(matches!(err, AnnotationError::NoData));
    assert!(!output.exists());
    Ok(())
}

/// Test that an empty export is no data as well
#[test]
fn test_process_withEmptyExport_shouldReturnNoData() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(&temp_dir.path().to_path_buf(), "empty.txt", "")?;

    let err = process(&input, temp_dir.path().join("out.csv"), &PipelineConfig::default()).unwrap_err();
    assert!(matches!(err, AnnotationError::NoData));
    Ok(())
}
