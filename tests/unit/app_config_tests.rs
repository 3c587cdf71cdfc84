/*!
 * Tests for app configuration
 */

use std::fs;
use anyhow::Result;
use annotrack::app_config::{Config, LogLevel, PipelineConfig, SplitConfig};
use crate::common;

/// Test the default values
#[test]
fn test_defaultConfig_shouldMatchPipelineDefaults() {
    let config = Config::default();

    assert_eq!(config.pipeline.tick_ms, 100);
    assert_eq!(config.pipeline.scene_tier, "Scene");
    assert_eq!(config.pipeline.excluded_tiers, vec!["Round", "Scene", "Comment"]);
    assert_eq!(config.pipeline.output_file_name, "annotations_per_t.csv");
    assert_eq!(config.split, SplitConfig { n_parts: 4, train_size: 0.5, val_size: 0.25 });
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test that a missing file is created with the defaults
#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;

    assert_eq!(config, Config::default());
    assert!(path.exists());
    let reloaded: Config = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(reloaded, config);
    Ok(())
}

/// Test that omitted fields fall back to their defaults
#[test]
fn test_loadOrCreate_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = r#"{ "pipeline": { "tick_ms": 40 }, "log_level": "debug" }"#;
    let path = common::create_test_file(&temp_dir.path().to_path_buf(), "conf.json", content)?;

    let config = Config::load_or_create(&path)?;

    assert_eq!(config.pipeline.tick_ms, 40);
    assert_eq!(config.pipeline.scene_tier, "Scene");
    assert_eq!(config.split, SplitConfig::default());
    assert_eq!(config.log_level, LogLevel::Debug);
    Ok(())
}

/// Test that broken JSON is an error, not a silent default
#[test]
fn test_loadOrCreate_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(&temp_dir.path().to_path_buf(), "conf.json", "{ not json")?;

    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

/// Test the validation rules
#[test]
fn test_validate_withBadValues_shouldFail() {
    let zero_tick = Config {
        pipeline: PipelineConfig { tick_ms: 0, ..PipelineConfig::default() },
        ..Config::default()
    };
    assert!(zero_tick.validate().is_err());

    let blank_scene = Config {
        pipeline: PipelineConfig { scene_tier: "  ".to_string(), ..PipelineConfig::default() },
        ..Config::default()
    };
    assert!(blank_scene.validate().is_err());

    let oversized = Config {
        split: SplitConfig { n_parts: 4, train_size: 0.9, val_size: 0.2 },
        ..Config::default()
    };
    assert!(oversized.validate().is_err());
}

/// Test log level mapping
#[test]
fn test_logLevelToLevelFilter_shouldMapEachLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
