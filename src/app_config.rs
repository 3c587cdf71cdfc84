use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::annotation::normalizer::DEFAULT_TICK_MS;
use crate::annotation::scene_filter::DEFAULT_SCENE_TIER;
use crate::annotation::slicer::default_excluded_tiers;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Annotation pipeline settings
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Dataset split settings
    #[serde(default)]
    pub split: SplitConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings for the annotation-to-timeline pipeline
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PipelineConfig {
    // @field: Tick length in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    // @field: Tier whose intervals delimit valid analysis segments
    #[serde(default = "default_scene_tier")]
    pub scene_tier: String,

    // @field: Structural tiers never reported per tick
    #[serde(default = "default_excluded_tiers")]
    pub excluded_tiers: Vec<String>,

    // @field: Output file name used when none is given
    #[serde(default = "default_output_file_name")]
    pub output_file_name: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            scene_tier: default_scene_tier(),
            excluded_tiers: default_excluded_tiers(),
            output_file_name: default_output_file_name(),
        }
    }
}

/// Settings for the partition-wise train/validation/test split
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SplitConfig {
    /// Number of contiguous parts the dataset is cut into
    #[serde(default = "default_n_parts")]
    pub n_parts: usize,

    /// Fraction of each part used for training
    #[serde(default = "default_train_size")]
    pub train_size: f64,

    /// Fraction of each part used for validation; the rest is test
    #[serde(default = "default_val_size")]
    pub val_size: f64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            n_parts: default_n_parts(),
            train_size: default_train_size(),
            val_size: default_val_size(),
        }
    }
}

impl SplitConfig {
    /// Validate part count and proportions
    pub fn validate(&self) -> Result<()> {
        if self.n_parts == 0 {
            return Err(anyhow!("split.n_parts must be at least 1"));
        }
        for (name, value) in [("train_size", self.train_size), ("val_size", self.val_size)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(anyhow!("split.{} must be within [0, 1], got {}", name, value));
            }
        }
        if self.train_size + self.val_size > 1.0 {
            return Err(anyhow!(
                "split.train_size + split.val_size must not exceed 1, got {}",
                self.train_size + self.val_size
            ));
        }
        Ok(())
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_tick_ms() -> u64 {
    DEFAULT_TICK_MS
}

fn default_scene_tier() -> String {
    DEFAULT_SCENE_TIER.to_string()
}

fn default_output_file_name() -> String {
    "annotations_per_t.csv".to_string()
}

fn default_n_parts() -> usize {
    4
}

fn default_train_size() -> f64 {
    0.5
}

fn default_val_size() -> f64 {
    0.25
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.pipeline.tick_ms == 0 {
            return Err(anyhow!("pipeline.tick_ms must be greater than zero"));
        }
        if self.pipeline.scene_tier.trim().is_empty() {
            return Err(anyhow!("pipeline.scene_tier must not be empty"));
        }
        if self.pipeline.output_file_name.trim().is_empty() {
            return Err(anyhow!("pipeline.output_file_name must not be empty"));
        }
        self.split.validate()
    }

    /// Load the configuration file, creating it with defaults when absent
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;
        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            pipeline: PipelineConfig::default(),
            split: SplitConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
