use anyhow::{anyhow, Context, Result};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};

use crate::annotation::{self, export, PipelineSummary};
use crate::app_config::Config;
use crate::dataset::frames::{build_frames, write_frames};
use crate::dataset::{DatasetSplit, TickFrame};
use crate::file_utils::{FileManager, EXPORT_EXTENSIONS, PER_TICK_SUFFIX};

// @module: Application controller for annotation processing

/// Outcome of processing a folder of exports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Sizes of the subsets written by a split
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitSummary {
    pub train: usize,
    pub validation: usize,
    pub test: usize,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Default output for a single export: the configured file name
    pub fn default_output_path(&self) -> PathBuf {
        PathBuf::from(&self.config.pipeline.output_file_name)
    }

    /// Convert one export into a per-tick table
    pub fn run(&self, input_file: &Path, output_path: Option<&Path>) -> Result<PipelineSummary> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_path = output_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.default_output_path());

        let start_time = std::time::Instant::now();
        let summary = annotation::process(input_file, &output_path, &self.config.pipeline)
            .with_context(|| format!("Failed to process annotations from {}", input_file.display()))?;

        debug!(
            "{}: {} rows loaded, {} in scenes, {} normalized, {} records up to tick {} in {:?}",
            input_file.display(),
            summary.rows_loaded,
            summary.rows_in_scenes,
            summary.rows_normalized,
            summary.records_written,
            summary.max_tick,
            start_time.elapsed()
        );
        Ok(summary)
    }

    /// Convert every export found below a directory, writing `<stem>.per_t.csv`
    /// next to each. Existing outputs are skipped unless `force_overwrite` is set;
    /// a failing file is logged and does not stop the others.
    pub fn run_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<FolderSummary> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let exports = FileManager::find_files(input_dir, &EXPORT_EXTENSIONS)?;
        if exports.is_empty() {
            return Err(anyhow!("No annotation exports found in directory: {:?}", input_dir));
        }

        let folder_pb = ProgressBar::new(exports.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("=>-"));
        folder_pb.set_message("Processing files");

        let mut summary = FolderSummary::default();
        for export_file in &exports {
            let file_name = export_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            let output_dir = export_file.parent().unwrap_or(input_dir);
            let output_path = FileManager::generate_output_path(export_file, output_dir, PER_TICK_SUFFIX, "csv");

            if output_path.exists() && !force_overwrite {
                warn!("Skipping {}, output already exists (use -f to force overwrite)", file_name);
                summary.skipped += 1;
                folder_pb.inc(1);
                continue;
            }

            match self.run(export_file, Some(&output_path)) {
                Ok(_) => summary.processed += 1,
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.failed += 1;
                }
            }
            folder_pb.inc(1);
        }
        folder_pb.finish_with_message("Folder processing complete");

        let summary_message = format!(
            "Folder processing completed: {} processed, {} skipped, {} errors",
            summary.processed, summary.skipped, summary.failed
        );
        info!("{}", summary_message);

        let log_file_path = input_dir.join("annotrack.log");
        if let Err(e) = FileManager::append_to_log_file(&log_file_path, &summary_message) {
            warn!("Failed to write folder log: {}", e);
        }

        Ok(summary)
    }

    /// Split a per-tick table into train, validation and test frame files
    pub fn split(&self, per_tick_csv: &Path, output_dir: &Path, categorize: bool) -> Result<SplitSummary> {
        let records = export::read_records(per_tick_csv)
            .with_context(|| format!("Failed to read per-tick table {}", per_tick_csv.display()))?;
        let frames = build_frames(&records, categorize);

        let splitter = DatasetSplit::from_config(&self.config.split)?;
        let partitions = splitter.split(&frames);

        FileManager::ensure_dir(output_dir)?;
        let subsets: [(&str, &Vec<TickFrame>); 3] = [
            ("train.csv", &partitions.train),
            ("validation.csv", &partitions.validation),
            ("test.csv", &partitions.test),
        ];
        for (file_name, frames) in subsets {
            let path = output_dir.join(file_name);
            write_frames(frames, &path)?;
            info!("Wrote {} frames to {}", frames.len(), path.display());
        }

        Ok(SplitSummary {
            train: partitions.train.len(),
            validation: partitions.validation.len(),
            test: partitions.test.len(),
        })
    }
}
