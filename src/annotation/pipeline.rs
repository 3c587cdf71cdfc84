use std::path::{Path, PathBuf};
use log::info;

use crate::annotation::{export, loader, normalizer, scene_filter, slicer};
use crate::app_config::PipelineConfig;
use crate::errors::AnnotationError;

// @module: Loader -> scene filter -> normalizer -> expander -> export

/// Counts gathered while running the pipeline once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Rows read from the export
    pub rows_loaded: usize,
    /// Rows left after the scene filter (duplicates included)
    pub rows_in_scenes: usize,
    /// Rows left after normalization
    pub rows_normalized: usize,
    /// Largest end tick seen
    pub max_tick: u64,
    /// Records written to the output file
    pub records_written: usize,
    /// Absolute path of the output file
    pub output_path: PathBuf,
}

/// Convert an annotation export into a per-tick CSV table.
///
/// Re-running with the same input and configuration rewrites an identical file.
pub fn process<P1: AsRef<Path>, P2: AsRef<Path>>(
    input_path: P1,
    output_path: P2,
    config: &PipelineConfig,
) -> Result<PipelineSummary, AnnotationError> {
    let input_path = input_path.as_ref();
    let output_path = output_path.as_ref();

    let rows = loader::load_annotations(input_path)?;
    let rows_loaded = rows.len();

    let rows = scene_filter::filter_by_scene(rows, &config.scene_tier);
    let rows_in_scenes = rows.len();

    let annotations = normalizer::normalize(rows, config.tick_ms);
    let rows_normalized = annotations.len();

    let records = slicer::expand_slices(&annotations, &config.excluded_tiers)?;
    let max_tick = annotations.iter().map(|a| a.end_tick).max().unwrap_or_default();

    let records_written = export::export_records(&records, output_path)?;

    let resolved = output_path
        .canonicalize()
        .map_err(|e| AnnotationError::io(output_path, e))?;
    info!("Per-tick annotations saved to {}", resolved.display());

    Ok(PipelineSummary {
        rows_loaded,
        rows_in_scenes,
        rows_normalized,
        max_tick,
        records_written,
        output_path: resolved,
    })
}
