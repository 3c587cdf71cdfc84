/*!
 * # annotrack - annotation timeline toolkit
 *
 * A Rust library for turning time-coded behaviour annotation exports (gaze,
 * facial expression, laughter, utterances) into per-tick tables and feeding
 * them to a multi-head classifier.
 *
 * ## Features
 *
 * - Load tab-delimited annotation exports
 * - Restrict annotations to `Scene` windows
 * - Expand annotation intervals into 100 ms ticks
 * - Categorise raw gaze, facial and utterance values
 * - Split per-tick frames into train/validation/test subsets
 * - Drive training and evaluation of a multi-head model
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `annotation`: Annotation-to-timeline pipeline:
 *   - `annotation::loader`: Export reading
 *   - `annotation::scene_filter`: Scene window filtering
 *   - `annotation::normalizer`: Timestamp parsing and text cleanup
 *   - `annotation::slicer`: Per-tick expansion
 *   - `annotation::export`: CSV persistence
 * - `categorisation`: Static value-to-category tables
 * - `dataset`: Frames, splitting and batching
 * - `training`: Training and evaluation loops, quality metrics
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod annotation;
pub mod categorisation;
pub mod dataset;
pub mod training;
pub mod file_utils;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::{Config, PipelineConfig, SplitConfig};
pub use annotation::{process, AnnotationRow, NormalizedAnnotation, PipelineSummary, TimeSliceRecord};
pub use app_controller::Controller;
pub use errors::{AnnotationError, AppError, DatasetError, TimestampError, TrainingError};
