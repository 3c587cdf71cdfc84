/*!
 * Annotation-to-timeline conversion pipeline.
 *
 * Turns a time-coded annotation export into a long per-tick table. The stages
 * run strictly in order:
 *
 * - `loader`: Tab-delimited export reading and column selection
 * - `scene_filter`: Restriction to rows inside `Scene` intervals
 * - `normalizer`: Timestamp parsing, tick derivation and text cleanup
 * - `slicer`: Expansion of intervals into one record per active tick
 * - `export`: CSV persistence of the per-tick records
 * - `pipeline`: The `process` entry point chaining all of the above
 */

// Re-export main types for easier usage
pub use self::model::{AnnotationRow, NormalizedAnnotation, SceneInterval, TimeSliceRecord};
pub use self::pipeline::{process, PipelineSummary};

// Submodules
pub mod export;
pub mod loader;
pub mod model;
pub mod normalizer;
pub mod pipeline;
pub mod scene_filter;
pub mod slicer;
