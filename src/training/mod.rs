/*!
 * Supervised training and evaluation of a multi-head classifier.
 *
 * The network itself and its optimizer stay behind the `MultiHeadModel` trait;
 * this module drives it batch by batch.
 *
 * - `heads`: Head identifiers, per-batch targets/logits and target encoding
 * - `model`: Model and criterion traits, cross-entropy loss
 * - `train_loop`: One training epoch over a loader
 * - `evaluation`: Loss and quality metrics over a loader
 * - `metrics`: Accuracy, weighted precision and weighted F1
 */

pub use self::evaluation::{evaluation_loop, EvaluationReport};
pub use self::heads::{Head, HeadEncoders, HeadLogits, HeadTargets, TrainingBatch};
pub use self::metrics::{quality_metrics, QualityMetrics};
pub use self::model::{Criterion, CrossEntropyLoss, MultiHeadModel};
pub use self::train_loop::{train_loop, TrainSummary};

pub mod evaluation;
pub mod heads;
pub mod metrics;
pub mod model;
pub mod train_loop;
