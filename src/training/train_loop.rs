use log::{debug, info};

use crate::errors::TrainingError;
use crate::training::heads::{Head, HeadLogits, HeadTargets, TrainingBatch};
use crate::training::model::{Criterion, MultiHeadModel};

// @module: One pass of training over a loader

/// Loss statistics of one training pass
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrainSummary {
    /// Number of batches seen
    pub batches: usize,
    /// Mean of the summed per-batch losses
    pub mean_loss: f32,
    /// Summed loss of the final batch
    pub last_loss: f32,
}

/// Loss of one head, checking the model and batch agree on its shape
pub(crate) fn head_loss<C: Criterion + ?Sized>(
    criterion: &C,
    head: Head,
    logits: &HeadLogits,
    targets: &HeadTargets,
) -> Result<f32, TrainingError> {
    let head_logits = logits.get(head).ok_or(TrainingError::MissingLogits(head.name()))?;
    let head_targets = targets.get(head).ok_or(TrainingError::MissingTargets(head.name()))?;

    if head_logits.len() != head_targets.len() {
        return Err(TrainingError::ShapeMismatch {
            head: head.name(),
            logits: head_logits.len(),
            targets: head_targets.len(),
        });
    }
    criterion.loss(head_logits, head_targets)
}

/// Train the model for one pass over `loader`.
///
/// Each batch's loss is the sum of the gaze and laughter head losses, plus the
/// gaze-relation head loss when `with_gaze_relation` is set; the model is then
/// updated with that sum.
pub fn train_loop<'a, X, M, C, I>(
    model: &mut M,
    loader: I,
    criterion: &C,
    with_gaze_relation: bool,
) -> Result<TrainSummary, TrainingError>
where
    X: 'a,
    M: MultiHeadModel<X> + ?Sized,
    C: Criterion + ?Sized,
    I: IntoIterator<Item = &'a TrainingBatch<X>>,
{
    let heads = Head::active(with_gaze_relation);
    let mut summary = TrainSummary::default();
    let mut total_loss = 0.0f32;

    for batch in loader {
        let logits = model.forward(&batch.inputs)?;

        let mut loss = 0.0f32;
        for &head in heads {
            loss += head_loss(criterion, head, &logits, &batch.targets)?;
        }

        model.update(&batch.inputs, &batch.targets, loss)?;

        summary.batches += 1;
        summary.last_loss = loss;
        total_loss += loss;
        debug!("Batch {}: loss {:.4}", summary.batches, loss);
    }

    if summary.batches > 0 {
        summary.mean_loss = total_loss / summary.batches as f32;
    }
    info!("Trained on {} batches, mean loss {:.4}", summary.batches, summary.mean_loss);
    Ok(summary)
}
