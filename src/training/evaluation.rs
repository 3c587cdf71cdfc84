use log::info;

use crate::errors::TrainingError;
use crate::training::heads::{Head, TrainingBatch};
use crate::training::metrics::{quality_metrics, QualityMetrics};
use crate::training::model::{argmax, Criterion, MultiHeadModel};
use crate::training::train_loop::head_loss;

// @module: Evaluation of the model on a held-out loader

/// Loss and quality figures for one evaluation pass
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EvaluationReport {
    /// Summed head losses averaged over batches
    pub avg_loss: f32,
    /// Gaze loss of the final batch
    pub gaze_loss: f32,
    /// Laughter loss of the final batch
    pub laughter_loss: f32,
    /// Gaze-relation loss of the final batch, when that head is evaluated
    pub gaze_relation_loss: Option<f32>,
    pub gaze: QualityMetrics,
    pub laughter: QualityMetrics,
}

/// Evaluate the model on every batch of `loader` without updating it.
///
/// With `with_gaze_relation` the gaze-relation loss is part of the total; its
/// predictions are not scored.
pub fn evaluation_loop<'a, X, M, C, I>(
    model: &M,
    loader: I,
    criterion: &C,
    with_gaze_relation: bool,
) -> Result<EvaluationReport, TrainingError>
where
    X: 'a,
    M: MultiHeadModel<X> + ?Sized,
    C: Criterion + ?Sized,
    I: IntoIterator<Item = &'a TrainingBatch<X>>,
{
    let mut report = EvaluationReport::default();
    let mut total_loss = 0.0f32;
    let mut batches = 0usize;

    let mut gaze_preds = Vec::new();
    let mut gaze_targets = Vec::new();
    let mut laughter_preds = Vec::new();
    let mut laughter_targets = Vec::new();

    for batch in loader {
        let logits = model.forward(&batch.inputs)?;

        report.gaze_loss = head_loss(criterion, Head::Gaze, &logits, &batch.targets)?;
        report.laughter_loss = head_loss(criterion, Head::Laughter, &logits, &batch.targets)?;
        let mut loss = report.gaze_loss + report.laughter_loss;

        if with_gaze_relation {
            let relation_loss = head_loss(criterion, Head::GazeRelation, &logits, &batch.targets)?;
            report.gaze_relation_loss = Some(relation_loss);
            loss += relation_loss;
        }
        total_loss += loss;
        batches += 1;

        gaze_targets.extend_from_slice(&batch.targets.gaze);
        gaze_preds.extend(logits.gaze.iter().map(|row| argmax(row)));
        laughter_targets.extend_from_slice(&batch.targets.laughter);
        laughter_preds.extend(logits.laughter.iter().map(|row| argmax(row)));
    }

    if batches == 0 {
        return Err(TrainingError::EmptyLoader);
    }

    report.avg_loss = total_loss / batches as f32;
    report.gaze = quality_metrics(&gaze_preds, &gaze_targets);
    report.laughter = quality_metrics(&laughter_preds, &laughter_targets);

    info!(
        "Evaluation: loss {:.4}, gaze acc {:.3} f1 {:.3}, laughter acc {:.3} f1 {:.3}",
        report.avg_loss, report.gaze.accuracy, report.gaze.f1, report.laughter.accuracy, report.laughter.f1
    );
    Ok(report)
}
