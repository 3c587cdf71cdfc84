use crate::errors::TrainingError;
use crate::training::heads::{HeadLogits, HeadTargets};

// @module: Model and loss seams

/// A classifier producing one logit row per sample for each head.
///
/// Parameter updates (gradients, optimizer state) are the implementation's
/// business; the loops only hand over the batch and its summed loss.
pub trait MultiHeadModel<X> {
    /// Score a batch
    fn forward(&self, inputs: &[X]) -> Result<HeadLogits, TrainingError>;

    /// Apply one optimisation step for a batch whose summed loss is `loss`
    fn update(&mut self, inputs: &[X], targets: &HeadTargets, loss: f32) -> Result<(), TrainingError>;
}

/// Loss over one head of one batch
pub trait Criterion {
    fn loss(&self, logits: &[Vec<f32>], targets: &[usize]) -> Result<f32, TrainingError>;
}

/// Mean softmax cross-entropy
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossEntropyLoss;

impl Criterion for CrossEntropyLoss {
    fn loss(&self, logits: &[Vec<f32>], targets: &[usize]) -> Result<f32, TrainingError> {
        if logits.is_empty() {
            return Ok(0.0);
        }

        let mut total = 0.0f32;
        for (row, &target) in logits.iter().zip(targets) {
            if target >= row.len() {
                return Err(TrainingError::InvalidTarget { target, classes: row.len() });
            }
            // log-sum-exp with the row maximum factored out
            let max = row.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            let log_sum = row.iter().map(|v| (v - max).exp()).sum::<f32>().ln() + max;
            total += log_sum - row[target];
        }
        Ok(total / logits.len() as f32)
    }
}

/// Index of the largest score; the first one wins ties
pub fn argmax(row: &[f32]) -> usize {
    row.iter()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |(best, best_value), (index, &value)| {
            if value > best_value { (index, value) } else { (best, best_value) }
        })
        .0
}
