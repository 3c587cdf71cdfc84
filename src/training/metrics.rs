use std::collections::BTreeSet;

// @module: Classification quality metrics

/// Accuracy plus support-weighted precision and F1
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QualityMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub f1: f64,
}

/// Compute quality metrics of predictions against true classes.
///
/// Per-class precision and F1 are averaged with weights equal to each class's
/// support among the targets; an undefined ratio (zero denominator) counts as 0.
/// Classes are the union of predicted and true labels. Empty input yields zeros.
pub fn quality_metrics(preds: &[usize], targets: &[usize]) -> QualityMetrics {
    let n = preds.len().min(targets.len());
    if n == 0 {
        return QualityMetrics::default();
    }
    let pairs = || preds.iter().zip(targets).take(n);

    let correct = pairs().filter(|(p, t)| p == t).count();
    let accuracy = correct as f64 / n as f64;

    let classes: BTreeSet<usize> = pairs().flat_map(|(&p, &t)| [p, t]).collect();

    let mut weighted_precision = 0.0;
    let mut weighted_f1 = 0.0;
    for class in classes {
        let true_positive = pairs().filter(|&(&p, &t)| p == class && t == class).count() as f64;
        let predicted = pairs().filter(|&(&p, _)| p == class).count() as f64;
        let support = pairs().filter(|&(_, &t)| t == class).count() as f64;

        let precision = ratio(true_positive, predicted);
        let recall = ratio(true_positive, support);
        let f1 = ratio(2.0 * precision * recall, precision + recall);

        weighted_precision += precision * support;
        weighted_f1 += f1 * support;
    }

    QualityMetrics {
        accuracy,
        precision: weighted_precision / n as f64,
        f1: weighted_f1 / n as f64,
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 { 0.0 } else { numerator / denominator }
}
