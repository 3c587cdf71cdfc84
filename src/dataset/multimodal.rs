use std::collections::BTreeSet;

use crate::errors::DatasetError;

// @module: Indexable dataset of (inputs, targets) pairs

/// Paired inputs and targets, addressed by index
#[derive(Debug, Clone, PartialEq)]
pub struct MultimodalDataset<X, Y> {
    inputs: Vec<X>,
    targets: Vec<Y>,
}

/// A borrowed slice of consecutive samples
#[derive(Debug, PartialEq)]
pub struct Batch<'a, X, Y> {
    pub inputs: &'a [X],
    pub targets: &'a [Y],
}

impl<X, Y> MultimodalDataset<X, Y> {
    pub fn new(inputs: Vec<X>, targets: Vec<Y>) -> Result<Self, DatasetError> {
        if inputs.len() != targets.len() {
            return Err(DatasetError::LengthMismatch {
                inputs: inputs.len(),
                targets: targets.len(),
            });
        }
        Ok(Self { inputs, targets })
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<(&X, &Y)> {
        Some((self.inputs.get(index)?, self.targets.get(index)?))
    }

    pub fn inputs(&self) -> &[X] {
        &self.inputs
    }

    pub fn targets(&self) -> &[Y] {
        &self.targets
    }

    /// Consecutive batches of `batch_size` samples; the last one may be shorter
    pub fn batches(&self, batch_size: usize) -> Result<impl Iterator<Item = Batch<'_, X, Y>>, DatasetError> {
        if batch_size == 0 {
            return Err(DatasetError::ZeroBatchSize);
        }
        Ok(self
            .inputs
            .chunks(batch_size)
            .zip(self.targets.chunks(batch_size))
            .map(|(inputs, targets)| Batch { inputs, targets }))
    }
}

/// Maps string labels to contiguous class indices.
///
/// Classes are the sorted unique labels seen at fit time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn fit<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let classes = labels
            .into_iter()
            .map(|label| label.as_ref().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        Self { classes }
    }

    pub fn encode(&self, label: &str) -> Result<usize, DatasetError> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(label))
            .map_err(|_| DatasetError::UnknownLabel(label.to_string()))
    }

    pub fn decode(&self, index: usize) -> Option<&str> {
        self.classes.get(index).map(String::as_str)
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}
