use log::debug;

use crate::app_config::SplitConfig;
use crate::dataset::frames::{Record, TickFrame};
use crate::errors::DatasetError;

// @module: Partition-wise train/validation/test split

// @const: Keys predicted by the classifier heads
pub const TARGET_KEYS: [&str; 3] = ["Laughter@CHI", "Gaze@CHI", "GazeRelation"];

/// Train/validation/test subsets, order preserved
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Partitions<T> {
    pub train: Vec<T>,
    pub validation: Vec<T>,
    pub test: Vec<T>,
}

/// Inputs and targets of each subset
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PreparedDataset {
    pub x_train: Vec<TickFrame>,
    pub y_train: Vec<Record>,
    pub x_validation: Vec<TickFrame>,
    pub y_validation: Vec<Record>,
    pub x_test: Vec<TickFrame>,
    pub y_test: Vec<Record>,
}

/// Splits a time-ordered dataset part by part.
///
/// The data is cut into `n_parts` contiguous parts (the last one absorbs the
/// remainder); each part contributes its first `train_size` share to training,
/// the next `val_size` share to validation and the rest to test.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSplit {
    n_parts: usize,
    train_size: f64,
    val_size: f64,
}

impl Default for DatasetSplit {
    fn default() -> Self {
        Self { n_parts: 4, train_size: 0.5, val_size: 0.25 }
    }
}

impl DatasetSplit {
    pub fn new(n_parts: usize, train_size: f64, val_size: f64) -> Result<Self, DatasetError> {
        if n_parts == 0 {
            return Err(DatasetError::InvalidSplit("n_parts must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&train_size) || !(0.0..=1.0).contains(&val_size) {
            return Err(DatasetError::InvalidSplit(format!(
                "sizes must be within [0, 1], got train {} and validation {}",
                train_size, val_size
            )));
        }
        if train_size + val_size > 1.0 {
            return Err(DatasetError::InvalidSplit(format!(
                "train and validation sizes add up to {}",
                train_size + val_size
            )));
        }
        Ok(Self { n_parts, train_size, val_size })
    }

    pub fn from_config(config: &SplitConfig) -> Result<Self, DatasetError> {
        Self::new(config.n_parts, config.train_size, config.val_size)
    }

    /// Split a dataset into train, validation and test subsets
    pub fn split<T: Clone>(&self, dataset: &[T]) -> Partitions<T> {
        let n = dataset.len();
        let part_size = n / self.n_parts;
        let mut partitions = Partitions {
            train: Vec::new(),
            validation: Vec::new(),
            test: Vec::new(),
        };

        for i in 0..self.n_parts {
            let start = i * part_size;
            let end = if i < self.n_parts - 1 { (i + 1) * part_size } else { n };
            let part = &dataset[start..end];

            let n_train = (part.len() as f64 * self.train_size) as usize;
            let n_val = (part.len() as f64 * self.val_size) as usize;

            partitions.train.extend_from_slice(&part[..n_train]);
            partitions.validation.extend_from_slice(&part[n_train..n_train + n_val]);
            partitions.test.extend_from_slice(&part[n_train + n_val..]);
        }

        debug!(
            "Split {} samples into {} train, {} validation, {} test",
            n,
            partitions.train.len(),
            partitions.validation.len(),
            partitions.test.len()
        );
        partitions
    }

    /// Separate target keys from input features
    pub fn features_and_targets(&self, frames: &[TickFrame]) -> (Vec<TickFrame>, Vec<Record>) {
        frames
            .iter()
            .map(|frame| {
                let mut input = TickFrame::new(frame.tick);
                let mut target = Record::new();
                for (key, value) in &frame.values {
                    if TARGET_KEYS.contains(&key.as_str()) {
                        target.insert(key.clone(), value.clone());
                    } else {
                        input.values.insert(key.clone(), value.clone());
                    }
                }
                (input, target)
            })
            .unzip()
    }

    /// Split, then separate features from targets in every subset
    pub fn run(&self, frames: &[TickFrame]) -> PreparedDataset {
        let Partitions { train, validation, test } = self.split(frames);

        let (x_train, y_train) = self.features_and_targets(&train);
        let (x_validation, y_validation) = self.features_and_targets(&validation);
        let (x_test, y_test) = self.features_and_targets(&test);

        PreparedDataset {
            x_train,
            y_train,
            x_validation,
            y_validation,
            x_test,
            y_test,
        }
    }
}
