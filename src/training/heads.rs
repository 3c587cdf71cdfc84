use std::fmt;

use crate::dataset::{LabelEncoder, MultimodalDataset, Record};
use crate::errors::DatasetError;

// @module: Classifier heads and the per-batch data they consume

// @const: Label used when a frame carries no value for a target key
pub const MISSING_LABEL: &str = "none";

/// One output of the multi-head classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Head {
    Gaze,
    Laughter,
    GazeRelation,
}

impl Head {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gaze => "gaze",
            Self::Laughter => "laughter",
            Self::GazeRelation => "gaze relation",
        }
    }

    /// Tier or column holding the head's label
    pub fn target_key(&self) -> &'static str {
        match self {
            Self::Gaze => "Gaze@CHI",
            Self::Laughter => "Laughter@CHI",
            Self::GazeRelation => "GazeRelation",
        }
    }

    /// Heads trained together
    pub fn active(with_gaze_relation: bool) -> &'static [Head] {
        if with_gaze_relation {
            &[Head::Gaze, Head::Laughter, Head::GazeRelation]
        } else {
            &[Head::Gaze, Head::Laughter]
        }
    }
}

impl fmt::Display for Head {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Class indices of one batch, per head
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeadTargets {
    pub gaze: Vec<usize>,
    pub laughter: Vec<usize>,
    pub gaze_relation: Option<Vec<usize>>,
}

impl HeadTargets {
    pub fn get(&self, head: Head) -> Option<&[usize]> {
        match head {
            Head::Gaze => Some(self.gaze.as_slice()),
            Head::Laughter => Some(self.laughter.as_slice()),
            Head::GazeRelation => self.gaze_relation.as_deref(),
        }
    }
}

/// Raw scores of one batch, one row per sample, per head
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeadLogits {
    pub gaze: Vec<Vec<f32>>,
    pub laughter: Vec<Vec<f32>>,
    pub gaze_relation: Option<Vec<Vec<f32>>>,
}

impl HeadLogits {
    pub fn get(&self, head: Head) -> Option<&[Vec<f32>]> {
        match head {
            Head::Gaze => Some(self.gaze.as_slice()),
            Head::Laughter => Some(self.laughter.as_slice()),
            Head::GazeRelation => self.gaze_relation.as_deref(),
        }
    }
}

/// Inputs of one batch with their encoded targets
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingBatch<X> {
    pub inputs: Vec<X>,
    pub targets: HeadTargets,
}

/// Label encoders for every head
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeadEncoders {
    pub gaze: LabelEncoder,
    pub laughter: LabelEncoder,
    pub gaze_relation: LabelEncoder,
}

fn label<'a>(record: &'a Record, head: Head) -> &'a str {
    record.get(head.target_key()).map(String::as_str).unwrap_or(MISSING_LABEL)
}

impl HeadEncoders {
    /// Fit every encoder on the target records; missing keys count as [`MISSING_LABEL`]
    pub fn fit(targets: &[Record]) -> Self {
        Self {
            gaze: LabelEncoder::fit(targets.iter().map(|t| label(t, Head::Gaze))),
            laughter: LabelEncoder::fit(targets.iter().map(|t| label(t, Head::Laughter))),
            gaze_relation: LabelEncoder::fit(targets.iter().map(|t| label(t, Head::GazeRelation))),
        }
    }

    pub fn encoder(&self, head: Head) -> &LabelEncoder {
        match head {
            Head::Gaze => &self.gaze,
            Head::Laughter => &self.laughter,
            Head::GazeRelation => &self.gaze_relation,
        }
    }

    /// Encode the target records of one batch
    pub fn encode(&self, targets: &[Record], with_gaze_relation: bool) -> Result<HeadTargets, DatasetError> {
        let encode_head = |head: Head| -> Result<Vec<usize>, DatasetError> {
            targets
                .iter()
                .map(|t| self.encoder(head).encode(label(t, head)))
                .collect()
        };

        Ok(HeadTargets {
            gaze: encode_head(Head::Gaze)?,
            laughter: encode_head(Head::Laughter)?,
            gaze_relation: if with_gaze_relation {
                Some(encode_head(Head::GazeRelation)?)
            } else {
                None
            },
        })
    }

    /// Cut a dataset into encoded training batches
    pub fn batches<X: Clone>(
        &self,
        dataset: &MultimodalDataset<X, Record>,
        batch_size: usize,
        with_gaze_relation: bool,
    ) -> Result<Vec<TrainingBatch<X>>, DatasetError> {
        dataset
            .batches(batch_size)?
            .map(|batch| {
                Ok(TrainingBatch {
                    inputs: batch.inputs.to_vec(),
                    targets: self.encode(batch.targets, with_gaze_relation)?,
                })
            })
            .collect()
    }
}
