/*!
 * Error types for the annotrack application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while parsing a `HH:MM:SS.mmm` timestamp
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// The string does not have the `HH:MM:SS.mmm` shape
    #[error("Invalid timestamp format: {0}")]
    InvalidFormat(String),

    /// One of the numeric components failed to parse
    #[error("Invalid {component} in timestamp: {value}")]
    InvalidComponent {
        /// Which component failed (hours, minutes, ...)
        component: &'static str,
        /// The timestamp text as given
        value: String,
    },
}

/// Errors that can occur in the annotation-to-timeline pipeline
#[derive(Error, Debug)]
pub enum AnnotationError {
    /// A non-blank line of the export has too few tab-separated columns
    #[error("Malformed row at line {line}: expected at least {expected} columns, found {columns}")]
    MalformedRow {
        /// 1-based line number in the source
        line: usize,
        /// Number of columns found
        columns: usize,
        /// Number of columns required
        expected: usize,
    },

    /// Nothing was left to expand into time slices
    #[error("No data to expand: no annotation rows remain after filtering and normalization")]
    NoData,

    /// The per-tick CSV could not be interpreted
    #[error("Invalid record at line {line}: {message}")]
    InvalidRecord {
        /// 1-based line number in the source
        line: usize,
        /// What was wrong
        message: String,
    },

    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The file involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl AnnotationError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

/// Errors raised while building, splitting or batching datasets
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetError {
    /// Split proportions or part count are out of range
    #[error("Invalid split configuration: {0}")]
    InvalidSplit(String),

    /// A batch size of zero was requested
    #[error("Batch size must be greater than zero")]
    ZeroBatchSize,

    /// A label was not seen when the encoder was fitted
    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    /// Inputs and targets do not pair up
    #[error("Dataset has {inputs} inputs but {targets} targets")]
    LengthMismatch {
        /// Number of input records
        inputs: usize,
        /// Number of target records
        targets: usize,
    },
}

/// Errors raised by the training and evaluation loops
#[derive(Error, Debug)]
pub enum TrainingError {
    /// The loader produced no batches
    #[error("Data loader is empty")]
    EmptyLoader,

    /// The model did not produce logits for a head the loop needs
    #[error("Model produced no logits for the {0} head")]
    MissingLogits(&'static str),

    /// The batch carries no targets for a head the loop needs
    #[error("Batch has no targets for the {0} head")]
    MissingTargets(&'static str),

    /// Logits and targets disagree on the batch size
    #[error("Shape mismatch on the {head} head: {logits} logit rows for {targets} targets")]
    ShapeMismatch {
        /// Head name
        head: &'static str,
        /// Number of logit rows
        logits: usize,
        /// Number of targets
        targets: usize,
    },

    /// A target class index is outside the logit row
    #[error("Target class {target} out of range for {classes} classes")]
    InvalidTarget {
        /// Offending class index
        target: usize,
        /// Width of the logit row
        classes: usize,
    },

    /// Error reported by the model implementation
    #[error("Model error: {0}")]
    Model(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the annotation pipeline
    #[error("Annotation error: {0}")]
    Annotation(#[from] AnnotationError),

    /// Error from dataset handling
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Error from training or evaluation
    #[error("Training error: {0}")]
    Training(#[from] TrainingError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
