//! Error types for volume-tier clustering and outlier detection.
//!
//! ## Purpose
//!
//! This module defines the single error enum returned by every fallible
//! operation in the crate. Errors are terminal for the current invocation:
//! nothing in the crate retries or logs them.
//!
//! ## Design notes
//!
//! * **Derived**: Display messages come from `thiserror`, which works without `std`.
//! * **Comparable**: `Clone` and `PartialEq` so tests can match exact variants.
//! * **Self-describing**: Variants carry the offending value, column or cluster id.
//!
//! ## Non-goals
//!
//! * This module does not translate errors into transport-level responses.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;

// External dependencies
use thiserror::Error;

/// Errors produced while partitioning, scoring or aggregating a dataset.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TierError {
    /// The dataset contains no records.
    #[error("Input dataset is empty")]
    EmptyInput,

    /// Fewer records than requested clusters.
    #[error("Cannot create {requested} clusters with only {available} data points")]
    InsufficientData {
        /// Requested number of clusters.
        requested: usize,
        /// Number of records available.
        available: usize,
    },

    /// The cluster count is zero.
    #[error("Invalid cluster count: {0} (must be at least 1)")]
    InvalidClusterCount(usize),

    /// Too few records to estimate a covariance matrix or score spread.
    #[error("{}", sample_size_message(.cluster, .got, .min))]
    InsufficientSampleSize {
        /// Canonical cluster id, or `None` for a whole-dataset computation.
        cluster: Option<usize>,
        /// Number of records available.
        got: usize,
        /// Minimum number of records required.
        min: usize,
    },

    /// A required feature is non-numeric or non-finite.
    #[error("Invalid feature value in column '{column}' at row {row}: {value}")]
    InvalidFeatureValue {
        /// Column holding the value.
        column: String,
        /// Zero-based row index.
        row: usize,
        /// Textual rendering of the rejected value.
        value: String,
    },

    /// A row does not match the schema defined by the first row.
    #[error("Schema mismatch at row {row}: {reason}")]
    SchemaMismatch {
        /// Zero-based row index.
        row: usize,
        /// What differs from the schema.
        reason: String,
    },

    /// A named column does not exist in the dataset.
    #[error("Unknown column: '{0}'")]
    UnknownColumn(String),

    /// Input could not be interpreted as a dataset.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Outlier threshold is negative or non-finite.
    #[error("Invalid threshold: {0} (must be >= 0 and finite)")]
    InvalidThreshold(f64),

    /// Iteration limit is zero or too large.
    #[error("Invalid max_iterations: {0} (must be in [1, 10000])")]
    InvalidIterations(usize),

    /// Convergence tolerance is negative or non-finite.
    #[error("Invalid tolerance: {0} (must be >= 0 and finite)")]
    InvalidTolerance(f64),

    /// Percentile outside the unit interval.
    #[error("Invalid percentile: {0} (must be in [0, 1])")]
    InvalidPercentile(f64),

    /// Standardization parameters cannot be applied.
    #[error("Invalid scale: mean={mean}, std={std} (mean must be finite, std must be >= 0 and finite)")]
    InvalidScale {
        /// Column mean.
        mean: f64,
        /// Column standard deviation.
        std: f64,
    },

    /// Neighbour count for nearest-neighbour scoring is zero.
    #[error("Invalid neighbors: {0} (must be at least 1)")]
    InvalidNeighbors(usize),

    /// Outlier strategy received the wrong number of feature columns.
    #[error("Method '{method}' requires {expected} feature columns, got {got}")]
    InvalidFeatureCount {
        /// Name of the outlier strategy.
        method: &'static str,
        /// Number of feature columns supplied.
        got: usize,
        /// Number of feature columns required.
        expected: usize,
    },

    /// A builder parameter was set more than once.
    #[error(
        "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
    )]
    DuplicateParameter {
        /// Name of the parameter.
        parameter: &'static str,
    },

    /// A linear algebra routine failed to produce a result.
    #[error("Numerical failure: {0}")]
    NumericalFailure(&'static str),
}

fn sample_size_message(cluster: &Option<usize>, got: &usize, min: &usize) -> String {
    match cluster {
        Some(id) => format!(
            "Too few records in cluster {}: got {}, need at least {}",
            id, got, min
        ),
        None => format!("Too few records: got {}, need at least {}", got, min),
    }
}
