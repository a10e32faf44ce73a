//! Input validation for tiering configuration and data.
//!
//! ## Purpose
//!
//! This module provides validation functions for clustering and outlier
//! parameters and for the data they run on. It checks requirements such as
//! non-empty input, enough records per cluster, finite values and
//! parameter bounds.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: The first violated constraint is reported; nothing is
//!   collected or retried.
//! * **Build time vs run time**: Parameter checks run once in `build()`;
//!   data checks run on every dataset.
//! * Value checks are generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Parameter Bounds**: Enforces constraints like `k >= 1` and finite thresholds.
//! * **Finite Checks**: Ensures feature values are finite (no NaN/Inf).
//! * **Covariance Requirements**: Ensures at least 2 records per covariance estimate.
//!
//! ## Invariants
//!
//! * Errors name the offending parameter, column, row or cluster.
//!
//! ## Non-goals
//!
//! * This module does not clamp or repair invalid values (the zero-std
//!   clamp lives in `Standardization`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::ToString;
#[cfg(feature = "std")]
use std::string::ToString;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::dataset::Dataset;
use crate::primitives::errors::TierError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for tiering configuration and input data.
///
/// Provides static methods for validating parameters and input data. All
/// methods return `Result<(), TierError>` and fail fast upon identifying the
/// first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate that a dataset has at least one record.
    pub fn validate_dataset<T: Float>(dataset: &Dataset<T>) -> Result<(), TierError> {
        if dataset.is_empty() {
            return Err(TierError::EmptyInput);
        }
        Ok(())
    }

    /// Validate a single feature value for finiteness.
    pub fn validate_feature_value<T: Float>(
        val: T,
        column: &str,
        row: usize,
    ) -> Result<(), TierError> {
        if !val.is_finite() {
            return Err(TierError::InvalidFeatureValue {
                column: column.to_string(),
                row,
                value: format!("{}", val.to_f64().unwrap_or(f64::NAN)),
            });
        }
        Ok(())
    }

    /// Validate that enough records are available for a covariance estimate.
    pub fn validate_sample_size(
        got: usize,
        min: usize,
        cluster: Option<usize>,
    ) -> Result<(), TierError> {
        if got < min {
            return Err(TierError::InsufficientSampleSize { cluster, got, min });
        }
        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the number of clusters against the number of records.
    pub fn validate_cluster_count(k: usize, available: usize) -> Result<(), TierError> {
        if k == 0 {
            return Err(TierError::InvalidClusterCount(k));
        }
        if available < k {
            return Err(TierError::InsufficientData {
                requested: k,
                available,
            });
        }
        Ok(())
    }

    /// Validate the k-means iteration cap.
    ///
    /// # Notes
    ///
    /// * At least one iteration is needed to move the initial centroids.
    /// * Maximum of 10000 iterations to prevent excessive computation.
    pub fn validate_iterations(iterations: usize) -> Result<(), TierError> {
        const MAX_ITERATIONS: usize = 10_000;
        if iterations == 0 || iterations > MAX_ITERATIONS {
            return Err(TierError::InvalidIterations(iterations));
        }
        Ok(())
    }

    /// Validate the k-means convergence tolerance.
    pub fn validate_tolerance(tol: f64) -> Result<(), TierError> {
        if !tol.is_finite() || tol < 0.0 {
            return Err(TierError::InvalidTolerance(tol));
        }
        Ok(())
    }

    /// Validate an outlier threshold.
    pub fn validate_threshold<T: Float>(threshold: T) -> Result<(), TierError> {
        if !threshold.is_finite() || threshold < T::zero() {
            return Err(TierError::InvalidThreshold(
                threshold.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the neighbour count for nearest-neighbour scoring.
    pub fn validate_neighbors(neighbors: usize) -> Result<(), TierError> {
        if neighbors == 0 {
            return Err(TierError::InvalidNeighbors(neighbors));
        }
        Ok(())
    }

    /// Validate a percentile in `[0, 1]`.
    pub fn validate_percentile<T: Float>(p: T) -> Result<(), TierError> {
        if !p.is_finite() || p < T::zero() || p > T::one() {
            return Err(TierError::InvalidPercentile(p.to_f64().unwrap_or(f64::NAN)));
        }
        Ok(())
    }

    /// Validate standardization parameters.
    pub fn validate_scale<T: Float>(mean: T, std: T) -> Result<(), TierError> {
        if !mean.is_finite() || !std.is_finite() || std < T::zero() {
            return Err(TierError::InvalidScale {
                mean: mean.to_f64().unwrap_or(f64::NAN),
                std: std.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), TierError> {
        if let Some(param) = duplicate_param {
            return Err(TierError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
