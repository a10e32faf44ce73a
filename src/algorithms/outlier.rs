//! Outlier-scoring strategies.
//!
//! ## Purpose
//!
//! This module implements the interchangeable outlier detectors. Each
//! strategy turns a row-major feature matrix into one score per record and
//! flags the records whose score exceeds the strategy's threshold.
//!
//! ## Design notes
//!
//! * **Strategy Pattern**: `OutlierMethod` selects the detector; callers
//!   never branch on the algorithm themselves.
//! * **Mahalanobis** (default): covariance-scaled distance from the sample
//!   mean, using the SVD pseudo-inverse so singular covariance is tolerated.
//! * **Regression**: absolute OLS residual of the second feature on the
//!   first, in units of the residuals' population standard deviation.
//! * **NearestNeighbors**: z-score of the mean distance to the nearest
//!   neighbours.
//! * **Purity**: Scoring never mutates its input; `flag` returns a copy.
//!
//! ## Key concepts
//!
//! * **Score**: Unitless deviation of a record; `flag = score > threshold`.
//! * **Zero spread**: When every record is identical (zero covariance or
//!   zero residual spread) every score is zero and nothing is flagged.
//!
//! ## Invariants
//!
//! * Scores are finite and non-negative for Mahalanobis and Regression.
//! * At least 2 records are required by every strategy.
//!
//! ## Non-goals
//!
//! * This module does not split data by cluster (handled by the engine).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::cmp::Ordering::Equal;

// Internal dependencies
use crate::engine::validator::Validator;
use crate::math::distance::{euclidean, mahalanobis};
use crate::math::linalg::FloatLinalg;
use crate::math::stats::{covariance_matrix, mean, mean_vector, population_std};
use crate::primitives::dataset::Dataset;
use crate::primitives::errors::TierError;

// ============================================================================
// Outlier Method
// ============================================================================

/// Outlier detection strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutlierMethod<T> {
    /// Mahalanobis distance from the sample mean.
    Mahalanobis {
        /// Distance above which a record is an outlier.
        threshold: T,
    },

    /// Absolute OLS residual relative to the residual spread (exactly 2 features: x, y).
    Regression {
        /// Multiple of the residual standard deviation.
        threshold: T,
    },

    /// Z-score of the mean distance to the nearest neighbours.
    NearestNeighbors {
        /// Number of neighbours averaged per record.
        neighbors: usize,
        /// Z-score above which a record is an outlier.
        threshold: T,
    },
}

impl<T: FloatLinalg> Default for OutlierMethod<T> {
    fn default() -> Self {
        Self::mahalanobis()
    }
}

impl<T: FloatLinalg> OutlierMethod<T> {
    // ========================================================================
    // Constants
    // ========================================================================

    /// Default Mahalanobis distance threshold.
    pub const DEFAULT_MAHALANOBIS_THRESHOLD: f64 = 2.0;

    /// Default residual multiple for regression scoring.
    pub const DEFAULT_REGRESSION_THRESHOLD: f64 = 2.0;

    /// Default neighbour count.
    pub const DEFAULT_NEIGHBORS: usize = 5;

    /// Default z-score threshold for nearest-neighbour scoring.
    pub const DEFAULT_NEIGHBOR_THRESHOLD: f64 = 1.0;

    /// Minimum records for any strategy.
    pub const MIN_RECORDS: usize = 2;

    // ========================================================================
    // Constructors
    // ========================================================================

    /// Mahalanobis scoring with the default threshold.
    pub fn mahalanobis() -> Self {
        Self::Mahalanobis {
            threshold: T::from(Self::DEFAULT_MAHALANOBIS_THRESHOLD).unwrap(),
        }
    }

    /// Regression scoring with the default threshold.
    pub fn regression() -> Self {
        Self::Regression {
            threshold: T::from(Self::DEFAULT_REGRESSION_THRESHOLD).unwrap(),
        }
    }

    /// Nearest-neighbour scoring with the default neighbour count and threshold.
    pub fn nearest_neighbors() -> Self {
        Self::NearestNeighbors {
            neighbors: Self::DEFAULT_NEIGHBORS,
            threshold: T::from(Self::DEFAULT_NEIGHBOR_THRESHOLD).unwrap(),
        }
    }

    /// Same strategy with a different threshold.
    pub fn with_threshold(self, threshold: T) -> Self {
        match self {
            Self::Mahalanobis { .. } => Self::Mahalanobis { threshold },
            Self::Regression { .. } => Self::Regression { threshold },
            Self::NearestNeighbors { neighbors, .. } => Self::NearestNeighbors {
                neighbors,
                threshold,
            },
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Short name of the strategy.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mahalanobis { .. } => "mahalanobis",
            Self::Regression { .. } => "regression",
            Self::NearestNeighbors { .. } => "nearest_neighbors",
        }
    }

    /// Threshold applied to scores.
    pub fn threshold(&self) -> T {
        match *self {
            Self::Mahalanobis { threshold }
            | Self::Regression { threshold }
            | Self::NearestNeighbors { threshold, .. } => threshold,
        }
    }

    /// Validate the strategy parameters.
    pub fn validate(&self) -> Result<(), TierError> {
        Validator::validate_threshold(self.threshold())?;
        if let Self::NearestNeighbors { neighbors, .. } = *self {
            Validator::validate_neighbors(neighbors)?;
        }
        Ok(())
    }

    /// Validate the number of feature columns for this strategy.
    pub fn validate_features(&self, dimensions: usize) -> Result<(), TierError> {
        match self {
            Self::Regression { .. } if dimensions != 2 => Err(TierError::InvalidFeatureCount {
                method: self.name(),
                got: dimensions,
                expected: 2,
            }),
            _ if dimensions == 0 => Err(TierError::InvalidFeatureCount {
                method: self.name(),
                got: 0,
                expected: 1,
            }),
            _ => Ok(()),
        }
    }

    // ========================================================================
    // Main API
    // ========================================================================

    /// Score every record of a row-major `n x dimensions` matrix.
    pub fn scores(&self, data: &[T], dimensions: usize) -> Result<Vec<T>, TierError> {
        self.validate()?;
        self.validate_features(dimensions)?;

        let n = data.len() / dimensions;
        Validator::validate_sample_size(n, Self::MIN_RECORDS, None)?;
        for (i, &v) in data.iter().enumerate() {
            Validator::validate_feature_value(v, "feature", i / dimensions)?;
        }

        match *self {
            Self::Mahalanobis { .. } => mahalanobis_scores(data, dimensions),
            Self::Regression { .. } => regression_scores(data),
            Self::NearestNeighbors { neighbors, .. } => {
                Ok(neighbor_scores(data, dimensions, neighbors))
            }
        }
    }

    /// Outlier flag of every record: `score > threshold`.
    pub fn detect(&self, data: &[T], dimensions: usize) -> Result<Vec<bool>, TierError> {
        let threshold = self.threshold();
        Ok(self
            .scores(data, dimensions)?
            .into_iter()
            .map(|s| s > threshold)
            .collect())
    }

    /// Copy of `dataset` with the outlier flags (0/1) appended as `outlier_column`.
    pub fn flag(
        &self,
        dataset: &Dataset<T>,
        features: &[&str],
        outlier_column: &str,
    ) -> Result<Dataset<T>, TierError> {
        let matrix = dataset.feature_matrix(features)?;
        let flags = self.detect(&matrix, features.len())?;
        let values: Vec<T> = flags
            .iter()
            .map(|&f| if f { T::one() } else { T::zero() })
            .collect();
        dataset.with_column(outlier_column, &values)
    }
}

// ============================================================================
// Strategy Implementations
// ============================================================================

fn mahalanobis_scores<T: FloatLinalg>(data: &[T], d: usize) -> Result<Vec<T>, TierError> {
    let means = mean_vector(data, d);
    let cov = covariance_matrix(data, d, &means);
    let cov_inv =
        T::pseudo_inverse(&cov, d).ok_or(TierError::NumericalFailure("covariance pseudo-inverse"))?;

    Ok(data
        .chunks_exact(d)
        .map(|row| mahalanobis(row, &means, &cov_inv))
        .collect())
}

fn regression_scores<T: FloatLinalg>(data: &[T]) -> Result<Vec<T>, TierError> {
    let n = T::from(data.len() / 2).unwrap();
    let (mut sx, mut sxx, mut sy, mut sxy) = (T::zero(), T::zero(), T::zero(), T::zero());
    for row in data.chunks_exact(2) {
        let (x, y) = (row[0], row[1]);
        sx = sx + x;
        sxx = sxx + x * x;
        sy = sy + y;
        sxy = sxy + x * y;
    }

    // Normal equations for y = b0 + b1 * x
    let normal = [n, sx, sx, sxx];
    let rhs = [sy, sxy];
    let beta =
        T::solve_normal(&normal, &rhs, 2).ok_or(TierError::NumericalFailure("least squares"))?;

    let residuals: Vec<T> = data
        .chunks_exact(2)
        .map(|row| (beta[0] + beta[1] * row[0] - row[1]).abs())
        .collect();

    let spread = population_std(&residuals);
    if spread <= T::zero() {
        return Ok(vec![T::zero(); residuals.len()]);
    }
    Ok(residuals.into_iter().map(|r| r / spread).collect())
}

fn neighbor_scores<T: FloatLinalg>(data: &[T], d: usize, neighbors: usize) -> Vec<T> {
    let points: Vec<&[T]> = data.chunks_exact(d).collect();
    let n = points.len();
    let m = neighbors.min(n - 1);

    let mut scratch = Vec::with_capacity(n - 1);
    let avg_distances: Vec<T> = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            scratch.clear();
            scratch.extend(
                points
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, q)| euclidean(p, q)),
            );
            scratch.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Equal));
            mean(&scratch[..m])
        })
        .collect();

    let center = mean(&avg_distances);
    let spread = population_std(&avg_distances);
    if spread <= T::zero() {
        return vec![T::zero(); n];
    }
    avg_distances
        .into_iter()
        .map(|a| (a - center) / spread)
        .collect()
}
