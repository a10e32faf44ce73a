//! Distance metrics between feature vectors.
//!
//! ## Purpose
//!
//! This module provides the distances used by the outlier strategies:
//! plain Euclidean distance for nearest-neighbour scoring and the
//! covariance-scaled Mahalanobis distance for multivariate scoring.
//!
//! ## Key concepts
//!
//! * **Mahalanobis**: `sqrt((x - mu)' * S⁺ * (x - mu))` where `S⁺` is the
//!   pseudo-inverse of the covariance matrix. Correlated and differently
//!   scaled features contribute in proportion to their spread.
//!
//! ## Invariants
//!
//! * Distance is always non-negative.
//! * The Mahalanobis distance of the mean to itself is zero.
//!
//! ## Non-goals
//!
//! * This module does not estimate the mean or covariance (see `stats`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::linalg::FloatLinalg;

/// Euclidean distance: √(Σ(aᵢ - bᵢ)²)
#[inline]
pub fn euclidean<T: Float>(a: &[T], b: &[T]) -> T {
    debug_assert_eq!(a.len(), b.len(), "Points must have same dimension");
    a.iter()
        .zip(b.iter())
        .map(|(&ai, &bi)| {
            let diff = ai - bi;
            diff * diff
        })
        .fold(T::zero(), |acc, v| acc + v)
        .sqrt()
}

/// Mahalanobis distance of `point` from `mean` under the inverse covariance `cov_inv`.
///
/// Small negative quadratic forms caused by round-off are clamped to zero.
pub fn mahalanobis<T: FloatLinalg>(point: &[T], mean: &[T], cov_inv: &[T]) -> T {
    let d = mean.len();
    let diff: Vec<T> = point.iter().zip(mean).map(|(&x, &m)| x - m).collect();
    let dist_sq = T::quadratic_form(&diff, cov_inv, d);
    dist_sq.max(T::zero()).sqrt()
}
