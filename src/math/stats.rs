//! Descriptive statistics for clustering and outlier scoring.
//!
//! ## Purpose
//!
//! This module provides the statistical building blocks shared by the
//! outlier strategies and the buffer-zone aggregator: means, sample
//! covariance, percentiles and z-score standardization.
//!
//! ## Design notes
//!
//! * **Layout**: Multivariate data is a flat row-major slice of `n * d` values.
//! * **Covariance**: Unbiased sample estimate (denominator `n - 1`).
//! * **Percentiles**: Linear interpolation between order statistics
//!   (index `p * (n - 1)`).
//! * **Rounding**: Half-to-even, so `0.125` rounds to `0.12`.
//!
//! ## Invariants
//!
//! * `percentile(v, 0) == min(v)` and `percentile(v, 1) == max(v)`.
//! * The covariance matrix is symmetric.
//!
//! ## Non-goals
//!
//! * This module does not validate finiteness (handled by `Dataset` and `Validator`).
//! * This module does not provide weighted or robust estimators.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

// ============================================================================
// Central Tendency and Spread
// ============================================================================

/// Arithmetic mean. Returns zero for an empty slice.
#[inline]
pub fn mean<T: Float>(values: &[T]) -> T {
    if values.is_empty() {
        return T::zero();
    }
    let sum = values.iter().fold(T::zero(), |acc, &v| acc + v);
    sum / T::from(values.len()).unwrap()
}

/// Population standard deviation (denominator `n`). Returns zero for an empty slice.
pub fn population_std<T: Float>(values: &[T]) -> T {
    if values.is_empty() {
        return T::zero();
    }
    let m = mean(values);
    let ss = values.iter().fold(T::zero(), |acc, &v| acc + (v - m) * (v - m));
    (ss / T::from(values.len()).unwrap()).sqrt()
}

/// Column means of a row-major `n x d` matrix.
pub fn mean_vector<T: Float>(data: &[T], dimensions: usize) -> Vec<T> {
    let mut means = vec![T::zero(); dimensions];
    if dimensions == 0 || data.is_empty() {
        return means;
    }

    let n = data.len() / dimensions;
    for row in data.chunks_exact(dimensions) {
        for (m, &v) in means.iter_mut().zip(row) {
            *m = *m + v;
        }
    }

    let n_t = T::from(n).unwrap();
    for m in means.iter_mut() {
        *m = *m / n_t;
    }
    means
}

/// Sample covariance matrix (`d x d`, row-major) of a row-major `n x d` matrix.
///
/// Uses the unbiased `n - 1` denominator. With fewer than two rows the
/// result is the zero matrix.
pub fn covariance_matrix<T: Float>(data: &[T], dimensions: usize, means: &[T]) -> Vec<T> {
    let d = dimensions;
    let mut cov = vec![T::zero(); d * d];
    if d == 0 {
        return cov;
    }

    let n = data.len() / d;
    if n < 2 {
        return cov;
    }

    for row in data.chunks_exact(d) {
        for a in 0..d {
            let da = row[a] - means[a];
            // Upper triangle only; mirrored below
            for b in a..d {
                cov[a * d + b] = cov[a * d + b] + da * (row[b] - means[b]);
            }
        }
    }

    let denom = T::from(n - 1).unwrap();
    for a in 0..d {
        for b in a..d {
            let v = cov[a * d + b] / denom;
            cov[a * d + b] = v;
            cov[b * d + a] = v;
        }
    }
    cov
}

// ============================================================================
// Percentiles
// ============================================================================

/// Percentile of unsorted values by linear interpolation, `p` in `[0, 1]`.
///
/// Returns zero for an empty slice.
pub fn percentile<T: Float>(values: &[T], p: T) -> T {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Equal));
    percentile_sorted(&sorted, p)
}

/// Percentile of values already sorted ascending, `p` in `[0, 1]`.
///
/// # Formula
///
/// ```text
/// index = p * (n - 1)
/// P     = v[floor(index)] + frac(index) * (v[ceil(index)] - v[floor(index)])
/// ```
pub fn percentile_sorted<T: Float>(sorted: &[T], p: T) -> T {
    let n = sorted.len();
    if n == 0 {
        return T::zero();
    }

    let p = p.max(T::zero()).min(T::one());
    let index = p * T::from(n - 1).unwrap();
    let lower = index.floor().to_usize().unwrap_or(0).min(n - 1);
    let upper = index.ceil().to_usize().unwrap_or(n - 1).min(n - 1);

    if lower == upper {
        return sorted[lower];
    }
    let frac = index - T::from(lower).unwrap();
    sorted[lower] + frac * (sorted[upper] - sorted[lower])
}

// ============================================================================
// Rounding
// ============================================================================

/// Round to `decimals` places, resolving exact midpoints to the even neighbour.
pub fn round_half_even<T: Float>(value: T, decimals: i32) -> T {
    if !value.is_finite() {
        return value;
    }

    let two = T::from(2.0).unwrap();
    let factor = T::from(10.0).unwrap().powi(decimals);
    let scaled = value * factor;
    let mut rounded = scaled.round();

    let is_midpoint = (scaled - scaled.trunc()).abs() == T::from(0.5).unwrap();
    if is_midpoint && (rounded / two).fract() != T::zero() {
        rounded = rounded - scaled.signum();
    }
    rounded / factor
}

// ============================================================================
// Standardization
// ============================================================================

/// Z-score transform of one column: `z = (x - mean) / std`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Standardization<T> {
    /// Column mean.
    pub mean: T,
    /// Column standard deviation.
    pub std: T,
}

impl<T: Float> Standardization<T> {
    /// Create a transform from known statistics.
    pub fn new(mean: T, std: T) -> Self {
        Self { mean, std }
    }

    /// Estimate the transform from raw values (population standard deviation).
    pub fn from_values(values: &[T]) -> Self {
        Self {
            mean: mean(values),
            std: population_std(values),
        }
    }

    /// Standard deviation actually used for scaling; zero is replaced by one.
    #[inline]
    pub fn effective_std(&self) -> T {
        if self.std == T::zero() {
            T::one()
        } else {
            self.std
        }
    }

    /// Whether the column had no spread (`std == 0`).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.std == T::zero()
    }

    /// Map a raw value to standardized units.
    #[inline]
    pub fn standardize(&self, value: T) -> T {
        (value - self.mean) / self.effective_std()
    }

    /// Map a standardized value back to raw units.
    #[inline]
    pub fn destandardize(&self, value: T) -> T {
        value * self.effective_std() + self.mean
    }
}
