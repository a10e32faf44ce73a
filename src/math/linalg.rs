//! Linear algebra backend abstraction.
//!
//! ## Purpose
//!
//! This module provides a trait-based abstraction over the few dense linear
//! algebra operations the crate needs, standardizing on the nalgebra backend:
//! covariance pseudo-inversion, quadratic forms and small least-squares solves.
//!
//! ## Design notes
//!
//! * The pseudo-inverse goes through SVD so singular and near-singular
//!   covariance matrices (collinear features, tiny clusters) are handled.
//! * Singular values below `n * eps * sigma_max` are treated as zero.
//! * Least squares uses QR (Householder) with an SVD fallback for
//!   rank-deficient systems.
//! * Generic over `FloatLinalg` types (f32 and f64) which delegate to nalgebra.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::Debug;
use num_traits::Float;

// ============================================================================
// FloatLinalg Trait
// ============================================================================

/// Helper trait to bridge generic Float types to the nalgebra backend.
///
/// All matrices are square `n x n` slices. Inputs to `pseudo_inverse` and
/// `quadratic_form` are symmetric, so row- and column-major layouts coincide.
pub trait FloatLinalg: Float + Debug + Send + Sync + 'static {
    /// Moore-Penrose pseudo-inverse of a square matrix.
    fn pseudo_inverse(a: &[Self], n: usize) -> Option<Vec<Self>>;
    /// Quadratic form `v' * M * v`.
    fn quadratic_form(v: &[Self], m: &[Self], n: usize) -> Self;
    /// Solve `A * x = b` in the least-squares sense.
    fn solve_normal(a: &[Self], b: &[Self], n: usize) -> Option<Vec<Self>>;
}

impl FloatLinalg for f64 {
    #[inline]
    fn pseudo_inverse(a: &[Self], n: usize) -> Option<Vec<Self>> {
        nalgebra_backend::pseudo_inverse(a, n, f64::EPSILON)
    }
    #[inline]
    fn quadratic_form(v: &[Self], m: &[Self], n: usize) -> Self {
        nalgebra_backend::quadratic_form(v, m, n)
    }
    #[inline]
    fn solve_normal(a: &[Self], b: &[Self], n: usize) -> Option<Vec<Self>> {
        nalgebra_backend::solve_normal(a, b, n, f64::EPSILON * 100.0)
    }
}

impl FloatLinalg for f32 {
    #[inline]
    fn pseudo_inverse(a: &[Self], n: usize) -> Option<Vec<Self>> {
        nalgebra_backend::pseudo_inverse(a, n, f32::EPSILON)
    }
    #[inline]
    fn quadratic_form(v: &[Self], m: &[Self], n: usize) -> Self {
        nalgebra_backend::quadratic_form(v, m, n)
    }
    #[inline]
    fn solve_normal(a: &[Self], b: &[Self], n: usize) -> Option<Vec<Self>> {
        nalgebra_backend::solve_normal(a, b, n, f32::EPSILON * 100.0)
    }
}

// ============================================================================
// Nalgebra Backend Implementation
// ============================================================================

/// Nalgebra-based linear algebra operations.
pub mod nalgebra_backend {
    use super::*;
    use nalgebra::{DMatrix, DVector, RealField};

    /// Pseudo-inverse via SVD with a relative singular-value cutoff.
    pub fn pseudo_inverse<T: RealField + Copy>(a: &[T], n: usize, eps: T) -> Option<Vec<T>> {
        if n == 0 {
            return Some(Vec::new());
        }

        let matrix = DMatrix::from_column_slice(n, n, a);
        let svd = matrix.try_svd(true, true, eps, 0)?;

        let sigma_max = svd
            .singular_values
            .iter()
            .fold(T::zero(), |acc, &s| if s > acc { s } else { acc });
        let n_t = nalgebra::convert::<f64, T>(n as f64);
        let cutoff = sigma_max * n_t * eps;

        svd.pseudo_inverse(cutoff)
            .ok()
            .map(|inv: DMatrix<T>| inv.as_slice().to_vec())
    }

    /// Compute `v' * M * v`.
    pub fn quadratic_form<T: RealField + Copy>(v: &[T], m: &[T], n: usize) -> T {
        if n == 0 {
            return T::zero();
        }
        let x = DVector::from_column_slice(v);
        let mat = DMatrix::from_column_slice(n, n, m);
        (x.transpose() * &mat * &x)[(0, 0)]
    }

    /// Solve a small square system, falling back to SVD when QR fails.
    pub fn solve_normal<T: RealField + Copy>(
        a: &[T],
        b: &[T],
        n: usize,
        eps: T,
    ) -> Option<Vec<T>> {
        let matrix = DMatrix::from_column_slice(n, n, a);
        let rhs = DVector::from_column_slice(b);

        let qr = matrix.clone().qr();
        if let Some(solution) = qr.solve(&rhs) {
            return Some(solution.as_slice().to_vec());
        }

        matrix
            .svd(true, true)
            .solve(&rhs, eps)
            .ok()
            .map(|s: DVector<T>| s.as_slice().to_vec())
    }
}
