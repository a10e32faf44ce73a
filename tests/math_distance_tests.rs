#![cfg(feature = "dev")]

use approx::assert_relative_eq;
use volume_tiers::internals::math::distance::{euclidean, mahalanobis};
use volume_tiers::internals::math::linalg::FloatLinalg;
use volume_tiers::internals::math::stats::{covariance_matrix, mean_vector};

// ============================================================================
// Euclidean Distance Tests
// ============================================================================

#[test]
fn test_euclidean_distance_1d() {
    assert_relative_eq!(euclidean(&[1.0], &[4.0]), 3.0);
}

#[test]
fn test_euclidean_distance_2d() {
    assert_relative_eq!(euclidean(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
}

#[test]
fn test_euclidean_distance_3d() {
    // diffs: 3, 4, 5. sum_sq: 9+16+25=50
    assert_relative_eq!(euclidean(&[1.0, 2.0, 3.0], &[4.0, 6.0, 8.0]), 50.0f64.sqrt());
}

// ============================================================================
// Linear Algebra Tests
// ============================================================================

#[test]
fn test_pseudo_inverse_of_invertible_matrix() {
    let a = [4.0, 0.0, 0.0, 0.25];
    let inv = f64::pseudo_inverse(&a, 2).unwrap();
    assert_relative_eq!(inv[0], 0.25, epsilon = 1e-12);
    assert_relative_eq!(inv[1], 0.0, epsilon = 1e-12);
    assert_relative_eq!(inv[2], 0.0, epsilon = 1e-12);
    assert_relative_eq!(inv[3], 4.0, epsilon = 1e-12);
}

#[test]
fn test_pseudo_inverse_of_singular_matrix() {
    // Rank one: [[1, 1], [1, 1]] has pseudo-inverse [[0.25, 0.25], [0.25, 0.25]]
    let a = [1.0, 1.0, 1.0, 1.0];
    let inv = f64::pseudo_inverse(&a, 2).unwrap();
    for v in inv {
        assert_relative_eq!(v, 0.25, epsilon = 1e-12);
    }
}

#[test]
fn test_pseudo_inverse_of_zero_matrix() {
    let inv = f64::pseudo_inverse(&[0.0; 4], 2).unwrap();
    assert_eq!(inv, vec![0.0; 4]);
}

#[test]
fn test_quadratic_form() {
    let m = [2.0, 1.0, 1.0, 3.0];
    // [1, 2] * M * [1, 2]' = 2 + 2 + 2 + 12 = 18
    assert_relative_eq!(f64::quadratic_form(&[1.0, 2.0], &m, 2), 18.0);
}

#[test]
fn test_solve_normal() {
    // 2x + y = 5, x + 3y = 10 -> x = 1, y = 3
    let a = [2.0, 1.0, 1.0, 3.0];
    let x = f64::solve_normal(&a, &[5.0, 10.0], 2).unwrap();
    assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
    assert_relative_eq!(x[1], 3.0, epsilon = 1e-12);
}

#[test]
fn test_f32_backend() {
    let inv = f32::pseudo_inverse(&[2.0, 0.0, 0.0, 2.0], 2).unwrap();
    assert_relative_eq!(inv[0], 0.5f32, epsilon = 1e-6);
    assert_relative_eq!(inv[3], 0.5f32, epsilon = 1e-6);
}

// ============================================================================
// Mahalanobis Distance Tests
// ============================================================================

#[test]
fn test_mahalanobis_identity_covariance_is_euclidean() {
    let identity = [1.0, 0.0, 0.0, 1.0];
    let d = mahalanobis(&[3.0, 4.0], &[0.0, 0.0], &identity);
    assert_relative_eq!(d, 5.0);
}

#[test]
fn test_mahalanobis_of_mean_is_zero() {
    let data = [
        1.0, 2.0, // p1
        2.0, 1.0, // p2
        3.0, 5.0, // p3
        4.0, 3.0, // p4
    ];
    let means = mean_vector(&data, 2);
    let cov = covariance_matrix(&data, 2, &means);
    let inv = f64::pseudo_inverse(&cov, 2).unwrap();
    assert_relative_eq!(mahalanobis(&means, &means, &inv), 0.0);
}

#[test]
fn test_mahalanobis_scales_by_variance() {
    // Variance 4 on the only axis: one unit of distance per 2 raw units
    let inv = [0.25];
    assert_relative_eq!(mahalanobis(&[6.0], &[0.0], &inv), 3.0);
}
