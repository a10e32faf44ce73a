#![cfg(feature = "dev")]

use approx::assert_relative_eq;
use volume_tiers::internals::math::stats::{
    Standardization, covariance_matrix, mean, mean_vector, percentile, percentile_sorted,
    population_std, round_half_even,
};

// ============================================================================
// Mean and Spread Tests
// ============================================================================

#[test]
fn test_mean_and_population_std() {
    let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    assert_relative_eq!(mean(&v), 5.0);
    assert_relative_eq!(population_std(&v), 2.0);
}

#[test]
fn test_empty_statistics_are_zero() {
    let empty: [f64; 0] = [];
    assert_eq!(mean(&empty), 0.0);
    assert_eq!(population_std(&empty), 0.0);
    assert_eq!(percentile(&empty, 0.5), 0.0);
}

#[test]
fn test_mean_vector() {
    // 3 points, 2D
    let data = [
        1.0, 10.0, // p1
        2.0, 20.0, // p2
        3.0, 60.0, // p3
    ];
    assert_eq!(mean_vector(&data, 2), vec![2.0, 30.0]);
}

#[test]
fn test_covariance_matrix_sample_denominator() {
    let data = [
        1.0, 2.0, // p1
        2.0, 4.0, // p2
        3.0, 6.0, // p3
    ];
    let means = mean_vector(&data, 2);
    let cov = covariance_matrix(&data, 2, &means);

    // var(x) = 1, var(y) = 4, cov(x, y) = 2 with n - 1 = 2
    assert_relative_eq!(cov[0], 1.0);
    assert_relative_eq!(cov[1], 2.0);
    assert_relative_eq!(cov[2], 2.0);
    assert_relative_eq!(cov[3], 4.0);
}

#[test]
fn test_covariance_of_single_row_is_zero() {
    let data = [5.0, 7.0];
    let cov = covariance_matrix(&data, 2, &[5.0, 7.0]);
    assert_eq!(cov, vec![0.0; 4]);
}

// ============================================================================
// Percentile Tests
// ============================================================================

#[test]
fn test_percentile_interpolates() {
    let v = [1.0, 2.0, 3.0, 4.0];
    assert_relative_eq!(percentile(&v, 0.25), 1.75);
    assert_relative_eq!(percentile(&v, 0.5), 2.5);
    assert_relative_eq!(percentile(&v, 0.75), 3.25);
}

#[test]
fn test_percentile_extremes_are_min_and_max() {
    let v = [7.0, -3.0, 12.5, 0.0, 4.0];
    assert_eq!(percentile(&v, 0.0), -3.0);
    assert_eq!(percentile(&v, 1.0), 12.5);
}

#[test]
fn test_percentile_exact_order_statistic() {
    // index = 0.5 * 4 = 2
    let sorted = [1.0, 3.0, 5.0, 7.0, 9.0];
    assert_eq!(percentile_sorted(&sorted, 0.5), 5.0);
}

#[test]
fn test_percentile_single_value() {
    assert_eq!(percentile(&[42.0], 0.25), 42.0);
    assert_eq!(percentile(&[42.0], 0.75), 42.0);
}

// ============================================================================
// Rounding Tests
// ============================================================================

#[test]
fn test_round_half_even() {
    assert_eq!(round_half_even(0.125, 2), 0.12);
    assert_eq!(round_half_even(0.375, 2), 0.38);
    assert_eq!(round_half_even(2.5, 0), 2.0);
    assert_eq!(round_half_even(3.5, 0), 4.0);
    assert_eq!(round_half_even(-2.5, 0), -2.0);
    assert_relative_eq!(round_half_even(52.1234, 2), 52.12);
    assert_relative_eq!(round_half_even(52.1271, 2), 52.13);
}

#[test]
fn test_round_half_even_non_finite_passthrough() {
    assert!(round_half_even(f64::NAN, 2).is_nan());
    assert_eq!(round_half_even(f64::INFINITY, 2), f64::INFINITY);
}

// ============================================================================
// Standardization Tests
// ============================================================================

#[test]
fn test_standardization_round_trip() {
    let scale = Standardization::new(50.0, 10.0);
    assert_relative_eq!(scale.standardize(65.0), 1.5);
    assert_relative_eq!(scale.destandardize(1.5), 65.0);

    for &x in &[0.0, 37.5, 50.0, 123.25] {
        assert_relative_eq!(scale.destandardize(scale.standardize(x)), x, epsilon = 1e-12);
    }
}

#[test]
fn test_standardization_zero_std_uses_unit_scale() {
    let scale = Standardization::new(3.0, 0.0);
    assert!(scale.is_degenerate());
    assert_eq!(scale.effective_std(), 1.0);
    assert_eq!(scale.standardize(5.0), 2.0);
    assert_eq!(scale.destandardize(2.0), 5.0);
}

#[test]
fn test_standardization_from_values() {
    let scale = Standardization::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
    assert_relative_eq!(scale.mean, 5.0);
    assert_relative_eq!(scale.std, 2.0);
    assert!(!scale.is_degenerate());
}
