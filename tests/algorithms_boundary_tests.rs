use approx::assert_relative_eq;
use volume_tiers::prelude::*;

// ============================================================================
// Boundary Derivation Tests
// ============================================================================

#[test]
fn test_boundaries_are_midpoints() {
    assert_eq!(boundaries(&[2.5, 101.5]), vec![52.0]);
    assert_eq!(boundaries(&[0.0, 10.0, 30.0, 70.0]), vec![5.0, 20.0, 50.0]);
}

#[test]
fn test_boundaries_count_is_k_minus_one() {
    assert!(boundaries::<f64>(&[]).is_empty());
    assert!(boundaries(&[42.0]).is_empty());
    assert_eq!(boundaries(&[1.0, 2.0, 3.0, 4.0, 5.0]).len(), 4);
}

#[test]
fn test_boundaries_strictly_ascending_between_centroids() {
    let centroids = [-1.2, -0.3, 0.4, 2.9];
    let b = boundaries(&centroids);
    for i in 0..b.len() {
        assert!(centroids[i] < b[i] && b[i] < centroids[i + 1]);
    }
    assert!(b.windows(2).all(|w| w[0] < w[1]));
}

// ============================================================================
// Destandardization Tests
// ============================================================================

#[test]
fn test_destandardize() {
    let scale = Standardization::new(50.0, 10.0);
    let raw = destandardize(&[0.5, -1.0, 0.0], &scale).unwrap();
    assert_eq!(raw, vec![55.0, 40.0, 50.0]);
}

#[test]
fn test_destandardize_rounds_to_two_decimals() {
    let scale = Standardization::new(0.0, 1.0);
    let raw = destandardize(&[0.1234, 7.891, 0.125, 0.375], &scale).unwrap();
    assert_relative_eq!(raw[0], 0.12);
    assert_relative_eq!(raw[1], 7.89);
    // Exact midpoints resolve to the even neighbour
    assert_eq!(raw[2], 0.12);
    assert_eq!(raw[3], 0.38);
}

#[test]
fn test_standardize_destandardize_round_trip() {
    let scale = Standardization::new(50.0, 10.0);
    let z = scale.standardize(65.0);
    assert_relative_eq!(z, 1.5);
    assert_eq!(destandardize(&[z], &scale).unwrap(), vec![65.0]);
}

#[test]
fn test_destandardize_zero_std_uses_unit_scale() {
    let scale = Standardization::new(3.0, 0.0);
    assert_eq!(destandardize(&[2.0], &scale).unwrap(), vec![5.0]);
}

#[test]
fn test_destandardize_invalid_scale() {
    assert_eq!(
        destandardize(&[1.0], &Standardization::new(50.0, -1.0)),
        Err(TierError::InvalidScale {
            mean: 50.0,
            std: -1.0,
        })
    );
    assert!(matches!(
        destandardize(&[1.0], &Standardization::new(f64::NAN, 1.0)),
        Err(TierError::InvalidScale { .. })
    ));
    assert!(matches!(
        destandardize(&[1.0], &Standardization::new(0.0, f64::INFINITY)),
        Err(TierError::InvalidScale { .. })
    ));
}

// ============================================================================
// Tier Lookup Tests
// ============================================================================

#[test]
fn test_tier_of() {
    let b = [10.0, 20.0];
    assert_eq!(tier_of(5.0, &b), 0);
    assert_eq!(tier_of(15.0, &b), 1);
    assert_eq!(tier_of(25.0, &b), 2);
    // A value on a boundary belongs to the upper tier
    assert_eq!(tier_of(10.0, &b), 1);
    assert_eq!(tier_of(3.0, &[]), 0);
}
