#![cfg(feature = "dev")]

use volume_tiers::internals::primitives::errors::TierError;

#[test]
fn test_tier_error_display() {
    // EmptyInput
    let err = TierError::EmptyInput;
    assert_eq!(format!("{}", err), "Input dataset is empty");

    // InsufficientData
    let err = TierError::InsufficientData {
        requested: 4,
        available: 3,
    };
    assert_eq!(
        format!("{}", err),
        "Cannot create 4 clusters with only 3 data points"
    );

    // InvalidClusterCount
    let err = TierError::InvalidClusterCount(0);
    assert_eq!(
        format!("{}", err),
        "Invalid cluster count: 0 (must be at least 1)"
    );

    // InvalidFeatureValue
    let err = TierError::InvalidFeatureValue {
        column: "Quantity".to_string(),
        row: 7,
        value: "\"abc\"".to_string(),
    };
    assert_eq!(
        format!("{}", err),
        "Invalid feature value in column 'Quantity' at row 7: \"abc\""
    );

    // SchemaMismatch
    let err = TierError::SchemaMismatch {
        row: 2,
        reason: "missing field 'Price'".to_string(),
    };
    assert_eq!(
        format!("{}", err),
        "Schema mismatch at row 2: missing field 'Price'"
    );

    // UnknownColumn
    let err = TierError::UnknownColumn("Volume".to_string());
    assert_eq!(format!("{}", err), "Unknown column: 'Volume'");

    // InvalidInput
    let err = TierError::InvalidInput("test error".to_string());
    assert_eq!(format!("{}", err), "Invalid input: test error");

    // InvalidThreshold
    let err = TierError::InvalidThreshold(-1.0);
    assert_eq!(
        format!("{}", err),
        "Invalid threshold: -1 (must be >= 0 and finite)"
    );

    // InvalidIterations
    let err = TierError::InvalidIterations(0);
    assert_eq!(
        format!("{}", err),
        "Invalid max_iterations: 0 (must be in [1, 10000])"
    );

    // InvalidTolerance
    let err = TierError::InvalidTolerance(-0.5);
    assert_eq!(
        format!("{}", err),
        "Invalid tolerance: -0.5 (must be >= 0 and finite)"
    );

    // InvalidPercentile
    let err = TierError::InvalidPercentile(1.5);
    assert_eq!(
        format!("{}", err),
        "Invalid percentile: 1.5 (must be in [0, 1])"
    );

    // InvalidScale
    let err = TierError::InvalidScale {
        mean: 50.0,
        std: -2.0,
    };
    assert_eq!(
        format!("{}", err),
        "Invalid scale: mean=50, std=-2 (mean must be finite, std must be >= 0 and finite)"
    );

    // InvalidNeighbors
    let err = TierError::InvalidNeighbors(0);
    assert_eq!(
        format!("{}", err),
        "Invalid neighbors: 0 (must be at least 1)"
    );

    // InvalidFeatureCount
    let err = TierError::InvalidFeatureCount {
        method: "regression",
        got: 3,
        expected: 2,
    };
    assert_eq!(
        format!("{}", err),
        "Method 'regression' requires 2 feature columns, got 3"
    );

    // DuplicateParameter
    let err = TierError::DuplicateParameter { parameter: "seed" };
    assert_eq!(
        format!("{}", err),
        "Parameter 'seed' was set multiple times. Each parameter can only be configured once."
    );

    // NumericalFailure
    let err = TierError::NumericalFailure("covariance pseudo-inverse");
    assert_eq!(
        format!("{}", err),
        "Numerical failure: covariance pseudo-inverse"
    );
}

#[test]
fn test_insufficient_sample_size_names_cluster() {
    let err = TierError::InsufficientSampleSize {
        cluster: Some(3),
        got: 1,
        min: 2,
    };
    assert_eq!(
        format!("{}", err),
        "Too few records in cluster 3: got 1, need at least 2"
    );

    let err = TierError::InsufficientSampleSize {
        cluster: None,
        got: 1,
        min: 2,
    };
    assert_eq!(format!("{}", err), "Too few records: got 1, need at least 2");
}

#[test]
fn test_tier_error_is_std_error() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
    assert_error(&TierError::EmptyInput);
}

#[test]
fn test_tier_error_equality() {
    assert_eq!(TierError::EmptyInput, TierError::EmptyInput.clone());
    assert_ne!(
        TierError::InvalidClusterCount(0),
        TierError::InvalidNeighbors(0)
    );
}
