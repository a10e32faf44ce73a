use volume_tiers::prelude::*;

const FEATURES: [&str; 2] = ["Quantity", "Price"];

/// Low-volume tier with one price spike (Id 9) and a quiet high-volume tier,
/// interleaved so that input order differs from cluster order.
fn two_tiers() -> Dataset<f64> {
    let low = [
        (1.0, 10.0),
        (2.0, 10.2),
        (3.0, 9.9),
        (4.0, 10.1),
        (5.0, 10.0),
        (6.0, 9.8),
        (7.0, 10.1),
        (8.0, 10.0),
        (9.0, 9.9),
        (5.0, 14.0),
    ];
    let high = [
        (50.0, 5.0),
        (51.0, 5.1),
        (52.0, 4.9),
        (53.0, 5.0),
        (54.0, 5.2),
        (55.0, 4.8),
    ];

    let mut rows = Vec::new();
    let mut high_iter = high.iter().enumerate();
    for (i, &(q, p)) in low.iter().enumerate() {
        if i % 2 == 0 {
            if let Some((j, &(hq, hp))) = high_iter.next() {
                rows.push(vec![100.0 + j as f64, hq, hp, 1.0]);
            }
        }
        rows.push(vec![i as f64, q, p, 0.0]);
    }
    for (j, &(hq, hp)) in high_iter {
        rows.push(vec![100.0 + j as f64, hq, hp, 1.0]);
    }
    Dataset::from_rows(["Id", "Quantity", "Price", "VolumeCluster"], rows).unwrap()
}

#[test]
fn test_records_grouped_by_cluster_in_input_order() {
    let data = two_tiers();
    let out = detect_per_cluster(
        &data,
        "VolumeCluster",
        &FEATURES,
        "MahalanobisOutlier",
        &OutlierMethod::mahalanobis(),
    )
    .unwrap();

    assert_eq!(out.len(), data.len());
    let ids = out.column("Id").unwrap();
    let expected: Vec<f64> = (0..10)
        .map(|i| i as f64)
        .chain((0..6).map(|j| 100.0 + j as f64))
        .collect();
    assert_eq!(ids, expected);

    let clusters = out.label_column("VolumeCluster").unwrap();
    assert_eq!(clusters, [vec![0; 10], vec![1; 6]].concat());
}

#[test]
fn test_only_price_spike_flagged() {
    let out = detect_per_cluster(
        &two_tiers(),
        "VolumeCluster",
        &FEATURES,
        "MahalanobisOutlier",
        &OutlierMethod::mahalanobis(),
    )
    .unwrap();

    assert_eq!(
        out.columns(),
        &["Id", "Quantity", "Price", "VolumeCluster", "MahalanobisOutlier"]
    );
    let ids = out.column("Id").unwrap();
    let flags = out.column("MahalanobisOutlier").unwrap();
    let flagged: Vec<f64> = ids
        .iter()
        .zip(&flags)
        .filter(|&(_, &f)| f == 1.0)
        .map(|(&id, _)| id)
        .collect();
    assert_eq!(flagged, vec![9.0]);
    assert!(flags.iter().all(|&f| f == 0.0 || f == 1.0));
}

#[test]
fn test_statistics_are_estimated_per_cluster() {
    let data = two_tiers();
    let out = detect_per_cluster(
        &data,
        "VolumeCluster",
        &FEATURES,
        "MahalanobisOutlier",
        &OutlierMethod::mahalanobis(),
    )
    .unwrap();

    // Same flags as scoring each tier on its own
    let method = OutlierMethod::mahalanobis();
    let mut expected = Vec::new();
    for cluster in 0..2 {
        let rows: Vec<usize> = data
            .label_column("VolumeCluster")
            .unwrap()
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == cluster)
            .map(|(i, _)| i)
            .collect();
        let subset = data.select(&rows).feature_matrix(&FEATURES).unwrap();
        expected.extend(
            method
                .detect(&subset, 2)
                .unwrap()
                .into_iter()
                .map(|f| if f { 1.0 } else { 0.0 }),
        );
    }
    assert_eq!(out.column("MahalanobisOutlier").unwrap(), expected);
}

#[test]
fn test_alternative_strategies() {
    for method in [OutlierMethod::regression(), OutlierMethod::nearest_neighbors()] {
        let out = detect_per_cluster(
            &two_tiers(),
            "VolumeCluster",
            &FEATURES,
            "Outlier",
            &method,
        )
        .unwrap();
        let flags = out.column("Outlier").unwrap();
        assert_eq!(flags[9], 1.0, "{}", method.name());
    }
}

#[test]
fn test_existing_outlier_column_is_overwritten() {
    let data = two_tiers()
        .with_column("MahalanobisOutlier", &[1.0; 16])
        .unwrap();
    let out = detect_per_cluster(
        &data,
        "VolumeCluster",
        &FEATURES,
        "MahalanobisOutlier",
        &OutlierMethod::mahalanobis(),
    )
    .unwrap();

    assert_eq!(out.columns().len(), 5);
    assert_eq!(out.column("MahalanobisOutlier").unwrap().iter().sum::<f64>(), 1.0);
}

// ============================================================================
// Error Tests
// ============================================================================

#[test]
fn test_single_record_cluster_rejected() {
    let data = Dataset::from_rows(
        ["Quantity", "Price", "VolumeCluster"],
        vec![
            vec![1.0, 10.0, 0.0],
            vec![2.0, 11.0, 0.0],
            vec![3.0, 10.5, 0.0],
            vec![90.0, 4.0, 2.0],
        ],
    )
    .unwrap();

    let err = detect_per_cluster(
        &data,
        "VolumeCluster",
        &FEATURES,
        "MahalanobisOutlier",
        &OutlierMethod::mahalanobis(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        TierError::InsufficientSampleSize {
            cluster: Some(2),
            got: 1,
            min: 2,
        }
    );
}

#[test]
fn test_empty_dataset_rejected() {
    let data: Dataset<f64> = Dataset::new(["Quantity", "Price", "VolumeCluster"]);
    assert_eq!(
        detect_per_cluster(
            &data,
            "VolumeCluster",
            &FEATURES,
            "MahalanobisOutlier",
            &OutlierMethod::mahalanobis(),
        ),
        Err(TierError::EmptyInput)
    );
}

#[test]
fn test_invalid_feature_reports_input_row() {
    let mut rows: Vec<Vec<f64>> = two_tiers().rows().to_vec();
    rows[4][2] = f64::INFINITY;
    let data = Dataset::from_rows(["Id", "Quantity", "Price", "VolumeCluster"], rows).unwrap();

    let err = detect_per_cluster(
        &data,
        "VolumeCluster",
        &FEATURES,
        "MahalanobisOutlier",
        &OutlierMethod::mahalanobis(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        TierError::InvalidFeatureValue { ref column, row: 4, .. } if column == "Price"
    ));
}

#[test]
fn test_unknown_columns_rejected() {
    let data = two_tiers();
    assert!(matches!(
        detect_per_cluster(
            &data,
            "Tier",
            &FEATURES,
            "MahalanobisOutlier",
            &OutlierMethod::mahalanobis(),
        ),
        Err(TierError::UnknownColumn(_))
    ));
    assert!(matches!(
        detect_per_cluster(
            &data,
            "VolumeCluster",
            &["Quantity", "Cost"],
            "MahalanobisOutlier",
            &OutlierMethod::mahalanobis(),
        ),
        Err(TierError::UnknownColumn(_))
    ));
}

#[test]
fn test_fractional_cluster_id_rejected() {
    let data = Dataset::from_rows(
        ["Quantity", "Price", "VolumeCluster"],
        vec![vec![1.0, 10.0, 0.5], vec![2.0, 11.0, 0.0]],
    )
    .unwrap();
    assert!(matches!(
        detect_per_cluster(
            &data,
            "VolumeCluster",
            &FEATURES,
            "MahalanobisOutlier",
            &OutlierMethod::mahalanobis(),
        ),
        Err(TierError::InvalidFeatureValue { row: 0, .. })
    ));
}
