//! Execution engine for the volume-tier pipeline.
//!
//! ## Purpose
//!
//! This module orchestrates one tiering request end to end. It partitions
//! the dataset into volume tiers, derives the tier boundaries, runs the
//! outlier detector independently inside every tier and summarizes prices
//! per tier.
//!
//! ## Design notes
//!
//! * **Single pass**: Each stage runs once; no stage feeds back into another.
//! * **Per-cluster isolation**: Outlier statistics (mean, covariance) are
//!   estimated from the records of one tier only.
//! * **Deterministic**: The only randomness is the seeded centroid
//!   initialization of the partitioner.
//! * Generic over `Float` types to support f32 and f64.
//!
//! ## Key concepts
//!
//! * **Canonical order**: Flagged records are emitted tier by tier in
//!   ascending cluster id, keeping input order inside a tier.
//! * **Configuration**: `TierConfig` carries fully resolved parameters; the
//!   builder in `api` is responsible for defaults and validation.
//!
//! ## Invariants
//!
//! * Output dataset has the same records as the input, plus the cluster and
//!   outlier columns.
//! * Every tier handed to the detector has at least 2 records.
//!
//! ## Non-goals
//!
//! * This module does not parse or serialize data (handled by `adapters`).
//! * This module does not provide public-facing result formatting.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::collections::BTreeMap;
#[cfg(feature = "std")]
use std::string::String;
#[cfg(feature = "std")]
use std::vec::Vec;

// Internal dependencies
use crate::algorithms::boundary::{boundaries, destandardize};
use crate::algorithms::kmeans::KMeans;
use crate::algorithms::outlier::OutlierMethod;
use crate::engine::validator::Validator;
use crate::evaluation::buffer_zone::{PriceSummary, aggregate};
use crate::math::linalg::FloatLinalg;
use crate::math::stats::Standardization;
use crate::primitives::dataset::Dataset;
use crate::primitives::errors::TierError;

// ============================================================================
// Configuration
// ============================================================================

/// Resolved configuration for one tiering run.
#[derive(Debug, Clone, PartialEq)]
pub struct TierConfig<T> {
    /// Column partitioned into tiers.
    pub feature_column: String,

    /// Column receiving the canonical cluster id.
    pub cluster_column: String,

    /// Column receiving the outlier flag (0/1).
    pub outlier_column: String,

    /// Column summarized by the buffer-zone aggregator.
    pub price_column: String,

    /// Columns scored by the outlier detector.
    pub outlier_features: Vec<String>,

    /// Partitioner settings (k, seed, iteration limits).
    pub kmeans: KMeans,

    /// Outlier detection strategy.
    pub outlier_method: OutlierMethod<T>,

    /// Standardization of the feature column, used to report raw-unit boundaries.
    pub scale: Option<Standardization<T>>,
}

/// Output from one tiering run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutorOutput<T> {
    /// Records grouped by ascending cluster id, with cluster and outlier columns.
    pub data: Dataset<T>,

    /// Centroids sorted ascending.
    pub centroids: Vec<T>,

    /// Boundaries between adjacent tiers, in feature units.
    pub boundaries: Vec<T>,

    /// Boundaries mapped back to raw units (if a scale was configured).
    pub destandardized_boundaries: Option<Vec<T>>,

    /// Per-tier buffer zones and mean prices.
    pub price_summary: PriceSummary<T>,

    /// Lloyd iterations used by the partitioner.
    pub iterations: usize,
}

// ============================================================================
// Executor
// ============================================================================

/// Runs the tiering pipeline.
pub struct TierExecutor;

impl TierExecutor {
    /// Partition, derive boundaries, flag outliers per tier and summarize prices.
    pub fn run<T: FloatLinalg>(
        dataset: &Dataset<T>,
        config: &TierConfig<T>,
    ) -> Result<ExecutorOutput<T>, TierError> {
        // Stage 1: Volume tiers
        let partition =
            config
                .kmeans
                .partition(dataset, &config.feature_column, &config.cluster_column)?;

        // Stage 2: Boundaries for reporting
        let tier_boundaries = boundaries(&partition.centroids);
        let destandardized_boundaries = config
            .scale
            .as_ref()
            .map(|scale| destandardize(&tier_boundaries, scale))
            .transpose()?;

        // Stage 3: Outliers inside each tier
        let features: Vec<&str> = config.outlier_features.iter().map(String::as_str).collect();
        let data = detect_per_cluster(
            &partition.data,
            &config.cluster_column,
            &features,
            &config.outlier_column,
            &config.outlier_method,
        )?;

        // Stage 4: Price summary
        let price_summary = aggregate(&data, &config.cluster_column, &config.price_column)?;

        Ok(ExecutorOutput {
            data,
            centroids: partition.centroids,
            boundaries: tier_boundaries,
            destandardized_boundaries,
            price_summary,
            iterations: partition.iterations,
        })
    }
}

// ============================================================================
// Per-Cluster Outlier Detection
// ============================================================================

/// Flag outliers independently inside every cluster.
///
/// Records are returned grouped by ascending cluster id, in input order
/// within each cluster, with `outlier_column` set to 0 or 1.
pub fn detect_per_cluster<T: FloatLinalg>(
    dataset: &Dataset<T>,
    cluster_column: &str,
    features: &[&str],
    outlier_column: &str,
    method: &OutlierMethod<T>,
) -> Result<Dataset<T>, TierError> {
    Validator::validate_dataset(dataset)?;
    method.validate()?;
    method.validate_features(features.len())?;

    let labels = dataset.label_column(cluster_column)?;
    // Validated up front so errors report rows of the input dataset
    let matrix = dataset.feature_matrix(features)?;
    let d = features.len();

    let mut members: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (row, &label) in labels.iter().enumerate() {
        members.entry(label).or_default().push(row);
    }

    let mut order = Vec::with_capacity(dataset.len());
    let mut flags = Vec::with_capacity(dataset.len());
    let mut subset = Vec::new();

    for (&cluster, rows) in &members {
        Validator::validate_sample_size(rows.len(), OutlierMethod::<T>::MIN_RECORDS, Some(cluster))?;

        subset.clear();
        for &row in rows {
            subset.extend_from_slice(&matrix[row * d..(row + 1) * d]);
        }

        let detected = method.detect(&subset, d)?;
        order.extend_from_slice(rows);
        flags.extend(
            detected
                .into_iter()
                .map(|f| if f { T::one() } else { T::zero() }),
        );
    }

    dataset.select(&order).with_column(outlier_column, &flags)
}
