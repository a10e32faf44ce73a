//! High-level API for volume tiering.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements a
//! fluent builder for the tiering parameters and a validated runner that
//! executes the whole pipeline once per call.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with defaults matching the production
//!   request handler.
//! * **Validated**: All parameters are validated when `.build()` is called.
//! * **Reusable**: A built `VolumeTiers` can run any number of datasets.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ## Key concepts
//!
//! ### Configuration Flow
//!
//! 1. Create a [`VolumeTiersBuilder`] via `VolumeTiers::new()`.
//! 2. Chain configuration methods (`.clusters()`, `.seed()`, etc.).
//! 3. Call `.build()` to validate and obtain a [`VolumeTiers`] runner.
//! 4. Call `.run(&dataset)` to obtain a [`TierResult`].

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::string::{String, ToString};
#[cfg(feature = "std")]
use std::vec::Vec;

// Internal dependencies
use crate::engine::executor::TierExecutor;
use crate::engine::validator::Validator;
use crate::math::linalg::FloatLinalg;

// Publicly re-exported types
pub use crate::algorithms::boundary::{boundaries, destandardize, tier_of};
pub use crate::algorithms::kmeans::{KMeans, Partition, Seeding};
pub use crate::algorithms::outlier::OutlierMethod;
pub use crate::engine::executor::{TierConfig, detect_per_cluster};
pub use crate::engine::output::TierResult;
pub use crate::evaluation::buffer_zone::{BufferZone, PriceSummary, aggregate};
pub use crate::math::stats::{Standardization, percentile};
pub use crate::primitives::dataset::Dataset;
pub use crate::primitives::errors::TierError;

// ============================================================================
// Defaults
// ============================================================================

/// Default column partitioned into tiers.
pub const DEFAULT_FEATURE_COLUMN: &str = "Quantity";

/// Default column receiving the cluster id.
pub const DEFAULT_CLUSTER_COLUMN: &str = "VolumeCluster";

/// Default column receiving the outlier flag.
pub const DEFAULT_OUTLIER_COLUMN: &str = "MahalanobisOutlier";

/// Default column summarized into buffer zones.
pub const DEFAULT_PRICE_COLUMN: &str = "Price";

/// Default columns scored by the outlier detector.
pub const DEFAULT_OUTLIER_FEATURES: [&str; 2] = ["Quantity", "Price"];

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring a tiering run.
#[derive(Debug, Clone)]
pub struct VolumeTiersBuilder<T> {
    /// Column partitioned into tiers.
    pub feature_column: Option<String>,

    /// Column receiving the cluster id.
    pub cluster_column: Option<String>,

    /// Column receiving the outlier flag.
    pub outlier_column: Option<String>,

    /// Column summarized into buffer zones.
    pub price_column: Option<String>,

    /// Columns scored by the outlier detector.
    pub outlier_features: Option<Vec<String>>,

    /// Number of volume tiers.
    pub clusters: Option<usize>,

    /// Seed for centroid initialization.
    pub seed: Option<u64>,

    /// Lloyd iteration cap.
    pub max_iterations: Option<usize>,

    /// Convergence tolerance on centroid movement.
    pub tolerance: Option<f64>,

    /// Centroid initialization strategy.
    pub seeding: Option<Seeding>,

    /// Outlier detection strategy.
    pub outlier_method: Option<OutlierMethod<T>>,

    /// Outlier threshold overriding the strategy's default.
    pub threshold: Option<T>,

    /// Standardization of the partitioned column, for raw-unit boundaries.
    pub standardization: Option<Standardization<T>>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: FloatLinalg> Default for VolumeTiersBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FloatLinalg> VolumeTiersBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            feature_column: None,
            cluster_column: None,
            outlier_column: None,
            price_column: None,
            outlier_features: None,
            clusters: None,
            seed: None,
            max_iterations: None,
            tolerance: None,
            seeding: None,
            outlier_method: None,
            threshold: None,
            standardization: None,
            duplicate_param: None,
        }
    }

    /// Set the column partitioned into tiers.
    pub fn feature_column(mut self, name: &str) -> Self {
        if self.feature_column.is_some() {
            self.duplicate_param = Some("feature_column");
        }
        self.feature_column = Some(name.to_string());
        self
    }

    /// Set the column receiving the canonical cluster id.
    pub fn cluster_column(mut self, name: &str) -> Self {
        if self.cluster_column.is_some() {
            self.duplicate_param = Some("cluster_column");
        }
        self.cluster_column = Some(name.to_string());
        self
    }

    /// Set the column receiving the outlier flag.
    pub fn outlier_column(mut self, name: &str) -> Self {
        if self.outlier_column.is_some() {
            self.duplicate_param = Some("outlier_column");
        }
        self.outlier_column = Some(name.to_string());
        self
    }

    /// Set the column summarized into buffer zones.
    pub fn price_column(mut self, name: &str) -> Self {
        if self.price_column.is_some() {
            self.duplicate_param = Some("price_column");
        }
        self.price_column = Some(name.to_string());
        self
    }

    /// Set the columns scored by the outlier detector.
    pub fn outlier_features(mut self, names: &[&str]) -> Self {
        if self.outlier_features.is_some() {
            self.duplicate_param = Some("outlier_features");
        }
        self.outlier_features = Some(names.iter().map(|n| n.to_string()).collect());
        self
    }

    /// Set the number of volume tiers (k).
    pub fn clusters(mut self, k: usize) -> Self {
        if self.clusters.is_some() {
            self.duplicate_param = Some("clusters");
        }
        self.clusters = Some(k);
        self
    }

    /// Set the seed for centroid initialization.
    pub fn seed(mut self, seed: u64) -> Self {
        if self.seed.is_some() {
            self.duplicate_param = Some("seed");
        }
        self.seed = Some(seed);
        self
    }

    /// Set the Lloyd iteration cap.
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        if self.max_iterations.is_some() {
            self.duplicate_param = Some("max_iterations");
        }
        self.max_iterations = Some(iterations);
        self
    }

    /// Set the convergence tolerance on centroid movement.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        if self.tolerance.is_some() {
            self.duplicate_param = Some("tolerance");
        }
        self.tolerance = Some(tolerance);
        self
    }

    /// Set the centroid initialization strategy.
    pub fn seeding(mut self, seeding: Seeding) -> Self {
        if self.seeding.is_some() {
            self.duplicate_param = Some("seeding");
        }
        self.seeding = Some(seeding);
        self
    }

    /// Set the outlier detection strategy.
    pub fn outlier_method(mut self, method: OutlierMethod<T>) -> Self {
        if self.outlier_method.is_some() {
            self.duplicate_param = Some("outlier_method");
        }
        self.outlier_method = Some(method);
        self
    }

    /// Set the outlier threshold, keeping the selected strategy.
    pub fn threshold(mut self, threshold: T) -> Self {
        if self.threshold.is_some() {
            self.duplicate_param = Some("threshold");
        }
        self.threshold = Some(threshold);
        self
    }

    /// Report boundaries in raw units, given the standardization of the partitioned column.
    pub fn standardization(mut self, mean: T, std: T) -> Self {
        if self.standardization.is_some() {
            self.duplicate_param = Some("standardization");
        }
        self.standardization = Some(Standardization::new(mean, std));
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Validate the configuration and build the runner.
    pub fn build(self) -> Result<VolumeTiers<T>, TierError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        // Partitioner
        let k = self.clusters.unwrap_or(KMeans::DEFAULT_K);
        if k == 0 {
            return Err(TierError::InvalidClusterCount(k));
        }
        let max_iterations = self.max_iterations.unwrap_or(KMeans::DEFAULT_MAX_ITERATIONS);
        Validator::validate_iterations(max_iterations)?;
        let tolerance = self.tolerance.unwrap_or(KMeans::DEFAULT_TOLERANCE);
        Validator::validate_tolerance(tolerance)?;

        let kmeans = KMeans::new(k)
            .seed(self.seed.unwrap_or(KMeans::DEFAULT_SEED))
            .max_iterations(max_iterations)
            .tolerance(tolerance)
            .seeding(self.seeding.unwrap_or_default());

        // Outlier detector
        let mut outlier_method = self.outlier_method.unwrap_or_default();
        if let Some(threshold) = self.threshold {
            outlier_method = outlier_method.with_threshold(threshold);
        }
        outlier_method.validate()?;

        let outlier_features = self.outlier_features.unwrap_or_else(|| {
            DEFAULT_OUTLIER_FEATURES
                .iter()
                .map(|n| n.to_string())
                .collect()
        });
        outlier_method.validate_features(outlier_features.len())?;

        // Standardization
        if let Some(ref scale) = self.standardization {
            Validator::validate_scale(scale.mean, scale.std)?;
        }

        let column = |name: Option<String>, default: &str| name.unwrap_or_else(|| default.to_string());

        Ok(VolumeTiers {
            config: TierConfig {
                feature_column: column(self.feature_column, DEFAULT_FEATURE_COLUMN),
                cluster_column: column(self.cluster_column, DEFAULT_CLUSTER_COLUMN),
                outlier_column: column(self.outlier_column, DEFAULT_OUTLIER_COLUMN),
                price_column: column(self.price_column, DEFAULT_PRICE_COLUMN),
                outlier_features,
                kmeans,
                outlier_method,
                scale: self.standardization,
            },
        })
    }
}

// ============================================================================
// Runner
// ============================================================================

/// Validated tiering runner.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeTiers<T> {
    config: TierConfig<T>,
}

impl<T: FloatLinalg> VolumeTiers<T> {
    /// Start configuring a tiering run.
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> VolumeTiersBuilder<T> {
        VolumeTiersBuilder::new()
    }

    /// Resolved configuration.
    pub fn config(&self) -> &TierConfig<T> {
        &self.config
    }

    /// Partition, derive boundaries, flag outliers per tier and summarize prices.
    pub fn run(&self, dataset: &Dataset<T>) -> Result<TierResult<T>, TierError> {
        let output = TierExecutor::run(dataset, &self.config)?;
        TierResult::from_output(output, &self.config)
    }
}
