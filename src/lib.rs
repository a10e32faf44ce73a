//! # volume-tiers — Volume Tiering and Per-Tier Outlier Detection for Rust
//!
//! Segments transaction records into quantity-based volume tiers and flags
//! statistical outliers inside each tier, so that price-elasticity analysis
//! downstream is not skewed by anomalous price/quantity records.
//!
//! ## What is volume tiering?
//!
//! Customers buying 5 units and customers buying 5000 units face different
//! prices. Before fitting any price curve, records are grouped into tiers
//! of similar order volume:
//!
//! 1. Partition the quantity column with seeded k-means.
//! 2. Renumber clusters by ascending centroid, so tier `0` is always the
//!    smallest volume and ids are stable across runs.
//! 3. Derive the boundaries between adjacent tiers (centroid midpoints).
//! 4. Inside each tier, score every record's deviation from the tier mean
//!    (Mahalanobis distance over quantity and price by default) and flag
//!    the records above a threshold.
//! 5. Summarize prices per tier: interquartile "buffer zone" and mean.
//!
//! **Key properties:**
//! - Deterministic: the centroid seed is an explicit parameter (default 123)
//! - Canonical cluster identity: ids follow centroid order, never the raw
//!   algorithm labels
//! - Outlier statistics are estimated per tier, never globally
//! - Generic over `f32` and `f64`, `no_std` compatible
//!
//! ## Quick Start
//!
//! ```rust
//! use volume_tiers::prelude::*;
//!
//! let data = Dataset::from_rows(
//!     ["Quantity", "Price"],
//!     vec![
//!         vec![1.0, 9.5],
//!         vec![2.0, 9.4],
//!         vec![3.0, 9.1],
//!         vec![4.0, 9.0],
//!         vec![100.0, 7.2],
//!         vec![101.0, 7.0],
//!         vec![102.0, 7.1],
//!         vec![103.0, 6.9],
//!     ],
//! )?;
//!
//! // Build the runner
//! let tiers = VolumeTiers::new()
//!     .clusters(2)        // Two volume tiers
//!     .seed(123)          // Reproducible initialization
//!     .build()?;
//!
//! // Run the pipeline
//! let result = tiers.run(&data)?;
//!
//! assert_eq!(result.boundaries, vec![52.0]);
//! println!("{}", result);
//! # Result::<(), TierError>::Ok(())
//! ```
//!
//! ```text
//! Summary:
//!   Records: 8
//!   Clusters: 2
//!   Iterations: 2
//!   Outliers: 0
//!
//! Boundaries:
//!   0 | 1:   52.00000
//!
//! Tiers:
//!   Cluster   Centroid   Size Outliers         Q1         Q3       Mean
//!   -------------------------------------------------------------------
//!         0     2.5000      4        0       9.07       9.43       9.25
//!         1   101.5000      4        0       6.97       7.12       7.05
//! ```
//!
//! ### Standardized input
//!
//! The production request handler receives z-scored quantities. Supply the
//! standardization of the quantity column to also report boundaries in raw
//! units (rounded half-to-even to two decimals):
//!
//! ```rust
//! use volume_tiers::prelude::*;
//!
//! let scale = Standardization::new(50.0, 10.0);
//! let rows = [45.0, 46.0, 47.0, 48.0, 52.0, 53.0, 54.0, 55.0]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &q)| vec![scale.standardize(q), 10.0 + (i % 2) as f64])
//!     .collect();
//! let data = Dataset::from_rows(["Quantity", "Price"], rows)?;
//!
//! let result = VolumeTiers::new()
//!     .clusters(2)
//!     .standardization(scale.mean, scale.std)
//!     .build()?
//!     .run(&data)?;
//!
//! assert_eq!(result.destandardized_boundaries, Some(vec![50.0]));
//! # Result::<(), TierError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! `run` returns a `Result<TierResult<T>, TierError>`.
//!
//! - **`Ok(TierResult<T>)`**: flagged data, centroids, boundaries, price summary.
//! - **`Err(TierError)`**: a terminal failure (e.g., fewer records than
//!   tiers, a tier with a single record, a non-finite feature value).
//!
//! ```rust
//! use volume_tiers::prelude::*;
//!
//! let data = Dataset::from_rows(["Quantity", "Price"], vec![vec![1.0, 2.0]])?;
//! let tiers = VolumeTiers::new().clusters(4).build()?;
//!
//! match tiers.run(&data) {
//!     Ok(result) => println!("{}", result),
//!     Err(e) => eprintln!("Tiering failed: {}", e),
//! }
//! # Result::<(), TierError>::Ok(())
//! ```
//!
//! ## Outlier strategies
//!
//! | Strategy                            | Score                                              | Default threshold |
//! |-------------------------------------|----------------------------------------------------|-------------------|
//! | `OutlierMethod::mahalanobis()`      | Mahalanobis distance from the tier mean            | 2.0               |
//! | `OutlierMethod::regression()`       | \|OLS residual\| / std of residuals (2 features)   | 2.0               |
//! | `OutlierMethod::nearest_neighbors()`| z-score of mean distance to 5 nearest neighbours   | 1.0               |
//!
//! ## Parameters
//!
//! | Parameter            | Default                  | Description                                   |
//! |----------------------|--------------------------|-----------------------------------------------|
//! | **feature_column**   | `"Quantity"`             | Column partitioned into tiers                 |
//! | **cluster_column**   | `"VolumeCluster"`        | Column receiving the cluster id               |
//! | **outlier_column**   | `"MahalanobisOutlier"`   | Column receiving the 0/1 outlier flag         |
//! | **price_column**     | `"Price"`                | Column summarized into buffer zones           |
//! | **outlier_features** | `["Quantity", "Price"]`  | Columns scored by the outlier detector        |
//! | **clusters**         | 4                        | Number of volume tiers (k)                    |
//! | **seed**             | 123                      | Centroid initialization seed                  |
//! | **max_iterations**   | 100                      | Lloyd iteration cap, in [1, 10000]            |
//! | **tolerance**        | 1e-5                     | Convergence tolerance on centroid movement    |
//! | **seeding**          | `Uniform`                | `Uniform` or `PlusPlus` initialization        |
//! | **outlier_method**   | `Mahalanobis`            | Outlier strategy                              |
//! | **threshold**        | strategy default         | Outlier threshold                             |
//! | **standardization**  | None                     | Mean/std of the partitioned column            |
//!
//! Each parameter can be set once; setting it twice fails at `build()` with
//! `TierError::DuplicateParameter`.
//!
//! ## Minimal Usage (no_std)
//!
//! Disable default features to remove the standard library dependency:
//!
//! ```toml
//! [dependencies]
//! volume-tiers = { version = "0.1", default-features = false }
//! ```
//!
//! ## Features
//!
//! - `std` (default): standard library support.
//! - `serde`: JSON reading and writing of datasets and results.
//! - `cli`: the `volume-tiers` command-line tool.
//! - `dev`: exposes internal modules for white-box testing.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - data structures and basic utilities.
//
// Contains the error taxonomy (`TierError`) and the tabular `Dataset`.
mod primitives;

// Layer 2: Math - pure mathematical functions.
//
// Contains descriptive statistics, percentiles, standardization,
// the nalgebra linear algebra bridge and distance metrics.
mod math;

// Layer 3: Algorithms - core tiering algorithms.
//
// Contains seeded k-means with canonical ids, tier boundaries and the
// outlier-scoring strategies.
mod algorithms;

// Layer 3: Evaluation - post-clustering summaries.
//
// Contains the per-tier buffer zones and mean prices.
mod evaluation;

// Layer 4: Engine - validation and orchestration.
//
// Contains the parameter validator, the pipeline executor and the
// result type.
mod engine;

// Layer 5: Adapters - data interchange.
//
// Contains the JSON reader and writer.
#[cfg(feature = "serde")]
mod adapters;

// High-level fluent API for volume tiering.
//
// Provides the `VolumeTiers` builder and runner.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard volume-tiers prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use volume_tiers::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        BufferZone, Dataset, KMeans, OutlierMethod, Partition, PriceSummary, Seeding, Standardization,
        TierError, TierResult, VolumeTiers, VolumeTiersBuilder, aggregate, boundaries,
        destandardize, detect_per_cluster, percentile, tier_of,
    };

    #[cfg(feature = "serde")]
    pub use crate::adapters::json::{
        ChartData, TierResponse, parse_dataset, to_json, write_dataset,
    };
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing purposes.
/// It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal core algorithms.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal execution engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal evaluation summaries.
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    /// Internal adapters.
    #[cfg(feature = "serde")]
    pub mod adapters {
        pub use crate::adapters::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
