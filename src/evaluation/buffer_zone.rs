//! Per-tier price buffer zones and mean prices.
//!
//! ## Purpose
//!
//! This module summarizes the price distribution inside every volume tier:
//! the interquartile band (the "buffer zone") and the mean price. The
//! summaries feed the pricing charts downstream.
//!
//! ## Design notes
//!
//! * **Quartiles**: 25th and 75th percentiles by linear interpolation.
//! * **Parallel arrays**: `cluster_ids`, `buffer_zones` and `price_means`
//!   share one index, ascending by cluster id.
//!
//! ## Invariants
//!
//! * `lower <= upper` for every buffer zone.
//! * Only clusters with at least one record are reported.
//!
//! ## Non-goals
//!
//! * This module does not exclude flagged outliers from the summaries.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::collections::BTreeMap;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

// Internal dependencies
use crate::engine::validator::Validator;
use crate::math::stats::{mean, percentile_sorted};
use crate::primitives::dataset::Dataset;
use crate::primitives::errors::TierError;

/// Lower edge of the buffer zone (first quartile).
pub const LOWER_PERCENTILE: f64 = 0.25;

/// Upper edge of the buffer zone (third quartile).
pub const UPPER_PERCENTILE: f64 = 0.75;

// ============================================================================
// Types
// ============================================================================

/// Price band between two percentiles of one cluster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferZone<T> {
    /// Lower percentile price.
    pub lower: T,
    /// Upper percentile price.
    pub upper: T,
}

impl<T: Float> BufferZone<T> {
    /// Interquartile buffer zone of `prices`.
    pub fn from_prices(prices: &[T]) -> Result<Self, TierError> {
        Self::with_percentiles(
            prices,
            T::from(LOWER_PERCENTILE).unwrap(),
            T::from(UPPER_PERCENTILE).unwrap(),
        )
    }

    /// Buffer zone between two arbitrary percentiles in `[0, 1]`.
    pub fn with_percentiles(prices: &[T], lower: T, upper: T) -> Result<Self, TierError> {
        Validator::validate_percentile(lower)?;
        Validator::validate_percentile(upper)?;

        let mut sorted = prices.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Equal));

        Ok(Self {
            lower: percentile_sorted(&sorted, lower),
            upper: percentile_sorted(&sorted, upper),
        })
    }

    /// Width of the band.
    #[inline]
    pub fn width(&self) -> T {
        self.upper - self.lower
    }

    /// Whether `price` falls inside the band (inclusive).
    #[inline]
    pub fn contains(&self, price: T) -> bool {
        price >= self.lower && price <= self.upper
    }
}

/// Price summary of every non-empty cluster, ascending by cluster id.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSummary<T> {
    /// Cluster id of each entry.
    pub cluster_ids: Vec<usize>,
    /// Interquartile price band of each cluster.
    pub buffer_zones: Vec<BufferZone<T>>,
    /// Mean price of each cluster.
    pub price_means: Vec<T>,
}

impl<T> PriceSummary<T> {
    /// Number of clusters summarized.
    #[inline]
    pub fn len(&self) -> usize {
        self.cluster_ids.len()
    }

    /// Whether no cluster was summarized.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cluster_ids.is_empty()
    }
}

// ============================================================================
// Aggregation
// ============================================================================

/// Buffer zone and mean of `price_column` for every cluster in `cluster_column`.
pub fn aggregate<T: Float>(
    dataset: &Dataset<T>,
    cluster_column: &str,
    price_column: &str,
) -> Result<PriceSummary<T>, TierError> {
    Validator::validate_dataset(dataset)?;

    let labels = dataset.label_column(cluster_column)?;
    let prices = dataset.feature_column(price_column)?;

    let mut groups: BTreeMap<usize, Vec<T>> = BTreeMap::new();
    for (&label, &price) in labels.iter().zip(&prices) {
        groups.entry(label).or_default().push(price);
    }

    let mut summary = PriceSummary {
        cluster_ids: Vec::with_capacity(groups.len()),
        buffer_zones: Vec::with_capacity(groups.len()),
        price_means: Vec::with_capacity(groups.len()),
    };
    for (cluster, group) in groups {
        summary.cluster_ids.push(cluster);
        summary.buffer_zones.push(BufferZone::from_prices(&group)?);
        summary.price_means.push(mean(&group));
    }
    Ok(summary)
}
