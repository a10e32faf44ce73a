//! Result type of a tiering run.
//!
//! ## Purpose
//!
//! This module defines `TierResult`, the public output of
//! `VolumeTiers::run`, and its human-readable summary.
//!
//! ## Design notes
//!
//! * **Owned**: The result owns the flagged dataset and all reported arrays.
//! * **Indexed by tier**: `centroids`, `cluster_sizes` and `outlier_counts`
//!   are indexed by canonical cluster id.
//!
//! ## Non-goals
//!
//! * This module does not serialize results (handled by `adapters`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Display, Formatter, Result as FmtResult};
use num_traits::Float;

// Internal dependencies
use crate::engine::executor::{ExecutorOutput, TierConfig};
use crate::evaluation::buffer_zone::PriceSummary;
use crate::primitives::dataset::Dataset;
use crate::primitives::errors::TierError;

// ============================================================================
// Tier Result
// ============================================================================

/// Output of one tiering run.
#[derive(Debug, Clone, PartialEq)]
pub struct TierResult<T> {
    /// Records grouped by ascending cluster id, with cluster and outlier columns.
    pub data: Dataset<T>,

    /// Centroids sorted ascending; `centroids[i]` belongs to cluster `i`.
    pub centroids: Vec<T>,

    /// Boundaries between adjacent tiers, in units of the partitioned column.
    pub boundaries: Vec<T>,

    /// Boundaries in raw units, rounded to two decimals (if a scale was configured).
    pub destandardized_boundaries: Option<Vec<T>>,

    /// Per-tier price buffer zones and means.
    pub price_summary: PriceSummary<T>,

    /// Records per cluster.
    pub cluster_sizes: Vec<usize>,

    /// Flagged records per cluster.
    pub outlier_counts: Vec<usize>,

    /// Lloyd iterations used by the partitioner.
    pub iterations: usize,
}

impl<T: Float> TierResult<T> {
    pub(crate) fn from_output(
        output: ExecutorOutput<T>,
        config: &TierConfig<T>,
    ) -> Result<Self, TierError> {
        let k = output.centroids.len();
        let labels = output.data.label_column(&config.cluster_column)?;
        let flags = output.data.column(&config.outlier_column)?;

        let mut cluster_sizes = vec![0; k];
        let mut outlier_counts = vec![0; k];
        for (&label, &flag) in labels.iter().zip(&flags) {
            cluster_sizes[label] += 1;
            if flag > T::zero() {
                outlier_counts[label] += 1;
            }
        }

        Ok(Self {
            data: output.data,
            centroids: output.centroids,
            boundaries: output.boundaries,
            destandardized_boundaries: output.destandardized_boundaries,
            price_summary: output.price_summary,
            cluster_sizes,
            outlier_counts,
            iterations: output.iterations,
        })
    }

    /// Number of volume tiers.
    #[inline]
    pub fn k(&self) -> usize {
        self.centroids.len()
    }

    /// Total number of flagged records.
    pub fn total_outliers(&self) -> usize {
        self.outlier_counts.iter().sum()
    }
}

impl<T: Float + Display> Display for TierResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Records: {}", self.data.len())?;
        writeln!(f, "  Clusters: {}", self.k())?;
        writeln!(f, "  Iterations: {}", self.iterations)?;
        writeln!(f, "  Outliers: {}", self.total_outliers())?;

        if !self.boundaries.is_empty() {
            writeln!(f)?;
            writeln!(f, "Boundaries:")?;
            for (i, b) in self.boundaries.iter().enumerate() {
                match self.destandardized_boundaries.as_ref().and_then(|r| r.get(i)) {
                    Some(raw) => writeln!(f, "  {i} | {}: {b:>10.5}  (raw {raw:.2})", i + 1)?,
                    None => writeln!(f, "  {i} | {}: {b:>10.5}", i + 1)?,
                }
            }
        }

        writeln!(f)?;
        writeln!(f, "Tiers:")?;
        writeln!(
            f,
            "  {:>7} {:>10} {:>6} {:>8} {:>10} {:>10} {:>10}",
            "Cluster", "Centroid", "Size", "Outliers", "Q1", "Q3", "Mean"
        )?;
        writeln!(f, "  {}", "-".repeat(67))?;

        let summary = &self.price_summary;
        for (i, &cluster) in summary.cluster_ids.iter().enumerate() {
            let zone = &summary.buffer_zones[i];
            let centroid = self.centroids.get(cluster).copied().unwrap_or_else(T::nan);
            writeln!(
                f,
                "  {:>7} {:>10.4} {:>6} {:>8} {:>10.2} {:>10.2} {:>10.2}",
                cluster,
                centroid,
                self.cluster_sizes.get(cluster).copied().unwrap_or(0),
                self.outlier_counts.get(cluster).copied().unwrap_or(0),
                zone.lower,
                zone.upper,
                summary.price_means[i]
            )?;
        }
        Ok(())
    }
}
