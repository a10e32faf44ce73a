//! Seeded k-means partitioning of a single numeric feature.
//!
//! ## Purpose
//!
//! This module partitions the values of one column (typically `Quantity`)
//! into `k` volume tiers using Lloyd's algorithm, then renumbers the tiers so
//! that cluster ids follow ascending centroid order.
//!
//! ## Design notes
//!
//! * **Determinism**: Initial centroids are drawn from a `ChaCha8Rng` seeded
//!   with an explicit seed, so identical input and seed give identical output
//!   on every platform.
//! * **Seeding**: `Uniform` draws `k` distinct records; `PlusPlus` uses
//!   k-means++ D² weighting.
//! * **Empty clusters**: A cluster that loses all members is re-seeded with
//!   the record farthest from its centroid, taken from a cluster with more
//!   than one member.
//! * **Canonical ids**: Raw cluster ids depend on the seeding order and are
//!   never exposed. `canonicalize` maps raw id → rank of its centroid.
//!
//! ## Key concepts
//!
//! * **Raw id**: Index of a centroid in the algorithm's internal array.
//! * **Canonical id**: Rank of the centroid in ascending order (0 = lowest volume).
//!
//! ## Invariants
//!
//! * Returned centroids are sorted ascending.
//! * Every member of cluster `i` is no farther from centroid `i` than from
//!   any other centroid.
//! * Equal centroids keep the order of their raw ids.
//!
//! ## Non-goals
//!
//! * This module does not guarantee the globally optimal partition
//!   (k-means is a local search).
//! * This module does not cluster more than one feature at a time.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// Internal dependencies
use crate::engine::validator::Validator;
use crate::primitives::dataset::Dataset;
use crate::primitives::errors::TierError;

// ============================================================================
// Configuration
// ============================================================================

/// Strategy for choosing the initial centroids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Seeding {
    /// `k` distinct records drawn uniformly at random.
    #[default]
    Uniform,

    /// k-means++: each further centroid is drawn with probability
    /// proportional to its squared distance from the nearest chosen one.
    PlusPlus,
}

/// Lloyd's k-means over one feature column.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeans {
    /// Number of clusters.
    pub k: usize,

    /// Seed for centroid initialization.
    pub seed: u64,

    /// Upper bound on Lloyd iterations.
    pub max_iterations: usize,

    /// Stop once no centroid moves more than this.
    pub tolerance: f64,

    /// Initialization strategy.
    pub seeding: Seeding,
}

/// Output of the raw algorithm, before canonicalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawClustering<T> {
    /// Centroids indexed by raw id.
    pub centroids: Vec<T>,
    /// Raw id of each input value.
    pub labels: Vec<usize>,
    /// Lloyd iterations performed.
    pub iterations: usize,
}

/// A dataset partitioned into canonically numbered clusters.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<T> {
    /// Input dataset with the cluster-id column appended.
    pub data: Dataset<T>,
    /// Canonical cluster id of each record, in input order.
    pub labels: Vec<usize>,
    /// Centroids sorted ascending; `centroids[i]` belongs to cluster `i`.
    pub centroids: Vec<T>,
    /// Lloyd iterations performed.
    pub iterations: usize,
}

impl<T> Partition<T> {
    /// Number of clusters.
    #[inline]
    pub fn k(&self) -> usize {
        self.centroids.len()
    }

    /// Number of records in each cluster, indexed by canonical id.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }
}

// ============================================================================
// Implementation
// ============================================================================

impl Default for KMeans {
    fn default() -> Self {
        Self::new(Self::DEFAULT_K)
    }
}

impl KMeans {
    // ========================================================================
    // Constants
    // ========================================================================

    /// Default number of volume tiers.
    pub const DEFAULT_K: usize = 4;

    /// Default initialization seed.
    pub const DEFAULT_SEED: u64 = 123;

    /// Default iteration cap.
    pub const DEFAULT_MAX_ITERATIONS: usize = 100;

    /// Default convergence tolerance on centroid movement.
    pub const DEFAULT_TOLERANCE: f64 = 1e-5;

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create a k-means configuration with default seed and limits.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            seed: Self::DEFAULT_SEED,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            tolerance: Self::DEFAULT_TOLERANCE,
            seeding: Seeding::default(),
        }
    }

    /// Set the initialization seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the iteration cap.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence tolerance.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the initialization strategy.
    pub fn seeding(mut self, seeding: Seeding) -> Self {
        self.seeding = seeding;
        self
    }

    // ========================================================================
    // Main API
    // ========================================================================

    /// Partition `dataset` on `feature_column` and append canonical ids as `cluster_column`.
    pub fn partition<T: Float>(
        &self,
        dataset: &Dataset<T>,
        feature_column: &str,
        cluster_column: &str,
    ) -> Result<Partition<T>, TierError> {
        Validator::validate_dataset(dataset)?;
        Validator::validate_cluster_count(self.k, dataset.len())?;

        let values = dataset.feature_column(feature_column)?;
        let raw = self.fit(&values)?;
        let (labels, centroids) = canonicalize(&raw.centroids, &raw.labels);

        let ids: Vec<T> = labels.iter().map(|&l| T::from(l).unwrap()).collect();
        let data = dataset.with_column(cluster_column, &ids)?;

        Ok(Partition {
            data,
            labels,
            centroids,
            iterations: raw.iterations,
        })
    }

    /// Run Lloyd's algorithm on raw values, returning raw (non-canonical) ids.
    pub fn fit<T: Float>(&self, values: &[T]) -> Result<RawClustering<T>, TierError> {
        if values.is_empty() {
            return Err(TierError::EmptyInput);
        }
        Validator::validate_cluster_count(self.k, values.len())?;
        Validator::validate_iterations(self.max_iterations)?;
        Validator::validate_tolerance(self.tolerance)?;
        for (i, &v) in values.iter().enumerate() {
            Validator::validate_feature_value(v, "feature", i)?;
        }

        let n = values.len();
        let k = self.k;
        let tolerance = T::from(self.tolerance).unwrap_or_else(T::zero);
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);

        let mut centroids = match self.seeding {
            Seeding::Uniform => uniform_seeds(values, k, &mut rng),
            Seeding::PlusPlus => plus_plus_seeds(values, k, &mut rng),
        };

        let mut labels = vec![0usize; n];
        let mut counts = vec![0usize; k];
        let mut sums = vec![T::zero(); k];
        let mut iterations = 0;

        for _ in 0..self.max_iterations {
            iterations += 1;

            // Step 1: Assign each value to its nearest centroid
            assign_nearest(values, &centroids, &mut labels);

            // Step 2: Accumulate cluster sums
            counts.iter_mut().for_each(|c| *c = 0);
            sums.iter_mut().for_each(|s| *s = T::zero());
            for (&v, &l) in values.iter().zip(&labels) {
                counts[l] += 1;
                sums[l] = sums[l] + v;
            }

            // Step 3: Re-seed clusters that lost all members
            relocate_empty(values, &centroids, &mut labels, &mut counts, &mut sums);

            // Step 4: Move centroids and measure the largest shift
            let mut shift = T::zero();
            for c in 0..k {
                if counts[c] == 0 {
                    continue;
                }
                let updated = sums[c] / T::from(counts[c]).unwrap();
                shift = shift.max((updated - centroids[c]).abs());
                centroids[c] = updated;
            }

            if shift <= tolerance {
                break;
            }
        }

        // Final labels always agree with the returned centroids
        assign_nearest(values, &centroids, &mut labels);

        Ok(RawClustering {
            centroids,
            labels,
            iterations,
        })
    }
}

// ============================================================================
// Canonicalization
// ============================================================================

/// Renumber clusters by ascending centroid value.
///
/// Returns the canonical label of every record and the centroids sorted
/// ascending. Equal centroids are ordered by raw id.
pub fn canonicalize<T: Float>(centroids: &[T], labels: &[usize]) -> (Vec<usize>, Vec<T>) {
    let mut order: Vec<usize> = (0..centroids.len()).collect();
    // Stable sort: ties keep raw-id order
    order.sort_by(|&a, &b| centroids[a].partial_cmp(&centroids[b]).unwrap_or(Equal));

    let mut rank = vec![0usize; centroids.len()];
    for (canonical, &raw) in order.iter().enumerate() {
        rank[raw] = canonical;
    }

    let canonical_labels = labels.iter().map(|&raw| rank[raw]).collect();
    let sorted_centroids = order.iter().map(|&raw| centroids[raw]).collect();
    (canonical_labels, sorted_centroids)
}

// ============================================================================
// Internal Helpers
// ============================================================================

/// Nearest-centroid assignment; ties go to the lowest raw id.
fn assign_nearest<T: Float>(values: &[T], centroids: &[T], labels: &mut [usize]) {
    for (label, &v) in labels.iter_mut().zip(values) {
        let mut best = 0;
        let mut best_dist = (v - centroids[0]).abs();
        for (c, &centroid) in centroids.iter().enumerate().skip(1) {
            let dist = (v - centroid).abs();
            if dist < best_dist {
                best = c;
                best_dist = dist;
            }
        }
        *label = best;
    }
}

fn relocate_empty<T: Float>(
    values: &[T],
    centroids: &[T],
    labels: &mut [usize],
    counts: &mut [usize],
    sums: &mut [T],
) {
    for empty in 0..counts.len() {
        if counts[empty] != 0 {
            continue;
        }

        let mut farthest: Option<(usize, T)> = None;
        for (i, (&v, &l)) in values.iter().zip(labels.iter()).enumerate() {
            if counts[l] < 2 {
                continue;
            }
            let dist = (v - centroids[l]).abs();
            if farthest.is_none_or(|(_, d)| dist > d) {
                farthest = Some((i, dist));
            }
        }

        let Some((i, _)) = farthest else {
            return;
        };
        let old = labels[i];
        counts[old] -= 1;
        sums[old] = sums[old] - values[i];
        labels[i] = empty;
        counts[empty] = 1;
        sums[empty] = values[i];
    }
}

fn uniform_seeds<T: Float>(values: &[T], k: usize, rng: &mut ChaCha8Rng) -> Vec<T> {
    index::sample(rng, values.len(), k)
        .iter()
        .map(|i| values[i])
        .collect()
}

fn plus_plus_seeds<T: Float>(values: &[T], k: usize, rng: &mut ChaCha8Rng) -> Vec<T> {
    let n = values.len();
    let mut centroids = Vec::with_capacity(k);
    centroids.push(values[rng.random_range(0..n)]);

    let mut weights = vec![0.0f64; n];
    while centroids.len() < k {
        for (w, &v) in weights.iter_mut().zip(values) {
            let nearest = centroids
                .iter()
                .map(|&c| (v - c).abs())
                .fold(T::infinity(), T::min);
            *w = (nearest * nearest).to_f64().unwrap_or(0.0);
        }

        let total: f64 = weights.iter().sum();
        if total <= 0.0 || !total.is_finite() {
            // Every record coincides with a chosen centroid
            centroids.push(values[rng.random_range(0..n)]);
            continue;
        }

        let mut target = rng.random::<f64>() * total;
        let mut chosen = n - 1;
        for (i, &w) in weights.iter().enumerate() {
            if target < w {
                chosen = i;
                break;
            }
            target -= w;
        }
        centroids.push(values[chosen]);
    }
    centroids
}
