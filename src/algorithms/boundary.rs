//! Boundaries between adjacent volume tiers.
//!
//! ## Purpose
//!
//! This module derives the `k - 1` cut points separating consecutive
//! clusters and maps them from standardized units back to raw units for
//! reporting.
//!
//! ## Design notes
//!
//! * **Midpoints**: `boundary[i] = (c[i] + c[i + 1]) / 2` over ascending centroids.
//! * **Destandardization**: `b * std + mean`, rounded half-to-even to two
//!   decimals. A zero `std` is replaced by one.
//!
//! ## Invariants
//!
//! * `boundaries(c).len() == c.len() - 1` (empty for `k <= 1`).
//! * Boundaries are strictly ascending when centroids are distinct.
//! * `boundary[i]` lies between centroid `i` and centroid `i + 1`.
//!
//! ## Non-goals
//!
//! * This module does not sort centroids (the partitioner returns them sorted).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::engine::validator::Validator;
use crate::math::stats::{Standardization, round_half_even};
use crate::primitives::errors::TierError;

/// Decimal places kept by `destandardize`.
pub const BOUNDARY_DECIMALS: i32 = 2;

/// Midpoints between consecutive ascending centroids.
pub fn boundaries<T: Float>(ordered_centroids: &[T]) -> Vec<T> {
    debug_assert!(
        ordered_centroids.windows(2).all(|w| !(w[1] < w[0])),
        "Centroids must be sorted ascending"
    );

    let two = T::from(2.0).unwrap();
    ordered_centroids
        .windows(2)
        .map(|w| (w[0] + w[1]) / two)
        .collect()
}

/// Map standardized boundaries back to raw units, rounded to two decimals.
pub fn destandardize<T: Float>(
    boundaries: &[T],
    scale: &Standardization<T>,
) -> Result<Vec<T>, TierError> {
    Validator::validate_scale(scale.mean, scale.std)?;

    Ok(boundaries
        .iter()
        .map(|&b| round_half_even(scale.destandardize(b), BOUNDARY_DECIMALS))
        .collect())
}

/// Tier a raw value falls into, given ascending boundaries.
///
/// Values equal to a boundary belong to the upper tier.
pub fn tier_of<T: Float>(value: T, boundaries: &[T]) -> usize {
    boundaries.iter().take_while(|&&b| value >= b).count()
}
