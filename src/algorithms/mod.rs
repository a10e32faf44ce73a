//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer implements the core logic of volume tiering: seeded k-means
//! with canonical cluster identity, boundary derivation between tiers, and
//! the interchangeable outlier-scoring strategies. It is orchestrated by the
//! engine layer.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Adapters
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Seeded k-means partitioning with canonical cluster ids.
pub mod kmeans;

/// Midpoint boundaries between ordered centroids.
pub mod boundary;

/// Outlier-scoring strategies (Mahalanobis, regression, nearest neighbours).
pub mod outlier;
