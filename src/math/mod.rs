//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used throughout the crate:
//! - Descriptive statistics (mean vector, covariance, percentiles, z-scores)
//! - Linear algebra (pseudo-inverse, quadratic forms, normal equations)
//! - Distance metrics (Euclidean, Mahalanobis)
//!
//! These are reusable mathematical building blocks with no clustering-specific logic.
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
//! Layer 3: Algorithms / Evaluation
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Descriptive statistics and standardization.
pub mod stats;

/// Linear algebra backend (nalgebra).
pub mod linalg;

/// Distance metrics between feature vectors.
pub mod distance;
