//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the fundamental data structures shared by every other
//! layer:
//! - The error taxonomy (`TierError`)
//! - The tabular `Dataset` of named numeric columns
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Error types for clustering and outlier detection.
pub mod errors;

/// Row-oriented dataset of named numeric columns.
pub mod dataset;
