//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer validates configuration and input data and orchestrates a
//! single tiering run: partitioning, boundary derivation, per-cluster
//! outlier detection and price aggregation.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Adapters
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms / Evaluation
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Pipeline orchestration and per-cluster outlier detection.
pub mod executor;

/// Public result type and its summary formatting.
pub mod output;

/// Fail-fast parameter and input validation.
pub mod validator;
