//! Layer 5: Adapters
//!
//! # Purpose
//!
//! This layer converts between the in-memory `Dataset` and external data
//! formats. It is compiled only with the `serde` feature.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Adapters ← You are here
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms / Evaluation
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// JSON reader for datasets and writer for results.
pub mod json;
