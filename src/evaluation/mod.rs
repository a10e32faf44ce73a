//! Layer 3: Evaluation
//!
//! # Purpose
//!
//! This layer summarizes clustered data for reporting: price buffer zones
//! (interquartile bands) and mean prices per volume tier.
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
//! Layer 3: Algorithms / Evaluation ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Per-tier price buffer zones and means.
pub mod buffer_zone;
