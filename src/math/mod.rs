//! Mathematical utilities for the algorithm

/// Entropy and seeded weighted random selection
pub mod probability;
