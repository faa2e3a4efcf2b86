//! Mathematical utilities for the algorithm

/// Normal approximations used to judge outcome frequencies
pub mod probability;
