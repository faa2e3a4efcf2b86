//! Analysis of generated grids

/// Category composition and outcome frequency statistics
pub mod statistics;
