//! Spatial data structures
//!
//! This module contains spatial-related functionality including:
//! - Terrain categories and palettes
//! - The fixed-size categorical grid
//! - Neighborhood windows and boundary-aware extraction

/// Terrain categories and category palettes
pub mod category;
/// Fixed-size categorical grid
pub mod grid;
/// Neighborhood window configuration and extraction
pub mod neighborhood;

pub use category::{Category, CategorySet};
pub use grid::{Cell, Grid};
pub use neighborhood::{NeighborhoodWindow, WindowMode};
