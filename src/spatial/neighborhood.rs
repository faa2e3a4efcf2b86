//! Neighborhood windows and boundary-aware neighbor extraction
//!
//! A window enumerates offsets row-major over a `size x size` square, skipping
//! the center, then keeps the subset selected by its [`WindowMode`]. Extraction
//! drops offsets that fall outside the grid instead of padding them, so cells
//! near an edge yield shorter neighborhoods than interior cells.

use crate::io::configuration::MAX_WINDOW_SIZE;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::category::Category;
use crate::spatial::grid::Grid;
use std::fmt;

/// Which offsets of the square window take part in a neighborhood
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WindowMode {
    /// Every offset of the square except the center
    #[default]
    Full,
    /// Only the upper-left quadrant: offsets with `dr <= 0` and `dc <= 0`
    ///
    /// All of these precede the center in row-major order.
    Causal,
}

impl WindowMode {
    /// Stable lowercase name used in model files
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Causal => "causal",
        }
    }

    /// Parse the name produced by [`WindowMode::as_str`]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "full" => Some(Self::Full),
            "causal" => Some(Self::Causal),
            _ => None,
        }
    }

    const fn includes(self, dr: isize, dc: isize) -> bool {
        match self {
            Self::Full => true,
            Self::Causal => dr <= 0 && dc <= 0,
        }
    }
}

impl fmt::Display for WindowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated neighborhood configuration with its precomputed offset table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeighborhoodWindow {
    size: usize,
    mode: WindowMode,
    offsets: Vec<(isize, isize)>,
}

impl NeighborhoodWindow {
    /// Create a window of odd `size >= 3`
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is even, smaller than 3 or larger than
    /// `MAX_WINDOW_SIZE`
    pub fn new(size: usize, mode: WindowMode) -> Result<Self> {
        if size < 3 {
            return Err(invalid_parameter("window size", &size, &"must be at least 3"));
        }
        if size % 2 == 0 {
            return Err(invalid_parameter("window size", &size, &"must be odd"));
        }
        if size > MAX_WINDOW_SIZE {
            return Err(invalid_parameter(
                "window size",
                &size,
                &format!("must not exceed {MAX_WINDOW_SIZE}"),
            ));
        }

        let radius = (size / 2) as isize;
        let mut offsets = Vec::with_capacity(size * size - 1);
        for dr in -radius..=radius {
            for dc in -radius..=radius {
                if (dr, dc) != (0, 0) && mode.includes(dr, dc) {
                    offsets.push((dr, dc));
                }
            }
        }

        Ok(Self {
            size,
            mode,
            offsets,
        })
    }

    /// Full 3x3 window, the eight surrounding cells
    ///
    /// # Errors
    ///
    /// Never fails in practice; kept fallible to share the validating constructor
    pub fn moore() -> Result<Self> {
        Self::new(3, WindowMode::Full)
    }

    /// Side length of the square window
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Offset inclusion policy
    pub const fn mode(&self) -> WindowMode {
        self.mode
    }

    /// Distance from the center to the window edge
    pub const fn radius(&self) -> usize {
        self.size / 2
    }

    /// `(dr, dc)` offsets in extraction order
    pub fn offsets(&self) -> &[(isize, isize)] {
        &self.offsets
    }

    /// Number of neighbors an unclipped extraction yields
    pub fn expected_len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the whole square footprint centered on `(row, col)` lies in the grid
    pub const fn fits(&self, grid_rows: usize, grid_cols: usize, row: usize, col: usize) -> bool {
        let radius = self.radius();
        row >= radius && col >= radius && row + radius < grid_rows && col + radius < grid_cols
    }

    /// Ordered states of the in-bounds neighbors of `(row, col)`
    ///
    /// Offsets outside the grid are dropped, never padded.
    pub fn extract(&self, grid: &Grid, row: usize, col: usize) -> Vec<Category> {
        let mut neighbors = Vec::with_capacity(self.offsets.len());
        self.extract_into(grid, row, col, &mut neighbors);
        neighbors
    }

    /// Like [`NeighborhoodWindow::extract`] but reuses `buffer`
    pub fn extract_into(&self, grid: &Grid, row: usize, col: usize, buffer: &mut Vec<Category>) {
        buffer.clear();
        let (row, col) = (row as isize, col as isize);
        buffer.extend(
            self.offsets
                .iter()
                .filter_map(|&(dr, dc)| grid.get_signed(row + dr, col + dc)),
        );
    }
}

impl fmt::Display for NeighborhoodWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} {}", self.size, self.size, self.mode)
    }
}
