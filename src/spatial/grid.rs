//! Fixed-size categorical grid with clipped write paths
//!
//! A grid never changes size after construction. Learning and synthesis read a
//! grid as a frozen snapshot and produce a brand new grid, so a partially
//! updated grid is never observable. The only in-place writes are the seeding
//! helpers, which silently ignore coordinates that fall outside the grid.

use ndarray::Array2;

use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::category::Category;

/// One cell of a grid, identified by its row and column
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Row index
    pub row: usize,
    /// Column index
    pub col: usize,
    /// Category held by the cell
    pub state: Category,
}

/// Rectangular array of categories indexed by `[row, col]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    states: Array2<Category>,
}

impl Grid {
    /// Create a grid with every cell EMPTY
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or exceeds `MAX_GRID_DIMENSION`
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::filled(width, height, Category::EMPTY)
    }

    /// Create a grid with every cell set to `category`
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or exceeds `MAX_GRID_DIMENSION`
    pub fn filled(width: usize, height: usize, category: Category) -> Result<Self> {
        validate_dimension("width", width)?;
        validate_dimension("height", height)?;

        Ok(Self {
            states: Array2::from_elem((height, width), category),
        })
    }

    /// Copy a row-major 2-D array of categories into a new grid
    ///
    /// The width is taken from the longest row. Shorter rows leave their
    /// trailing cells EMPTY.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no rows or every row is empty
    pub fn from_rows<R: AsRef<[Category]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows
            .iter()
            .map(|row| row.as_ref().len())
            .max()
            .unwrap_or(0);

        let mut grid = Self::new(width, height)?;
        for (row, values) in rows.iter().enumerate() {
            for (col, &state) in values.as_ref().iter().enumerate() {
                if let Some(cell) = grid.states.get_mut([row, col]) {
                    *cell = state;
                }
            }
        }
        Ok(grid)
    }

    /// Assemble a grid from a complete row-major state buffer
    ///
    /// Used to commit the output of a full pass in one step.
    pub(crate) fn from_buffer(width: usize, height: usize, states: Vec<Category>) -> Option<Self> {
        Array2::from_shape_vec((height, width), states)
            .ok()
            .map(|states| Self { states })
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.states.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.states.nrows()
    }

    /// Dimensions as `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        self.states.dim()
    }

    /// Category at a position, `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Category> {
        self.states.get([row, col]).copied()
    }

    /// Category at a signed position, `None` when out of bounds
    pub fn get_signed(&self, row: isize, col: isize) -> Option<Category> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        self.get(row, col)
    }

    /// Seed a single cell
    ///
    /// Out-of-range coordinates are ignored. Returns whether a cell was written.
    pub fn set(&mut self, row: isize, col: isize, category: Category) -> bool {
        let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) else {
            return false;
        };
        match self.states.get_mut([row, col]) {
            Some(cell) => {
                *cell = category;
                true
            }
            None => false,
        }
    }

    /// Copy an exemplar into this grid with its top-left corner at `(top, left)`
    ///
    /// Cells of the exemplar that would land outside this grid are clipped.
    /// Returns the number of cells written.
    pub fn stamp(&mut self, exemplar: &Self, top: isize, left: isize) -> usize {
        let mut written = 0;
        for cell in exemplar.cells() {
            if self.set(
                top + cell.row as isize,
                left + cell.col as isize,
                cell.state,
            ) {
                written += 1;
            }
        }
        written
    }

    /// Copy an exemplar into the middle of this grid
    ///
    /// Returns the number of cells written.
    pub fn stamp_centered(&mut self, exemplar: &Self) -> usize {
        let top = (self.height() as isize - exemplar.height() as isize) / 2;
        let left = (self.width() as isize - exemplar.width() as isize) / 2;
        self.stamp(exemplar, top, left)
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.states
            .indexed_iter()
            .map(|((row, col), &state)| Cell { row, col, state })
    }

    /// Row-major view of the states
    pub fn states(&self) -> impl Iterator<Item = Category> + '_ {
        self.states.iter().copied()
    }

    /// Number of cells holding `category`
    pub fn count(&self, category: Category) -> usize {
        self.states.iter().filter(|&&state| state == category).count()
    }

    /// Whether every cell is EMPTY
    pub fn is_blank(&self) -> bool {
        self.states.iter().all(|state| state.is_empty())
    }

    /// Copy the grid back out as nested rows
    pub fn to_rows(&self) -> Vec<Vec<Category>> {
        self.states
            .rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect()
    }
}

fn validate_dimension(parameter: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(invalid_parameter(parameter, &value, &"must be positive"));
    }
    if value > MAX_GRID_DIMENSION {
        return Err(invalid_parameter(
            parameter,
            &value,
            &format!("must not exceed {MAX_GRID_DIMENSION}"),
        ));
    }
    Ok(())
}
