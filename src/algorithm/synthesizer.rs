//! Stochastic resampling of a grid from a learned transition model
//!
//! A pass reads one frozen grid and writes every next state into a private
//! buffer that becomes the new grid only once all cells are computed. No cell
//! ever sees another cell's updated state within the same pass, so the result
//! does not depend on traversal order.

use tracing::trace;

use crate::algorithm::learner::TransitionModel;
use crate::algorithm::sampling::RandomSource;
use crate::spatial::Grid;

/// Per-pass counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassStatistics {
    /// Cells resampled from a model distribution
    pub sampled: usize,
    /// Sampled cells whose category changed
    pub changed: usize,
    /// Cells kept because their neighborhood was insufficient
    pub insufficient: usize,
    /// Cells kept because their key was never learned
    pub unseen: usize,
}

/// Run one synthesis pass and return the new grid
///
/// Cells without a key or with a key absent from `model` keep their current
/// state. Every other cell takes exactly one draw from `random`.
pub fn synthesize_pass<R: RandomSource + ?Sized>(
    grid: &Grid,
    model: &TransitionModel,
    random: &mut R,
) -> Grid {
    synthesize_pass_with_statistics(grid, model, random).0
}

/// [`synthesize_pass`] that also reports what happened to each cell
pub fn synthesize_pass_with_statistics<R: RandomSource + ?Sized>(
    grid: &Grid,
    model: &TransitionModel,
    random: &mut R,
) -> (Grid, PassStatistics) {
    let keys = model.key_builder();
    let mut statistics = PassStatistics::default();
    let mut buffer = Vec::with_capacity(keys.expected_len());
    let mut next = Vec::with_capacity(grid.width() * grid.height());

    for cell in grid.cells() {
        let Some(key) = keys.key_at(grid, cell.row, cell.col, &mut buffer) else {
            statistics.insufficient += 1;
            next.push(cell.state);
            continue;
        };
        let Some(distribution) = model.get(&key) else {
            statistics.unseen += 1;
            next.push(cell.state);
            continue;
        };

        let state = distribution
            .sample(random.next_unit())
            .unwrap_or(cell.state);
        statistics.sampled += 1;
        if state != cell.state {
            statistics.changed += 1;
        }
        next.push(state);
    }

    trace!(
        sampled = statistics.sampled,
        changed = statistics.changed,
        insufficient = statistics.insufficient,
        unseen = statistics.unseen,
        "synthesis pass"
    );

    // The buffer holds exactly one state per cell in row-major order
    let synthesized =
        Grid::from_buffer(grid.width(), grid.height(), next).unwrap_or_else(|| grid.clone());
    (synthesized, statistics)
}

/// Repeatedly applies one immutable model to successive grids
pub struct Synthesizer<'m> {
    model: &'m TransitionModel,
}

impl<'m> Synthesizer<'m> {
    /// Synthesizer bound to a learned model
    pub const fn new(model: &'m TransitionModel) -> Self {
        Self { model }
    }

    /// Model driving this synthesizer
    pub const fn model(&self) -> &'m TransitionModel {
        self.model
    }

    /// Produce the next grid from `grid`
    pub fn pass<R: RandomSource + ?Sized>(&self, grid: &Grid, random: &mut R) -> Grid {
        synthesize_pass(grid, self.model, random)
    }

    /// Run `passes` passes, feeding each output into the next
    ///
    /// `observer` sees every intermediate grid with its 1-based pass number
    /// and statistics.
    pub fn evolve<R, F>(&self, grid: Grid, passes: usize, random: &mut R, mut observer: F) -> Grid
    where
        R: RandomSource + ?Sized,
        F: FnMut(usize, &Grid, &PassStatistics),
    {
        let mut current = grid;
        for pass in 1..=passes {
            let (next, statistics) = synthesize_pass_with_statistics(&current, self.model, random);
            observer(pass, &next, &statistics);
            current = next;
        }
        current
    }
}
