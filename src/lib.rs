//! Example-based synthesis of categorical 2-D terrain
//!
//! The system learns, from a small exemplar grid, how each cell's ordered
//! neighborhood predicts its category, then resamples grids pass by pass so
//! they locally resemble the exemplar. Each pass reads a frozen snapshot and
//! commits a complete new grid.

#![forbid(unsafe_code)]

/// Pattern keys, model learning, random sources and synthesis passes
pub mod algorithm;
/// Statistics over generated grids
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Normal approximations for frequency checks
pub mod math;
/// Categories, grids and neighborhood windows
pub mod spatial;

pub use algorithm::{
    Distribution, PatternKey, PatternKeyBuilder, RandomSelector, RandomSource, ReplaySource,
    Synthesizer, TransitionModel, learn, synthesize_pass,
};
pub use io::error::{Result, SynthesisError};
pub use spatial::{Category, CategorySet, Cell, Grid, NeighborhoodWindow, WindowMode};
