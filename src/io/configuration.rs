//! Algorithm constants and runtime configuration defaults

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Largest neighborhood window side length
pub const MAX_WINDOW_SIZE: usize = 15;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default number of synthesis passes
pub const DEFAULT_PASSES: usize = 8;

/// Default canvas width in cells
pub const DEFAULT_WIDTH: usize = 40;

/// Default canvas height in cells
pub const DEFAULT_HEIGHT: usize = 40;

/// Default neighborhood window side length
pub const DEFAULT_WINDOW_SIZE: usize = 3;

// Minimum draws per key before its frequencies are reported
/// Trials needed for a key to appear in the frequency report
pub const REPORT_MIN_TRIALS: usize = 30;

/// Normal quantile for the 95% confidence band
pub const REPORT_CONFIDENCE_Z: f64 = 1.96;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Suffix added to exported model filenames
pub const MODEL_SUFFIX: &str = "_model";
/// File stem used for outputs of the built-in island exemplar
pub const ISLAND_STEM: &str = "island";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 120;
/// Pixel size of one cell in rendered output
pub const CELL_PIXELS: u32 = 10;
/// Largest side length of a rendered image in pixels
pub const MAX_RENDER_DIMENSION: usize = 16_384;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
