//! Algorithm constants and runtime configuration defaults

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default grid side length when neither width nor height is given
pub const DEFAULT_SIZE: usize = 20;

// Runaway-loop guard only; a propagation that needs more pops than this fails the run
/// Default ceiling on queue pops for a single propagation call
pub const DEFAULT_PROPAGATION_LIMIT: usize = 10_000;

/// Maximum allowed grid width or height
pub const MAX_GRID_DIMENSION: usize = 256;

// Selection scans every cell per step, so run time grows with the square of this
/// Maximum allowed number of cells in a grid
pub const MAX_GRID_CELLS: usize = 16_384;

// Must stay below the smallest entropy gap we care about ordering correctly
/// Exclusive upper bound of the additive tie-break noise on entropy
pub const ENTROPY_JITTER_BOUND: f64 = 0.0001;

// Output settings
/// Symbol rendered for cells that never collapsed
pub const UNRESOLVED_SYMBOL: char = '?';
/// Pixels per glyph unit in PNG and GIF output (each cell is 3x3 units)
pub const IMAGE_CELL_SCALE: u32 = 4;
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 5;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
/// Collapses between progress bar redraws
pub const PROGRESS_UPDATE_INTERVAL: usize = 10;
