//! Tile pattern generation by entropy-ordered collapse and constraint propagation
//!
//! Tiles expose sockets on their four sides; two tiles may be neighbors only
//! when both expose the sockets facing their shared edge. The generator fills
//! a fixed grid by repeatedly collapsing the lowest-entropy cell to a weighted
//! random tile and propagating the consequences to a fixpoint. A contradiction
//! ends the run; there is no backtracking, and the same seed always replays
//! the same run.

#![forbid(unsafe_code)]

/// Collapse engine: selection, collapse, propagation and orchestration
pub mod algorithm;
/// Command line, tile set sources, renderers and error handling
pub mod io;
/// Entropy and seeded random selection
pub mod math;
/// Tiles, cells and the grid
pub mod spatial;

pub use algorithm::executor::{Generator, GeneratorConfig, RunState};
pub use io::error::{AlgorithmError, Result};
