//! Spatial data structures
//!
//! This module contains:
//! - Tile descriptors, sockets and validated tile sets
//! - The fixed grid of cells and their possibility state

/// Grid of cells indexed by integer coordinate
pub mod grid;
/// Tile and socket definitions
pub mod tiles;

pub use grid::{Cell, Grid, Position};
pub use tiles::{Direction, Sockets, Tile, TileSet};
