//! Custom tile sets loaded from JSON files
//!
//! The file holds an array of tile definitions:
//!
//! ```json
//! [
//!   { "symbol": "─", "sockets": "EW", "weight": 2.0 },
//!   { "symbol": "┼", "sockets": "NSEW" }
//! ]
//! ```

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::tiles::{Sockets, Tile, TileSet};
use serde::Deserialize;
use std::path::Path;

const fn default_weight() -> f64 {
    1.0
}

/// One tile as written in a tile set file
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TileDefinition {
    /// Single character written for this tile
    pub symbol: char,
    /// Exposed sides as a string of `N`, `S`, `E`, `W` letters
    pub sockets: String,
    /// Relative selection weight, 1.0 when omitted
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl TileDefinition {
    /// Convert into a validated tile
    ///
    /// # Errors
    ///
    /// Returns an error if the socket string contains anything other than
    /// direction letters
    pub fn to_tile(&self) -> Result<Tile> {
        Ok(Tile::weighted(
            self.symbol,
            Sockets::parse(&self.sockets)?,
            self.weight,
        ))
    }
}

/// Parse a tile set from JSON text
///
/// # Errors
///
/// Returns an error if the JSON is malformed, a socket string is invalid or
/// the resulting tile set fails validation
pub fn parse_tile_set(json: &str, path: &Path) -> Result<TileSet> {
    let definitions: Vec<TileDefinition> =
        serde_json::from_str(json).map_err(|source| AlgorithmError::TileSetParse {
            path: path.to_path_buf(),
            source,
        })?;

    let tiles = definitions
        .iter()
        .map(TileDefinition::to_tile)
        .collect::<Result<Vec<_>>>()?;
    TileSet::new(tiles)
}

/// Load a tile set from a JSON file
///
/// # Errors
///
/// Returns an error if the file cannot be read or its contents fail
/// [`parse_tile_set`]
pub fn load_tile_set(path: &Path) -> Result<TileSet> {
    let json = std::fs::read_to_string(path).map_err(|source| AlgorithmError::FileSystem {
        path: path.to_path_buf(),
        operation: "read tile set",
        source,
    })?;
    parse_tile_set(&json, path)
}
