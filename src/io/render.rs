//! Text and JSON rendering of a generated grid

use crate::algorithm::executor::{Generator, RunState};
use crate::io::configuration::UNRESOLVED_SYMBOL;
use crate::io::error::Result;
use crate::spatial::grid::{Grid, Position};
use crate::spatial::tiles::TileSet;
use serde::Serialize;

/// Render one line per row, `?` for cells that never collapsed
///
/// Rows are joined by `\n` without a trailing newline.
pub fn render_ascii(grid: &Grid, tiles: &TileSet) -> String {
    let mut out = String::with_capacity(grid.len() + grid.height());
    for y in 0..grid.height() {
        if y > 0 {
            out.push('\n');
        }
        for x in 0..grid.width() {
            out.push(
                grid.symbol_at(Position::new(x, y), tiles)
                    .unwrap_or(UNRESOLVED_SYMBOL),
            );
        }
    }
    out
}

/// Machine-readable summary of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonReport {
    /// Tile set name (preset name or file stem)
    pub pattern: String,
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Seed the run used
    pub seed: u64,
    /// Whether the run succeeded
    pub success: bool,
    /// Failure description when the run did not succeed
    pub failure: Option<String>,
    /// ASCII rendering of the grid
    pub grid: String,
}

impl JsonReport {
    /// Summarize a generator in its current state
    pub fn from_generator(pattern: &str, generator: &Generator) -> Self {
        let config = generator.config();
        let failure = match generator.state() {
            RunState::Failed(reason) => Some(reason.to_string()),
            RunState::Running => Some("generation did not finish".to_string()),
            RunState::Succeeded => None,
        };

        Self {
            pattern: pattern.to_string(),
            width: config.width,
            height: config.height,
            seed: config.seed,
            success: generator.state().is_success(),
            failure,
            grid: render_ascii(generator.grid(), generator.tiles()),
        }
    }

    /// Pretty-printed JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
