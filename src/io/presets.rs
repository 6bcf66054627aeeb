//! Built-in tile sets selectable from the command line

use crate::io::error::Result;
use crate::spatial::tiles::{Direction, Sockets, Tile, TileSet};

/// Named tile set shipped with the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Preset {
    /// Box-drawing wires with corners, T-junctions and crossings
    #[default]
    Circuit,
    /// Walls and paths
    Maze,
    /// Four shades of fill
    Tiles,
}

impl Preset {
    /// Lower-case name used in CLI arguments and JSON reports
    pub const fn name(self) -> &'static str {
        match self {
            Self::Circuit => "circuit",
            Self::Maze => "maze",
            Self::Tiles => "tiles",
        }
    }

    /// Build the preset's tile set
    ///
    /// # Errors
    ///
    /// Never fails for the built-in definitions; the signature matches
    /// [`TileSet::new`]
    pub fn tile_set(self) -> Result<TileSet> {
        TileSet::new(self.tiles())
    }

    fn tiles(self) -> Vec<Tile> {
        use Direction::{East, North, South, West};
        let sockets = |directions: &[Direction]| Sockets::from_directions(directions);

        match self {
            Self::Circuit => vec![
                // Blank board connects to anything
                Tile::weighted('·', Sockets::ALL, 3.0),
                Tile::weighted('─', sockets(&[East, West]), 2.0),
                Tile::weighted('│', sockets(&[North, South]), 2.0),
                Tile::new('┌', sockets(&[South, East])),
                Tile::new('┐', sockets(&[South, West])),
                Tile::new('└', sockets(&[North, East])),
                Tile::new('┘', sockets(&[North, West])),
                Tile::new('┬', sockets(&[South, East, West])),
                Tile::new('├', sockets(&[North, South, East])),
                Tile::new('┤', sockets(&[North, South, West])),
                Tile::new('┴', sockets(&[North, East, West])),
                Tile::new('┼', Sockets::ALL),
            ],
            Self::Maze => vec![
                Tile::weighted('█', Sockets::ALL, 2.0),
                Tile::weighted(' ', Sockets::ALL, 1.0),
            ],
            Self::Tiles => vec![
                Tile::weighted('░', Sockets::ALL, 2.0),
                Tile::weighted('▒', Sockets::ALL, 1.5),
                Tile::weighted('▓', Sockets::ALL, 1.0),
                Tile::weighted('█', Sockets::ALL, 0.5),
            ],
        }
    }
}
