//! Tile descriptors with directional sockets and selection weights
//!
//! A tile exposes a subset of the four compass directions as sockets. Two
//! tiles may sit side by side only when both expose the sockets facing the
//! shared edge. Tiles are immutable once a [`TileSet`] is built and are
//! referenced everywhere else by their index in that set.

use crate::io::error::{AlgorithmError, Result};
use std::fmt;

/// Compass direction between orthogonally adjacent cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row `y - 1`
    North,
    /// Towards row `y + 1`
    South,
    /// Towards column `x + 1`
    East,
    /// Towards column `x - 1`
    West,
}

impl Direction {
    /// All directions in neighbor enumeration order
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// The direction facing back across the same edge
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// Column and row deltas for a single step in this direction
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
        }
    }

    /// Stable index in `0..4`, matching the order of [`Direction::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::East => 2,
            Self::West => 3,
        }
    }

    const fn bit(self) -> u8 {
        1 << self.index()
    }

    const fn letter(self) -> char {
        match self {
            Self::North => 'N',
            Self::South => 'S',
            Self::East => 'E',
            Self::West => 'W',
        }
    }
}

/// Set of directions a tile exposes for connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sockets(u8);

impl Sockets {
    /// No sockets at all
    pub const NONE: Self = Self(0);
    /// Sockets on every side
    pub const ALL: Self = Self(0b1111);

    /// Build a socket set from a list of directions
    pub fn from_directions(directions: &[Direction]) -> Self {
        Self(directions.iter().fold(0, |bits, d| bits | d.bit()))
    }

    /// Parse a string of `N`, `S`, `E`, `W` letters (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns an error if the string contains any other character
    pub fn parse(letters: &str) -> Result<Self> {
        let mut bits = 0;
        for ch in letters.chars() {
            let direction = match ch.to_ascii_uppercase() {
                'N' => Direction::North,
                'S' => Direction::South,
                'E' => Direction::East,
                'W' => Direction::West,
                _ => {
                    return Err(AlgorithmError::InvalidTileSet {
                        reason: format!("unknown socket '{ch}' in \"{letters}\""),
                    });
                }
            };
            bits |= direction.bit();
        }
        Ok(Self(bits))
    }

    /// Test whether a direction is exposed
    pub const fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    /// Number of exposed directions
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterate exposed directions in N, S, E, W order
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |&d| self.contains(d))
    }
}

impl fmt::Display for Sockets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for direction in self.iter() {
            write!(f, "{}", direction.letter())?;
        }
        Ok(())
    }
}

/// Immutable adjacency-constraint descriptor
///
/// Equality is by value: symbol, sockets and weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    symbol: char,
    sockets: Sockets,
    weight: f64,
}

impl Tile {
    /// Create a tile with weight 1.0
    pub const fn new(symbol: char, sockets: Sockets) -> Self {
        Self {
            symbol,
            sockets,
            weight: 1.0,
        }
    }

    /// Create a tile with an explicit relative selection weight
    pub const fn weighted(symbol: char, sockets: Sockets, weight: f64) -> Self {
        Self {
            symbol,
            sockets,
            weight,
        }
    }

    /// Output marker written by renderers
    pub const fn symbol(&self) -> char {
        self.symbol
    }

    /// Directions this tile exposes
    pub const fn sockets(&self) -> Sockets {
        self.sockets
    }

    /// Relative selection probability
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// Whether `other` may sit next to this tile in `direction`
    ///
    /// Holds iff this tile exposes `direction` and `other` exposes the
    /// opposite side of the shared edge.
    pub const fn can_connect(&self, other: &Self, direction: Direction) -> bool {
        self.sockets.contains(direction) && other.sockets.contains(direction.opposite())
    }
}

/// Validated, deduplicated, ordered collection of tiles
#[derive(Debug, Clone, PartialEq)]
pub struct TileSet {
    tiles: Vec<Tile>,
}

impl TileSet {
    /// Validate and deduplicate a list of tiles
    ///
    /// Later tiles equal by value to an earlier one are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or any weight is not a finite
    /// positive number
    pub fn new(tiles: Vec<Tile>) -> Result<Self> {
        if tiles.is_empty() {
            return Err(AlgorithmError::InvalidTileSet {
                reason: "tile set must contain at least one tile".to_string(),
            });
        }

        let mut unique: Vec<Tile> = Vec::with_capacity(tiles.len());
        for tile in tiles {
            if !(tile.weight.is_finite() && tile.weight > 0.0) {
                return Err(AlgorithmError::InvalidTileSet {
                    reason: format!(
                        "tile '{}' has weight {}, expected a positive finite number",
                        tile.symbol, tile.weight
                    ),
                });
            }
            if !unique.contains(&tile) {
                unique.push(tile);
            }
        }

        Ok(Self { tiles: unique })
    }

    /// Number of distinct tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false for a constructed set; present for API symmetry
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Look up a tile by index
    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Weight of the tile at `index`, or 0.0 when out of range
    pub fn weight(&self, index: usize) -> f64 {
        self.tiles.get(index).map_or(0.0, Tile::weight)
    }

    /// Iterate tiles in index order
    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }

    /// Index of the first tile rendered with `symbol`
    pub fn position_of(&self, symbol: char) -> Option<usize> {
        self.tiles.iter().position(|tile| tile.symbol == symbol)
    }
}

impl<'a> IntoIterator for &'a TileSet {
    type Item = &'a Tile;
    type IntoIter = std::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}
