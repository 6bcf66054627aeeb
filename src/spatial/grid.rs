//! Fixed rectangular grid of cells and their per-position possibility state
//!
//! Cells live in a row-major `Array2` indexed `[y, x]`. Cells never reference
//! each other; neighbors are reached by coordinate lookup through the grid.

use crate::algorithm::bitset::TileBitset;
use crate::spatial::tiles::{Direction, TileSet};
use ndarray::Array2;
use std::fmt;

/// Integer grid coordinate, `x` along columns and `y` along rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Column index
    pub x: usize,
    /// Row index
    pub y: usize,
}

impl Position {
    /// Create a position from column and row
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Result of restricting a cell's possibilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Narrowing {
    /// The set did not shrink
    Unchanged,
    /// The set shrank and is still non-empty
    Narrowed,
    /// The set became empty
    Emptied,
}

/// Possibility state for one grid position
///
/// `chosen` is set exactly once, and when set the possibility set is the
/// singleton holding it. An uncollapsed cell with an empty set is a
/// contradiction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    position: Position,
    possibilities: TileBitset,
    chosen: Option<usize>,
}

impl Cell {
    /// Create an uncollapsed cell where every tile is possible
    pub fn new(position: Position, tile_count: usize) -> Self {
        Self {
            position,
            possibilities: TileBitset::all(tile_count),
            chosen: None,
        }
    }

    /// Coordinate of this cell
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Tiles still possible here
    pub const fn possibilities(&self) -> &TileBitset {
        &self.possibilities
    }

    /// Number of tiles still possible here
    pub fn possibility_count(&self) -> usize {
        self.possibilities.count()
    }

    /// Whether the cell has been finalized
    pub const fn is_collapsed(&self) -> bool {
        self.chosen.is_some()
    }

    /// The finalized tile index
    pub const fn chosen(&self) -> Option<usize> {
        self.chosen
    }

    /// Whether the cell has run out of possibilities
    pub fn is_contradiction(&self) -> bool {
        self.chosen.is_none() && self.possibilities.is_empty()
    }

    /// Tiles this cell constrains its neighbors with
    ///
    /// The singleton `{chosen}` once collapsed, otherwise every remaining
    /// possibility.
    pub fn representatives(&self) -> TileBitset {
        match self.chosen {
            Some(tile) => TileBitset::singleton(self.possibilities.capacity(), tile),
            None => self.possibilities.clone(),
        }
    }

    /// Keep only possibilities also present in `allowed`
    ///
    /// Collapsed cells are final and report [`Narrowing::Unchanged`].
    pub fn restrict(&mut self, allowed: &TileBitset) -> Narrowing {
        if self.is_collapsed() {
            return Narrowing::Unchanged;
        }

        let before = self.possibilities.count();
        self.possibilities.intersect_with(allowed);
        let after = self.possibilities.count();

        if after == 0 {
            Narrowing::Emptied
        } else if after < before {
            Narrowing::Narrowed
        } else {
            Narrowing::Unchanged
        }
    }

    /// Finalize the cell to `tile`
    ///
    /// Returns false, leaving the cell untouched, when the cell is already
    /// collapsed or `tile` is not among its possibilities.
    pub fn assign(&mut self, tile: usize) -> bool {
        if self.is_collapsed() || !self.possibilities.contains(tile) {
            return false;
        }

        self.possibilities = TileBitset::singleton(self.possibilities.capacity(), tile);
        self.chosen = Some(tile);
        true
    }
}

/// Rectangular arena of cells, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<Cell>,
    tile_count: usize,
}

impl Grid {
    /// Create a `width` × `height` grid with every tile possible everywhere
    pub fn new(width: usize, height: usize, tile_count: usize) -> Self {
        let cells = Array2::from_shape_fn((height, width), |(y, x)| {
            Cell::new(Position::new(x, y), tile_count)
        });

        Self { cells, tile_count }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True only for a zero-area grid
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Size of the tile set the cells were created with
    pub const fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Borrow the cell at `position`
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.cells.get([position.y, position.x])
    }

    /// Mutably borrow the cell at `position`
    pub fn cell_mut(&mut self, position: Position) -> Option<&mut Cell> {
        self.cells.get_mut([position.y, position.x])
    }

    /// Iterate cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Step from `position` in `direction`, if the result stays on the grid
    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.offset();
        let x = position.x.checked_add_signed(dx as isize)?;
        let y = position.y.checked_add_signed(dy as isize)?;
        (x < self.width() && y < self.height()).then_some(Position::new(x, y))
    }

    /// In-bounds neighbors of `position` in N, S, E, W order
    pub fn neighbors(&self, position: Position) -> impl Iterator<Item = (Direction, Position)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| Some((direction, self.neighbor(position, direction)?)))
    }

    /// Number of collapsed cells
    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_collapsed()).count()
    }

    /// Whether every cell has been finalized
    pub fn is_fully_collapsed(&self) -> bool {
        self.cells.iter().all(Cell::is_collapsed)
    }

    /// First cell with an empty possibility set, if any
    pub fn contradiction(&self) -> Option<Position> {
        self.cells
            .iter()
            .find(|cell| cell.is_contradiction())
            .map(Cell::position)
    }

    /// Tile index chosen at `position`
    pub fn chosen_at(&self, position: Position) -> Option<usize> {
        self.cell(position).and_then(Cell::chosen)
    }

    /// Symbol chosen at `position`, `None` while unresolved
    pub fn symbol_at(&self, position: Position, tiles: &TileSet) -> Option<char> {
        self.chosen_at(position)
            .and_then(|tile| tiles.get(tile))
            .map(|tile| tile.symbol())
    }

    /// Find the first adjacent pair of collapsed cells that cannot connect
    ///
    /// Only east and south edges are checked; every shared edge is covered
    /// once and `can_connect` is symmetric across it.
    pub fn find_adjacency_violation(&self, tiles: &TileSet) -> Option<(Position, Direction)> {
        for cell in &self.cells {
            let Some(tile) = cell.chosen().and_then(|index| tiles.get(index)) else {
                continue;
            };
            for direction in [Direction::East, Direction::South] {
                let Some(next) = self.neighbor(cell.position(), direction) else {
                    continue;
                };
                let Some(other) = self.chosen_at(next).and_then(|index| tiles.get(index)) else {
                    continue;
                };
                if !tile.can_connect(other, direction) {
                    return Some((cell.position(), direction));
                }
            }
        }
        None
    }
}
