use crate::algorithm::bitset::TileBitset;
use crate::spatial::tiles::{Direction, TileSet};

/// Precomputed compatibility masks for every tile and direction
///
/// `allowed(c, d)` holds every tile `t` with `can_connect(c, t, d)`, so the
/// tiles a neighbor may keep are the union of the masks of the representative
/// set. Built once per run from the immutable tile set.
#[derive(Debug, Clone)]
pub struct AdjacencyTable {
    masks: Vec<[TileBitset; 4]>,
    tile_count: usize,
}

impl AdjacencyTable {
    /// Evaluate `can_connect` for every ordered tile pair and direction
    pub fn new(tiles: &TileSet) -> Self {
        let tile_count = tiles.len();
        let masks = tiles
            .iter()
            .map(|current| {
                Direction::ALL.map(|direction| {
                    let mut mask = TileBitset::new(tile_count);
                    for (index, candidate) in tiles.iter().enumerate() {
                        if current.can_connect(candidate, direction) {
                            mask.insert(index);
                        }
                    }
                    mask
                })
            })
            .collect();

        Self { masks, tile_count }
    }

    /// Number of tiles covered by the table
    pub const fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Tiles that may sit in `direction` from `tile`
    pub fn allowed(&self, tile: usize, direction: Direction) -> Option<&TileBitset> {
        self.masks
            .get(tile)
            .and_then(|per_direction| per_direction.get(direction.index()))
    }

    /// Tiles supported in `direction` by at least one of `representatives`
    pub fn supported(&self, representatives: &TileBitset, direction: Direction) -> TileBitset {
        let mut supported = TileBitset::new(self.tile_count);
        for tile in representatives.iter() {
            if let Some(mask) = self.allowed(tile, direction) {
                supported.union_with(mask);
            }
        }
        supported
    }
}
