use crate::{
    io::configuration::ENTROPY_JITTER_BOUND,
    math::probability::{RandomSelector, weighted_shannon_entropy},
    spatial::grid::{Cell, Grid, Position},
    spatial::tiles::TileSet,
};
use std::cmp::Ordering;

/// How cells with equal entropy are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TieBreak {
    /// Add seeded noise in `[0, ENTROPY_JITTER_BOUND)` to each entropy
    ///
    /// Can reorder two cells whose entropies differ by less than the bound.
    #[default]
    Jitter,
    /// Compare exact entropy, then a seeded 64-bit draw
    Lexicographic,
    /// Compare exact entropy, then row-major position; draws nothing
    ScanOrder,
}

/// Weighted Shannon entropy of a cell's remaining possibilities, in bits
///
/// Collapsed cells and cells with at most one possibility have entropy 0.
pub fn cell_entropy(cell: &Cell, tiles: &TileSet) -> f64 {
    if cell.is_collapsed() || cell.possibility_count() <= 1 {
        return 0.0;
    }

    let weights: Vec<f64> = cell
        .possibilities()
        .iter()
        .map(|tile| tiles.weight(tile))
        .collect();
    weighted_shannon_entropy(&weights)
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    position: Position,
    entropy: f64,
    tie: u64,
}

impl Candidate {
    fn precedes(&self, other: &Self) -> bool {
        match self.entropy.partial_cmp(&other.entropy) {
            Some(Ordering::Less) => true,
            Some(Ordering::Equal) => self.tie < other.tie,
            _ => false,
        }
    }
}

/// Pick the next cell to collapse by minimum entropy
///
/// Scans uncollapsed cells with at least one possibility in row-major order.
/// A cell with a single possibility is returned immediately without drawing
/// any noise, as nothing can score below it. Returns `None` when every cell
/// is collapsed, which signals a finished run.
pub fn select_min_entropy(
    grid: &Grid,
    tiles: &TileSet,
    random: &mut RandomSelector,
    tie_break: TieBreak,
) -> Option<Position> {
    let mut best: Option<Candidate> = None;

    for cell in grid.cells() {
        if cell.is_collapsed() {
            continue;
        }
        match cell.possibility_count() {
            0 => continue,
            1 => return Some(cell.position()),
            _ => {}
        }

        let exact = cell_entropy(cell, tiles);
        let candidate = match tie_break {
            TieBreak::Jitter => Candidate {
                position: cell.position(),
                entropy: exact + random.jitter(ENTROPY_JITTER_BOUND),
                tie: 0,
            },
            TieBreak::Lexicographic => Candidate {
                position: cell.position(),
                entropy: exact,
                tie: random.next_u64(),
            },
            TieBreak::ScanOrder => Candidate {
                position: cell.position(),
                entropy: exact,
                tie: 0,
            },
        };

        // Strict comparison keeps the earliest cell on exact ties
        if best.as_ref().is_none_or(|current| candidate.precedes(current)) {
            best = Some(candidate);
        }
    }

    best.map(|candidate| candidate.position)
}
