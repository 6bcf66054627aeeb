use crate::{
    io::error::{AlgorithmError, Result},
    math::probability::RandomSelector,
    spatial::grid::Cell,
    spatial::tiles::TileSet,
};

/// Resolve a cell to a single tile by weighted random choice
///
/// Draws over the current possibility weights, in ascending tile order, and
/// finalizes the cell to the drawn tile. A cell already down to one
/// possibility is finalized to it without consuming a draw.
///
/// Returns `Ok(None)` and leaves the cell untouched when it has no
/// possibilities left.
///
/// # Errors
///
/// Returns [`AlgorithmError::ContractViolation`] if the cell is already
/// collapsed
pub fn collapse_cell(
    cell: &mut Cell,
    tiles: &TileSet,
    random: &mut RandomSelector,
) -> Result<Option<usize>> {
    if cell.is_collapsed() {
        return Err(AlgorithmError::ContractViolation {
            operation: "collapse",
            position: cell.position(),
            reason: "cell is already collapsed",
        });
    }

    let candidates = cell.possibilities().to_vec();
    let chosen = match candidates.as_slice() {
        [] => return Ok(None),
        [only] => *only,
        _ => {
            let weights: Vec<f64> = candidates.iter().map(|&tile| tiles.weight(tile)).collect();
            let Some(tile) = random
                .weighted_choice(&weights)
                .and_then(|index| candidates.get(index).copied())
            else {
                return Ok(None);
            };
            tile
        }
    };

    Ok(cell.assign(chosen).then_some(chosen))
}
