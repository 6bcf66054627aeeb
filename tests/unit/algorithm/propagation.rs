//! Tests for breadth-first constraint propagation

#[cfg(test)]
mod tests {
    use tilecollapse::algorithm::adjacency::AdjacencyTable;
    use tilecollapse::algorithm::propagation::{PropagationFailure, Propagator};
    use tilecollapse::io::presets::Preset;
    use tilecollapse::spatial::grid::{Grid, Position};
    use tilecollapse::spatial::tiles::{Direction, Sockets, Tile, TileSet};

    // A through-wire and an end cap that only connects east
    fn wire_and_cap() -> TileSet {
        TileSet::new(vec![
            Tile::new('=', Sockets::from_directions(&[Direction::East, Direction::West])),
            Tile::new('>', Sockets::from_directions(&[Direction::East])),
        ])
        .expect("valid tile set")
    }

    fn seeded_row(width: usize, tile: usize) -> (Grid, AdjacencyTable) {
        let tiles = wire_and_cap();
        let mut grid = Grid::new(width, 1, tiles.len());
        assert!(grid.cell_mut(Position::new(0, 0)).expect("in bounds").assign(tile));
        (grid, AdjacencyTable::new(&tiles))
    }

    // Tests narrowing cascades along a row until the fixpoint
    // Verified by not re-queueing narrowed neighbors
    #[test]
    fn test_propagation_cascades() {
        let (mut grid, adjacency) = seeded_row(5, 1);
        let mut propagator = Propagator::new(100);

        let report = propagator
            .propagate(&mut grid, &adjacency, Position::new(0, 0))
            .expect("propagation converges");

        assert_eq!(report.pops, 5);
        assert_eq!(report.narrowed, 4);
        assert_eq!(report.max_queue, 1);
        for x in 1..5 {
            let cell = grid.cell(Position::new(x, 0)).expect("in bounds");
            assert_eq!(cell.possibilities().to_vec(), vec![0]);
            assert!(!cell.is_collapsed());
        }
    }

    // Tests propagation never alters collapsed cells
    #[test]
    fn test_propagation_skips_collapsed() {
        let (mut grid, adjacency) = seeded_row(3, 0);
        assert!(grid.cell_mut(Position::new(2, 0)).expect("in bounds").assign(1));
        let mut propagator = Propagator::new(100);

        let result = propagator.propagate(&mut grid, &adjacency, Position::new(0, 0));
        assert!(result.is_ok());
        assert_eq!(grid.chosen_at(Position::new(2, 0)), Some(1));
        assert_eq!(grid.chosen_at(Position::new(0, 0)), Some(0));
    }

    // Tests the pop ceiling fails a propagation that has not converged
    // Verified by checking the limit only after the queue drains
    #[test]
    fn test_propagation_limit() {
        let (mut grid, adjacency) = seeded_row(5, 0);
        let mut propagator = Propagator::new(2);
        assert_eq!(propagator.limit(), 2);

        let result = propagator.propagate(&mut grid, &adjacency, Position::new(0, 0));
        assert_eq!(result, Err(PropagationFailure::LimitExceeded { limit: 2 }));
    }

    // Tests a limit equal to the required pops still succeeds
    #[test]
    fn test_propagation_limit_exact() {
        let (mut grid, adjacency) = seeded_row(4, 0);
        let mut propagator = Propagator::new(4);
        let report = propagator
            .propagate(&mut grid, &adjacency, Position::new(0, 0))
            .expect("four pops suffice");
        assert_eq!(report.pops, 4);
    }

    // Tests an emptied neighbor is reported as a contradiction at its position
    // Verified by treating empty sets as unchanged
    #[test]
    fn test_propagation_contradiction() {
        let tiles = TileSet::new(vec![Tile::new('x', Sockets::NONE)]).expect("valid tile set");
        let adjacency = AdjacencyTable::new(&tiles);
        let mut grid = Grid::new(1, 2, tiles.len());
        assert!(grid.cell_mut(Position::new(0, 0)).expect("in bounds").assign(0));

        let mut propagator = Propagator::new(100);
        let result = propagator.propagate(&mut grid, &adjacency, Position::new(0, 0));
        assert_eq!(
            result,
            Err(PropagationFailure::Contradiction {
                position: Position::new(0, 1)
            })
        );
        assert_eq!(grid.contradiction(), Some(Position::new(0, 1)));
    }

    // Tests neighbors of a collapsed cell only keep tiles it can connect to
    // Verified by uniting masks over all tiles instead of the chosen one
    #[test]
    fn test_neighbors_respect_chosen_tile() {
        let tiles = Preset::Circuit.tile_set().expect("preset builds");
        let adjacency = AdjacencyTable::new(&tiles);
        let mut grid = Grid::new(4, 4, tiles.len());
        let centre = Position::new(1, 1);
        let blank = tiles.position_of('·').expect("blank tile");
        assert!(grid.cell_mut(centre).expect("in bounds").assign(blank));

        let mut propagator = Propagator::new(1000);
        let report = propagator
            .propagate(&mut grid, &adjacency, centre)
            .expect("blank tile supports some neighbor everywhere");
        assert!(report.narrowed > 0);

        let centre_tile = tiles.get(blank).expect("blank tile");
        for (direction, next) in grid.neighbors(centre) {
            let cell = grid.cell(next).expect("in bounds");
            assert!(!cell.possibilities().is_empty());
            for tile in cell.possibilities().iter() {
                let other = tiles.get(tile).expect("tile in range");
                assert!(centre_tile.can_connect(other, direction));
            }
        }
    }

    // Tests propagator state is reset between calls
    #[test]
    fn test_propagator_reuse() {
        let mut propagator = Propagator::new(2);
        let (mut first, adjacency) = seeded_row(5, 0);
        assert!(propagator
            .propagate(&mut first, &adjacency, Position::new(0, 0))
            .is_err());

        let (mut second, adjacency) = seeded_row(2, 0);
        let report = propagator
            .propagate(&mut second, &adjacency, Position::new(0, 0))
            .expect("short row converges");
        assert_eq!(report.pops, 2);
    }

    // Tests failure display text
    #[test]
    fn test_failure_display() {
        let failure = PropagationFailure::Contradiction {
            position: Position::new(2, 3),
        };
        assert_eq!(failure.to_string(), "contradiction: no tile fits at (2, 3)");
        assert_eq!(
            PropagationFailure::LimitExceeded { limit: 9 }.to_string(),
            "propagation did not converge within 9 steps"
        );
    }
}
