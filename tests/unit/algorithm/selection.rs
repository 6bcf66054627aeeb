//! Tests for cell entropy and minimum-entropy cell selection

#[cfg(test)]
mod tests {
    use tilecollapse::algorithm::bitset::TileBitset;
    use tilecollapse::algorithm::selection::{TieBreak, cell_entropy, select_min_entropy};
    use tilecollapse::math::probability::RandomSelector;
    use tilecollapse::spatial::grid::{Cell, Grid, Position};
    use tilecollapse::spatial::tiles::{Sockets, Tile, TileSet};

    const POLICIES: [TieBreak; 3] = [TieBreak::Jitter, TieBreak::Lexicographic, TieBreak::ScanOrder];

    fn uniform(count: usize) -> TileSet {
        let symbols = ['a', 'b', 'c', 'd', 'e'];
        TileSet::new(
            symbols
                .iter()
                .take(count)
                .map(|&symbol| Tile::new(symbol, Sockets::ALL))
                .collect(),
        )
        .expect("valid tile set")
    }

    fn keep(grid: &mut Grid, position: Position, members: &[usize]) {
        let mut allowed = TileBitset::new(grid.tile_count());
        for &tile in members {
            allowed.insert(tile);
        }
        grid.cell_mut(position).expect("in bounds").restrict(&allowed);
    }

    // Tests entropy of collapsed and single-possibility cells is zero
    #[test]
    fn test_cell_entropy_zero_cases() {
        let tiles = uniform(3);

        let mut collapsed = Cell::new(Position::new(0, 0), 3);
        assert!(collapsed.assign(1));
        assert!(cell_entropy(&collapsed, &tiles).abs() < f64::EPSILON);

        let mut single = Cell::new(Position::new(0, 0), 3);
        single.restrict(&TileBitset::singleton(3, 2));
        assert!(cell_entropy(&single, &tiles).abs() < f64::EPSILON);
    }

    // Tests entropy uses the weights of the remaining tiles only
    // Verified by computing entropy over the whole tile set
    #[test]
    fn test_cell_entropy_uses_remaining_weights() {
        let tiles = uniform(4);
        let mut cell = Cell::new(Position::new(0, 0), 4);
        assert!((cell_entropy(&cell, &tiles) - 2.0).abs() < 1e-12);

        let mut pair = TileBitset::new(4);
        pair.insert(0);
        pair.insert(3);
        cell.restrict(&pair);
        assert!((cell_entropy(&cell, &tiles) - 1.0).abs() < f64::EPSILON);
    }

    // Tests a finished grid yields no candidate
    #[test]
    fn test_select_none_when_all_collapsed() {
        let mut grid = Grid::new(2, 2, 2);
        for y in 0..2 {
            for x in 0..2 {
                assert!(grid.cell_mut(Position::new(x, y)).expect("in bounds").assign(0));
            }
        }

        for policy in POLICIES {
            let mut random = RandomSelector::new(0);
            assert_eq!(select_min_entropy(&grid, &uniform(2), &mut random, policy), None);
        }
    }

    // Tests the lowest-entropy cell wins under every policy
    // Verified by selecting the maximum entropy
    #[test]
    fn test_select_lowest_entropy() {
        let tiles = uniform(3);
        let mut grid = Grid::new(3, 1, tiles.len());
        keep(&mut grid, Position::new(2, 0), &[0, 2]);

        for policy in POLICIES {
            let mut random = RandomSelector::new(9);
            assert_eq!(
                select_min_entropy(&grid, &tiles, &mut random, policy),
                Some(Position::new(2, 0)),
                "{policy:?}"
            );
        }
    }

    // Tests a singleton cell is taken before any lower-scanned cell
    // Verified by scoring singletons like other cells
    #[test]
    fn test_select_singleton_first() {
        let tiles = uniform(2);
        let mut grid = Grid::new(3, 1, tiles.len());
        keep(&mut grid, Position::new(2, 0), &[1]);

        for policy in POLICIES {
            let mut random = RandomSelector::new(3);
            assert_eq!(
                select_min_entropy(&grid, &tiles, &mut random, policy),
                Some(Position::new(2, 0))
            );
        }
    }

    // Tests a singleton found immediately consumes no random draws
    #[test]
    fn test_select_singleton_draws_nothing() {
        let tiles = uniform(2);
        let mut grid = Grid::new(2, 1, tiles.len());
        keep(&mut grid, Position::new(0, 0), &[0]);

        let mut used = RandomSelector::new(11);
        let mut fresh = RandomSelector::new(11);
        assert_eq!(
            select_min_entropy(&grid, &tiles, &mut used, TieBreak::Jitter),
            Some(Position::new(0, 0))
        );
        assert_eq!(used.next_u64(), fresh.next_u64());
    }

    // Tests emptied cells are never selected
    #[test]
    fn test_select_skips_contradictions() {
        let tiles = uniform(2);
        let mut grid = Grid::new(2, 1, tiles.len());
        keep(&mut grid, Position::new(0, 0), &[]);

        let mut random = RandomSelector::new(5);
        assert_eq!(
            select_min_entropy(&grid, &tiles, &mut random, TieBreak::ScanOrder),
            Some(Position::new(1, 0))
        );

        keep(&mut grid, Position::new(1, 0), &[]);
        assert_eq!(
            select_min_entropy(&grid, &tiles, &mut random, TieBreak::ScanOrder),
            None
        );
    }

    // Tests scan order resolves exact ties to the first row-major cell
    #[test]
    fn test_scan_order_ties() {
        let tiles = uniform(3);
        let grid = Grid::new(4, 4, tiles.len());
        let mut random = RandomSelector::new(1);
        assert_eq!(
            select_min_entropy(&grid, &tiles, &mut random, TieBreak::ScanOrder),
            Some(Position::new(0, 0))
        );
    }

    // Tests randomized tie-breaking is reproducible and not always the first cell
    // Verified by ignoring the random draw in comparisons
    #[test]
    fn test_random_ties_are_seeded() {
        let tiles = uniform(3);
        let grid = Grid::new(5, 5, tiles.len());

        for policy in [TieBreak::Jitter, TieBreak::Lexicographic] {
            let picks: Vec<_> = (0..20)
                .map(|seed| {
                    let mut first = RandomSelector::new(seed);
                    let mut second = RandomSelector::new(seed);
                    let a = select_min_entropy(&grid, &tiles, &mut first, policy);
                    let b = select_min_entropy(&grid, &tiles, &mut second, policy);
                    assert_eq!(a, b);
                    a
                })
                .collect();

            assert!(
                picks.iter().any(|pick| *pick != Some(Position::new(0, 0))),
                "{policy:?} always picked the first cell"
            );
        }
    }
}
