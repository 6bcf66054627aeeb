use crate::{
    algorithm::adjacency::AdjacencyTable,
    spatial::grid::{Grid, Narrowing, Position},
};
use std::collections::VecDeque;
use std::fmt;

/// Counters describing one successful propagation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationReport {
    /// Positions popped from the queue
    pub pops: usize,
    /// Neighbor restrictions that removed at least one tile
    pub narrowed: usize,
    /// Longest the queue got
    pub max_queue: usize,
}

/// Why propagation stopped before reaching a fixpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationFailure {
    /// A neighbor lost its last possibility
    Contradiction {
        /// The emptied cell
        position: Position,
    },
    /// The queue was still non-empty after `limit` pops
    LimitExceeded {
        /// Ceiling that was hit
        limit: usize,
    },
}

impl fmt::Display for PropagationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contradiction { position } => {
                write!(f, "contradiction: no tile fits at {position}")
            }
            Self::LimitExceeded { limit } => {
                write!(f, "propagation did not converge within {limit} steps")
            }
        }
    }
}

/// Breadth-first arc-consistency over the 4-neighbor grid
///
/// Starting from one changed cell, narrows every reachable uncollapsed
/// neighbor to the tiles supported by the current cell's representative set,
/// re-queueing each neighbor that shrank. Possibility sets only ever shrink,
/// so the queue drains in finitely many steps; the pop limit exists only as a
/// guard and exceeding it fails the run like a contradiction does.
#[derive(Debug, Clone)]
pub struct Propagator {
    limit: usize,
    queue: VecDeque<Position>,
    queued: Vec<bool>,
}

impl Propagator {
    /// Create a propagator that gives up after `limit` queue pops per call
    pub const fn new(limit: usize) -> Self {
        Self {
            limit,
            queue: VecDeque::new(),
            queued: Vec::new(),
        }
    }

    /// Pop ceiling per call
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Restore local consistency after the cell at `start` changed
    ///
    /// A position already waiting in the queue is not queued twice; when it
    /// is popped it is read in its latest state, so the fixpoint is the same.
    ///
    /// # Errors
    ///
    /// Returns [`PropagationFailure::Contradiction`] as soon as a cell is
    /// emptied, or [`PropagationFailure::LimitExceeded`] if the queue has not
    /// drained after `limit` pops. Grid changes made before the failure are
    /// kept.
    pub fn propagate(
        &mut self,
        grid: &mut Grid,
        adjacency: &AdjacencyTable,
        start: Position,
    ) -> Result<PropagationReport, PropagationFailure> {
        self.reset(grid);
        self.enqueue(grid, start);

        let mut report = PropagationReport {
            max_queue: self.queue.len(),
            ..PropagationReport::default()
        };

        while !self.queue.is_empty() {
            if report.pops >= self.limit {
                self.queue.clear();
                return Err(PropagationFailure::LimitExceeded { limit: self.limit });
            }
            let Some(position) = self.queue.pop_front() else {
                break;
            };
            report.pops += 1;
            if let Some(flag) = grid_index(grid, position).and_then(|i| self.queued.get_mut(i)) {
                *flag = false;
            }

            let Some(representatives) = grid.cell(position).map(|cell| cell.representatives())
            else {
                continue;
            };
            let neighbors: Vec<_> = grid.neighbors(position).collect();

            for (direction, next) in neighbors {
                let Some(neighbor) = grid.cell_mut(next) else {
                    continue;
                };
                if neighbor.is_collapsed() {
                    continue;
                }

                let supported = adjacency.supported(&representatives, direction);
                match neighbor.restrict(&supported) {
                    Narrowing::Unchanged => {}
                    Narrowing::Narrowed => {
                        report.narrowed += 1;
                        self.enqueue(grid, next);
                        report.max_queue = report.max_queue.max(self.queue.len());
                    }
                    Narrowing::Emptied => {
                        self.queue.clear();
                        return Err(PropagationFailure::Contradiction { position: next });
                    }
                }
            }
        }

        Ok(report)
    }

    fn reset(&mut self, grid: &Grid) {
        self.queue.clear();
        self.queued.clear();
        self.queued.resize(grid.len(), false);
    }

    fn enqueue(&mut self, grid: &Grid, position: Position) {
        if let Some(flag) = grid_index(grid, position).and_then(|i| self.queued.get_mut(i)) {
            if !*flag {
                *flag = true;
                self.queue.push_back(position);
            }
        }
    }
}

// Row-major slot of an in-bounds position
fn grid_index(grid: &Grid, position: Position) -> Option<usize> {
    (position.x < grid.width() && position.y < grid.height())
        .then(|| position.y * grid.width() + position.x)
}
