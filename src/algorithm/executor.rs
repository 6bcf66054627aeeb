use crate::{
    algorithm::adjacency::AdjacencyTable,
    algorithm::collapse::collapse_cell,
    algorithm::propagation::{PropagationFailure, Propagator},
    algorithm::selection::{TieBreak, select_min_entropy},
    io::configuration::{DEFAULT_PROPAGATION_LIMIT, MAX_GRID_CELLS, MAX_GRID_DIMENSION},
    io::error::{AlgorithmError, Result, invalid_parameter},
    math::probability::RandomSelector,
    spatial::grid::{Grid, Position},
    spatial::tiles::TileSet,
};
use std::fmt;

/// Run parameters fixed at construction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Seed for the run's single random source
    pub seed: u64,
    /// Queue pops allowed per propagation before the run fails
    pub propagation_limit: usize,
    /// Ordering of equal-entropy cells
    pub tie_break: TieBreak,
}

impl GeneratorConfig {
    /// Configuration with default limit and tie-break policy
    pub const fn new(width: usize, height: usize, seed: u64) -> Self {
        Self {
            width,
            height,
            seed,
            propagation_limit: DEFAULT_PROPAGATION_LIMIT,
            tie_break: TieBreak::Jitter,
        }
    }

    /// Check dimensions and limit
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or above
    /// `MAX_GRID_DIMENSION`, the grid has more than `MAX_GRID_CELLS` cells,
    /// or the propagation limit is zero
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        let cells = self.width * self.height;
        if cells > MAX_GRID_CELLS {
            return Err(invalid_parameter(
                "cells",
                &cells,
                &format!("width * height must be at most {MAX_GRID_CELLS}"),
            ));
        }
        if self.propagation_limit == 0 {
            return Err(invalid_parameter(
                "propagation_limit",
                &self.propagation_limit,
                &"must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Why a run ended without filling the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// A cell's possibility set became empty
    Contradiction {
        /// The emptied cell
        position: Position,
        /// Step during which it happened
        step: usize,
    },
    /// Propagation from a collapse did not converge within the limit
    PropagationLimitExceeded {
        /// Ceiling that was hit
        limit: usize,
        /// Cell whose collapse started the propagation
        origin: Position,
        /// Step during which it happened
        step: usize,
    },
}

impl FailureReason {
    /// Step at which the run failed
    pub const fn step(&self) -> usize {
        match self {
            Self::Contradiction { step, .. } | Self::PropagationLimitExceeded { step, .. } => *step,
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contradiction { position, step } => {
                write!(f, "contradiction at {position} (step {step})")
            }
            Self::PropagationLimitExceeded {
                limit,
                origin,
                step,
            } => {
                write!(
                    f,
                    "propagation from {origin} exceeded {limit} steps (step {step})"
                )
            }
        }
    }
}

/// Lifecycle of a generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Cells remain to be collapsed
    Running,
    /// Every cell collapsed with all adjacencies satisfied
    Succeeded,
    /// Stopped early; the grid keeps its state at the failure point
    Failed(FailureReason),
}

impl RunState {
    /// Whether no further steps will change the grid
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }

    /// Whether the run finished successfully
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// One finalized cell, in the order collapses happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollapseEvent {
    /// Step that performed the collapse (1-based)
    pub step: usize,
    /// Collapsed cell
    pub position: Position,
    /// Chosen tile index
    pub tile: usize,
    /// The cell had only one possibility left, so no draw was made
    pub forced: bool,
}

/// Aggregate counters over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Steps taken, including the final one that detected completion
    pub steps: usize,
    /// Cells finalized by the collapser
    pub collapses: usize,
    /// Collapses that needed no random draw
    pub forced_collapses: usize,
    /// Queue pops across all propagations
    pub propagation_pops: usize,
    /// Neighbor restrictions that removed tiles
    pub narrowings: usize,
    /// Longest propagation queue seen
    pub max_queue: usize,
}

/// Drives selection, collapse and propagation until done or failed
///
/// Owns the grid, the tile set and the single seeded random source, so the
/// same configuration and tiles always replay the same sequence of
/// collapses. No backtracking happens: the first contradiction ends the run.
pub struct Generator {
    config: GeneratorConfig,
    tiles: TileSet,
    adjacency: AdjacencyTable,
    grid: Grid,
    random: RandomSelector,
    propagator: Propagator,
    state: RunState,
    history: Vec<CollapseEvent>,
    stats: GenerationStats,
}

impl Generator {
    /// Create a run with every cell holding the full tile set
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation
    pub fn new(config: GeneratorConfig, tiles: TileSet) -> Result<Self> {
        config.validate()?;

        let adjacency = AdjacencyTable::new(&tiles);
        let grid = Grid::new(config.width, config.height, tiles.len());

        Ok(Self {
            config,
            adjacency,
            grid,
            random: RandomSelector::new(config.seed),
            propagator: Propagator::new(config.propagation_limit),
            state: RunState::Running,
            history: Vec::new(),
            stats: GenerationStats::default(),
            tiles,
        })
    }

    /// Parameters of this run
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Tiles available to this run
    pub const fn tiles(&self) -> &TileSet {
        &self.tiles
    }

    /// Current grid state
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current lifecycle state
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Collapses performed so far, in order
    pub fn history(&self) -> &[CollapseEvent] {
        &self.history
    }

    /// Counters accumulated so far
    pub const fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    /// Perform one select → collapse → propagate transition
    ///
    /// Calling this on a finished run changes nothing and returns the
    /// terminal state again.
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::ContractViolation`] if the selected cell
    /// cannot be collapsed because it is already final, which indicates an
    /// engine bug rather than an unlucky seed
    pub fn step(&mut self) -> Result<RunState> {
        if self.state.is_terminal() {
            return Ok(self.state);
        }

        self.stats.steps += 1;
        let step = self.stats.steps;

        let Some(position) = select_min_entropy(
            &self.grid,
            &self.tiles,
            &mut self.random,
            self.config.tie_break,
        ) else {
            self.state = match self.grid.contradiction() {
                Some(position) => RunState::Failed(FailureReason::Contradiction { position, step }),
                None => RunState::Succeeded,
            };
            tracing::debug!(step, collapses = self.stats.collapses, "generation finished");
            return Ok(self.state);
        };

        let cell = self
            .grid
            .cell_mut(position)
            .ok_or(AlgorithmError::ContractViolation {
                operation: "select",
                position,
                reason: "selected position is outside the grid",
            })?;
        let forced = cell.possibility_count() == 1;

        let Some(tile) = collapse_cell(cell, &self.tiles, &mut self.random)? else {
            tracing::debug!(%position, step, "collapse declined: no possibilities left");
            self.state = RunState::Failed(FailureReason::Contradiction { position, step });
            return Ok(self.state);
        };

        self.stats.collapses += 1;
        if forced {
            self.stats.forced_collapses += 1;
        }
        self.history.push(CollapseEvent {
            step,
            position,
            tile,
            forced,
        });
        tracing::trace!(%position, tile, forced, "collapsed cell");

        match self
            .propagator
            .propagate(&mut self.grid, &self.adjacency, position)
        {
            Ok(report) => {
                self.stats.propagation_pops += report.pops;
                self.stats.narrowings += report.narrowed;
                self.stats.max_queue = self.stats.max_queue.max(report.max_queue);
            }
            Err(PropagationFailure::Contradiction { position: emptied }) => {
                tracing::debug!(%emptied, origin = %position, step, "contradiction during propagation");
                self.state = RunState::Failed(FailureReason::Contradiction {
                    position: emptied,
                    step,
                });
            }
            Err(PropagationFailure::LimitExceeded { limit }) => {
                tracing::debug!(origin = %position, limit, step, "propagation limit exceeded");
                self.state = RunState::Failed(FailureReason::PropagationLimitExceeded {
                    limit,
                    origin: position,
                    step,
                });
            }
        }

        Ok(self.state)
    }

    /// Step until the run succeeds or fails
    ///
    /// At most one collapse per cell happens, so this always terminates.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Generator::step`]
    pub fn run(&mut self) -> Result<RunState> {
        while !self.state.is_terminal() {
            self.step()?;
        }
        Ok(self.state)
    }

    /// Check the success post-condition on the current grid
    ///
    /// True iff every cell is collapsed and every adjacent pair of chosen
    /// tiles can connect across their shared edge.
    pub fn verify(&self) -> bool {
        self.grid.is_fully_collapsed() && self.grid.find_adjacency_violation(&self.tiles).is_none()
    }
}
