//! Legal successor moves for the crucible.
//!
//! Pure functions over the grid: they decide which of straight / left /
//! right are allowed by the run-length limits and drop anything that would
//! leave the map. Cost accumulation is left to the solver.

use smallvec::SmallVec;

use crate::grid::CostGrid;
use crate::puzzle::{Heading, Mover};
use crate::solver::SolverConfig;

/// One legal step: the mover after the step, its run length and the heat
/// lost by entering the new block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub mover: Mover,
    pub run: u32,
    pub cost: u32,
}

pub type Moves = SmallVec<[Move; 3]>;

fn enter(grid: &CostGrid, mover: Mover, run: u32) -> Option<Move> {
    grid.cost(mover.position).map(|cost| Move { mover, run, cost })
}

/// Successors of a mover that has travelled `run` blocks in its heading.
///
/// Never contains a reversal.
pub fn successors(grid: &CostGrid, mover: Mover, run: u32, config: &SolverConfig) -> Moves {
    let mut moves = Moves::new();

    if run < config.max_straight {
        moves.extend(enter(grid, mover.straight(), run + 1));
    }
    if run >= config.min_straight {
        moves.extend(enter(grid, mover.left(), 1));
        moves.extend(enter(grid, mover.right(), 1));
    }

    moves
}

/// First moves out of the start block: one block east and one block south.
///
/// Either heading is an equally valid way to leave, so both are offered.
pub fn seeds(grid: &CostGrid, config: &SolverConfig) -> Moves {
    let mut moves = Moves::new();
    if config.max_straight == 0 {
        return moves;
    }
    for heading in [Heading::East, Heading::South] {
        moves.extend(enter(grid, Mover::new(grid.start(), heading).straight(), 1));
    }
    moves
}
