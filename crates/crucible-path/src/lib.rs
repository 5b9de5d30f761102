//! Minimum heat-loss routing for crucibles.
//!
//! A crucible is pushed from the top-left block of a city map to the
//! bottom-right block. Each block it enters costs its digit in heat loss.
//! It may not reverse, may not go more than `max_straight` blocks without
//! turning, and must go at least `min_straight` blocks before turning or
//! stopping. This crate finds the least total heat loss under those rules.

pub mod error;
pub mod grid;
pub mod moves;
pub mod puzzle;
pub mod route;
pub mod solver;

// Re-export main types
pub use error::{Error, MalformedInput, Result};
pub use grid::CostGrid;
pub use puzzle::{Heading, Mover, Position};
pub use route::Route;
pub use solver::{shortest_constrained_path_cost, solve, SolverConfig, SolverResult, StateKey};
