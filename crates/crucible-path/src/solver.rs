//! Best-first search for the cheapest crucible route.
//!
//! The search runs A* over `(mover, run length)` states rather than bare
//! positions, since whether a block may be left by turning depends on how
//! far the crucible has already gone straight. States are pushed without
//! checking and deduplicated when popped: the first pop of a key is its
//! cheapest, so later pops of the same key are discarded.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::time::Instant;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::grid::CostGrid;
use crate::moves::{seeds, successors, Move};
use crate::puzzle::{Mover, Position};
use crate::route::Route;

/// Straight-line limits for one kind of crucible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Blocks to travel in a heading before it may turn or stop
    pub min_straight: u32,
    /// Blocks after which it has to turn
    pub max_straight: u32,
}

impl SolverConfig {
    pub fn new(min_straight: u32, max_straight: u32) -> Result<Self> {
        let config = Self {
            min_straight,
            max_straight,
        };
        config.validate()?;
        Ok(config)
    }

    /// A regular crucible: at most three blocks in a row.
    pub fn crucible() -> Self {
        Self {
            min_straight: 0,
            max_straight: 3,
        }
    }

    /// An ultra crucible: four to ten blocks in a row.
    pub fn ultra_crucible() -> Self {
        Self {
            min_straight: 4,
            max_straight: 10,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.min_straight > self.max_straight {
            return Err(Error::InvalidConstraints {
                min_straight: self.min_straight,
                max_straight: self.max_straight,
            });
        }
        Ok(())
    }

    /// Whether a crucible that has gone `run` blocks straight may stop.
    fn allows_stop(&self, run: u32) -> bool {
        self.min_straight <= run && run <= self.max_straight
    }

    fn no_path(&self) -> Error {
        Error::NoPathFound {
            min_straight: self.min_straight,
            max_straight: self.max_straight,
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::crucible()
    }
}

/// Outcome of a successful search
#[derive(Debug, Clone)]
pub struct SolverResult {
    /// Least heat loss from the start block to the target
    pub cost: u32,
    /// One route achieving `cost`
    pub route: Route,
    /// States popped and expanded (each key at most once)
    pub states_expanded: usize,
    /// States ever pushed onto the frontier, duplicates included
    pub states_pushed: usize,
    /// Distinct keys finalized
    pub visited: usize,
    /// Time elapsed in milliseconds
    pub time_elapsed_ms: u64,
}

/// Identity of a sub-problem: the same mover with the same run length
/// always has the same cheapest continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateKey {
    pub mover: Mover,
    pub run: u32,
}

/// A frontier entry
#[derive(Debug, Clone, Copy)]
struct SearchState {
    /// Heat lost so far
    cost: u32,
    /// Lower bound on the heat still to lose
    estimate: u32,
    key: StateKey,
    parent: Option<StateKey>,
    /// Insertion order, breaks ties between equal priorities
    seq: u64,
}

impl SearchState {
    fn priority(&self) -> u32 {
        self.cost + self.estimate
    }
}

impl PartialEq for SearchState {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchState {}

impl Ord for SearchState {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the lowest priority, oldest first
        other
            .priority()
            .cmp(&self.priority())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for SearchState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default)]
struct Frontier {
    heap: BinaryHeap<SearchState>,
    pushed: u64,
}

impl Frontier {
    fn push(&mut self, cost: u32, estimate: u32, key: StateKey, parent: Option<StateKey>) {
        self.heap.push(SearchState {
            cost,
            estimate,
            key,
            parent,
            seq: self.pushed,
        });
        self.pushed += 1;
    }

    fn pop(&mut self) -> Option<SearchState> {
        self.heap.pop()
    }
}

/// Lower bound on the heat lost getting from `position` to the target:
/// Manhattan distance scaled by the map's cheapest block.
///
/// On maps whose blocks all cost at least 1 this is the plain Manhattan
/// distance; a single free block drops it to 0. At least one block per unit
/// of Manhattan distance remains to be entered, each costing at least the
/// map's cheapest block. The bound also never drops by more than one step's
/// cost per step, so the first pop of a key is always its cheapest. Turning
/// limits are ignored.
pub fn heuristic(grid: &CostGrid, position: Position) -> u32 {
    position.manhattan(grid.target()) * grid.min_cost()
}

/// Least heat loss from the top-left block to the bottom-right block.
pub fn shortest_constrained_path_cost(
    grid: &CostGrid,
    min_straight: u32,
    max_straight: u32,
) -> Result<u32> {
    let config = SolverConfig::new(min_straight, max_straight)?;
    solve(grid, &config).map(|result| result.cost)
}

/// Find the cheapest route for a crucible limited by `config`.
///
/// Memory is dominated by the visited set and parent links, bounded by
/// `width * height * 4 * max_straight` distinct keys.
///
/// Fails with [`Error::InvalidConstraints`] when `min_straight` exceeds
/// `max_straight`, and with [`Error::NoPathFound`] when no route satisfies
/// the run limits.
pub fn solve(grid: &CostGrid, config: &SolverConfig) -> Result<SolverResult> {
    search(grid, config, |_| {})
}

/// The search loop; `on_expand` sees every key as it is expanded.
fn search<F>(grid: &CostGrid, config: &SolverConfig, mut on_expand: F) -> Result<SolverResult>
where
    F: FnMut(StateKey),
{
    config.validate()?;

    let start_time = Instant::now();
    let target = grid.target();
    debug!(
        "searching {}x{} grid with straight runs in {}..={}",
        grid.width(),
        grid.height(),
        config.min_straight,
        config.max_straight
    );

    // Nothing to travel: the start counts as a run of zero blocks
    if grid.start() == target {
        return if config.allows_stop(0) {
            Ok(SolverResult {
                cost: 0,
                route: Route::default(),
                states_expanded: 0,
                states_pushed: 0,
                visited: 0,
                time_elapsed_ms: start_time.elapsed().as_millis() as u64,
            })
        } else {
            Err(config.no_path())
        };
    }

    let mut frontier = Frontier::default();
    let mut visited: HashSet<StateKey> = HashSet::new();
    let mut parents: HashMap<StateKey, StateKey> = HashMap::new();
    let mut states_expanded: usize = 0;

    for Move { mover, run, cost } in seeds(grid, config) {
        trace!("seeding {mover:?} at cost {cost}");
        frontier.push(cost, heuristic(grid, mover.position), StateKey { mover, run }, None);
    }

    while let Some(state) = frontier.pop() {
        if !visited.insert(state.key) {
            continue;
        }
        if let Some(parent) = state.parent {
            parents.insert(state.key, parent);
        }
        states_expanded += 1;
        on_expand(state.key);

        if state.key.mover.position == target && config.allows_stop(state.key.run) {
            let route = reconstruct(&parents, state.key);
            let result = SolverResult {
                cost: state.cost,
                route,
                states_expanded,
                states_pushed: frontier.pushed as usize,
                visited: visited.len(),
                time_elapsed_ms: start_time.elapsed().as_millis() as u64,
            };
            debug!(
                "reached target at cost {} after expanding {} of {} pushed states",
                result.cost, result.states_expanded, result.states_pushed
            );
            return Ok(result);
        }

        trace!(
            "expanding {:?} run {} at cost {}",
            state.key.mover,
            state.key.run,
            state.cost
        );
        for Move { mover, run, cost } in successors(grid, state.key.mover, state.key.run, config) {
            frontier.push(
                state.cost + cost,
                heuristic(grid, mover.position),
                StateKey { mover, run },
                Some(state.key),
            );
        }
    }

    debug!(
        "frontier exhausted after expanding {} states without reaching the target",
        states_expanded
    );
    Err(config.no_path())
}

/// Follow parent links back to a seed.
fn reconstruct(parents: &HashMap<StateKey, StateKey>, end: StateKey) -> Route {
    let mut steps = vec![end.mover];
    let mut key = end;
    while let Some(&parent) = parents.get(&key) {
        steps.push(parent.mover);
        key = parent;
    }
    steps.reverse();
    Route::new(steps)
}
