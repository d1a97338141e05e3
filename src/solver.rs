use crate::control::SearchControl;
use crate::engine::{slide, CollectibleId, Direction, Grid, Level, Position};
use crate::heuristics::greedy_score;
use crate::planner::solve_dnc_with;
use crate::state::{Fingerprint, SearchState};
use log::{debug, info};
use serde::Deserialize;
use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeSet, BinaryHeap, HashSet, VecDeque};
use std::fmt;

/// What a strategy reports once it has run to completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A sequence of launches that collects every target without touching a hazard.
    Found(Vec<Direction>),
    /// The frontier was exhausted (or, for the planner, a sub-solve failed).
    NotFound,
    /// The search was cancelled at a frontier pop.
    Cancelled,
}

impl SearchOutcome {
    pub fn path(&self) -> Option<&[Direction]> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOutcome::Found(path) => write!(f, "found ({} moves)", path.len()),
            SearchOutcome::NotFound => f.write_str("no solution"),
            SearchOutcome::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// The four interchangeable search strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Breadth-first; always returns a shortest path.
    Bfs,
    /// Depth-first; first path found, low memory.
    Dfs,
    /// Greedy best-first on remaining count, then distance to nearest item.
    Greedy,
    /// Spatial divide-and-conquer over the collectibles. Incomplete.
    #[serde(rename = "dnc")]
    #[value(name = "dnc")]
    DivideAndConquer,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Bfs,
        Strategy::Dfs,
        Strategy::Greedy,
        Strategy::DivideAndConquer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Bfs => "BFS",
            Strategy::Dfs => "DFS",
            Strategy::Greedy => "Greedy",
            Strategy::DivideAndConquer => "D&C",
        }
    }

    /// Runs this strategy on a level, targeting every collectible on it.
    pub fn solve(self, level: &Level, control: &SearchControl) -> SearchOutcome {
        let grid = level.grid();
        let start = level.player_position();
        info!(
            "{}: solving {}x{} grid from {} with {} collectibles",
            self.name(),
            grid.cols(),
            grid.rows(),
            start,
            grid.collectibles().len()
        );
        let outcome = match self {
            Strategy::Bfs => solve_bfs_with(grid, start, &level.collectible_cells(), control),
            Strategy::Dfs => solve_dfs_with(grid, start, &level.collectible_cells(), control),
            Strategy::Greedy => {
                solve_greedy_with(grid, start, &level.collectible_cells(), control)
            }
            Strategy::DivideAndConquer => {
                solve_dnc_with(grid, start, grid.collectibles(), control)
            }
        };
        info!("{}: {}", self.name(), outcome);
        outcome
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Counters kept by the shared explorer loop.
#[derive(Clone, Copy, Debug, Default)]
struct SearchStats {
    expanded: usize,
    generated: usize,
    peak_frontier: usize,
}

/// The ordering discipline that distinguishes one explorer from another.
trait Frontier {
    fn push(&mut self, state: SearchState);
    fn pop(&mut self) -> Option<SearchState>;
    fn len(&self) -> usize;
}

#[derive(Default)]
struct Fifo(VecDeque<SearchState>);

impl Frontier for Fifo {
    fn push(&mut self, state: SearchState) {
        self.0.push_back(state);
    }

    fn pop(&mut self) -> Option<SearchState> {
        self.0.pop_front()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Default)]
struct Lifo(Vec<SearchState>);

impl Frontier for Lifo {
    fn push(&mut self, state: SearchState) {
        self.0.push(state);
    }

    fn pop(&mut self) -> Option<SearchState> {
        self.0.pop()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Heap entry ordered by `(score, seq)` only.
struct Ranked {
    score: usize,
    seq: u64,
    state: SearchState,
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        (self.score, self.seq) == (other.score, other.seq)
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.score, self.seq).cmp(&(other.score, other.seq))
    }
}

/// Lowest score first; among equal scores, earliest inserted first.
///
/// A state's score never changes, so this pops the same state a stable sort of the whole
/// frontier by score would put at the front on every iteration.
struct Scored<'t> {
    heap: BinaryHeap<Reverse<Ranked>>,
    next_seq: u64,
    targets: &'t BTreeSet<CollectibleId>,
}

impl<'t> Scored<'t> {
    fn new(targets: &'t BTreeSet<CollectibleId>) -> Self {
        Scored {
            heap: BinaryHeap::new(),
            next_seq: 0,
            targets,
        }
    }
}

impl Frontier for Scored<'_> {
    fn push(&mut self, state: SearchState) {
        let score = greedy_score(&state, self.targets);
        self.heap.push(Reverse(Ranked {
            score,
            seq: self.next_seq,
            state,
        }));
        self.next_seq += 1;
    }

    fn pop(&mut self) -> Option<SearchState> {
        self.heap.pop().map(|Reverse(ranked)| ranked.state)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// The loop every full-state explorer shares. Only the frontier discipline varies.
///
/// The root is marked seen before the loop. Each pop is a checkpoint; a popped state that
/// holds every target ends the search. Otherwise all eight launches are simulated, and
/// hazard hits, no-moves and already-seen fingerprints are dropped.
fn explore<F: Frontier>(
    label: &str,
    grid: &Grid,
    start: Position,
    targets: &BTreeSet<CollectibleId>,
    control: &SearchControl,
    mut frontier: F,
) -> SearchOutcome {
    let mut stats = SearchStats::default();
    let mut seen: HashSet<Fingerprint> = HashSet::new();

    let root = SearchState::initial(start);
    seen.insert(root.fingerprint());
    frontier.push(root);

    let outcome = loop {
        if control.checkpoint().is_err() {
            break SearchOutcome::Cancelled;
        }
        let Some(current) = frontier.pop() else {
            break SearchOutcome::NotFound;
        };
        stats.expanded += 1;

        if current.is_complete(targets) {
            break SearchOutcome::Found(current.into_path());
        }

        for direction in Direction::ALL {
            let slid = slide(grid, current.position(), direction);
            if !slid.is_viable() {
                continue;
            }
            let next = current.successor(direction, &slid, targets);
            if seen.insert(next.fingerprint()) {
                frontier.push(next);
                stats.generated += 1;
            }
        }
        stats.peak_frontier = stats.peak_frontier.max(frontier.len());
    };

    debug!(
        "{}: expanded {}, generated {}, peak frontier {}, visited {}",
        label,
        stats.expanded,
        stats.generated,
        stats.peak_frontier,
        seen.len()
    );
    outcome
}

/// Breadth-first search over (position, collected-set) states.
///
/// States are explored in nondecreasing path length, so the first complete state popped
/// carries a shortest solution.
///
/// # Examples
/// ```
/// use inertia_solver::solver::{solve_bfs, SearchOutcome};
/// use inertia_solver::engine::Direction;
/// use inertia_solver::utils::level_from_str_array;
///
/// let level = level_from_str_array(&[
///     "@....",
///     ".....",
///     ".....",
///     ".....",
///     "....*",
/// ]).unwrap();
/// let outcome = solve_bfs(level.grid(), level.player_position(), &level.collectible_cells());
/// assert_eq!(outcome, SearchOutcome::Found(vec![Direction::DownRight]));
/// ```
pub fn solve_bfs(
    grid: &Grid,
    start: Position,
    targets: &BTreeSet<CollectibleId>,
) -> SearchOutcome {
    solve_bfs_with(grid, start, targets, &SearchControl::default())
}

pub fn solve_bfs_with(
    grid: &Grid,
    start: Position,
    targets: &BTreeSet<CollectibleId>,
    control: &SearchControl,
) -> SearchOutcome {
    explore("BFS", grid, start, targets, control, Fifo::default())
}

/// Depth-first search with the same transitions and dedup as BFS. Returns the first
/// complete path found, which need not be shortest.
pub fn solve_dfs(
    grid: &Grid,
    start: Position,
    targets: &BTreeSet<CollectibleId>,
) -> SearchOutcome {
    solve_dfs_with(grid, start, targets, &SearchControl::default())
}

pub fn solve_dfs_with(
    grid: &Grid,
    start: Position,
    targets: &BTreeSet<CollectibleId>,
    control: &SearchControl,
) -> SearchOutcome {
    explore("DFS", grid, start, targets, control, Lifo::default())
}

/// Greedy best-first search ordered by `heuristics::greedy_score`.
pub fn solve_greedy(
    grid: &Grid,
    start: Position,
    targets: &BTreeSet<CollectibleId>,
) -> SearchOutcome {
    solve_greedy_with(grid, start, targets, &SearchControl::default())
}

pub fn solve_greedy_with(
    grid: &Grid,
    start: Position,
    targets: &BTreeSet<CollectibleId>,
    control: &SearchControl,
) -> SearchOutcome {
    explore("Greedy", grid, start, targets, control, Scored::new(targets))
}
