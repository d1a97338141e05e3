//! Divide-and-conquer planning over spatial groups of collectibles.
//!
//! The collectibles are split in two along the longer side of their bounding box, each
//! half is planned independently, and the two halves are chained in whichever order gives
//! the shorter total. A single collectible is reached with a position-only BFS.
//!
//! The planner is not complete. Each sub-plan is computed without knowing what the
//! other half gathers on the way, so it misses solutions that have to pick up items from
//! both groups in one interleaved route (for example, an item of one group lying on the
//! only corridor to an item of the other, where the corridor cannot be walked twice).
//! A failed sub-plan fails its parent; no other split is tried.

use crate::control::{Cancelled, SearchControl};
use crate::engine::{slide, CollectibleId, Direction, Grid, Position};
use crate::solver::SearchOutcome;
use log::debug;
use std::collections::{HashSet, VecDeque};

/// A move sequence together with the position it leaves the agent on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    pub path: Vec<Direction>,
    pub end: Position,
}

impl Plan {
    fn empty(at: Position) -> Self {
        Plan {
            path: Vec::new(),
            end: at,
        }
    }

    fn then(mut self, next: Plan) -> Plan {
        self.path.extend(next.path);
        Plan {
            path: self.path,
            end: next.end,
        }
    }
}

/// Plans a route that collects every item in `collectibles`.
///
/// # Examples
/// ```
/// use inertia_solver::planner::solve_dnc;
/// use inertia_solver::utils::level_from_str_array;
///
/// let level = level_from_str_array(&[
///     "*.....*",
///     "...@...",
///     "*.....*",
/// ]).unwrap();
/// let outcome = solve_dnc(level.grid(), level.player_position(), level.grid().collectibles());
/// assert!(outcome.is_found());
/// ```
pub fn solve_dnc(grid: &Grid, start: Position, collectibles: &[CollectibleId]) -> SearchOutcome {
    solve_dnc_with(grid, start, collectibles, &SearchControl::default())
}

pub fn solve_dnc_with(
    grid: &Grid,
    start: Position,
    collectibles: &[CollectibleId],
    control: &SearchControl,
) -> SearchOutcome {
    match plan_group(grid, start, collectibles, control) {
        Ok(Some(plan)) => SearchOutcome::Found(plan.path),
        Ok(None) => SearchOutcome::NotFound,
        Err(Cancelled) => SearchOutcome::Cancelled,
    }
}

fn plan_group(
    grid: &Grid,
    start: Position,
    group: &[CollectibleId],
    control: &SearchControl,
) -> Result<Option<Plan>, Cancelled> {
    match group {
        [] => Ok(Some(Plan::empty(start))),
        [target] => bfs_to_target_with(grid, start, *target, control),
        _ => {
            let (left, right) = split_group(group);
            debug!(
                "D&C: {} items from {} split into {} + {}",
                group.len(),
                start,
                left.len(),
                right.len()
            );
            let forward = chain(grid, start, &left, &right, control)?;
            let backward = chain(grid, start, &right, &left, control)?;
            Ok(match (forward, backward) {
                (Some(f), Some(b)) if b.path.len() < f.path.len() => Some(b),
                (Some(f), _) => Some(f),
                (None, b) => b,
            })
        }
    }
}

/// Plans `first`, then plans `second` from wherever `first` ended.
fn chain(
    grid: &Grid,
    start: Position,
    first: &[CollectibleId],
    second: &[CollectibleId],
    control: &SearchControl,
) -> Result<Option<Plan>, Cancelled> {
    let Some(head) = plan_group(grid, start, first, control)? else {
        return Ok(None);
    };
    let Some(tail) = plan_group(grid, head.end, second, control)? else {
        return Ok(None);
    };
    Ok(Some(head.then(tail)))
}

/// Splits a group of two or more collectibles into two near-equal halves.
///
/// The split axis is the wider side of the group's bounding box (x on a tie). Items are
/// stably sorted along that axis; the first `len / 2` form the first half.
pub fn split_group(group: &[CollectibleId]) -> (Vec<CollectibleId>, Vec<CollectibleId>) {
    let width = span(group.iter().map(|id| id.position().x));
    let height = span(group.iter().map(|id| id.position().y));

    let mut sorted = group.to_vec();
    if width >= height {
        sorted.sort_by_key(|id| id.position().x);
    } else {
        sorted.sort_by_key(|id| id.position().y);
    }
    let second = sorted.split_off(sorted.len() / 2);
    (sorted, second)
}

fn span(values: impl Iterator<Item = usize>) -> usize {
    let (lo, hi) = values.fold((usize::MAX, 0), |(lo, hi), v| (lo.min(v), hi.max(v)));
    hi.saturating_sub(lo)
}

/// Shortest route from `start` whose last slide passes over `target`.
///
/// The search state is the position alone. Returns `None` if no such route exists.
pub fn bfs_to_target(grid: &Grid, start: Position, target: CollectibleId) -> Option<Plan> {
    bfs_to_target_with(grid, start, target, &SearchControl::default())
        .ok()
        .flatten()
}

fn bfs_to_target_with(
    grid: &Grid,
    start: Position,
    target: CollectibleId,
    control: &SearchControl,
) -> Result<Option<Plan>, Cancelled> {
    let mut queue = VecDeque::new();
    let mut visited = HashSet::new();
    visited.insert(start);
    queue.push_back(Plan::empty(start));

    loop {
        control.checkpoint()?;
        let Some(current) = queue.pop_front() else {
            break;
        };
        for direction in Direction::ALL {
            let outcome = slide(grid, current.end, direction);
            if !outcome.is_viable() {
                continue;
            }

            let mut path = current.path.clone();
            path.push(direction);

            // BFS order makes the first pass over the target the shortest.
            if outcome.collected_along.contains(&target) {
                return Ok(Some(Plan {
                    path,
                    end: outcome.end,
                }));
            }

            if visited.insert(outcome.end) {
                queue.push_back(Plan {
                    path,
                    end: outcome.end,
                });
            }
        }
    }

    debug!("D&C: {} unreachable from {}", target, start);
    Ok(None)
}
