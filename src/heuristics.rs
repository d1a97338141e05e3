use crate::engine::{CollectibleId, Position};
use crate::state::SearchState;
use std::collections::BTreeSet;

/// Weight applied per remaining collectible in the greedy score.
///
/// Collecting one more item must always outrank any distance improvement, which holds
/// only while board Manhattan distances stay below this value (boards under 500x500).
pub const GREEDY_WEIGHT: usize = 1000;

/// Manhattan distance from `from` to the nearest target not yet in `collected`.
///
/// # Returns
/// `None` when every target has been collected.
pub fn min_manhattan_to_uncollected(
    from: Position,
    targets: &BTreeSet<CollectibleId>,
    collected: &BTreeSet<CollectibleId>,
) -> Option<usize> {
    targets
        .difference(collected)
        .map(|id| from.manhattan(id.position()))
        .min()
}

/// Scores a state for the greedy best-first explorer. Lower is better.
///
/// `remaining * GREEDY_WEIGHT + distance to the nearest uncollected target`, or 0 for a
/// state that has collected everything.
///
/// # Examples
/// ```
/// use inertia_solver::heuristics::greedy_score;
/// use inertia_solver::state::SearchState;
/// use inertia_solver::engine::{CollectibleId, Position};
/// use std::collections::BTreeSet;
///
/// let targets: BTreeSet<_> = [CollectibleId(Position::new(3, 4))].into_iter().collect();
/// let state = SearchState::initial(Position::new(0, 0));
/// assert_eq!(greedy_score(&state, &targets), 1000 + 7);
/// ```
pub fn greedy_score(state: &SearchState, targets: &BTreeSet<CollectibleId>) -> usize {
    let remaining = state.remaining(targets);
    if remaining == 0 {
        return 0;
    }
    let nearest = min_manhattan_to_uncollected(state.position(), targets, state.collected())
        .unwrap_or(0);
    remaining * GREEDY_WEIGHT + nearest
}
