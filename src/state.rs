//! Search states and their canonical fingerprints.
//!
//! A `SearchState` is never mutated after creation: expanding it derives a fresh
//! successor that owns its own collected set and path.

use crate::engine::{CollectibleId, Direction, Position, SlideOutcome};
use std::collections::BTreeSet;
use std::fmt;

/// A node in the search: where the agent is, what it has gathered, and how it got there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchState {
    position: Position,
    collected: BTreeSet<CollectibleId>,
    path: Vec<Direction>,
}

impl SearchState {
    /// The root state: nothing collected, no moves made.
    pub fn initial(position: Position) -> Self {
        SearchState {
            position,
            collected: BTreeSet::new(),
            path: Vec::new(),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn collected(&self) -> &BTreeSet<CollectibleId> {
        &self.collected
    }

    pub fn path(&self) -> &[Direction] {
        &self.path
    }

    pub fn into_path(self) -> Vec<Direction> {
        self.path
    }

    /// Number of targets not yet collected. `collected` only ever holds targets, so this
    /// is a plain difference.
    pub fn remaining(&self, targets: &BTreeSet<CollectibleId>) -> usize {
        targets.len() - self.collected.len()
    }

    pub fn is_complete(&self, targets: &BTreeSet<CollectibleId>) -> bool {
        self.collected.len() == targets.len()
    }

    /// Derives the state reached by taking `direction` and landing per `outcome`.
    ///
    /// Only collectibles that belong to `targets` are merged, which keeps
    /// `collected ⊆ targets` for any target subset.
    pub fn successor(
        &self,
        direction: Direction,
        outcome: &SlideOutcome,
        targets: &BTreeSet<CollectibleId>,
    ) -> SearchState {
        let mut collected = self.collected.clone();
        collected.extend(
            outcome
                .collected_along
                .iter()
                .filter(|id| targets.contains(id))
                .copied(),
        );
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(direction);
        SearchState {
            position: outcome.end,
            collected,
            path,
        }
    }

    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::new(self.position, &self.collected)
    }
}

/// Canonical identity of a state for visited-set deduplication.
///
/// The collected ids are kept sorted, so two states that gathered the same set in a
/// different order share a fingerprint. The path is not part of the identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    position: Position,
    collected: Vec<CollectibleId>,
}

impl Fingerprint {
    pub fn new<'a, I>(position: Position, collected: I) -> Self
    where
        I: IntoIterator<Item = &'a CollectibleId>,
    {
        let mut collected: Vec<CollectibleId> = collected.into_iter().copied().collect();
        collected.sort_unstable();
        collected.dedup();
        Fingerprint {
            position,
            collected,
        }
    }
}

impl fmt::Display for Fingerprint {
    /// Renders the key as `x,y|a,b;c,d`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}|", self.position.x, self.position.y)?;
        for (i, id) in self.collected.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}", id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::slide;
    use crate::utils::level_from_str_array;

    fn id(x: usize, y: usize) -> CollectibleId {
        CollectibleId(Position::new(x, y))
    }

    #[test]
    fn test_fingerprint_ignores_collection_order() {
        let a = Fingerprint::new(Position::new(1, 1), &[id(3, 0), id(0, 2)]);
        let b = Fingerprint::new(Position::new(1, 1), &[id(0, 2), id(3, 0)]);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "1,1|0,2;3,0");
    }

    #[test]
    fn test_fingerprint_distinguishes_position_and_set() {
        let here = Fingerprint::new(Position::new(1, 1), &[id(3, 0)]);
        assert_ne!(here, Fingerprint::new(Position::new(1, 2), &[id(3, 0)]));
        assert_ne!(here, Fingerprint::new(Position::new(1, 1), &[]));
        assert_eq!(Fingerprint::new(Position::new(0, 0), &[]).to_string(), "0,0|");
    }

    #[test]
    fn test_paths_collecting_in_either_order_share_fingerprint() {
        // A at (0,0), B at (2,2); the agent starts in the middle of a 3x3 ring.
        let level = level_from_str_array(&["*..", ".@.", "..*"]).unwrap();
        let grid = level.grid();
        let targets = level.collectible_cells();

        let walk = |dirs: &[Direction]| {
            let mut state = SearchState::initial(level.player_position());
            for &dir in dirs {
                let out = slide(grid, state.position(), dir);
                state = state.successor(dir, &out, &targets);
            }
            state
        };

        // up-left grabs A, then down-right runs the diagonal through the start to B
        let a_then_b = walk(&[Direction::UpLeft, Direction::DownRight]);
        // down-right grabs B, up-left runs back through the start to A, then return to B
        let b_then_a = walk(&[Direction::DownRight, Direction::UpLeft, Direction::DownRight]);

        assert_eq!(a_then_b.collected().len(), 2);
        assert_eq!(b_then_a.collected().len(), 2);
        assert_ne!(a_then_b.path(), b_then_a.path());
        assert_eq!(a_then_b.fingerprint(), b_then_a.fingerprint());
    }

    #[test]
    fn test_successor_filters_non_targets() {
        let level = level_from_str_array(&["@*.*"]).unwrap();
        let grid = level.grid();
        let only_far: BTreeSet<_> = [id(3, 0)].into_iter().collect();

        let start = SearchState::initial(level.player_position());
        let out = slide(grid, start.position(), Direction::Right);
        let next = start.successor(Direction::Right, &out, &only_far);

        assert_eq!(out.collected_along.len(), 2);
        assert_eq!(next.collected().len(), 1);
        assert!(next.is_complete(&only_far));
        assert_eq!(next.path(), &[Direction::Right]);
        assert!(start.path().is_empty(), "predecessor must not change");
    }
}
