//! Live play state a move sequence is replayed against.
//!
//! Unlike a `SearchState`, a `Session` is updated in place: one launch at a time, with a
//! move counter and a terminal status. The grid itself is never edited; gathered items
//! are tracked in the session's own collected set.

use crate::engine::{slide, CollectibleId, Direction, Level, Position};
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Playing,
    /// Every collectible has been gathered.
    Won,
    /// The agent entered a hazard.
    Destroyed,
}

/// What one applied launch did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub direction: Direction,
    pub from: Position,
    pub to: Position,
    /// Items gathered by this launch that had not been gathered before.
    pub collected: Vec<CollectibleId>,
    pub hazard_hit: bool,
}

#[derive(Clone, Debug)]
pub struct Session<'l> {
    level: &'l Level,
    position: Position,
    collected: BTreeSet<CollectibleId>,
    moves: u32,
    status: Status,
}

impl<'l> Session<'l> {
    /// Starts play at the level's start position. A level with nothing to collect is
    /// already won.
    pub fn new(level: &'l Level) -> Self {
        let status = if level.grid().collectibles().is_empty() {
            Status::Won
        } else {
            Status::Playing
        };
        Session {
            level,
            position: level.player_position(),
            collected: BTreeSet::new(),
            moves: 0,
            status,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn collected(&self) -> &BTreeSet<CollectibleId> {
        &self.collected
    }

    pub fn remaining(&self) -> usize {
        self.level.grid().collectibles().len() - self.collected.len()
    }

    /// Launches attempted so far, including ones that did not move the agent.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Applies one launch.
    ///
    /// # Returns
    /// `None` once the session has ended (won or destroyed); otherwise a report of the
    /// launch. A launch into a wall still counts as a move.
    pub fn apply(&mut self, direction: Direction) -> Option<MoveReport> {
        if self.status != Status::Playing {
            return None;
        }
        self.moves += 1;

        let from = self.position;
        let outcome = slide(self.level.grid(), from, direction);
        let collected: Vec<CollectibleId> = outcome
            .collected_along
            .into_iter()
            .filter(|id| self.collected.insert(*id))
            .collect();
        self.position = outcome.end;

        if outcome.hazard_hit {
            self.status = Status::Destroyed;
        } else if self.remaining() == 0 {
            self.status = Status::Won;
        }

        Some(MoveReport {
            direction,
            from,
            to: outcome.end,
            collected,
            hazard_hit: outcome.hazard_hit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::level_from_str_array;

    #[test]
    fn test_session_collects_and_wins() {
        let level = level_from_str_array(&["@*..", "...*"]).unwrap();
        let mut session = Session::new(&level);
        assert_eq!(session.status(), Status::Playing);
        assert_eq!(session.remaining(), 2);

        let report = session.apply(Direction::Right).unwrap();
        assert_eq!(report.to, Position::new(3, 0));
        assert_eq!(report.collected, vec![CollectibleId(Position::new(1, 0))]);
        assert_eq!(session.status(), Status::Playing);

        let report = session.apply(Direction::Down).unwrap();
        assert_eq!(report.collected, vec![CollectibleId(Position::new(3, 1))]);
        assert_eq!(session.status(), Status::Won);
        assert_eq!(session.moves(), 2);
        assert!(session.apply(Direction::Left).is_none());
        assert_eq!(session.moves(), 2);
    }

    #[test]
    fn test_session_destroyed_by_hazard() {
        let level = level_from_str_array(&["@.x*"]).unwrap();
        let mut session = Session::new(&level);
        let report = session.apply(Direction::Right).unwrap();
        assert!(report.hazard_hit);
        assert_eq!(session.position(), Position::new(2, 0));
        assert_eq!(session.status(), Status::Destroyed);
        assert!(session.apply(Direction::Left).is_none());
    }

    #[test]
    fn test_no_move_still_counts() {
        let level = level_from_str_array(&["@.*"]).unwrap();
        let mut session = Session::new(&level);
        let report = session.apply(Direction::Up).unwrap();
        assert_eq!(report.from, report.to);
        assert_eq!(session.moves(), 1);
        assert_eq!(session.status(), Status::Playing);
    }

    #[test]
    fn test_recrossing_collects_nothing_new() {
        let level = level_from_str_array(&["@*.", "..*"]).unwrap();
        let mut session = Session::new(&level);
        session.apply(Direction::Right).unwrap();
        let back = session.apply(Direction::Left).unwrap();
        assert!(back.collected.is_empty());
        assert_eq!(session.collected().len(), 1);
    }

    #[test]
    fn test_empty_level_is_won() {
        let level = level_from_str_array(&["@.."]).unwrap();
        assert_eq!(Session::new(&level).status(), Status::Won);
    }
}
