//! Replays a solved move sequence against a live session.
//!
//! The search is finished before replay begins; the executor only paces the moves out.
//! It yields between moves, which is where pause and cancel take effect. A paused
//! executor keeps its cursor and carries on from the next unplayed move on resume.

use crate::control::SearchControl;
use crate::engine::{Direction, Level};
use crate::session::{MoveReport, Session, Status};
use log::trace;
use std::thread;
use std::time::Duration;

/// Default pause between replayed moves.
pub const DEFAULT_MOVE_DELAY: Duration = Duration::from_millis(400);

/// Result of a single `MoveExecutor::step`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecutorStep {
    Moved(MoveReport),
    /// Every move in the path has been played.
    Finished,
    /// The session ended before the path did.
    Ended(Status),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionResult {
    /// Replay stopped on its own; carries the session status at that point.
    Completed(Status),
    Cancelled,
}

#[derive(Clone, Debug)]
pub struct MoveExecutor {
    path: Vec<Direction>,
    cursor: usize,
    pacing: Duration,
}

impl MoveExecutor {
    pub fn new(path: Vec<Direction>, pacing: Duration) -> Self {
        MoveExecutor {
            path,
            cursor: 0,
            pacing,
        }
    }

    /// Moves not yet played.
    pub fn remaining(&self) -> usize {
        self.path.len() - self.cursor
    }

    /// Plays the next move, if any. Never sleeps.
    pub fn step(&mut self, session: &mut Session<'_>) -> ExecutorStep {
        if session.status() != Status::Playing {
            return ExecutorStep::Ended(session.status());
        }
        let Some(&direction) = self.path.get(self.cursor) else {
            return ExecutorStep::Finished;
        };
        self.cursor += 1;
        match session.apply(direction) {
            Some(report) => ExecutorStep::Moved(report),
            None => ExecutorStep::Ended(session.status()),
        }
    }

    /// Plays the remaining moves with `pacing` between them, calling `on_move` after each.
    ///
    /// `control` is checked before every move: while paused the executor parks, and once
    /// cancelled it returns `ExecutionResult::Cancelled` with the cursor left on the next
    /// unplayed move.
    pub fn run<F>(
        &mut self,
        session: &mut Session<'_>,
        control: &SearchControl,
        mut on_move: F,
    ) -> ExecutionResult
    where
        F: FnMut(&MoveReport),
    {
        loop {
            if control.checkpoint().is_err() {
                return ExecutionResult::Cancelled;
            }
            match self.step(session) {
                ExecutorStep::Moved(report) => {
                    trace!(
                        "move {}: {} {} -> {}",
                        self.cursor,
                        report.direction,
                        report.from,
                        report.to
                    );
                    on_move(&report);
                    if self.remaining() > 0 && session.status() == Status::Playing {
                        thread::sleep(self.pacing);
                    }
                }
                ExecutorStep::Finished => return ExecutionResult::Completed(session.status()),
                ExecutorStep::Ended(status) => return ExecutionResult::Completed(status),
            }
        }
    }
}

/// Replays `path` on a fresh session with no pacing and returns where it ended up.
///
/// A correct solution returns `Status::Won`.
pub fn verify_path(level: &Level, path: &[Direction]) -> Status {
    let mut session = Session::new(level);
    for &direction in path {
        if session.apply(direction).is_none() {
            break;
        }
    }
    session.status()
}
