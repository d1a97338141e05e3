//! Cooperative pause and cancel signals.
//!
//! A `SearchControl` is shared by cloning; every clone sees the same flags. Searches
//! check it at frontier pops and the move executor checks it between moves. Nothing is
//! interrupted anywhere else.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Park interval used while paused unless configured otherwise.
pub const DEFAULT_PAUSE_POLL: Duration = Duration::from_millis(10);

/// Returned from a checkpoint once cancellation has been requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cancelled;

#[derive(Clone, Debug)]
pub struct SearchControl {
    paused: Arc<AtomicBool>,
    cancelled: Arc<AtomicBool>,
    poll: Duration,
}

impl Default for SearchControl {
    fn default() -> Self {
        SearchControl::new(DEFAULT_PAUSE_POLL)
    }
}

impl SearchControl {
    pub fn new(poll: Duration) -> Self {
        SearchControl {
            paused: Arc::new(AtomicBool::new(false)),
            cancelled: Arc::new(AtomicBool::new(false)),
            poll,
        }
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// A yield point. Parks the calling thread while paused and reports cancellation.
    ///
    /// The caller's own state (frontier, cursor, partial path) is untouched while parked,
    /// so returning `Ok(())` resumes exactly where it stopped. Cancelling while paused
    /// wakes the caller with `Err(Cancelled)`.
    pub fn checkpoint(&self) -> Result<(), Cancelled> {
        loop {
            if self.is_cancelled() {
                return Err(Cancelled);
            }
            if !self.is_paused() {
                return Ok(());
            }
            thread::sleep(self.poll);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_checkpoint_passes_when_idle() {
        let control = SearchControl::default();
        assert_eq!(control.checkpoint(), Ok(()));
    }

    #[test]
    fn test_checkpoint_reports_cancel() {
        let control = SearchControl::default();
        control.clone().cancel();
        assert!(control.is_cancelled());
        assert_eq!(control.checkpoint(), Err(Cancelled));
    }

    #[test]
    fn test_checkpoint_parks_until_resumed() {
        let control = SearchControl::new(Duration::from_millis(1));
        control.pause();
        let remote = control.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            remote.resume();
        });
        let began = Instant::now();
        assert_eq!(control.checkpoint(), Ok(()));
        assert!(began.elapsed() >= Duration::from_millis(20));
        handle.join().unwrap();
    }

    #[test]
    fn test_cancel_wakes_paused_checkpoint() {
        let control = SearchControl::new(Duration::from_millis(1));
        control.pause();
        let remote = control.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            remote.cancel();
        });
        assert_eq!(control.checkpoint(), Err(Cancelled));
        handle.join().unwrap();
    }
}
