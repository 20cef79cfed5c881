//! Delayed flip-back scheduling.
//!
//! A mismatched pair is turned back face down after a delay. The controller
//! hands a [`FlipBack`] task to a [`Scheduler`]; the host advances time and
//! the due tasks come back to the controller for completion.
//!
//! Tasks carry the [`Generation`] of the session that created them. A task
//! whose generation no longer matches the live session is stale and is
//! dropped on completion.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Monotonic session tag. Every `start` moves to the next generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    /// The generation after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Get the raw value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Gen({})", self.0)
    }
}

/// Turn a mismatched pair back face down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipBack {
    /// Session the pair belongs to.
    pub generation: Generation,
    /// The two mismatched cards.
    pub cards: [CardId; 2],
}

/// Timer collaborator for flip-back tasks.
pub trait Scheduler {
    /// Queue `task` to become due after `delay`.
    fn schedule(&mut self, delay: Duration, task: FlipBack);

    /// Move the clock forward and return every task now due, earliest first.
    fn advance(&mut self, elapsed: Duration) -> Vec<FlipBack>;

    /// Number of queued tasks.
    fn pending(&self) -> usize;
}

#[derive(Clone, Debug)]
struct Scheduled {
    due: Duration,
    seq: u64,
    task: FlipBack,
}

/// Virtual-clock scheduler. Time only moves when [`advance`](Scheduler::advance)
/// is called, which keeps sessions deterministic under test.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_seq: u64,
    /// Sorted by `(due, seq)`.
    queue: Vec<Scheduled>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Time until the earliest task is due, if any.
    #[must_use]
    pub fn next_due_in(&self) -> Option<Duration> {
        self.queue.first().map(|entry| entry.due.saturating_sub(self.now))
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, task: FlipBack) {
        let due = self.now.saturating_add(delay);
        let seq = self.next_seq;
        self.next_seq += 1;

        let index = self
            .queue
            .partition_point(|entry| (entry.due, entry.seq) <= (due, seq));
        self.queue.insert(index, Scheduled { due, seq, task });
    }

    fn advance(&mut self, elapsed: Duration) -> Vec<FlipBack> {
        self.now = self.now.saturating_add(elapsed);
        let now = self.now;
        let due = self.queue.partition_point(|entry| entry.due <= now);
        self.queue.drain(..due).map(|entry| entry.task).collect()
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}
