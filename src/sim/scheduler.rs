//! Delayed-task timeline
//!
//! Every "later" in the game (first batch, next batch, chain tails, swoosh
//! completion) is a [`Task`] on one clock. Tasks are never cancelled; the
//! session decides at fire time whether a task still applies.
//!
//! The clock counts whole microseconds. Delays and frame steps are rounded
//! onto it, so frames that add up to a delay always reach it.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use super::entity::ForceBomb;

const MICROS_PER_SEC: f64 = 1_000_000.0;

/// Seconds to clock ticks (negative and NaN become zero)
fn to_micros(seconds: f32) -> u64 {
    (seconds.max(0.0) as f64 * MICROS_PER_SEC).round() as u64
}

/// Deferred work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    /// Launch the next sequence step
    IssueBatch,
    /// One delayed enemy of a chain
    ChainSpawn(ForceBomb),
    /// Swoosh clip completed
    SwooshFinished,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    fire_at: u64,
    /// Insertion order breaks ties so equal deadlines fire FIFO
    seq: u64,
    task: Task,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    // Reversed: BinaryHeap is a max-heap, the earliest deadline must pop first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .fire_at
            .cmp(&self.fire_at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Single-threaded timer queue
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: u64,
    next_seq: u64,
    queue: BinaryHeap<Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the scheduler was created
    pub fn now(&self) -> f64 {
        self.now as f64 / MICROS_PER_SEC
    }

    /// Queue `task` to fire `seconds` from now (negative delays fire next poll)
    pub fn schedule_after(&mut self, seconds: f32, task: Task) {
        let pending = Pending {
            fire_at: self.now + to_micros(seconds),
            seq: self.next_seq,
            task,
        };
        self.next_seq += 1;
        self.queue.push(pending);
    }

    /// Move the clock forward
    pub fn advance(&mut self, dt: f32) {
        self.now += to_micros(dt);
    }

    /// Pop the earliest task that is due, if any
    pub fn pop_due(&mut self) -> Option<Task> {
        match self.queue.peek() {
            Some(p) if p.fire_at <= self.now => self.queue.pop().map(|p| p.task),
            _ => None,
        }
    }

    /// Pending tasks with their remaining delay, soonest first
    pub fn pending(&self) -> Vec<(f32, Task)> {
        let mut items: Vec<Pending> = self.queue.iter().copied().collect();
        items.sort_by(|a, b| b.cmp(a));
        items
            .into_iter()
            .map(|p| (p.fire_at.saturating_sub(self.now) as f32 / MICROS_PER_SEC as f32, p.task))
            .collect()
    }

    pub fn pending_count(&self, task: Task) -> usize {
        self.queue.iter().filter(|p| p.task == task).count()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_deadline_order() {
        let mut sched = Scheduler::new();
        sched.schedule_after(0.5, Task::ChainSpawn(ForceBomb::Random));
        sched.schedule_after(0.1, Task::SwooshFinished);
        sched.schedule_after(0.3, Task::IssueBatch);

        assert_eq!(sched.pop_due(), None);
        sched.advance(1.0);
        assert_eq!(sched.pop_due(), Some(Task::SwooshFinished));
        assert_eq!(sched.pop_due(), Some(Task::IssueBatch));
        assert_eq!(sched.pop_due(), Some(Task::ChainSpawn(ForceBomb::Random)));
        assert_eq!(sched.pop_due(), None);
        assert!(sched.is_empty());
    }

    #[test]
    fn test_ties_fire_fifo() {
        let mut sched = Scheduler::new();
        sched.schedule_after(0.0, Task::IssueBatch);
        sched.schedule_after(0.0, Task::ChainSpawn(ForceBomb::Random));
        assert_eq!(sched.pop_due(), Some(Task::IssueBatch));
        assert_eq!(sched.pop_due(), Some(Task::ChainSpawn(ForceBomb::Random)));
    }

    #[test]
    fn test_not_due_until_deadline() {
        let mut sched = Scheduler::new();
        sched.schedule_after(2.0, Task::IssueBatch);
        sched.advance(1.5);
        assert_eq!(sched.pop_due(), None);
        let pending = sched.pending();
        assert_eq!(pending.len(), 1);
        assert!((pending[0].0 - 0.5).abs() < 1e-5);
        sched.advance(0.5);
        assert_eq!(sched.pop_due(), Some(Task::IssueBatch));
    }

    #[test]
    fn test_uneven_frames_reach_deadline() {
        let mut sched = Scheduler::new();
        sched.schedule_after(2.0, Task::IssueBatch);
        sched.advance(0.7);
        sched.advance(1.3);
        assert_eq!(sched.pop_due(), Some(Task::IssueBatch));

        sched.schedule_after(2.0, Task::IssueBatch);
        sched.advance(1.9);
        assert_eq!(sched.pop_due(), None);
        sched.advance(0.1);
        assert_eq!(sched.pop_due(), Some(Task::IssueBatch));
    }

    #[test]
    fn test_frame_steps_reach_deadline() {
        let mut sched = Scheduler::new();
        sched.schedule_after(2.0, Task::IssueBatch);
        for _ in 0..119 {
            sched.advance(1.0 / 60.0);
            assert_eq!(sched.pop_due(), None);
        }
        sched.advance(1.0 / 60.0);
        assert_eq!(sched.pop_due(), Some(Task::IssueBatch));
    }

    #[test]
    fn test_bad_delays_fire_next_poll() {
        let mut sched = Scheduler::new();
        sched.schedule_after(-1.0, Task::SwooshFinished);
        sched.schedule_after(f32::NAN, Task::IssueBatch);
        assert_eq!(sched.pop_due(), Some(Task::SwooshFinished));
        assert_eq!(sched.pop_due(), Some(Task::IssueBatch));
    }
}
