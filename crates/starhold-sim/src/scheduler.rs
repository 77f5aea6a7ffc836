//! Deadline-ordered timer queue.
//!
//! Every delayed or periodic behaviour in the simulation (wave deadline,
//! countdown refresh, gem pickup window, bullet lifetime, death reset) is a
//! `TimerEvent` keyed by an absolute simulation time. The engine drains due
//! events once per tick, on the same thread as the systems, so callbacks never
//! interleave with a tick in progress.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use hecs::Entity;

/// Something that happens at a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// The next wave is due.
    WaveDue,
    /// Refresh the countdown text.
    CountdownPoll,
    /// A gem's pickup window closed.
    GemPickupExpired(Entity),
    /// A bullet reached the end of its lifetime.
    BulletExpired(Entity),
    /// Perform the full reset after the player died.
    DeathReset,
}

/// Cancellation token for a scheduled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Scheduled {
    due_secs: f64,
    seq: u64,
    event: TimerEvent,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    // Reversed so BinaryHeap (a max-heap) pops the earliest deadline first,
    // and insertion order among equal deadlines.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due_secs
            .total_cmp(&self.due_secs)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Single-threaded timer queue with cancellation.
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Scheduled>,
    cancelled: HashSet<u64>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` at absolute time `due_secs`.
    pub fn schedule_at(&mut self, due_secs: f64, event: TimerEvent) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Scheduled {
            due_secs,
            seq,
            event,
        });
        TimerHandle(seq)
    }

    /// Schedule `event` `delay_secs` after `now_secs`.
    pub fn schedule_in(&mut self, now_secs: f64, delay_secs: f64, event: TimerEvent) -> TimerHandle {
        self.schedule_at(now_secs + delay_secs, event)
    }

    /// Cancel a pending event. It will never be returned by `pop_due`.
    /// Cancelling an event that already fired is a no-op.
    pub fn cancel(&mut self, handle: TimerHandle) {
        if self.queue.iter().any(|s| s.seq == handle.0) {
            self.cancelled.insert(handle.0);
        }
    }

    /// Pop the earliest event due at or before `now_secs`, skipping cancelled ones.
    pub fn pop_due(&mut self, now_secs: f64) -> Option<TimerEvent> {
        while let Some(top) = self.queue.peek() {
            if top.due_secs > now_secs {
                return None;
            }
            let Some(item) = self.queue.pop() else {
                return None;
            };
            if self.cancelled.remove(&item.seq) {
                continue;
            }
            return Some(item.event);
        }
        None
    }

    /// Drop every pending event.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.cancelled.clear();
    }

    /// Number of live (not cancelled) pending events.
    pub fn pending(&self) -> usize {
        self.queue.len() - self.cancelled.len()
    }
}
