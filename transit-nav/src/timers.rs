//! Deadline queue for host-driven timers.
//!
//! Nothing here sleeps: the host passes the current time to
//! [`TimerQueue::drain_due`] on every frame, and due events come back in
//! deadline order (ties in scheduling order). Timers are never canceled;
//! whoever handles an event must tolerate it being stale.

use std::time::Duration;

#[derive(Debug, Clone)]
struct Entry<T> {
    at: Duration,
    seq: u64,
    event: T,
}

#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    entries: Vec<Entry<T>>,
    next_seq: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn schedule(&mut self, at: Duration, event: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry { at, seq, event });
    }

    /// Remove and return every event whose deadline is `<= now`.
    pub fn drain_due(&mut self, now: Duration) -> Vec<T> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|e| e.at <= now);
        self.entries = pending;
        due.sort_by_key(|e| (e.at, e.seq));
        due.into_iter().map(|e| e.event).collect()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.iter().map(|e| e.at).min()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
