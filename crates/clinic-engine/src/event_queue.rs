//! `EventQueue` — pending events ordered by time, then by scheduling order.
//!
//! # Ordering
//!
//! `BinaryHeap` is a max-heap, so `Scheduled` reverses its comparison.  The
//! key is `(time, seq)`: `seq` is a counter stamped at push time, so events
//! sharing a timestamp pop in the order they were scheduled.  This is what
//! makes a replication's interleaving reproducible.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use clinic_core::SimTime;

struct Scheduled<E> {
    at:    SimTime,
    seq:   u64,
    event: E,
}

impl<E> PartialEq for Scheduled<E> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<E> Eq for Scheduled<E> {}

impl<E> PartialOrd for Scheduled<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Scheduled<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.at
            .cmp(&other.at)
            .then(self.seq.cmp(&other.seq))
            .reverse()
    }
}

/// A min-priority queue of `(time, event)` pairs with FIFO tie-breaking.
pub struct EventQueue<E> {
    heap:     BinaryHeap<Scheduled<E>>,
    next_seq: u64,
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self {
            heap:     BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue `event` to fire at `at`.
    pub fn push(&mut self, at: SimTime, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Scheduled { at, seq, event });
    }

    /// Remove and return the earliest event.
    pub fn pop(&mut self) -> Option<(SimTime, E)> {
        self.heap.pop().map(|s| (s.at, s.event))
    }

    /// Remove and return the earliest event only if it fires strictly before
    /// `horizon`.
    pub fn pop_before(&mut self, horizon: SimTime) -> Option<(SimTime, E)> {
        match self.next_time() {
            Some(at) if at < horizon => self.pop(),
            _ => None,
        }
    }

    /// Time of the earliest pending event, or `None` if empty.
    pub fn next_time(&self) -> Option<SimTime> {
        self.heap.peek().map(|s| s.at)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
