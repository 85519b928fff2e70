//! Bounded movement history.
//!
//! A fixed-capacity FIFO buffer of the most recent admitted events. Detectors
//! only ever read from it; the session controller owns all writes.

use crate::core::event::MovementEvent;
use std::collections::VecDeque;

/// Ordered buffer of the most recent [`MovementEvent`]s.
///
/// Appending at capacity evicts the oldest event. Iteration order is
/// insertion order, which by construction is temporal order.
#[derive(Debug)]
pub struct MovementHistory {
    capacity: usize,
    events: VecDeque<MovementEvent>,
}

impl MovementHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            events: VecDeque::with_capacity(capacity),
        }
    }

    /// Append an event, evicting the oldest if the buffer is full.
    pub fn append(&mut self, event: MovementEvent) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Read-only view of the buffered events, oldest first.
    pub fn snapshot(&self) -> impl Iterator<Item = &MovementEvent> {
        self.events.iter()
    }

    /// The most recent `n` events, oldest of those first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &MovementEvent> {
        self.events.iter().skip(self.events.len().saturating_sub(n))
    }

    pub fn oldest(&self) -> Option<&MovementEvent> {
        self.events.front()
    }

    pub fn latest(&self) -> Option<&MovementEvent> {
        self.events.back()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
