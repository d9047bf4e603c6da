// crates/engine_platform/src/input/queue.rs

use engine_shared::Event;
use std::collections::VecDeque;

/// Per-frame FIFO of produced events with a fixed capacity.
#[derive(Debug)]
pub struct EventQueue {
    events: VecDeque<Event>,
    capacity: usize,
    dropped: usize,
}

impl EventQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    /// Appends an event. Exceeding the capacity is a bug in the caller's
    /// configuration; release builds drop the event.
    pub fn push(&mut self, event: Event) {
        debug_assert!(
            self.events.len() < self.capacity,
            "event queue overflow (capacity {})",
            self.capacity
        );
        if self.events.len() >= self.capacity {
            self.dropped += 1;
            tracing::warn!(capacity = self.capacity, kind = ?event.kind, "event queue full, dropping event");
            return;
        }
        self.events.push_back(event);
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.dropped = 0;
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

    /// Events lost to overflow since the last clear.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }
}
