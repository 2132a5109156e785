//! Outbound delivery queue.
//!
//! Unbounded FIFO fed by the broadcast bus and drained by the relay loop.
//! `enqueue` never blocks and never fails; `try_dequeue` is a
//! non-blocking poll. Safe for a producer on another thread with a single
//! consumer — the mutex is held only for the push/pop itself, never
//! across an await point.

use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard},
};

use chatbridge_common::types::ChatPayload;

/// One pending outbound delivery. Immutable once enqueued; consumed
/// exactly once by the relay loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundItem {
    /// Target channel (or nick) on the wire.
    pub channel: String,
    pub payload: OutboundPayload,
}

/// What the item carries. Only chat is deliverable over IRC today; other
/// kinds are accepted from the bus and dropped by the relay loop.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundPayload {
    Chat(ChatPayload),
    Media { description: String },
}

/// Thread-safe FIFO of pending outbound items.
#[derive(Debug, Default)]
pub struct OutboundQueue {
    items: Mutex<VecDeque<OutboundItem>>,
}

impl OutboundQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item. Never blocks the caller beyond the push itself.
    pub fn enqueue(&self, item: OutboundItem) {
        self.lock().push_back(item);
    }

    /// Remove and return the oldest item, or `None` immediately if the
    /// queue is empty.
    pub fn try_dequeue(&self) -> Option<OutboundItem> {
        self.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<OutboundItem>> {
        // A poisoned queue still holds valid items; recover the guard.
        self.items.lock().unwrap_or_else(|e| e.into_inner())
    }
}
