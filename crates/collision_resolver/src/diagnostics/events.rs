//! Collision event log
//!
//! Append-only ring buffer of recent collision activity, capped so a
//! long-running editor session cannot grow it without bound.

use crate::foundation::math::Vec3;
use crate::scene::ObjectId;
use serde::Serialize;
use std::collections::VecDeque;

/// Maximum number of retained events.
pub const EVENT_LOG_CAPACITY: usize = 1000;

/// What a collision event records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CollisionEventKind {
    /// Overlaps were detected at the object's current position
    Detected,
    /// A search found a collision-free position
    Resolved,
    /// The search radius was exhausted without a free position
    Unresolved,
}

/// One entry in the event log
#[derive(Debug, Clone, Serialize)]
pub struct CollisionEvent {
    /// Seconds since the owning resolver was created
    pub timestamp_secs: f64,
    /// Object the event is about
    pub object_id: ObjectId,
    /// Event classification
    pub kind: CollisionEventKind,
    /// Neighbors involved, worst overlap first
    pub colliding: Vec<ObjectId>,
    /// Position the event refers to, if any
    pub position: Option<Vec3>,
}

/// Capped ring buffer of [`CollisionEvent`]s
#[derive(Debug)]
pub struct EventLog {
    events: VecDeque<CollisionEvent>,
    capacity: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLog {
    /// Create an empty log with the standard capacity
    pub fn new() -> Self {
        Self {
            events: VecDeque::with_capacity(EVENT_LOG_CAPACITY),
            capacity: EVENT_LOG_CAPACITY,
        }
    }

    /// Append an event, evicting the oldest entry when full
    pub fn push(&mut self, event: CollisionEvent) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Get the most recent events, oldest first
    ///
    /// With `limit`, only the last `limit` entries are returned.
    pub fn recent(&self, limit: Option<usize>) -> Vec<CollisionEvent> {
        let take = limit.unwrap_or(self.events.len()).min(self.events.len());
        self.events
            .iter()
            .skip(self.events.len() - take)
            .cloned()
            .collect()
    }

    /// Number of retained events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
