//! Diagnostics: event log and performance counters
//!
//! Both are observational only; nothing in the detection or search path
//! reads them back.

mod events;
mod metrics;

pub use events::{CollisionEvent, CollisionEventKind, EventLog, EVENT_LOG_CAPACITY};
pub use metrics::{PerformanceMetrics, RunningAverage};
