//! Event sink: the boundary between tracking and presentation

use skuport_core::domain::event::JobEvent;

/// Consumes lifecycle events as the poller observes them
///
/// Implementations own rendering only and issue no protocol calls of their
/// own. Events arrive synchronously from the polling task, one at a time; at
/// most one terminal event is ever delivered per job.
pub trait EventSink: Send + Sync {
    fn on_event(&self, event: &JobEvent);
}
