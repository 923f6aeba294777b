// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing diagnostic events.
//!
//! Handles are handed to the notification queue; the collector owner drains
//! the channel into a bounded history and can export it as a JSON report.

use std::collections::VecDeque;
use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde::Serialize;

use super::{DiagnosticEvent, DiagnosticEventKind, SnackbarEvent, WarningEvent, WarningType};
use crate::domain::diagnostics::EventCapacity;
use crate::error::Result;

/// Smallest channel capacity for event buffering.
const MIN_CHANNEL_CAPACITY: usize = 100;

/// Channel room for events logged between two drains.
///
/// At least one full history fits, so a single drain never loses events the
/// history could have kept.
fn channel_capacity(capacity: EventCapacity) -> usize {
    capacity.value().max(MIN_CHANNEL_CAPACITY)
}

/// Handle for sending diagnostic events to the collector.
///
/// This handle is cheap to clone and can be shared across threads.
/// Events are sent via a bounded channel so logging never blocks the caller.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Logs a coordinator state transition.
    ///
    /// This method is non-blocking and will drop the event if the
    /// internal channel is full (backpressure protection).
    pub fn log_snackbar(&self, event: SnackbarEvent) {
        let event = DiagnosticEvent::new(DiagnosticEventKind::Snackbar { event });
        let _ = self.event_tx.try_send(event);
    }

    /// Logs a warning event. This method is non-blocking.
    pub fn log_warning(&self, warning_event: WarningEvent) {
        let event = DiagnosticEvent::new(DiagnosticEventKind::Warning {
            event: warning_event,
        });
        let _ = self.event_tx.try_send(event);
    }

    /// Logs a warning message with the `Other` category. This method is non-blocking.
    pub fn log_warning_simple(&self, message: impl Into<String>) {
        self.log_warning(WarningEvent::new(WarningType::Other, message));
    }

    /// Attempts to send a coordinator event, returning an error if the channel is full.
    ///
    /// # Errors
    ///
    /// Returns `TrySendError::Full` if the internal channel buffer is full,
    /// or `TrySendError::Disconnected` if the collector has been dropped.
    pub fn try_log_snackbar(
        &self,
        event: SnackbarEvent,
    ) -> std::result::Result<(), TrySendError<DiagnosticEvent>> {
        self.event_tx
            .try_send(DiagnosticEvent::new(DiagnosticEventKind::Snackbar { event }))
    }
}

/// Central collector for diagnostic events.
///
/// Old events are evicted once the history reaches its capacity.
pub struct DiagnosticsCollector {
    /// Stored events, oldest first.
    events: VecDeque<DiagnosticEvent>,
    capacity: usize,
    /// Receiver for incoming events.
    event_rx: Receiver<DiagnosticEvent>,
    /// Sender stored to create handles.
    event_tx: Sender<DiagnosticEvent>,
    /// When collection started (monotonic clock for offsets).
    collection_started_at: Instant,
    /// When collection started (wall clock for report metadata).
    collection_started_at_utc: DateTime<Utc>,
}

impl DiagnosticsCollector {
    /// Creates a new diagnostics collector with the specified history capacity.
    #[must_use]
    pub fn new(capacity: EventCapacity) -> Self {
        let (event_tx, event_rx) = bounded(channel_capacity(capacity));

        Self {
            events: VecDeque::with_capacity(capacity.value()),
            capacity: capacity.value(),
            event_rx,
            event_tx,
            collection_started_at: Instant::now(),
            collection_started_at_utc: Utc::now(),
        }
    }

    /// Creates a handle for sending events to this collector.
    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Drains the channel into the history.
    ///
    /// Call this before reading events; handles only enqueue.
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            if self.events.len() >= self.capacity {
                self.events.pop_front();
            }
            self.events.push_back(event);
        }
    }

    /// Returns stored events in chronological order.
    pub fn events(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.events.iter()
    }

    /// Returns the coordinator transitions only, oldest first.
    #[must_use]
    pub fn snackbar_events(&self) -> Vec<SnackbarEvent> {
        self.events
            .iter()
            .filter_map(|event| match &event.kind {
                DiagnosticEventKind::Snackbar { event } => Some(*event),
                DiagnosticEventKind::Warning { .. } => None,
            })
            .collect()
    }

    /// Returns the warnings only, oldest first.
    #[must_use]
    pub fn warnings(&self) -> Vec<&WarningEvent> {
        self.events
            .iter()
            .filter_map(|event| match &event.kind {
                DiagnosticEventKind::Warning { event } => Some(event),
                DiagnosticEventKind::Snackbar { .. } => None,
            })
            .collect()
    }

    /// Returns the number of stored events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no event is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns the history capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clears the stored events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Builds a report of the stored events.
    #[must_use]
    pub fn build_report(&self) -> DiagnosticReport {
        let events = self
            .events
            .iter()
            .map(|event| SerializableEvent {
                offset_ms: u64::try_from(
                    event
                        .timestamp
                        .saturating_duration_since(self.collection_started_at)
                        .as_millis(),
                )
                .unwrap_or(u64::MAX),
                kind: event.kind.clone(),
            })
            .collect::<Vec<_>>();

        DiagnosticReport {
            collection_started_at: self.collection_started_at_utc.to_rfc3339(),
            generated_at: Utc::now().to_rfc3339(),
            event_count: events.len(),
            events,
        }
    }

    /// Exports the stored events as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.build_report())?)
    }
}

/// Serializable snapshot of the diagnostic history.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticReport {
    /// Wall-clock start of collection (RFC 3339).
    pub collection_started_at: String,
    /// Wall-clock time the report was built (RFC 3339).
    pub generated_at: String,
    pub event_count: usize,
    pub events: Vec<SerializableEvent>,
}

/// An event with its offset from the start of collection.
#[derive(Debug, Clone, Serialize)]
pub struct SerializableEvent {
    pub offset_ms: u64,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::diagnostics::event_capacity_bounds;
    use crate::domain::snackbar::DismissEvent;

    #[test]
    fn handle_events_arrive_after_processing() {
        let mut collector = DiagnosticsCollector::new(EventCapacity::default());
        let handle = collector.handle();

        handle.log_snackbar(SnackbarEvent::Shown { record: 1 });
        assert!(collector.is_empty());

        collector.process_pending();
        assert_eq!(collector.len(), 1);
        assert_eq!(
            collector.snackbar_events(),
            vec![SnackbarEvent::Shown { record: 1 }]
        );
    }

    #[test]
    fn oldest_events_are_evicted_at_capacity() {
        let mut collector = DiagnosticsCollector::new(EventCapacity::new(0));
        let handle = collector.handle();
        let total = event_capacity_bounds::MIN as u64 + 4;

        for record in 0..total {
            handle.log_snackbar(SnackbarEvent::Released { record });
        }
        collector.process_pending();

        assert_eq!(collector.len(), event_capacity_bounds::MIN);
        assert_eq!(collector.snackbar_events()[0].record(), 4);
    }

    #[test]
    fn full_history_survives_a_single_drain() {
        let mut collector = DiagnosticsCollector::new(EventCapacity::default());
        let handle = collector.handle();
        let total = event_capacity_bounds::DEFAULT as u64;

        for record in 0..total {
            handle.log_snackbar(SnackbarEvent::Shown { record });
        }
        collector.process_pending();

        assert_eq!(collector.len(), event_capacity_bounds::DEFAULT);
        assert_eq!(collector.snackbar_events()[0].record(), 0);
    }

    #[test]
    fn large_capacity_sizes_the_channel() {
        let mut collector = DiagnosticsCollector::new(EventCapacity::new(1000));
        let handle = collector.handle();

        for record in 0..1000 {
            handle.log_snackbar(SnackbarEvent::Released { record });
        }
        collector.process_pending();

        assert_eq!(collector.len(), 1000);
    }

    #[test]
    fn warnings_are_separated_from_transitions() {
        let mut collector = DiagnosticsCollector::new(EventCapacity::default());
        let handle = collector.handle();

        handle.log_snackbar(SnackbarEvent::Dropped { record: 2 });
        handle.log_warning_simple("something odd");
        handle.log_warning(WarningEvent::new(WarningType::InvalidDuration, "50ms"));
        collector.process_pending();

        let warnings = collector.warnings();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[1].warning_type, WarningType::InvalidDuration);
        assert_eq!(collector.snackbar_events().len(), 1);
    }

    #[test]
    fn try_log_reports_full_channel() {
        let collector = DiagnosticsCollector::new(EventCapacity::default());
        let handle = collector.handle();

        let room = channel_capacity(EventCapacity::default()) as u64;
        for record in 0..room {
            handle
                .try_log_snackbar(SnackbarEvent::Shown { record })
                .expect("channel has room");
        }
        assert!(matches!(
            handle.try_log_snackbar(SnackbarEvent::Shown { record: 999 }),
            Err(TrySendError::Full(_))
        ));
    }

    #[test]
    fn clear_empties_history() {
        let mut collector = DiagnosticsCollector::new(EventCapacity::default());
        collector.handle().log_snackbar(SnackbarEvent::Shown { record: 1 });
        collector.process_pending();
        collector.clear();
        assert!(collector.is_empty());
    }

    #[test]
    fn export_json_contains_events() {
        let mut collector = DiagnosticsCollector::new(EventCapacity::default());
        collector.handle().log_snackbar(SnackbarEvent::Dismissed {
            record: 5,
            reason: DismissEvent::Timeout,
        });
        collector.process_pending();

        let json = collector.export_json().expect("export succeeds");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["event_count"], 1);
        assert_eq!(value["events"][0]["type"], "snackbar");
        assert_eq!(value["events"][0]["event"]["reason"], "timeout");
        assert!(value["events"][0]["offset_ms"].is_u64());
    }
}
