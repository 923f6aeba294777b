// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for snackbar activity tracking.

use std::fmt::Display;
use std::time::Instant;

use serde::{Serialize, Serializer};

use crate::domain::snackbar::{DismissEvent, SnackbarDuration};

/// Lifecycle steps of a snackbar record inside the coordinator.
///
/// `record` is the coordinator's opaque record number; it only correlates
/// events of the same snackbar within one process.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum SnackbarEvent {
    /// A new record entered the pending slot.
    Queued {
        record: u64,
        #[serde(serialize_with = "serialize_display")]
        duration: SnackbarDuration,
    },

    /// A pending record was replaced before it was ever shown.
    Dropped { record: u64 },

    /// A record was promoted to current and its presenter told to show.
    Shown { record: u64 },

    /// A presenter was told to hide.
    Dismissed {
        record: u64,
        #[serde(serialize_with = "serialize_display")]
        reason: DismissEvent,
    },

    /// The presenter finished hiding and the current slot was released.
    Released { record: u64 },

    /// An auto-dismiss countdown was (re)started.
    TimeoutScheduled { record: u64, millis: u64 },
}

impl SnackbarEvent {
    /// Returns the record number this event refers to.
    #[must_use]
    pub fn record(&self) -> u64 {
        match *self {
            Self::Queued { record, .. }
            | Self::Dropped { record }
            | Self::Shown { record }
            | Self::Dismissed { record, .. }
            | Self::Released { record }
            | Self::TimeoutScheduled { record, .. } => record,
        }
    }
}

/// Categories of warnings raised by the notification queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningType {
    /// An explicit duration under the minimum was replaced by the default.
    InvalidDuration,
    /// A timeout could not be scheduled because no async runtime was available.
    MissingRuntime,
    /// A configuration issue was detected.
    ConfigurationIssue,
    /// Other warning type not covered by specific categories.
    Other,
}

/// A warning with its category and a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarningEvent {
    pub warning_type: WarningType,
    pub message: String,
}

impl WarningEvent {
    /// Creates a new warning event.
    #[must_use]
    pub fn new(warning_type: WarningType, message: impl Into<String>) -> Self {
        Self {
            warning_type,
            message: message.into(),
        }
    }
}

/// A diagnostic event with its capture time.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    /// The type and data of the event
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// Coordinator state transition.
    Snackbar { event: SnackbarEvent },

    /// Recoverable problem.
    Warning { event: WarningEvent },
}

fn serialize_display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismissed_event_serializes_reason_tag() {
        let kind = DiagnosticEventKind::Snackbar {
            event: SnackbarEvent::Dismissed {
                record: 7,
                reason: DismissEvent::Consecutive,
            },
        };
        let json = serde_json::to_value(&kind).expect("serializable");
        assert_eq!(json["type"], "snackbar");
        assert_eq!(json["event"]["step"], "dismissed");
        assert_eq!(json["event"]["record"], 7);
        assert_eq!(json["event"]["reason"], "consecutive");
    }

    #[test]
    fn queued_event_serializes_duration() {
        let event = SnackbarEvent::Queued {
            record: 1,
            duration: SnackbarDuration::Millis(300),
        };
        let json = serde_json::to_value(event).expect("serializable");
        assert_eq!(json["duration"], "300ms");
    }

    #[test]
    fn record_accessor_covers_every_step() {
        assert_eq!(SnackbarEvent::Released { record: 3 }.record(), 3);
        assert_eq!(
            SnackbarEvent::TimeoutScheduled {
                record: 9,
                millis: 1500
            }
            .record(),
            9
        );
    }

    #[test]
    fn warning_serializes_snake_case_type() {
        let warning = WarningEvent::new(WarningType::InvalidDuration, "too short");
        let json = serde_json::to_value(&warning).expect("serializable");
        assert_eq!(json["warning_type"], "invalid_duration");
    }
}
