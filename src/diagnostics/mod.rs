// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for recording what the notification queue did.
//!
//! # Architecture
//!
//! - [`DiagnosticsHandle`]: cloneable, non-blocking sender given to producers
//! - [`DiagnosticsCollector`]: bounded event history and JSON export
//! - [`DiagnosticEvent`]: coordinator transitions and warnings

mod collector;
mod events;

pub use collector::{DiagnosticReport, DiagnosticsCollector, DiagnosticsHandle, SerializableEvent};
pub use events::{
    DiagnosticEvent, DiagnosticEventKind, SnackbarEvent, WarningEvent, WarningType,
};
