// SPDX-License-Identifier: MPL-2.0
//! Snackbar records tracked by the coordinator.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use super::Callback;
use crate::domain::snackbar::SnackbarDuration;

/// Unique identifier for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(u64);

impl RecordId {
    /// Creates a new unique record ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw number, for logs and diagnostics.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

/// One slot occupant: who asked to be shown, and for how long.
///
/// The presenter is held weakly. A presenter dropped while queued is
/// treated as having no callback.
#[derive(Debug)]
pub(crate) struct SnackbarRecord {
    id: RecordId,
    callback: Weak<dyn Callback>,
    pub(crate) duration: SnackbarDuration,
    /// Set once the presenter was told to hide; cleared only with the slot.
    pub(crate) dismissing: bool,
}

impl SnackbarRecord {
    pub(crate) fn new(callback: &Arc<dyn Callback>, duration: SnackbarDuration) -> Self {
        Self {
            id: RecordId::new(),
            callback: Arc::downgrade(callback),
            duration,
            dismissing: false,
        }
    }

    pub(crate) fn id(&self) -> RecordId {
        self.id
    }

    /// Identity check against a presenter handle (allocation address only).
    pub(crate) fn is_snackbar(&self, callback: &Arc<dyn Callback>) -> bool {
        std::ptr::addr_eq(self.callback.as_ptr(), Arc::as_ptr(callback))
    }

    /// Returns the presenter if it is still alive.
    pub(crate) fn callback(&self) -> Option<Arc<dyn Callback>> {
        self.callback.upgrade()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snackbar::DismissEvent;

    struct Silent;

    impl Callback for Silent {
        fn on_shown(&self) {}
        fn on_dismissed(&self, _event: DismissEvent) {}
    }

    #[test]
    fn record_ids_are_unique() {
        assert_ne!(RecordId::new(), RecordId::new());
    }

    #[test]
    fn identity_is_by_allocation() {
        let a: Arc<dyn Callback> = Arc::new(Silent);
        let b: Arc<dyn Callback> = Arc::new(Silent);
        let record = SnackbarRecord::new(&a, SnackbarDuration::Short);

        assert!(record.is_snackbar(&a));
        assert!(record.is_snackbar(&Arc::clone(&a)));
        assert!(!record.is_snackbar(&b));
    }

    #[test]
    fn dropped_presenter_has_no_callback() {
        let a: Arc<dyn Callback> = Arc::new(Silent);
        let record = SnackbarRecord::new(&a, SnackbarDuration::Long);
        assert!(record.callback().is_some());

        drop(a);
        assert!(record.callback().is_none());
    }
}
