// SPDX-License-Identifier: MPL-2.0
//! Snackbar queue coordination.
//!
//! The `SnackbarManager` serializes snackbars: at most one is presented at a
//! time (`current`) and at most one waits for it (`next`). Showing a new
//! snackbar pre-empts the visible one, and a visible snackbar is dismissed
//! automatically once its duration runs out.
//!
//! Presenters are notified through [`Callback`]. Notifications are delivered
//! after the internal lock is released, so a presenter may call back into the
//! manager from inside `on_shown` or `on_dismissed`.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, Weak};

use super::dispatch::{DelayedDispatch, Envelope, Message};
use super::record::{RecordId, SnackbarRecord};
use super::Callback;
use crate::diagnostics::{DiagnosticsHandle, SnackbarEvent, WarningEvent, WarningType};
use crate::domain::snackbar::{duration_bounds, DismissEvent, SnackbarDuration, TimeoutTable};

/// Presenter notifications collected under the lock, run after it.
enum Effect {
    Shown(Arc<dyn Callback>),
    Dismissed(Arc<dyn Callback>, DismissEvent),
}

#[derive(Default)]
struct State {
    current: Option<SnackbarRecord>,
    next: Option<SnackbarRecord>,
    dispatch: DelayedDispatch,
    diagnostics: Option<DiagnosticsHandle>,
}

impl State {
    fn record_event(&self, event: SnackbarEvent) {
        if let Some(handle) = &self.diagnostics {
            handle.log_snackbar(event);
        }
    }

    fn record_warning(&self, warning_type: WarningType, message: String) {
        if let Some(handle) = &self.diagnostics {
            handle.log_warning(WarningEvent::new(warning_type, message));
        }
    }
}

struct Inner {
    state: Mutex<State>,
    timing: TimeoutTable,
}

/// Handle to a snackbar queue.
///
/// Cloning is cheap; all clones drive the same queue.
#[derive(Clone)]
pub struct SnackbarManager {
    inner: Arc<Inner>,
}

impl fmt::Debug for SnackbarManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnackbarManager")
            .field("timing", &self.inner.timing)
            .finish_non_exhaustive()
    }
}

impl Default for SnackbarManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SnackbarManager {
    /// Creates an independent queue with the default timeouts.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timing(TimeoutTable::default())
    }

    /// Creates an independent queue resolving `Short` and `Long` through
    /// `timing`.
    #[must_use]
    pub fn with_timing(timing: TimeoutTable) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State::default()),
                timing,
            }),
        }
    }

    /// Returns the process-wide queue, creating it on first use.
    ///
    /// The instance lives until the process exits.
    #[must_use]
    pub fn global() -> Self {
        static GLOBAL: OnceLock<SnackbarManager> = OnceLock::new();
        GLOBAL.get_or_init(SnackbarManager::new).clone()
    }

    /// Returns true if both handles drive the same queue.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns the timeouts used to resolve `Short` and `Long`.
    #[must_use]
    pub fn timing(&self) -> TimeoutTable {
        self.inner.timing
    }

    /// Sets the diagnostics handle for recording queue activity.
    pub fn set_diagnostics(&self, handle: DiagnosticsHandle) {
        self.lock().diagnostics = Some(handle);
    }

    /// Requests that `callback` be shown for `duration`.
    ///
    /// A snackbar already current gets its duration replaced and its
    /// countdown restarted; one already waiting only gets its duration
    /// replaced. Otherwise it takes the waiting slot, dropping whatever was
    /// waiting there, and the current snackbar is dismissed with
    /// [`DismissEvent::Consecutive`].
    pub fn show(&self, callback: &Arc<dyn Callback>, duration: SnackbarDuration) {
        let mut effects = Vec::new();
        {
            let mut state = self.lock();
            self.show_locked(&mut state, callback, duration, &mut effects);
        }
        run(effects);
    }

    /// Dismisses `callback` with `event` if it is current or waiting.
    ///
    /// A dismissed current snackbar keeps its slot until the presenter calls
    /// [`SnackbarManager::on_dismissed`].
    pub fn dismiss(&self, callback: &Arc<dyn Callback>, event: DismissEvent) {
        let mut effects = Vec::new();
        {
            let mut state = self.lock();
            if is_snackbar(&state.current, callback) {
                cancel_current_locked(&mut state, event, &mut effects);
            } else if is_snackbar(&state.next, callback) {
                cancel_next_locked(&mut state, event, &mut effects);
            }
        }
        run(effects);
    }

    /// Called by the presenter once its hide animation finished.
    pub fn on_dismissed(&self, callback: &Arc<dyn Callback>) {
        let mut effects = Vec::new();
        {
            let mut state = self.lock();
            if is_snackbar(&state.current, callback) {
                release_current_locked(&mut state);
                show_next_locked(&mut state, &mut effects);
            }
        }
        run(effects);
    }

    /// Called by the presenter once its show animation finished.
    ///
    /// Starts the auto-dismiss countdown of the current snackbar. Late calls
    /// from presenters that are no longer current are ignored.
    pub fn on_shown(&self, callback: &Arc<dyn Callback>) {
        let mut state = self.lock();
        let live = state
            .current
            .as_ref()
            .is_some_and(|record| record.is_snackbar(callback) && !record.dismissing);
        if live {
            self.schedule_timeout_locked(&mut state);
        }
    }

    /// Returns true if `callback` is the snackbar currently presented.
    #[must_use]
    pub fn is_current(&self, callback: &Arc<dyn Callback>) -> bool {
        is_snackbar(&self.lock().current, callback)
    }

    /// Returns true if `callback` is presented or waiting to be.
    #[must_use]
    pub fn is_current_or_next(&self, callback: &Arc<dyn Callback>) -> bool {
        let state = self.lock();
        is_snackbar(&state.current, callback) || is_snackbar(&state.next, callback)
    }

    /// Returns true if a snackbar occupies the current slot.
    #[must_use]
    pub fn has_current(&self) -> bool {
        self.lock().current.is_some()
    }

    /// Returns true if a snackbar is waiting.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.lock().next.is_some()
    }

    /// Returns the number of live auto-dismiss timers.
    #[must_use]
    pub fn scheduled_timeouts(&self) -> usize {
        self.lock().dispatch.pending_count()
    }

    /// Processes one of the manager's own messages.
    ///
    /// A timeout for a record no longer current or waiting is ignored.
    pub fn handle_message(&self, message: Message) {
        let mut effects = Vec::new();
        {
            let mut state = self.lock();
            state.dispatch.remove(message.record());
            handle_message_locked(&mut state, message, &mut effects);
        }
        run(effects);
    }

    fn handle_envelope(&self, envelope: Envelope) {
        let mut effects = Vec::new();
        {
            let mut state = self.lock();
            if !state.dispatch.claim(&envelope) {
                log::debug!("ignoring stale {:?}", envelope.message());
                return;
            }
            handle_message_locked(&mut state, envelope.message(), &mut effects);
        }
        run(effects);
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn show_locked(
        &self,
        state: &mut State,
        callback: &Arc<dyn Callback>,
        duration: SnackbarDuration,
        effects: &mut Vec<Effect>,
    ) {
        if let Some(current) = state.current.as_mut() {
            if current.is_snackbar(callback) {
                current.duration = duration;
                if !current.dismissing {
                    self.schedule_timeout_locked(state);
                }
                return;
            }
        }

        if let Some(next) = state.next.as_mut() {
            if next.is_snackbar(callback) {
                next.duration = duration;
                return;
            }
        }

        let record = SnackbarRecord::new(callback, duration);
        let id = record.id();
        if let Some(dropped) = state.next.replace(record) {
            log::debug!("snackbar {} dropped before being shown", dropped.id().value());
            state.record_event(SnackbarEvent::Dropped {
                record: dropped.id().value(),
            });
        }
        state.record_event(SnackbarEvent::Queued {
            record: id.value(),
            duration,
        });

        if state.current.is_some() && cancel_current_locked(state, DismissEvent::Consecutive, effects)
        {
            return;
        }
        state.current = None;
        show_next_locked(state, effects);
    }

    /// (Re)starts the countdown of the current record.
    fn schedule_timeout_locked(&self, state: &mut State) {
        let Some(current) = state.current.as_ref() else {
            return;
        };
        let id = current.id();
        let duration = current.duration;
        state.dispatch.remove(id);

        if duration.is_below_minimum() {
            let message = format!(
                "duration {duration} is below {}ms, using the short duration",
                duration_bounds::MIN_EXPLICIT_MS
            );
            log::warn!("{message}");
            state.record_warning(WarningType::InvalidDuration, message);
        }

        let Some(delay) = duration.resolve(self.inner.timing) else {
            return;
        };

        let manager = Arc::downgrade(&self.inner);
        let scheduled = state
            .dispatch
            .send_message_delayed(Message::Timeout(id), delay, move |envelope| {
                deliver(&manager, envelope);
            });

        if scheduled {
            state.record_event(SnackbarEvent::TimeoutScheduled {
                record: id.value(),
                millis: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            });
        } else {
            let message = format!(
                "no tokio runtime, snackbar {} will not be dismissed automatically",
                id.value()
            );
            log::warn!("{message}");
            state.record_warning(WarningType::MissingRuntime, message);
        }
    }
}

fn deliver(manager: &Weak<Inner>, envelope: Envelope) {
    if let Some(inner) = manager.upgrade() {
        SnackbarManager { inner }.handle_envelope(envelope);
    }
}

fn run(effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::Shown(callback) => callback.on_shown(),
            Effect::Dismissed(callback, event) => callback.on_dismissed(event),
        }
    }
}

fn is_snackbar(slot: &Option<SnackbarRecord>, callback: &Arc<dyn Callback>) -> bool {
    slot.as_ref().is_some_and(|record| record.is_snackbar(callback))
}

fn handle_message_locked(state: &mut State, message: Message, effects: &mut Vec<Effect>) {
    match message {
        Message::Timeout(id) => {
            if slot_holds(&state.current, id) {
                cancel_current_locked(state, DismissEvent::Timeout, effects);
            } else if slot_holds(&state.next, id) {
                cancel_next_locked(state, DismissEvent::Timeout, effects);
            }
        }
    }
}

fn slot_holds(slot: &Option<SnackbarRecord>, id: RecordId) -> bool {
    slot.as_ref().is_some_and(|record| record.id() == id)
}

/// Tells the current presenter to hide.
///
/// Returns false if the presenter is gone, leaving the caller to clear the
/// slot.
fn cancel_current_locked(state: &mut State, event: DismissEvent, effects: &mut Vec<Effect>) -> bool {
    let Some(current) = state.current.as_mut() else {
        return false;
    };
    let Some(callback) = current.callback() else {
        return false;
    };
    let id = current.id();
    state.dispatch.remove(id);
    if !current.dismissing {
        current.dismissing = true;
        log::debug!("snackbar {} dismissed ({event})", id.value());
        effects.push(Effect::Dismissed(callback, event));
        state.record_event(SnackbarEvent::Dismissed {
            record: id.value(),
            reason: event,
        });
    }
    true
}

fn cancel_next_locked(state: &mut State, event: DismissEvent, effects: &mut Vec<Effect>) {
    let Some(next) = state.next.take() else {
        return;
    };
    state.dispatch.remove(next.id());
    if let Some(callback) = next.callback() {
        effects.push(Effect::Dismissed(callback, event));
        state.record_event(SnackbarEvent::Dismissed {
            record: next.id().value(),
            reason: event,
        });
    }
}

fn release_current_locked(state: &mut State) {
    if let Some(current) = state.current.take() {
        state.dispatch.remove(current.id());
        log::debug!("snackbar {} released", current.id().value());
        state.record_event(SnackbarEvent::Released {
            record: current.id().value(),
        });
    }
}

/// Promotes the waiting record, if any.
fn show_next_locked(state: &mut State, effects: &mut Vec<Effect>) {
    let Some(next) = state.next.take() else {
        return;
    };
    match next.callback() {
        Some(callback) => {
            log::debug!("snackbar {} shown", next.id().value());
            state.record_event(SnackbarEvent::Shown {
                record: next.id().value(),
            });
            state.current = Some(next);
            effects.push(Effect::Shown(callback));
        }
        None => state.current = None,
    }
}
