// SPDX-License-Identifier: MPL-2.0
//! Delayed delivery of the coordinator's timeout messages.
//!
//! Each record owns at most one pending timer. Scheduling a message for a
//! record replaces the previous timer, and removing a record's timer
//! prevents delivery. Timers run as tokio tasks.

use std::collections::HashMap;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::record::RecordId;

/// Messages the coordinator sends to itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// The display time of a record ran out.
    Timeout(RecordId),
}

impl Message {
    /// Returns the record this message belongs to.
    #[must_use]
    pub fn record(&self) -> RecordId {
        match self {
            Message::Timeout(id) => *id,
        }
    }
}

/// A delivered message, tagged with the timer that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope {
    message: Message,
    ticket: u64,
}

impl Envelope {
    /// Returns the carried message.
    #[must_use]
    pub fn message(&self) -> Message {
        self.message
    }
}

#[derive(Debug)]
struct PendingTimer {
    ticket: u64,
    task: JoinHandle<()>,
}

/// Single-slot-per-record timer registry.
#[derive(Debug)]
pub struct DelayedDispatch {
    runtime: Option<Handle>,
    pending: HashMap<RecordId, PendingTimer>,
    next_ticket: u64,
}

impl Default for DelayedDispatch {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayedDispatch {
    /// Creates a dispatch that spawns on whichever tokio runtime is current
    /// when a message is scheduled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            runtime: None,
            pending: HashMap::new(),
            next_ticket: 0,
        }
    }

    /// Creates a dispatch that spawns its timers on `runtime`.
    #[must_use]
    pub fn with_runtime(runtime: Handle) -> Self {
        Self {
            runtime: Some(runtime),
            pending: HashMap::new(),
            next_ticket: 0,
        }
    }

    /// Delivers `message` to `deliver` once `delay` has elapsed.
    ///
    /// Any timer already pending for the message's record is cancelled first.
    /// Returns `false` if no tokio runtime is available, in which case nothing
    /// is scheduled.
    pub fn send_message_delayed<F>(&mut self, message: Message, delay: Duration, deliver: F) -> bool
    where
        F: FnOnce(Envelope) + Send + 'static,
    {
        let record = message.record();
        self.remove(record);

        let Some(runtime) = self.runtime.clone().or_else(|| Handle::try_current().ok()) else {
            return false;
        };

        self.next_ticket = self.next_ticket.wrapping_add(1);
        let envelope = Envelope {
            message,
            ticket: self.next_ticket,
        };
        let deadline = Instant::now() + delay;
        let task = runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            deliver(envelope);
        });

        self.pending.insert(
            record,
            PendingTimer {
                ticket: envelope.ticket,
                task,
            },
        );
        true
    }

    /// Cancels the pending timer of `record`.
    ///
    /// Returns `true` if a timer was pending.
    pub fn remove(&mut self, record: RecordId) -> bool {
        match self.pending.remove(&record) {
            Some(timer) => {
                timer.task.abort();
                true
            }
            None => false,
        }
    }

    /// Consumes the slot for a delivered envelope.
    ///
    /// Returns `false` if the envelope's timer was cancelled or replaced
    /// after it fired, in which case the message must be ignored.
    pub fn claim(&mut self, envelope: &Envelope) -> bool {
        let record = envelope.message.record();
        match self.pending.get(&record) {
            Some(timer) if timer.ticket == envelope.ticket => {
                self.pending.remove(&record);
                true
            }
            _ => false,
        }
    }

    /// Returns true if a timer is pending for `record`.
    #[must_use]
    pub fn is_pending(&self, record: RecordId) -> bool {
        self.pending.contains_key(&record)
    }

    /// Returns the number of pending timers.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Drop for DelayedDispatch {
    fn drop(&mut self) {
        for (_, timer) in self.pending.drain() {
            timer.task.abort();
        }
    }
}
