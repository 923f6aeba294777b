// SPDX-License-Identifier: MPL-2.0
//! Snackbar notifications.
//!
//! A snackbar is a short message shown at the edge of the screen, optionally
//! with one action button. Only one snackbar is visible at a time: showing a
//! new one hides the visible one first.
//!
//! # Components
//!
//! - [`manager`] - `SnackbarManager`, the queue deciding which snackbar is visible
//! - [`dispatch`] - `DelayedDispatch`, the per-record timers behind auto-dismiss
//! - [`snackbar`] - `Snackbar`, a presenter driving one snackbar's view state
//!
//! # Usage
//!
//! ```ignore
//! use snackbar_queue::ui::notifications::Snackbar;
//! use snackbar_queue::domain::snackbar::SnackbarDuration;
//!
//! let snackbar = Snackbar::make("Photo archived", SnackbarDuration::Short)
//!     .set_action("Undo", || restore_photo());
//! snackbar.show();
//! ```
//!
//! Timers run on tokio, so `show` is expected to be called from inside a
//! runtime. Without one, snackbars stay visible until dismissed.

pub mod dispatch;
pub mod manager;
mod record;
pub mod snackbar;

pub use dispatch::{DelayedDispatch, Envelope, Message};
pub use manager::SnackbarManager;
pub use record::RecordId;
pub use snackbar::{Snackbar, ViewState};

use crate::domain::snackbar::DismissEvent;

/// Notifications the manager sends to a presenter.
///
/// The manager identifies presenters by the address of their `Arc`, so the
/// same `Arc` (or a clone of it) must be passed to every manager call.
pub trait Callback: Send + Sync {
    /// Begin showing. Call [`SnackbarManager::on_shown`] when done.
    fn on_shown(&self);

    /// Begin hiding because of `event`. Call
    /// [`SnackbarManager::on_dismissed`] when done.
    fn on_dismissed(&self, event: DismissEvent);
}
