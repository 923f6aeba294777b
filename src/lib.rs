// SPDX-License-Identifier: MPL-2.0
//! `snackbar_queue` coordinates snackbar notifications.
//!
//! One snackbar is visible at a time and at most one waits behind it. A new
//! snackbar pre-empts the visible one, and visible snackbars are dismissed
//! automatically once their duration elapses. Timers run on tokio.

#![doc(html_root_url = "https://docs.rs/snackbar_queue/0.1.0")]

pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod ui;

pub use domain::snackbar::{DismissEvent, SnackbarDuration, TimeoutTable};
pub use error::{Error, Result};
pub use ui::notifications::{Callback, Snackbar, SnackbarManager};
