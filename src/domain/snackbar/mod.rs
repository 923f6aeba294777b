// SPDX-License-Identifier: MPL-2.0
//! Snackbar domain types.
//!
//! - [`SnackbarDuration`]: how long a snackbar stays visible
//! - [`DismissEvent`]: why a snackbar went away
//! - [`TimeoutTable`]: concrete display times for the presets

mod newtypes;

pub use newtypes::{
    duration_bounds, duration_codes, DismissEvent, ParseDurationError, SnackbarDuration,
    TimeoutTable,
};
