// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value types with ZERO external dependencies.
//!
//! # Modules
//!
//! - [`diagnostics`]: Diagnostics types ([`EventCapacity`](diagnostics::EventCapacity))
//! - [`snackbar`]: Snackbar types ([`SnackbarDuration`](snackbar::SnackbarDuration),
//!   [`DismissEvent`](snackbar::DismissEvent), [`TimeoutTable`](snackbar::TimeoutTable))

pub mod diagnostics;
pub mod snackbar;
