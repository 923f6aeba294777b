// SPDX-License-Identifier: MPL-2.0
//! Diagnostics domain types.
//!
//! - [`EventCapacity`]: size of the diagnostic event history

mod newtypes;

pub use newtypes::{event_capacity_bounds, EventCapacity};
