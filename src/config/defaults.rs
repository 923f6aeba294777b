// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Durations**: Display time of the short and long presets
//! - **Animation**: Show/hide transition time of the presenter
//! - **Diagnostics**: Size of the event history

use crate::domain::diagnostics::event_capacity_bounds;
use crate::domain::snackbar::duration_bounds;

// ==========================================================================
// Duration Defaults
// ==========================================================================

/// Default display time of a short snackbar (in milliseconds).
pub const DEFAULT_SHORT_DURATION_MS: u64 = duration_bounds::SHORT_MS;

/// Default display time of a long snackbar (in milliseconds).
pub const DEFAULT_LONG_DURATION_MS: u64 = duration_bounds::LONG_MS;

/// Smallest configurable preset duration (in milliseconds).
pub const MIN_PRESET_DURATION_MS: u64 = duration_bounds::MIN_EXPLICIT_MS;

/// Largest configurable preset duration (in milliseconds).
pub const MAX_PRESET_DURATION_MS: u64 = 60_000;

// ==========================================================================
// Animation Defaults
// ==========================================================================

/// Default show/hide transition time (in milliseconds).
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 250;

/// Largest configurable transition time (in milliseconds).
pub const MAX_ANIMATION_DURATION_MS: u64 = 5_000;

/// Delay between an action press and the resulting dismissal (in milliseconds).
pub const ACTION_PRESS_DELAY_MS: u64 = 100;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_CAPACITY: usize = event_capacity_bounds::DEFAULT;

/// Minimum number of diagnostic events kept in memory.
pub const MIN_DIAGNOSTICS_CAPACITY: usize = event_capacity_bounds::MIN;

/// Maximum number of diagnostic events kept in memory.
pub const MAX_DIAGNOSTICS_CAPACITY: usize = event_capacity_bounds::MAX;
