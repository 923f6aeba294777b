// SPDX-License-Identifier: MPL-2.0
//! Diagnostics newtypes.

// =============================================================================
// Event Capacity Bounds
// =============================================================================

/// History capacity bounds (16 to 4096 events).
pub mod event_capacity_bounds {
    /// Minimum history capacity.
    pub const MIN: usize = 16;
    /// Maximum history capacity.
    pub const MAX: usize = 4096;
    /// Default history capacity.
    pub const DEFAULT: usize = 256;
}

// =============================================================================
// EventCapacity
// =============================================================================

/// Number of diagnostic events kept before the oldest ones are evicted.
///
/// Always within 16–4096; out-of-range values are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventCapacity(usize);

impl EventCapacity {
    /// Creates a new capacity, clamping to the valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(event_capacity_bounds::MIN, event_capacity_bounds::MAX))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for EventCapacity {
    fn default() -> Self {
        Self(event_capacity_bounds::DEFAULT)
    }
}
