// SPDX-License-Identifier: MPL-2.0
//! Snackbar newtypes.
//!
//! Durations, dismiss reasons and the timeout table used to resolve
//! a duration into a concrete countdown.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

// =============================================================================
// Duration Bounds
// =============================================================================

/// Snackbar timing bounds (in milliseconds).
pub mod duration_bounds {
    /// Display time for [`SnackbarDuration::Short`](super::SnackbarDuration::Short).
    pub const SHORT_MS: u64 = 1500;
    /// Display time for [`SnackbarDuration::Long`](super::SnackbarDuration::Long).
    pub const LONG_MS: u64 = 2750;
    /// Smallest explicit duration accepted as-is.
    pub const MIN_EXPLICIT_MS: u64 = 250;
}

/// Legacy numeric codes for the preset durations.
pub mod duration_codes {
    /// Code for [`SnackbarDuration::Long`](super::SnackbarDuration::Long).
    pub const LONG: i64 = -1;
    /// Code for [`SnackbarDuration::Short`](super::SnackbarDuration::Short).
    pub const SHORT: i64 = -2;
    /// Code for [`SnackbarDuration::Indefinite`](super::SnackbarDuration::Indefinite).
    pub const INDEFINITE: i64 = -3;
}

// =============================================================================
// TimeoutTable
// =============================================================================

/// Concrete display times for the preset durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutTable {
    short: Duration,
    long: Duration,
}

impl TimeoutTable {
    /// Creates a table from explicit short and long display times.
    #[must_use]
    pub fn new(short: Duration, long: Duration) -> Self {
        Self { short, long }
    }

    /// Display time of a short snackbar. Also the fallback for invalid durations.
    #[must_use]
    pub fn short(self) -> Duration {
        self.short
    }

    /// Display time of a long snackbar.
    #[must_use]
    pub fn long(self) -> Duration {
        self.long
    }
}

impl Default for TimeoutTable {
    fn default() -> Self {
        Self {
            short: Duration::from_millis(duration_bounds::SHORT_MS),
            long: Duration::from_millis(duration_bounds::LONG_MS),
        }
    }
}

// =============================================================================
// SnackbarDuration
// =============================================================================

/// How long a snackbar stays on screen once fully shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SnackbarDuration {
    /// Long preset (2750 ms by default).
    Long,
    /// Short preset (1500 ms by default).
    #[default]
    Short,
    /// Stays until dismissed explicitly or displaced.
    Indefinite,
    /// Explicit duration in milliseconds. Values under 250 fall back to short.
    Millis(u64),
}

impl SnackbarDuration {
    /// Resolves the duration into a countdown.
    ///
    /// Returns `None` for [`SnackbarDuration::Indefinite`].
    #[must_use]
    pub fn resolve(self, table: TimeoutTable) -> Option<Duration> {
        match self {
            Self::Indefinite => None,
            Self::Long => Some(table.long()),
            Self::Short => Some(table.short()),
            Self::Millis(ms) if ms >= duration_bounds::MIN_EXPLICIT_MS => {
                Some(Duration::from_millis(ms))
            }
            Self::Millis(_) => Some(table.short()),
        }
    }

    /// Returns true for explicit durations too short to be honoured.
    #[must_use]
    pub fn is_below_minimum(self) -> bool {
        matches!(self, Self::Millis(ms) if ms < duration_bounds::MIN_EXPLICIT_MS)
    }

    /// Maps a legacy numeric code (`-1` long, `-2` short, `-3` indefinite,
    /// non-negative milliseconds) to a duration.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            duration_codes::LONG => Some(Self::Long),
            duration_codes::SHORT => Some(Self::Short),
            duration_codes::INDEFINITE => Some(Self::Indefinite),
            ms if ms >= 0 => Some(Self::Millis(ms.unsigned_abs())),
            _ => None,
        }
    }

    /// Returns the legacy numeric code of this duration.
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::Long => duration_codes::LONG,
            Self::Short => duration_codes::SHORT,
            Self::Indefinite => duration_codes::INDEFINITE,
            Self::Millis(ms) => i64::try_from(ms).unwrap_or(i64::MAX),
        }
    }
}

impl fmt::Display for SnackbarDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long => write!(f, "long"),
            Self::Short => write!(f, "short"),
            Self::Indefinite => write!(f, "indefinite"),
            Self::Millis(ms) => write!(f, "{ms}ms"),
        }
    }
}

/// Error returned when a duration string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDurationError(String);

impl ParseDurationError {
    /// Returns the rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParseDurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not a duration; use long, short, indefinite or a number of milliseconds",
            self.0
        )
    }
}

impl std::error::Error for ParseDurationError {}

impl FromStr for SnackbarDuration {
    type Err = ParseDurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "long" => Ok(Self::Long),
            "short" => Ok(Self::Short),
            "indefinite" => Ok(Self::Indefinite),
            other => other
                .strip_suffix("ms")
                .unwrap_or(other)
                .trim_end()
                .parse::<u64>()
                .map(Self::Millis)
                .map_err(|_| ParseDurationError(trimmed.to_string())),
        }
    }
}

// =============================================================================
// DismissEvent
// =============================================================================

/// Why a snackbar was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissEvent {
    /// The user pressed the action button.
    Action,
    /// The display time ran out.
    Timeout,
    /// `dismiss` was called explicitly.
    Manual,
    /// A newer snackbar took its place.
    Consecutive,
}

impl DismissEvent {
    /// Returns the legacy numeric code (1 to 4).
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Action => 1,
            Self::Timeout => 2,
            Self::Manual => 3,
            Self::Consecutive => 4,
        }
    }

    /// Maps a legacy numeric code back to a dismiss event.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Action),
            2 => Some(Self::Timeout),
            3 => Some(Self::Manual),
            4 => Some(Self::Consecutive),
            _ => None,
        }
    }

    /// Stable lowercase tag, used in logs and exported reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Timeout => "timeout",
            Self::Manual => "manual",
            Self::Consecutive => "consecutive",
        }
    }
}

impl fmt::Display for DismissEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Tests
// =============================================================================
