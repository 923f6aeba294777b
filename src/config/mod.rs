// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, including loading and saving
//! snackbar preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[snackbar]` - Preset durations, default duration and animation time
//! - `[diagnostics]` - Event history size
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `SNACKBAR_QUEUE_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use snackbar_queue::config::{self, Config};
//!
//! let (mut config, _warning) = config::load();
//! config.snackbar.long_duration_ms = Some(4000);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::diagnostics::EventCapacity;
use crate::domain::snackbar::{SnackbarDuration, TimeoutTable};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Application name used for directory naming.
const APP_NAME: &str = "SnackbarQueue";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "SNACKBAR_QUEUE_CONFIG_DIR";

// =============================================================================
// Section Structs
// =============================================================================

/// Snackbar timing settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnackbarConfig {
    /// Display time of the short preset (ms).
    #[serde(
        default = "default_short_duration_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub short_duration_ms: Option<u64>,

    /// Display time of the long preset (ms).
    #[serde(
        default = "default_long_duration_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub long_duration_ms: Option<u64>,

    /// Show/hide transition time of the presenter (ms).
    #[serde(
        default = "default_animation_duration_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub animation_duration_ms: Option<u64>,

    /// Duration used when a snackbar does not pick one
    /// (`long`, `short`, `indefinite` or milliseconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_duration: Option<String>,
}

impl Default for SnackbarConfig {
    fn default() -> Self {
        Self {
            short_duration_ms: default_short_duration_ms(),
            long_duration_ms: default_long_duration_ms(),
            animation_duration_ms: default_animation_duration_ms(),
            default_duration: None,
        }
    }
}

impl SnackbarConfig {
    /// Builds the timeout table, clamping presets to the configurable range.
    #[must_use]
    pub fn timeout_table(&self) -> TimeoutTable {
        let clamp = |ms: u64| ms.clamp(MIN_PRESET_DURATION_MS, MAX_PRESET_DURATION_MS);
        let short = self
            .short_duration_ms
            .map_or(DEFAULT_SHORT_DURATION_MS, clamp);
        let long = self.long_duration_ms.map_or(DEFAULT_LONG_DURATION_MS, clamp);
        TimeoutTable::new(Duration::from_millis(short), Duration::from_millis(long))
    }

    /// Returns the presenter transition time.
    #[must_use]
    pub fn animation_duration(&self) -> Duration {
        let ms = self
            .animation_duration_ms
            .unwrap_or(DEFAULT_ANIMATION_DURATION_MS)
            .min(MAX_ANIMATION_DURATION_MS);
        Duration::from_millis(ms)
    }

    /// Parses the configured default duration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `default_duration` is not a valid duration.
    pub fn default_duration(&self) -> Result<SnackbarDuration> {
        match &self.default_duration {
            Some(raw) => raw
                .parse()
                .map_err(|e| Error::Config(format!("default_duration: {e}"))),
            None => Ok(SnackbarDuration::default()),
        }
    }
}

/// Diagnostics settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticsConfig {
    /// Number of events kept in memory.
    #[serde(
        default = "default_diagnostics_capacity",
        skip_serializing_if = "Option::is_none"
    )]
    pub capacity: Option<usize>,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            capacity: default_diagnostics_capacity(),
        }
    }
}

impl DiagnosticsConfig {
    /// Returns the validated history capacity.
    #[must_use]
    pub fn event_capacity(&self) -> EventCapacity {
        self.capacity
            .map(EventCapacity::new)
            .unwrap_or_default()
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Crate configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// Snackbar timing settings.
    #[serde(default)]
    pub snackbar: SnackbarConfig,

    /// Diagnostics settings.
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_short_duration_ms() -> Option<u64> {
    Some(DEFAULT_SHORT_DURATION_MS)
}

fn default_long_duration_ms() -> Option<u64> {
    Some(DEFAULT_LONG_DURATION_MS)
}

fn default_animation_duration_ms() -> Option<u64> {
    Some(DEFAULT_ANIMATION_DURATION_MS)
}

fn default_diagnostics_capacity() -> Option<usize> {
    Some(DEFAULT_DIAGNOSTICS_CAPACITY)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config directory with an optional override.
///
/// # Resolution Order
///
/// 1. `override_path` parameter (if `Some`)
/// 2. `SNACKBAR_QUEUE_CONFIG_DIR` environment variable (if set and non-empty)
/// 3. Platform-specific config directory (with app name appended)
pub fn config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("ignoring {}: {}", path.display(), err);
                    return (Config::default(), Some(err.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            snackbar: SnackbarConfig {
                short_duration_ms: Some(1200),
                long_duration_ms: Some(4000),
                animation_duration_ms: Some(0),
                default_duration: Some("long".to_string()),
            },
            diagnostics: DiagnosticsConfig {
                capacity: Some(64),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn load_with_override_falls_back_to_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[snackbar\nbroken")
            .expect("failed to write invalid toml");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_some());
    }

    #[test]
    fn load_with_override_missing_file_is_silent() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().join("absent")));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn save_with_override_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let nested_dir = temp_dir.path().join("deep").join("path");

        save_with_override(&Config::default(), Some(nested_dir.clone()))
            .expect("save should create directories");
        assert!(nested_dir.join(CONFIG_FILE).exists());
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config: Config =
            toml::from_str("[snackbar]\nlong_duration_ms = 5000\n").expect("valid toml");
        assert_eq!(config.snackbar.long_duration_ms, Some(5000));
        assert_eq!(
            config.snackbar.short_duration_ms,
            Some(DEFAULT_SHORT_DURATION_MS)
        );
        assert_eq!(
            config.diagnostics.capacity,
            Some(DEFAULT_DIAGNOSTICS_CAPACITY)
        );
    }

    #[test]
    fn default_config_matches_builtin_timing() {
        let config = Config::default();
        assert_eq!(config.snackbar.timeout_table(), TimeoutTable::default());
        assert_eq!(
            config.snackbar.animation_duration(),
            Duration::from_millis(DEFAULT_ANIMATION_DURATION_MS)
        );
        assert_eq!(
            config.snackbar.default_duration().expect("default parses"),
            SnackbarDuration::Short
        );
    }

    #[test]
    fn timeout_table_clamps_presets() {
        let section = SnackbarConfig {
            short_duration_ms: Some(10),
            long_duration_ms: Some(10_000_000),
            ..SnackbarConfig::default()
        };
        let table = section.timeout_table();
        assert_eq!(table.short(), Duration::from_millis(MIN_PRESET_DURATION_MS));
        assert_eq!(table.long(), Duration::from_millis(MAX_PRESET_DURATION_MS));
    }

    #[test]
    fn invalid_default_duration_is_a_config_error() {
        let section = SnackbarConfig {
            default_duration: Some("forever".to_string()),
            ..SnackbarConfig::default()
        };
        assert!(matches!(section.default_duration(), Err(Error::Config(_))));
    }

    #[test]
    fn diagnostics_capacity_is_clamped() {
        let section = DiagnosticsConfig { capacity: Some(1) };
        assert_eq!(section.event_capacity().value(), MIN_DIAGNOSTICS_CAPACITY);
    }
}
