// SPDX-License-Identifier: MPL-2.0
//! This module handles the toast configuration, loading and saving the
//! process-wide defaults to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[toasts]` - Default expiry of new toasts
//! - `[placement]` - Corner and margin of the stack
//! - `[one_shot]` - Whether one-shot ids survive restarts
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `ICED_TOAST_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use iced_toast::config::{self, Config};
//!
//! let mut config = config::load();
//! config.toasts.indefinite_by_default = Some(true);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::notifications::{Corner, Expiry, Placement};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Expiry settings for new toasts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToastsConfig {
    /// Lifetime of timed toasts in milliseconds.
    #[serde(
        default = "default_expiry_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_expiry_ms: Option<u64>,

    /// When true, toasts stay until closed unless a request overrides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indefinite_by_default: Option<bool>,
}

impl Default for ToastsConfig {
    fn default() -> Self {
        Self {
            default_expiry_ms: default_expiry_ms(),
            indefinite_by_default: Some(false),
        }
    }
}

/// Where the stack sits in the window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlacementConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner: Option<Corner>,

    /// Distance from the window edges in logical pixels.
    #[serde(default = "default_margin", skip_serializing_if = "Option::is_none")]
    pub margin: Option<f32>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            corner: Some(Corner::default()),
            margin: default_margin(),
        }
    }
}

/// One-shot registry settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OneShotConfig {
    /// Keep the set of shown one-shot ids on disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persist: Option<bool>,
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub toasts: ToastsConfig,

    #[serde(default)]
    pub placement: PlacementConfig,

    #[serde(default)]
    pub one_shot: OneShotConfig,
}

impl Config {
    /// Resolves the default expiry of new toasts.
    ///
    /// Timed durations below [`MIN_EXPIRY_MS`] are clamped up to it.
    #[must_use]
    pub fn default_expiry(&self) -> Expiry {
        if self.toasts.indefinite_by_default.unwrap_or(false) {
            return Expiry::Indefinite;
        }
        let ms = self
            .toasts
            .default_expiry_ms
            .unwrap_or(DEFAULT_EXPIRY_MS)
            .max(MIN_EXPIRY_MS);
        Expiry::Timed(Duration::from_millis(ms))
    }

    /// Resolves the stack placement; margins are clamped to `0..=MAX_MARGIN`.
    #[must_use]
    pub fn placement(&self) -> Placement {
        let defaults = Placement::default();
        Placement {
            corner: self.placement.corner.unwrap_or(defaults.corner),
            margin: self
                .placement
                .margin
                .filter(|margin| margin.is_finite())
                .map_or(defaults.margin, |margin| margin.clamp(0.0, MAX_MARGIN)),
        }
    }

    /// Returns whether the one-shot registry should be kept on disk.
    #[must_use]
    pub fn persist_one_shot(&self) -> bool {
        self.one_shot.persist.unwrap_or(false)
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_expiry_ms() -> Option<u64> {
    Some(DEFAULT_EXPIRY_MS)
}

fn default_margin() -> Option<f32> {
    Some(crate::notifications::surface::DEFAULT_MARGIN)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// A missing file yields the defaults. An unreadable or invalid file also
/// yields the defaults, with a logged warning.
pub fn load() -> Config {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> Config {
    let Some(path) = get_config_path_with_override(base_dir) else {
        return Config::default();
    };
    if !path.exists() {
        return Config::default();
    }
    match load_from_path(&path) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to load config, using defaults");
            Config::default()
        }
    }
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
    match get_config_path_with_override(base_dir) {
        Some(path) => save_to_path(config, &path),
        None => Err(Error::Config("no config directory available".to_string())),
    }
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
            toasts: ToastsConfig {
                default_expiry_ms: Some(2_500),
                indefinite_by_default: Some(false),
            },
            placement: PlacementConfig {
                corner: Some(Corner::TopLeft),
                margin: Some(24.0),
            },
            one_shot: OneShotConfig {
                persist: Some(true),
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

        let result = load_from_path(&config_path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn load_with_override_falls_back_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[toasts\nbroken")
            .expect("failed to write invalid toml");

        let config = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_with_override_missing_file_returns_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_with_override_writes_settings_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        save_with_override(&Config::default(), Some(temp_dir.path().to_path_buf()))
            .expect("save should succeed");
        assert!(temp_dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn partial_file_keeps_section_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[placement]\ncorner = \"top-right\"\n").expect("write");

        let config = load_from_path(&config_path).expect("load");
        assert_eq!(config.placement.corner, Some(Corner::TopRight));
        assert_eq!(
            config.placement.margin,
            Some(crate::notifications::surface::DEFAULT_MARGIN)
        );
        assert_eq!(config.toasts.default_expiry_ms, Some(DEFAULT_EXPIRY_MS));
    }

    #[test]
    fn default_expiry_is_four_second_timer() {
        assert_eq!(
            Config::default().default_expiry(),
            Expiry::Timed(Duration::from_millis(DEFAULT_EXPIRY_MS))
        );
    }

    #[test]
    fn indefinite_flag_wins_over_duration() {
        let mut config = Config::default();
        config.toasts.indefinite_by_default = Some(true);
        config.toasts.default_expiry_ms = Some(1_000);
        assert_eq!(config.default_expiry(), Expiry::Indefinite);
    }

    #[test]
    fn tiny_expiry_is_clamped() {
        let mut config = Config::default();
        config.toasts.default_expiry_ms = Some(0);
        assert_eq!(
            config.default_expiry(),
            Expiry::Timed(Duration::from_millis(MIN_EXPIRY_MS))
        );
    }

    #[test]
    fn placement_margin_is_clamped() {
        let mut config = Config::default();
        config.placement.margin = Some(-5.0);
        assert_eq!(config.placement().margin, 0.0);

        config.placement.margin = Some(10_000.0);
        assert_eq!(config.placement().margin, MAX_MARGIN);

        config.placement.margin = Some(f32::NAN);
        assert_eq!(
            config.placement().margin,
            crate::notifications::surface::DEFAULT_MARGIN
        );
    }

    #[test]
    fn persist_one_shot_defaults_to_memory() {
        assert!(!Config::default().persist_one_shot());
    }
}
