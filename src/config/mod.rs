// SPDX-License-Identifier: MPL-2.0
//! This module handles the queue configuration, loading and saving it from
//! a `settings.toml` file.
//!
//! Every key is optional; missing keys take the values from [`defaults`],
//! and out-of-range values are clamped when converted to
//! [`ManagerSettings`].
//!
//! # Examples
//!
//! ```no_run
//! use toast_queue::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.max_toasts = Some(3);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! let settings = config.manager_settings();
//! assert_eq!(settings.limit.value(), 3);
//! ```

pub mod defaults;

use crate::domain::diagnostics::BufferCapacity;
use crate::domain::notification::{AutoDismiss, RemoveDelay, ToastLimit};
use crate::error::Result;
use crate::notifications::ManagerSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "ToastQueue";

/// Environment variable overriding the config directory.
pub const ENV_CONFIG_DIR: &str = "TOAST_QUEUE_CONFIG_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub max_toasts: Option<usize>,
    #[serde(default)]
    pub default_duration_ms: Option<u64>,
    #[serde(default)]
    pub remove_delay_ms: Option<u64>,
    #[serde(default)]
    pub diagnostics_capacity: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_toasts: Some(defaults::DEFAULT_MAX_TOASTS),
            default_duration_ms: Some(defaults::DEFAULT_DURATION_MS),
            remove_delay_ms: Some(defaults::DEFAULT_REMOVE_DELAY_MS),
            diagnostics_capacity: Some(defaults::DEFAULT_DIAGNOSTICS_CAPACITY),
        }
    }
}

impl Config {
    /// Converts the file values into validated manager settings.
    #[must_use]
    pub fn manager_settings(&self) -> ManagerSettings {
        ManagerSettings {
            limit: ToastLimit::new(self.max_toasts.unwrap_or(defaults::DEFAULT_MAX_TOASTS)),
            default_duration: AutoDismiss::from_millis(
                self.default_duration_ms
                    .unwrap_or(defaults::DEFAULT_DURATION_MS),
            ),
            remove_delay: RemoveDelay::from_millis(
                self.remove_delay_ms
                    .unwrap_or(defaults::DEFAULT_REMOVE_DELAY_MS),
            ),
        }
    }

    #[must_use]
    pub fn diagnostics_capacity(&self) -> BufferCapacity {
        BufferCapacity::new(
            self.diagnostics_capacity
                .unwrap_or(defaults::DEFAULT_DIAGNOSTICS_CAPACITY),
        )
    }
}

/// Resolves the config directory: environment override first, then the
/// platform config directory.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR).filter(|dir| !dir.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|path| path.join(APP_NAME))
}

fn get_default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Reads a config file. Content that is not valid TOML yields the defaults.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            eprintln!(
                "[WARN] Ignoring invalid config {}: {}",
                path.display(),
                err.message()
            );
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_values() {
        let config = Config {
            max_toasts: Some(3),
            default_duration_ms: Some(1500),
            remove_delay_ms: Some(250),
            diagnostics_capacity: Some(64),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "max_toasts = [not toml").expect("failed to write");

        let loaded = load_from_path(&config_path).expect("failed to load config");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn load_from_path_fails_on_missing_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = load_from_path(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "max_toasts = 2\n").expect("failed to write");

        let settings = load_from_path(&config_path)
            .expect("failed to load config")
            .manager_settings();

        assert_eq!(settings.limit.value(), 2);
        assert_eq!(settings.default_duration, AutoDismiss::default());
        assert_eq!(settings.remove_delay, RemoveDelay::default());
    }

    #[test]
    fn default_config_matches_default_settings() {
        let config = Config::default();
        assert_eq!(config.manager_settings(), ManagerSettings::default());
        assert_eq!(config.diagnostics_capacity(), BufferCapacity::default());
    }

    #[test]
    fn manager_settings_clamp_and_map_infinite_duration() {
        let config = Config {
            max_toasts: Some(0),
            default_duration_ms: Some(defaults::INFINITE_DURATION_MS),
            remove_delay_ms: Some(10 * 60 * 1000),
            diagnostics_capacity: Some(1),
        };
        let settings = config.manager_settings();

        assert_eq!(settings.limit.value(), defaults::MIN_MAX_TOASTS);
        assert!(settings.default_duration.is_never());
        assert_eq!(
            settings.remove_delay.value(),
            Duration::from_millis(defaults::MAX_REMOVE_DELAY_MS)
        );
        assert_eq!(config.diagnostics_capacity().value(), 16);
    }
}
