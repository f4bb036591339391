//! User configuration loading.
//!
//! Reads an optional TOML file from the platform config directory
//! (e.g. `~/.config/nalssi/config.toml` on Linux). Missing file or
//! missing keys fall back to defaults; a malformed file is an error
//! so typos don't silently vanish.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use nalssi_core::Units;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Location for weather lookups (empty for IP-based auto-detect).
    pub location: String,
    /// Temperature units for the readout.
    pub units: Units,
    /// Frame interval in milliseconds.
    pub tick_ms: u64,
    /// How long to wait after a terminal resize before regenerating
    /// the scene.
    pub resize_debounce_ms: u64,
    /// Backdrop color behind the scene, as RGB.
    pub backdrop: [u8; 3],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            location: String::new(),
            units: Units::Celsius,
            tick_ms: 33,
            resize_debounce_ms: 500,
            backdrop: [61, 61, 61],
        }
    }
}

impl Config {
    /// Load the config from the platform config directory, falling back to
    /// defaults if no file exists.
    pub fn load() -> Result<Config, String> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Config::default()),
        }
    }

    /// Load the config from a specific file.
    pub fn load_from(path: &Path) -> Result<Config, String> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        toml::from_str(&text).map_err(|e| format!("failed to parse {}: {e}", path.display()))
    }
}

/// Path of the config file, if a platform config directory can be resolved.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "nalssi").map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.location, "");
        assert_eq!(config.units, Units::Celsius);
        assert_eq!(config.tick_ms, 33);
        assert_eq!(config.resize_debounce_ms, 500);
        assert_eq!(config.backdrop, [61, 61, 61]);
    }

    #[test]
    fn test_parse_full_file() {
        let config: Config = toml::from_str(
            r#"
            location = "Seoul"
            units = "fahrenheit"
            tick_ms = 16
            resize_debounce_ms = 250
            backdrop = [0, 0, 0]
            "#,
        )
        .unwrap();
        assert_eq!(config.location, "Seoul");
        assert_eq!(config.units, Units::Fahrenheit);
        assert_eq!(config.tick_ms, 16);
        assert_eq!(config.resize_debounce_ms, 250);
        assert_eq!(config.backdrop, [0, 0, 0]);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config: Config = toml::from_str("location = \"Busan\"").unwrap();
        assert_eq!(config.location, "Busan");
        assert_eq!(config.tick_ms, 33);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result: Result<Config, _> = toml::from_str("locaton = \"typo\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_missing_file_is_an_error() {
        assert!(Config::load_from(Path::new("/nonexistent/config.toml")).is_err());
    }
}
