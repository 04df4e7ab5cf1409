//! Dashboard settings loaded from an optional TOML file.
//!
//! ```toml
//! grid_size = 10.0
//! recent_window_days = 7
//! ```

use std::path::{Path, PathBuf};

use risk_map_zone::{DEFAULT_GRID_SIZE, DEFAULT_RECENT_WINDOW_DAYS};
use serde::Deserialize;

/// Environment variable naming the config file when `--config` is absent.
pub const CONFIG_ENV: &str = "RISK_MAP_CONFIG";

/// Errors raised while reading the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error (file read).
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// TOML parsing failed.
    #[error("Invalid config {}: {source}", path.display())]
    Toml {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        source: toml::de::Error,
    },
}

/// Tunables for the heatmap and the header statistics.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Grid cell edge, percent of the map.
    pub grid_size: f64,
    /// Days counted as "this week".
    pub recent_window_days: i64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            recent_window_days: DEFAULT_RECENT_WINDOW_DAYS,
        }
    }
}

impl DashboardConfig {
    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text is invalid or has unknown keys.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Loads the config from `path`, from [`CONFIG_ENV`] if `path` is
    /// `None`, or falls back to defaults when neither is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the chosen file can't be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match std::env::var_os(CONFIG_ENV) {
                Some(path) => PathBuf::from(path),
                None => {
                    log::debug!("No config file given, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        log::info!("Loading config from {}", path.display());
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Toml { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(
            DashboardConfig::from_toml("").unwrap(),
            DashboardConfig::default()
        );
    }

    #[test]
    fn reads_overrides() {
        let config = DashboardConfig::from_toml("grid_size = 20.0\nrecent_window_days = 30").unwrap();
        assert!((config.grid_size - 20.0).abs() < f64::EPSILON);
        assert_eq!(config.recent_window_days, 30);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = DashboardConfig::from_toml("recent_window_days = 14").unwrap();
        assert!((config.grid_size - DEFAULT_GRID_SIZE).abs() < f64::EPSILON);
        assert_eq!(config.recent_window_days, 14);
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(DashboardConfig::from_toml("gridsize = 5.0").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = DashboardConfig::load(Some(Path::new("/nonexistent/risk_map.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(
            err.to_string()
                .starts_with("Failed to read config /nonexistent/risk_map.toml: "),
            "{err}"
        );
    }

    #[test]
    fn invalid_file_names_the_path() {
        let path = std::env::temp_dir().join(format!("risk_map_bad_{}.toml", std::process::id()));
        std::fs::write(&path, "grid_size = \"wide\"").unwrap();

        let err = DashboardConfig::load(Some(&path)).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(err, ConfigError::Toml { .. }));
        assert!(err.to_string().contains(&path.display().to_string()), "{err}");
    }

    #[test]
    fn reads_file_from_path() {
        let path = std::env::temp_dir().join(format!("risk_map_ok_{}.toml", std::process::id()));
        std::fs::write(&path, "grid_size = 5.0").unwrap();

        let config = DashboardConfig::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!((config.grid_size - 5.0).abs() < f64::EPSILON);
        assert_eq!(config.recent_window_days, DEFAULT_RECENT_WINDOW_DAYS);
    }
}
