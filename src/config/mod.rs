//! Configuration management for cchistory.
//!
//! Handles:
//! - Menu page sizes
//! - Display options (color, header rule width)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HistoryError, Result};

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Menu behaviour.
    #[serde(default)]
    pub menu: MenuConfig,
    /// Display options.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let config_path = default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HistoryError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        toml::from_str(&content).map_err(|e| HistoryError::InvalidConfig {
            message: e.to_string(),
        })
    }
}

/// Menu configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuConfig {
    /// Paginate the project menu when there are more projects than this.
    #[serde(default = "default_project_page_size")]
    pub project_page_size: usize,
    /// Paginate the session menu when there are more sessions than this.
    #[serde(default = "default_session_page_size")]
    pub session_page_size: usize,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            project_page_size: default_project_page_size(),
            session_page_size: default_session_page_size(),
        }
    }
}

/// Display configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Use color output.
    #[serde(default = "default_true")]
    pub color: bool,
    /// Width of the rule under the transcript header.
    #[serde(default = "default_separator_width")]
    pub separator_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            separator_width: default_separator_width(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_project_page_size() -> usize {
    15
}

fn default_session_page_size() -> usize {
    10
}

fn default_separator_width() -> usize {
    crate::render::DEFAULT_SEPARATOR_WIDTH
}

/// Get the default configuration path.
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| HistoryError::ConfigError {
        message: "could not determine the configuration directory".to_string(),
    })?;

    Ok(config_dir.join(crate::NAME).join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.menu.project_page_size, 15);
        assert_eq!(config.menu.session_page_size, 10);
        assert!(config.display.color);
        assert_eq!(config.display.separator_width, 80);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[menu]
session_page_size = 5

[display]
color = false
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.menu.session_page_size, 5);
        assert_eq!(config.menu.project_page_size, 15);
        assert!(!config.display.color);
        assert_eq!(config.display.separator_width, 80);
    }

    #[test]
    fn test_invalid_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[menu]\nproject_page_size = \"many\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, HistoryError::InvalidConfig { .. }));
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load_from(Path::new("/definitely/not/config.toml")).unwrap_err();
        assert!(matches!(err, HistoryError::IoError { .. }));
    }

    #[test]
    fn test_default_path_shape() {
        if let Ok(path) = default_config_path() {
            assert!(path.ends_with("cchistory/config.toml"));
        }
    }
}
