// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor configuration.
//!
//! Settings are read from `areamap.yaml` in the working directory, or from
//! the file named by the `AREAMAP_CONFIG` environment variable. Every field
//! is optional; missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "AREAMAP_CONFIG";

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "areamap.yaml";

/// Editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Grab radius around handles, in image pixels
    pub handle_radius: f64,
    /// Reject images larger than this many bytes (no limit when unset)
    pub max_upload_bytes: Option<u64>,
    /// Number of undo steps kept
    pub history_limit: usize,
    /// `name` attribute of the exported `<map>` element
    pub map_name: String,
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Initial window size
    pub window_size: [f32; 2],
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            handle_radius: 10.0,
            max_upload_bytes: None,
            history_limit: 50,
            map_name: "image-map".to_string(),
            log_level: "info".to_string(),
            window_size: [1280.0, 720.0],
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl EditorConfig {
    /// Parse configuration from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.handle_radius.is_finite() && self.handle_radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "handle_radius must be positive, got {}",
                self.handle_radius
            )));
        }
        if self.map_name.trim().is_empty() {
            return Err(ConfigError::Invalid("map_name must not be empty".to_string()));
        }
        Ok(())
    }

    /// Load configuration from a file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    /// Path of the config file to use, if one exists.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }
        let path = PathBuf::from(DEFAULT_CONFIG_FILE);
        path.exists().then_some(path)
    }

    /// Load from the default location, falling back to defaults when no
    /// config file is present.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = EditorConfig::from_yaml("handle_radius: 6.5\nmap_name: nav\n").unwrap();
        assert_eq!(config.handle_radius, 6.5);
        assert_eq!(config.map_name, "nav");
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.max_upload_bytes, None);
    }

    #[test]
    fn test_upload_limit() {
        let config = EditorConfig::from_yaml("max_upload_bytes: 2097152\n").unwrap();
        assert_eq!(config.max_upload_bytes, Some(2 * 1024 * 1024));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            EditorConfig::from_yaml("handle_radius: 0\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EditorConfig::from_yaml("map_name: '  '\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EditorConfig::from_yaml("history_limit: lots\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EditorConfig::load_from(Path::new("/nonexistent/areamap.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
