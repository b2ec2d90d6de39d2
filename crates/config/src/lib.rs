//! Configuration loading, validation, and management for the Logsheet Combiner.
//!
//! Loads configuration from `<config dir>/config.toml` with environment
//! variable overrides, and keeps the remembered working directory next to
//! it. Validates all settings at startup.

mod directory;
mod location;

pub use directory::{DirectoryStore, SavedDirectory};
pub use location::{LocationRequest, LocationSource, ResolvedLocation, resolve_location};

use logsheet_core::InsertionMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `config.toml` in [`AppConfig::config_dir`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where prior deletions are inserted ("literal" or "anchored")
    #[serde(default)]
    pub insertion_mode: InsertionMode,

    /// Default file names
    #[serde(default)]
    pub files: FilesConfig,
}

/// File names used when the command line leaves them out.
///
/// Names are given without the `.csv` extension, the way they were typed
/// in by hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    #[serde(default = "default_logsheet")]
    pub logsheet: String,

    #[serde(default = "default_updates")]
    pub updates: String,

    #[serde(default = "default_output")]
    pub output: String,
}

fn default_logsheet() -> String {
    "logsheet".into()
}
fn default_updates() -> String {
    "logsheet_updates".into()
}
fn default_output() -> String {
    "master_logsheet".into()
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            logsheet: default_logsheet(),
            updates: default_updates(),
            output: default_output(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path.
    ///
    /// `LOGSHEET_INSERTION_MODE` overrides the insertion mode.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        let mut config = Self::load_from(&config_path)?;

        if let Ok(mode) = std::env::var("LOGSHEET_INSERTION_MODE") {
            config.insertion_mode = mode.parse().map_err(ConfigError::ValidationError)?;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    ///
    /// `LOGSHEET_HOME` wins. Otherwise `%LOCALAPPDATA%\LogsheetCombiner`
    /// on Windows and `~/.logsheet` elsewhere.
    pub fn config_dir() -> PathBuf {
        if let Ok(dir) = std::env::var("LOGSHEET_HOME") {
            if !dir.trim().is_empty() {
                return PathBuf::from(dir);
            }
        }
        platform_config_dir()
    }

    /// Path of `config.toml`.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("files.logsheet", &self.files.logsheet),
            ("files.updates", &self.files.updates),
            ("files.output", &self.files.output),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{key} must not be empty"
                )));
            }
        }

        let output = self.files.output.trim();
        if output == self.files.logsheet.trim() || output == self.files.updates.trim() {
            return Err(ConfigError::ValidationError(
                "files.output must differ from the input file names".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `config init`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            insertion_mode: InsertionMode::default(),
            files: FilesConfig::default(),
        }
    }
}

fn platform_config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("LOCALAPPDATA")
            .map(|dir| PathBuf::from(dir).join("LogsheetCombiner"))
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default\\AppData\\Local\\LogsheetCombiner"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
            .join(".logsheet")
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("Failed to update saved directory at {path}: {reason}")]
    StateError { path: PathBuf, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.insertion_mode, InsertionMode::Literal);
        assert_eq!(config.files.logsheet, "logsheet");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig {
            insertion_mode: InsertionMode::Anchored,
            ..AppConfig::default()
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.insertion_mode, InsertionMode::Anchored);
        assert_eq!(parsed.files.output, config.files.output);
    }

    #[test]
    fn partial_file_uses_defaults() {
        let parsed: AppConfig = toml::from_str("[files]\nlogsheet = \"march\"\n").unwrap();
        assert_eq!(parsed.files.logsheet, "march");
        assert_eq!(parsed.files.updates, "logsheet_updates");
        assert_eq!(parsed.insertion_mode, InsertionMode::Literal);
    }

    #[test]
    fn unknown_mode_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("insertion_mode = \"numeric\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn empty_file_name_rejected() {
        let mut config = AppConfig::default();
        config.files.updates = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn output_clobbering_input_rejected() {
        let mut config = AppConfig::default();
        config.files.output = config.files.logsheet.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().files.output, "master_logsheet");
    }

    #[test]
    fn invalid_file_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "insertion_mode = [").unwrap();
        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("insertion_mode = \"literal\""));
        assert!(toml_str.contains("logsheet_updates"));
    }
}
