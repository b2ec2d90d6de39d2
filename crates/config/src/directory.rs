//! Remembered working directory.
//!
//! Stored as JSON in `current_directory.json` inside the config directory.
//! Older files hold nothing but a JSON string; those still load, without
//! a timestamp.

use crate::{AppConfig, ConfigError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const FILE_NAME: &str = "current_directory.json";

/// A saved working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedDirectory {
    pub directory: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Stored {
    Plain(String),
    Stamped(SavedDirectory),
}

/// Reads and writes the saved directory file.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    path: PathBuf,
}

impl DirectoryStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The store inside [`AppConfig::config_dir`].
    pub fn open_default() -> Self {
        Self::new(AppConfig::config_dir().join(FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved directory, or `None` if nothing has been saved.
    pub fn load(&self) -> Result<Option<SavedDirectory>, ConfigError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No saved directory");
                return Ok(None);
            }
            Err(e) => return Err(self.state_error(e)),
        };

        let stored: Stored = serde_json::from_str(&content).map_err(|e| self.state_error(e))?;
        let saved = match stored {
            Stored::Plain(directory) => SavedDirectory {
                directory,
                saved_at: None,
            },
            Stored::Stamped(saved) => saved,
        };

        Ok((!saved.directory.trim().is_empty()).then_some(saved))
    }

    /// Remember `directory`, replacing whatever was saved before.
    pub fn save(&self, directory: &str) -> Result<SavedDirectory, ConfigError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.state_error(e))?;
        }

        let saved = SavedDirectory {
            directory: directory.to_string(),
            saved_at: Some(Utc::now()),
        };
        let json = serde_json::to_string_pretty(&saved).map_err(|e| self.state_error(e))?;
        std::fs::write(&self.path, json).map_err(|e| self.state_error(e))?;

        info!(directory, path = %self.path.display(), "Saved working directory");
        Ok(saved)
    }

    /// Forget the saved directory. Returns `true` if one was removed.
    pub fn clear(&self) -> Result<bool, ConfigError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(self.state_error(e)),
        }
    }

    fn state_error(&self, e: impl std::fmt::Display) -> ConfigError {
        ConfigError::StateError {
            path: self.path.clone(),
            reason: e.to_string(),
        }
    }
}
