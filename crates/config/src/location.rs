//! Working location resolution.
//!
//! Input and output files are looked up relative to the resolved
//! directory. The process working directory is never changed.

use crate::{ConfigError, DirectoryStore};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Where the caller wants to work.
#[derive(Debug, Clone, Default)]
pub struct LocationRequest {
    /// Directory typed on the command line.
    pub directory: Option<String>,
    /// Use the saved directory instead.
    pub use_saved: bool,
}

/// Where the resolved directory came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
    Explicit,
    Saved,
    /// Nothing given; files are relative to the current directory.
    Current,
}

/// The working location for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    /// `None` means the current directory.
    pub directory: Option<PathBuf>,
    pub valid: bool,
    pub source: LocationSource,
}

impl ResolvedLocation {
    pub fn dir(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    /// The directory as typed, for saving.
    pub fn display(&self) -> String {
        match &self.directory {
            Some(dir) => dir.display().to_string(),
            None => ".".into(),
        }
    }
}

/// Resolve the working location for a run.
///
/// A blank entry means "current directory" and is always valid. Anything
/// else is valid only if it names an existing directory.
pub fn resolve_location(
    request: &LocationRequest,
    store: &DirectoryStore,
) -> Result<ResolvedLocation, ConfigError> {
    let (entry, source) = if request.use_saved {
        let saved = store.load()?.map(|s| s.directory).unwrap_or_default();
        (saved, LocationSource::Saved)
    } else {
        (
            request.directory.clone().unwrap_or_default(),
            LocationSource::Explicit,
        )
    };

    let entry = entry.trim();
    if entry.is_empty() {
        debug!("No working directory given, using the current directory");
        return Ok(ResolvedLocation {
            directory: None,
            valid: true,
            source: LocationSource::Current,
        });
    }

    let directory = PathBuf::from(entry);
    let valid = directory.is_dir();
    if !valid {
        warn!(directory = %directory.display(), "Invalid working directory");
    }

    Ok(ResolvedLocation {
        directory: Some(directory),
        valid,
        source,
    })
}
