//! CSV row source and row sink for the Logsheet Combiner.
//!
//! Reads the base log and the update log into typed entries, and writes
//! the master sequence back out with the fixed output header.

mod reader;
mod writer;

pub use reader::{Inputs, load_base, load_inputs, load_updates, read_rows};
pub use writer::{write_master, write_master_to};

use logsheet_core::RecordError;
use std::path::{Path, PathBuf};

/// Errors from reading or writing logsheet files.
#[derive(Debug, thiserror::Error)]
pub enum TabularError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed row in {} at line {line}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        line: u64,
        #[source]
        source: RecordError,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TabularError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type TabularResult<T> = std::result::Result<T, TabularError>;

/// File name for a stem typed without extension: `"logsheet"` → `"logsheet.csv"`.
///
/// Names that already end in `.csv` are left alone.
pub fn csv_file_name(stem: &str) -> String {
    let stem = stem.trim();
    if stem.to_ascii_lowercase().ends_with(".csv") {
        stem.to_string()
    } else {
        format!("{stem}.csv")
    }
}

/// Resolve `name` against the working location, if there is one.
pub fn resolve_in(dir: Option<&Path>, name: &str) -> PathBuf {
    match dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}
