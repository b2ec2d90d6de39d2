//! Error types for the logsheet domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Row-shape problems have their own bounded-context error, raised while
//! parsing rows; readers wrap it with the file and line it came from.

use thiserror::Error;

/// The top-level error type for logsheet operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Run pre-conditions ---
    #[error("Input unavailable: {0}")]
    InputUnavailable(String),

    #[error("Invalid working location: {0}")]
    LocationInvalid(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Which log a row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Base,
    Update,
}

impl std::fmt::Display for RowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Base => write!(f, "base"),
            Self::Update => write!(f, "update"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("{kind} row has {found} fields, expected {expected}")]
    FieldCount {
        kind: RowKind,
        expected: usize,
        found: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_count_error_displays_correctly() {
        let err = RecordError::FieldCount {
            kind: RowKind::Update,
            expected: 23,
            found: 7,
        };
        let text = err.to_string();
        assert!(text.contains("update row"));
        assert!(text.contains("7 fields"));
        assert!(text.contains("expected 23"));
    }

    #[test]
    fn location_error_displays_path() {
        let err = Error::LocationInvalid("/no/such/dir".into());
        assert!(err.to_string().contains("/no/such/dir"));
    }
}
