//! Note error types

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by note operations
#[derive(Debug, Error)]
pub enum NoteError {
    /// Referenced note file does not exist
    #[error("Note not found: {}", path.display())]
    NotFound {
        /// Resolved path that was looked up
        path: PathBuf,
    },

    /// A relative reference was given but no vault root is configured
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Target is not a text document, or a value failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Writing the note back to disk failed
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Any other IO failure
    #[error("IO error on {}: {source}", path.display())]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Search or replace pattern is not a valid regex
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Specialized Result type for note operations
pub type NoteResult<T> = Result<T, NoteError>;

impl NoteError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Map an IO error on `path`, turning `NotFound` into [`NoteError::NotFound`]
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Whether this error means the note file is missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Non-fatal problems found while extracting properties
///
/// Extraction never fails; these are collected and only surfaced as
/// diagnostics when the note is verbose.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseWarning {
    /// Front matter is not valid YAML, or not a mapping
    #[error("Front matter ignored: {0}")]
    Frontmatter(String),

    /// Body line looked like an inline annotation but had no usable key
    #[error("Inline annotation on body line {line} skipped: {text:?}")]
    InlineAnnotation {
        /// 1-based line number within the body
        line: usize,
        /// Offending line text
        text: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_not_found_maps_to_not_found() {
        let err = NoteError::from_io(
            Path::new("/vault/missing.md"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Note not found: /vault/missing.md");

        let err = NoteError::from_io(
            Path::new("/vault/locked.md"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_not_found());
        assert!(matches!(err, NoteError::Io { .. }));
    }

    #[test]
    fn test_warning_display() {
        let warning = ParseWarning::InlineAnnotation {
            line: 3,
            text: "::orphan".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "Inline annotation on body line 3 skipped: \"::orphan\""
        );
    }
}
