//! Error types for OBJ import.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while importing an OBJ file.
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// A directive has the wrong field count, an unparsable number, or a
    /// face references an index outside its table.
    #[error("malformed OBJ at line {line} ({directive}): {message}")]
    Malformed {
        /// 1-based line number in the source.
        line: usize,
        /// The directive keyword (`v`, `vt`, `vn`, `f`).
        directive: String,
        /// Description of what was invalid.
        message: String,
    },

    /// A segment produced no triangles. The importer skips these.
    #[error("mesh segment '{name}' has no triangles")]
    EmptyMesh {
        /// Name of the empty segment.
        name: String,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IoError {
    /// Create a `Malformed` error for the given line and directive.
    #[must_use]
    pub fn malformed(line: usize, directive: &str, message: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            directive: directive.to_string(),
            message: message.into(),
        }
    }

    /// Source line number for `Malformed` errors.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::Malformed { line, .. } => Some(*line),
            _ => None,
        }
    }
}
