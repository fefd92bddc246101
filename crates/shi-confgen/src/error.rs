//! Error types for configuration code generation

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for generator operations
pub type GenerateResult<T> = Result<T, GenerateError>;

/// A public field that generated code cannot assign from a document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("configuration class `{type_name}` has immutable public field `{field}`")]
pub struct UnsupportedFieldError {
    /// Qualified name of the owning type.
    pub type_name: String,
    /// Name of the offending field.
    pub field: String,
}

impl UnsupportedFieldError {
    pub fn new(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            field: field.into(),
        }
    }
}

/// Error type for a generation run
#[derive(Error, Debug)]
pub enum GenerateError {
    /// An immutable public field aborted the run
    #[error(transparent)]
    UnsupportedField(#[from] UnsupportedFieldError),

    /// Files were skipped because of immutable public fields
    #[error("{} configuration class(es) have immutable public fields: {}", .0.len(), describe(.0))]
    Violations(Vec<UnsupportedFieldError>),

    /// Reading inputs or writing outputs failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walking an input directory failed
    #[error("failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// An input glob pattern is malformed
    #[error("invalid input pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// Generator configuration is invalid
    #[error("configuration error: {0}")]
    Config(String),
}

impl GenerateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenerateError::Io {
            path: path.into(),
            source,
        }
    }
}

fn describe(violations: &[UnsupportedFieldError]) -> String {
    violations
        .iter()
        .map(|v| format!("{}::{}", v.type_name, v.field))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
