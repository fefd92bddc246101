//! Error type for header scanning

use thiserror::Error;

/// Malformed header text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct SyntaxError {
    /// 1-based line the problem was detected on
    pub line: usize,

    /// Description of the problem
    pub message: String,
}

impl SyntaxError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}
