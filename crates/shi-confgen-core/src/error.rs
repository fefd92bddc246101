//! Error types for declaration parsing

use std::path::{Path, PathBuf};
use thiserror::Error;

/// A declaration file could not be parsed.
///
/// The generator treats this as recoverable: the file is skipped.
#[derive(Error, Debug)]
#[error("failed to parse {}{}: {}", .path.display(), line_suffix(.line), .message)]
pub struct ParseFailure {
    /// File that failed to parse
    pub path: PathBuf,

    /// 1-based line the failure was detected on, if known
    pub line: Option<usize>,

    /// Human readable description
    pub message: String,
}

impl ParseFailure {
    /// Create a failure without line information
    pub fn new(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            line: None,
            message: message.into(),
        }
    }

    /// Attach the line the failure was detected on
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(":{line}"),
        None => String::new(),
    }
}
