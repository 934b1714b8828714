//! Common lexer module
//!
//! Errors shared by the lexer entry points.

use std::fmt;

/// Errors that can occur during lexing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// Reading the source failed (including input that is not valid UTF-8)
    Io { line: usize, message: String },
    /// The source file could not be opened
    Open { path: String, message: String },
}

impl LexError {
    pub fn io(line: usize, err: &std::io::Error) -> Self {
        LexError::Io {
            line,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::Io { line, message } => {
                write!(f, "Could not read line {}: {}", line, message)
            }
            LexError::Open { path, message } => {
                write!(f, "Could not open {}: {}", path, message)
            }
        }
    }
}

impl std::error::Error for LexError {}
