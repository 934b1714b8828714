//! Error types for parsing
//!
//! Every variant is fatal: the grammar has no recovery mode, so the first error aborts the
//! document. Each one carries enough to point at the offending line.

use crate::sdml::lexing::LexError;
use crate::sdml::token::{Token, TokenKind};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The lookahead did not match what the grammar required. The token is left unconsumed.
    UnexpectedToken {
        expected: TokenKind,
        expected_value: Option<String>,
        found: Token,
    },
    /// A token was required but the stream had ended
    UnexpectedEndOfStream {
        expected: TokenKind,
        expected_value: Option<String>,
    },
    UnknownDirective { name: String, line: usize },
    /// A directive the grammar reserves but does not implement yet
    UnimplementedDirective { name: String, line: usize },
    /// `use` named an addon the resolver does not know
    AddonResolutionFailure { name: String, line: usize },
    /// An ARGUMENT token outside of any directive
    UnexpectedArgument { found: Token },
    Lex(LexError),
}

impl ParseError {
    /// Source line the error points at, when there is one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::UnexpectedToken { found, .. } => Some(found.line),
            ParseError::UnexpectedEndOfStream { .. } => None,
            ParseError::UnknownDirective { line, .. }
            | ParseError::UnimplementedDirective { line, .. }
            | ParseError::AddonResolutionFailure { line, .. } => Some(*line),
            ParseError::UnexpectedArgument { found } => Some(found.line),
            ParseError::Lex(LexError::Io { line, .. }) => Some(*line),
            ParseError::Lex(LexError::Open { .. }) => None,
        }
    }
}

fn describe(kind: &TokenKind, value: &Option<String>) -> String {
    match value {
        Some(value) => format!("{}/{}", kind, value),
        None => kind.to_string(),
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken {
                expected,
                expected_value,
                found,
            } => write!(
                f,
                "Unexpected token on line {}. Wanted {}, read {}",
                found.line,
                describe(expected, expected_value),
                found
            ),
            ParseError::UnexpectedEndOfStream {
                expected,
                expected_value,
            } => write!(
                f,
                "Reached the end of the token stream, but expected {}",
                describe(expected, expected_value)
            ),
            ParseError::UnknownDirective { name, line } => {
                write!(f, "Unknown directive '{}' on line {}", name, line)
            }
            ParseError::UnimplementedDirective { name, line } => {
                write!(f, "Unimplemented directive '{}' on line {}", name, line)
            }
            ParseError::AddonResolutionFailure { name, line } => {
                write!(f, "No addon named '{}' (used on line {})", name, line)
            }
            ParseError::UnexpectedArgument { found } => {
                write!(f, "Argument outside of a directive: {}", found)
            }
            ParseError::Lex(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::Lex(err)
    }
}

/// Result alias used throughout the parser
pub type ParseResult<T> = Result<T, ParseError>;
