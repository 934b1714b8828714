//! Token model shared by the lexer, the parser and the addons.
//!
//!     A token is an immutable record: the nesting depth it was found at, its kind, an optional
//!     value and the 1-based source line it came from. Tokens carry no behavior beyond
//!     inspection helpers. They are produced once by the lexer stages, queued in FIFO order, and
//!     consumed exactly once by the parser.
//!
//! Kinds
//!
//!     - Text: one whitespace separated word of content
//!     - Break: a blank line separator, never carries a value
//!     - Directive: the name from a `..name:` preamble
//!     - Argument: a named argument of the preceding directive. The TEXT tokens that follow it
//!       at the same scope form its value.

use serde::Serialize;
use std::fmt;

/// The four token categories emitted by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Text,
    Break,
    Directive,
    Argument,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Text => "TEXT",
            TokenKind::Break => "BREAK",
            TokenKind::Directive => "DIRECTIVE",
            TokenKind::Argument => "ARGUMENT",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Nesting depth derived from the line's leading whitespace
    pub scope: usize,
    pub kind: TokenKind,
    /// Word, directive or argument name; always `None` for breaks
    pub value: Option<String>,
    /// 1-based source line
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, scope: usize, value: Option<String>, line: usize) -> Self {
        Token {
            scope,
            kind,
            value,
            line,
        }
    }

    pub fn text(scope: usize, word: impl Into<String>, line: usize) -> Self {
        Self::new(TokenKind::Text, scope, Some(word.into()), line)
    }

    pub fn blank(scope: usize, line: usize) -> Self {
        Self::new(TokenKind::Break, scope, None, line)
    }

    pub fn directive(scope: usize, name: impl Into<String>, line: usize) -> Self {
        Self::new(TokenKind::Directive, scope, Some(name.into()), line)
    }

    pub fn argument(scope: usize, name: impl Into<String>, line: usize) -> Self {
        Self::new(TokenKind::Argument, scope, Some(name.into()), line)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// The token's value, or the empty string for value-less tokens.
    pub fn value_str(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// True when this token sits exactly one level below `parent`.
    pub fn is_child_of(&self, parent: &Token) -> bool {
        self.scope == parent.scope + 1
    }

    pub fn is_parent_of(&self, child: &Token) -> bool {
        child.is_child_of(self)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Token line={}, kind={}, scope={}, value={}]",
            self.line,
            self.kind,
            self.scope,
            self.value.as_deref().unwrap_or("None")
        )
    }
}
