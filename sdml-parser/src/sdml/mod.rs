//! Main module for sdml library functionality

pub mod addons;
pub mod ast;
pub mod diagnostics;
pub mod formats;
pub mod lexing;
pub mod loader;
pub mod parsing;
pub mod token;

pub use addons::{Addon, AddonResolver};
pub use ast::{Document, Node};
pub use diagnostics::{Diagnostics, Warning};
pub use formats::{FormatError, FormatRegistry, Formatter};
pub use lexing::{LexError, Lexer};
pub use loader::{DocumentLoader, Loaded, LoaderError};
pub use parsing::{Event, EventSink, ParseError, Parser};
pub use token::{Token, TokenKind};
