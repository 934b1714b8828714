//! Lexer
//!
//!     This module implements the staged, pull based lexer for the sdml format. The lexer turns
//!     source lines into tokens lazily: the parser asks for one token at a time, and a further
//!     line is only read once every token produced from the previous line has been handed out.
//!
//! The Stage Pipeline
//!
//!     Each physical line is passed through an ordered table of stages. A stage receives the
//!     mutable lexer state plus the line as left by the previous stage, and hands back the
//!     (possibly rewritten) line for the next stage, or nothing when the line is finished.
//!     Stages emit tokens as a side effect by pushing them onto the pending queue.
//!
//!     The built in stages, by priority:
//!         0.   Trim trailing whitespace and the line terminator.
//!         10.  Blank lines become a single BREAK token and end the line.
//!         20.  Compute the scope from the leading whitespace run.
//!         30.  Split off a `..name:` directive preamble as a DIRECTIVE token.
//!         100. Every remaining word becomes a TEXT token.
//!
//!     The table is sparse and mutable at runtime: addons slot their own stages into the gaps
//!     (see [stages](stages) for the registration rules).
//!
//! Indentation Handling
//!
//!     There is no fixed indentation width. The first line in the document with any leading
//!     whitespace fixes the scope step for the rest of the document, and every line's scope is
//!     its leading run length divided by that step, rounded down. Lines that are not a multiple
//!     of the step are silently floored.

pub mod builtin;
pub mod common;
pub mod lexer;
pub mod stages;

pub use common::LexError;
pub use lexer::{Lexer, LexerState};
pub use stages::{priority, FnStage, LexStage, StageHandle, StageRegistry};
