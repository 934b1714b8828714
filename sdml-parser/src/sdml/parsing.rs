//! Parsing
//!
//!     The parser consumes the lexer's token stream with one token of lookahead and writes
//!     structural events into a caller supplied sink. See [parser](parser) for the lookahead
//!     and nesting rules, and [directives](directives) for the directive vocabulary.
//!
//!     Parsing is fail fast. The first [`ParseError`] aborts the document; there is no
//!     resynchronization. Non-fatal anomalies end up in the lexer's diagnostics log instead.

pub mod directives;
pub mod error;
pub mod events;
pub mod parser;

pub use directives::{DirectiveHandler, DirectiveTable};
pub use error::{ParseError, ParseResult};
pub use events::{format_events, Event, EventSink};
pub use parser::Parser;

use crate::sdml::ast::Document;
use crate::sdml::lexing::Lexer;

/// Parse `source` with the bundled addons available.
pub fn parse_document(source: &str) -> ParseResult<Document> {
    Parser::new(Lexer::from_source(source)).parse()
}
