//! Directive dispatch
//!
//!     A DIRECTIVE token's name selects the routine that consumes it and whatever tokens belong
//!     to it. The table starts out with the built in vocabulary and addons may register more
//!     names while they are bound.
//!
//! Built in directives
//!
//!     - `use NAME`: resolve and bind an addon
//!     - `unuse NAME`: unbind an active addon (a warning if it is not active)
//!     - `title`: optional ARGUMENT children, then the title text
//!     - `figure`: reserved, always fails as unimplemented

use super::error::{ParseError, ParseResult};
use super::events::{Event, EventSink};
use super::parser::Parser;
use crate::sdml::token::TokenKind;
use std::collections::{BTreeMap, HashMap};

/// Names of the built in directives.
pub mod names {
    pub const USE: &str = "use";
    pub const UNUSE: &str = "unuse";
    pub const TITLE: &str = "title";
    pub const FIGURE: &str = "figure";
}

/// A directive parse routine. The directive token is still the parser's lookahead when the
/// routine is called.
pub type DirectiveHandler = fn(&mut Parser, &mut dyn EventSink) -> ParseResult<()>;

#[derive(Clone, Default)]
pub struct DirectiveTable {
    handlers: HashMap<String, DirectiveHandler>,
}

impl DirectiveTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding the built in vocabulary.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        table.register(names::USE, parse_use);
        table.register(names::UNUSE, parse_unuse);
        table.register(names::TITLE, parse_title);
        table.register(names::FIGURE, parse_figure);
        table
    }

    /// Register `handler` for `name`, returning the handler it replaced.
    pub fn register(&mut self, name: &str, handler: DirectiveHandler) -> Option<DirectiveHandler> {
        self.handlers.insert(name.to_string(), handler)
    }

    pub fn unregister(&mut self, name: &str) -> Option<DirectiveHandler> {
        self.handlers.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<DirectiveHandler> {
        self.handlers.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// `use NAME`: resolve the addon and bind it.
pub fn parse_use(parser: &mut Parser, _sink: &mut dyn EventSink) -> ParseResult<()> {
    let directive = parser.accept(TokenKind::Directive, Some(names::USE))?;
    let name = parser
        .accept(TokenKind::Text, None)?
        .value
        .unwrap_or_default();

    let addon = parser
        .resolver()
        .resolve(&name)
        .ok_or_else(|| ParseError::AddonResolutionFailure {
            name: name.clone(),
            line: directive.line,
        })?;
    parser.activate(name, addon);
    Ok(())
}

/// `unuse NAME`: unbind the addon if it is active.
pub fn parse_unuse(parser: &mut Parser, _sink: &mut dyn EventSink) -> ParseResult<()> {
    let directive = parser.accept(TokenKind::Directive, Some(names::UNUSE))?;
    let name = parser
        .accept(TokenKind::Text, None)?
        .value
        .unwrap_or_default();
    parser.deactivate(&name, directive.line);
    Ok(())
}

/// `title`: argument children of the directive, then the title text at the directive's scope.
pub fn parse_title(parser: &mut Parser, sink: &mut dyn EventSink) -> ParseResult<()> {
    let directive = parser.accept(TokenKind::Directive, Some(names::TITLE))?;

    let mut arguments = BTreeMap::new();
    while parser
        .peek()?
        .is_some_and(|t| t.is(TokenKind::Argument) && t.is_child_of(&directive))
    {
        let (name, value) = parser.parse_argument()?;
        arguments.insert(name, value);
    }

    let text = parser.text_run(directive.scope)?;
    sink.event(Event::Title {
        text,
        arguments,
        line: directive.line,
    });
    Ok(())
}

pub fn parse_figure(parser: &mut Parser, _sink: &mut dyn EventSink) -> ParseResult<()> {
    let line = parser.peek()?.map_or(0, |t| t.line);
    Err(ParseError::UnimplementedDirective {
        name: names::FIGURE.to_string(),
        line,
    })
}
