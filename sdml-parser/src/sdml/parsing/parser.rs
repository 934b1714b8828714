//! Recursive descent parser
//!
//!     The parser holds a single token of lookahead over the [`Lexer`], a nesting depth cursor,
//!     the list of active addons and the directive dispatch table.
//!
//! Lookahead
//!
//!     The lookahead slot is refilled lazily: [`Parser::accept`] hands the matched token out
//!     and leaves the slot empty, and the next [`Parser::peek`] pulls a fresh token from the
//!     lexer. Observably the parser always has exactly one token ahead, but the lexer is not
//!     asked for it until it is needed. This is what lets `.. use: markdown` install a lexer
//!     stage before the following line is read.
//!
//!     A failed `accept` never consumes anything: the mismatched token stays in the slot so
//!     error reporting can inspect it again.
//!
//! Nesting
//!
//!     Before any token other than a BREAK is handled, the depth cursor is walked one level at
//!     a time to the token's scope, emitting a `Descend` or `Ascend` event per level. BREAKs
//!     are emitted in place and never move the cursor. At the end of the document the cursor
//!     is walked back to 0, so the event sequence is always balanced.

use super::directives::DirectiveTable;
use super::error::{ParseError, ParseResult};
use super::events::{Event, EventSink};
use crate::sdml::addons::{Addon, AddonResolver};
use crate::sdml::ast::{Document, DocumentBuilder};
use crate::sdml::diagnostics::Warning;
use crate::sdml::lexing::Lexer;
use crate::sdml::token::{Token, TokenKind};

pub struct Parser {
    lexer: Lexer,
    lookahead: Option<Token>,
    depth: usize,
    /// Active addons in activation order
    addons: Vec<(String, Box<dyn Addon>)>,
    resolver: AddonResolver,
    directives: DirectiveTable,
}

impl Parser {
    /// A parser over `lexer` that can resolve the bundled addons.
    pub fn new(lexer: Lexer) -> Self {
        Self::with_resolver(lexer, AddonResolver::builtin())
    }

    pub fn with_resolver(lexer: Lexer, resolver: AddonResolver) -> Self {
        Parser {
            lexer,
            lookahead: None,
            depth: 0,
            addons: Vec::new(),
            resolver,
            directives: DirectiveTable::builtin(),
        }
    }

    /// Parse the whole document into its structural result.
    pub fn parse(&mut self) -> ParseResult<Document> {
        let mut builder = DocumentBuilder::new();
        self.parse_into(&mut builder)?;
        Ok(builder.finish())
    }

    /// Parse the whole document, writing structural events into `sink`.
    ///
    /// Stops at the first fatal error. On success every addon still active is unbound.
    pub fn parse_into(&mut self, sink: &mut dyn EventSink) -> ParseResult<()> {
        while let Some((kind, scope)) = self.peek()?.map(|t| (t.kind, t.scope)) {
            if kind != TokenKind::Break {
                self.nest_to(scope, sink);
            }

            match kind {
                TokenKind::Directive => self.parse_directive(sink)?,
                TokenKind::Text => {
                    let token = self.accept(TokenKind::Text, None)?;
                    sink.event(Event::Text {
                        text: token.value.unwrap_or_default(),
                        depth: self.depth,
                        line: token.line,
                    });
                }
                TokenKind::Break => {
                    let token = self.accept(TokenKind::Break, None)?;
                    sink.event(Event::Break { line: token.line });
                }
                TokenKind::Argument => {
                    let found = self.accept(TokenKind::Argument, None)?;
                    return Err(ParseError::UnexpectedArgument { found });
                }
            }
        }

        self.nest_to(0, sink);
        self.release_addons();
        Ok(())
    }

    /// The lookahead token, pulling one from the lexer if the slot is empty.
    ///
    /// `None` means the stream has ended.
    pub fn peek(&mut self) -> ParseResult<Option<&Token>> {
        if self.lookahead.is_none() {
            self.lookahead = self.lexer.next_token()?;
        }
        Ok(self.lookahead.as_ref())
    }

    /// Consume the lookahead if it has `kind` (and `value`, when given).
    ///
    /// On a mismatch the token stays in the lookahead slot.
    pub fn accept(&mut self, kind: TokenKind, value: Option<&str>) -> ParseResult<Token> {
        let end_of_stream = || ParseError::UnexpectedEndOfStream {
            expected: kind,
            expected_value: value.map(str::to_string),
        };

        let token = self.peek()?.ok_or_else(end_of_stream)?;
        let value_matches = value.map_or(true, |v| token.value.as_deref() == Some(v));
        if token.kind != kind || !value_matches {
            return Err(ParseError::UnexpectedToken {
                expected: kind,
                expected_value: value.map(str::to_string),
                found: token.clone(),
            });
        }

        self.lookahead.take().ok_or_else(end_of_stream)
    }

    /// Consume the run of TEXT tokens at `scope`, joined by single spaces.
    pub fn text_run(&mut self, scope: usize) -> ParseResult<String> {
        let mut words = Vec::new();
        while self
            .peek()?
            .is_some_and(|t| t.is(TokenKind::Text) && t.scope == scope)
        {
            let token = self.accept(TokenKind::Text, None)?;
            words.push(token.value.unwrap_or_default());
        }
        Ok(words.join(" "))
    }

    /// Consume one ARGUMENT and the TEXT run that forms its value.
    pub fn parse_argument(&mut self) -> ParseResult<(String, String)> {
        let argument = self.accept(TokenKind::Argument, None)?;
        let value = self.text_run(argument.scope)?;
        Ok((argument.value.unwrap_or_default(), value))
    }

    fn parse_directive(&mut self, sink: &mut dyn EventSink) -> ParseResult<()> {
        let (name, line) = match self.peek()? {
            Some(token) => (token.value_str().to_string(), token.line),
            None => {
                return Err(ParseError::UnexpectedEndOfStream {
                    expected: TokenKind::Directive,
                    expected_value: None,
                })
            }
        };
        let handler = self
            .directives
            .get(&name)
            .ok_or(ParseError::UnknownDirective { name, line })?;
        handler(self, sink)
    }

    fn nest_to(&mut self, scope: usize, sink: &mut dyn EventSink) {
        while self.depth < scope {
            self.depth += 1;
            sink.event(Event::Descend { depth: self.depth });
        }
        while self.depth > scope {
            self.depth -= 1;
            sink.event(Event::Ascend { depth: self.depth });
        }
    }

    /// Bind `addon` and record it under `name`.
    ///
    /// An addon already active under the same name is unbound first.
    pub fn activate(&mut self, name: String, mut addon: Box<dyn Addon>) {
        if let Some(mut previous) = self.take_active(&name) {
            tracing::debug!(addon = %name, "addon already active, unbinding previous instance");
            previous.unbind(self);
        }
        tracing::debug!(addon = %name, "binding addon");
        addon.bind(self);
        self.addons.push((name, addon));
    }

    /// Unbind and forget the addon active under `name`.
    ///
    /// Reports a warning and changes nothing when no such addon is active.
    pub fn deactivate(&mut self, name: &str, line: usize) {
        match self.take_active(name) {
            Some(mut addon) => {
                tracing::debug!(addon = %name, "unbinding addon");
                addon.unbind(self);
            }
            None => self.lexer.diagnostics_mut().report(Warning::AddonNotActive {
                name: name.to_string(),
                line,
            }),
        }
    }

    fn take_active(&mut self, name: &str) -> Option<Box<dyn Addon>> {
        let index = self.addons.iter().position(|(active, _)| active == name)?;
        Some(self.addons.remove(index).1)
    }

    fn release_addons(&mut self) {
        while let Some((name, mut addon)) = self.addons.pop() {
            tracing::debug!(addon = %name, "unbinding addon at end of document");
            addon.unbind(self);
        }
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.addons.iter().any(|(active, _)| active == name)
    }

    /// Names of the active addons, in activation order.
    pub fn active_addons(&self) -> Vec<&str> {
        self.addons.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    pub fn lexer_mut(&mut self) -> &mut Lexer {
        &mut self.lexer
    }

    pub fn directives(&self) -> &DirectiveTable {
        &self.directives
    }

    pub fn directives_mut(&mut self) -> &mut DirectiveTable {
        &mut self.directives
    }

    pub fn resolver(&self) -> &AddonResolver {
        &self.resolver
    }

    /// Warnings reported so far for this document.
    pub fn warnings(&self) -> &[Warning] {
        self.lexer.diagnostics().warnings()
    }
}
