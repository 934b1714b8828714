//! The staged lexer
//!
//! [`Lexer`] owns the input, the stage registry, the pending token queue and the per-document
//! diagnostics log. [`LexerState`] is the part of it that stages are allowed to touch.

use super::common::LexError;
use super::stages::{StageHandle, StageRegistry};
use crate::sdml::diagnostics::{Diagnostics, Warning};
use crate::sdml::token::{Token, TokenKind};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

/// Mutable state handed to every stage.
#[derive(Debug, Clone, Default)]
pub struct LexerState {
    scope: usize,
    scope_step: usize,
    line: usize,
    pending: VecDeque<Token>,
}

impl LexerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope of the line being processed.
    pub fn scope(&self) -> usize {
        self.scope
    }

    pub fn set_scope(&mut self, scope: usize) {
        self.scope = scope;
    }

    /// Indentation unit width, 0 until the first indented line.
    pub fn scope_step(&self) -> usize {
        self.scope_step
    }

    pub fn set_scope_step(&mut self, step: usize) {
        self.scope_step = step;
    }

    /// 1-based number of the line being processed.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn set_line(&mut self, line: usize) {
        self.line = line;
    }

    /// Queue a token at the current scope and line.
    pub fn emit(&mut self, kind: TokenKind, value: Option<String>) {
        let token = Token::new(kind, self.scope, value, self.line);
        self.pending.push_back(token);
    }

    /// Queue a fully formed token.
    pub fn push(&mut self, token: Token) {
        self.pending.push_back(token);
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Take every pending token, oldest first.
    pub fn drain(&mut self) -> Vec<Token> {
        self.pending.drain(..).collect()
    }

    fn pop(&mut self) -> Option<Token> {
        self.pending.pop_front()
    }
}

pub struct Lexer {
    input: Box<dyn BufRead>,
    state: LexerState,
    stages: StageRegistry,
    diagnostics: Diagnostics,
}

impl Lexer {
    /// A lexer over `input` with the built in stages.
    pub fn new<R: BufRead + 'static>(input: R) -> Self {
        Self::with_stages(input, StageRegistry::builtin())
    }

    /// A lexer over `input` running exactly `stages`.
    pub fn with_stages<R: BufRead + 'static>(input: R, stages: StageRegistry) -> Self {
        Lexer {
            input: Box::new(input),
            state: LexerState::new(),
            stages,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn from_source(source: impl Into<String>) -> Self {
        Self::new(Cursor::new(source.into()))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LexError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| LexError::Open {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::new(BufReader::new(file)))
    }

    /// Next token, reading and staging further lines only while the queue is empty.
    ///
    /// `Ok(None)` marks the end of the stream.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        while self.state.pending_len() == 0 {
            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .map_err(|e| LexError::io(self.state.line() + 1, &e))?;
            if read == 0 {
                return Ok(None);
            }
            self.state.set_line(self.state.line() + 1);
            self.run_stages(line);
        }
        Ok(self.state.pop())
    }

    fn run_stages(&mut self, line: String) {
        let mut current = Some(line);
        for (priority, stage) in self.stages.iter() {
            let Some(line) = current.take() else {
                break;
            };
            tracing::trace!(priority, stage = stage.name(), "running lexer stage");
            current = stage.run(&mut self.state, line);
        }
    }

    /// Register `stage` at `priority`, warning when that replaces another stage.
    pub fn set_stage(&mut self, priority: u32, stage: StageHandle) {
        let replacement = stage.name().to_string();
        if let Some(previous) = self.stages.insert(priority, stage) {
            self.diagnostics.report(Warning::StageOverwritten {
                priority,
                previous: previous.name().to_string(),
                replacement,
            });
        }
    }

    /// Remove `stage` from `priority`.
    ///
    /// Refused, with a warning, when a different stage holds the slot. Returns whether the slot
    /// is empty afterwards.
    pub fn clear_stage(&mut self, priority: u32, stage: &StageHandle) -> bool {
        match self.stages.remove(priority, stage) {
            Ok(_) => true,
            Err(registered) => {
                self.diagnostics.report(Warning::StageRemovalRefused {
                    priority,
                    registered: registered.name().to_string(),
                    supplied: stage.name().to_string(),
                });
                false
            }
        }
    }

    pub fn stages(&self) -> &StageRegistry {
        &self.stages
    }

    pub fn state(&self) -> &LexerState {
        &self.state
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdml::lexing::stages::FnStage;

    fn shout(_state: &mut LexerState, line: String) -> Option<String> {
        Some(line.to_uppercase())
    }

    fn lex_all(source: &str) -> Vec<Token> {
        Lexer::from_source(source)
            .collect::<Result<Vec<_>, _>>()
            .expect("lexing failed")
    }

    #[test]
    fn test_reads_only_when_queue_is_empty() {
        let mut lexer = Lexer::from_source("one two\nthree\n");

        let first = lexer.next_token().unwrap().unwrap();
        assert_eq!(first, Token::text(0, "one", 1));
        // The rest of line 1 is queued, line 2 has not been read yet
        assert_eq!(lexer.state().line(), 1);
        assert_eq!(lexer.state().pending_len(), 1);

        lexer.next_token().unwrap();
        assert_eq!(lexer.state().line(), 1);

        assert_eq!(lexer.next_token().unwrap(), Some(Token::text(0, "three", 2)));
        assert_eq!(lexer.state().line(), 2);
        assert_eq!(lexer.next_token().unwrap(), None);
    }

    #[test]
    fn test_missing_final_newline() {
        assert_eq!(
            lex_all("alpha\nbeta"),
            vec![Token::text(0, "alpha", 1), Token::text(0, "beta", 2)]
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(
            lex_all("a\r\n\r\n  b\r\n"),
            vec![Token::text(0, "a", 1), Token::blank(0, 2), Token::text(1, "b", 3)]
        );
    }

    #[test]
    fn test_custom_stage_runs_in_priority_order() {
        let mut lexer = Lexer::from_source("quiet words\n");
        lexer.set_stage(50, FnStage::handle("shout", shout));

        let values: Vec<String> = lexer
            .map(|t| t.unwrap().value.unwrap_or_default())
            .collect();
        assert_eq!(values, ["QUIET", "WORDS"]);
    }

    #[test]
    fn test_set_stage_overwrite_warns_once() {
        let mut lexer = Lexer::from_source("");
        let first = FnStage::handle("first", shout);
        let second = FnStage::handle("second", shout);

        lexer.set_stage(50, first.clone());
        assert!(lexer.diagnostics().is_empty());

        lexer.set_stage(50, second.clone());
        assert_eq!(lexer.diagnostics().len(), 1);
        assert!(lexer.stages().holds(50, &second));

        assert!(!lexer.clear_stage(50, &first));
        assert_eq!(lexer.diagnostics().len(), 2);
        assert!(matches!(
            lexer.diagnostics().warnings()[1],
            Warning::StageRemovalRefused { priority: 50, .. }
        ));
        assert!(lexer.stages().holds(50, &second));
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let mut lexer = Lexer::new(Cursor::new(vec![b'o', b'k', b'\n', 0xff, 0xfe, b'\n']));
        assert_eq!(lexer.next_token().unwrap(), Some(Token::text(0, "ok", 1)));
        assert!(matches!(
            lexer.next_token(),
            Err(LexError::Io { line: 2, .. })
        ));
    }

    #[test]
    fn test_from_path_streams_the_file() {
        let path = std::env::temp_dir().join(format!("sdml-lexer-{}.sdml", std::process::id()));
        std::fs::write(&path, "Title\n  Body\n").unwrap();
        let tokens = Lexer::from_path(&path)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(tokens, [Token::text(0, "Title", 1), Token::text(1, "Body", 2)]);
    }

    #[test]
    fn test_from_path_reports_unopenable_file() {
        let err = Lexer::from_path("/nonexistent/doc.sdml").err().unwrap();
        assert!(matches!(err, LexError::Open { ref path, .. } if path == "/nonexistent/doc.sdml"));
        assert!(err.to_string().starts_with("Could not open /nonexistent/doc.sdml: "));
    }

    #[test]
    fn test_instances_do_not_share_state() {
        let mut first = Lexer::from_source("    deep\n");
        let mut second = Lexer::from_source("  shallow\n");

        assert_eq!(first.next_token().unwrap().unwrap().scope, 1);
        assert_eq!(first.state().scope_step(), 4);
        assert_eq!(second.next_token().unwrap().unwrap().scope, 1);
        assert_eq!(second.state().scope_step(), 2);
    }
}
