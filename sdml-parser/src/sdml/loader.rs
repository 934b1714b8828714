//! Document loading utilities
//!
//! `DocumentLoader` reads source text from a file or a string and runs the lexer or the
//! parser over it. The CLI and the integration tests both go through it.
//!
//!     let doc = DocumentLoader::from_path("notes.sdml")?.parse()?;
//!     let tokens = DocumentLoader::from_string("Hello world\n").tokenize()?;

use crate::sdml::addons::AddonResolver;
use crate::sdml::ast::Document;
use crate::sdml::diagnostics::Warning;
use crate::sdml::lexing::Lexer;
use crate::sdml::parsing::{EventSink, ParseError, Parser};
use crate::sdml::token::Token;
use std::fs;
use std::path::Path;

/// Error that can occur when loading documents
#[derive(Debug, Clone, PartialEq)]
pub enum LoaderError {
    /// IO error when reading file
    IoError(String),
    ParseError(ParseError),
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoaderError::IoError(msg) => write!(f, "IO error: {}", msg),
            LoaderError::ParseError(err) => write!(f, "Parse error: {}", err),
        }
    }
}

impl std::error::Error for LoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoaderError::ParseError(err) => Some(err),
            LoaderError::IoError(_) => None,
        }
    }
}

impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        LoaderError::IoError(err.to_string())
    }
}

impl From<ParseError> for LoaderError {
    fn from(err: ParseError) -> Self {
        LoaderError::ParseError(err)
    }
}

/// A parsed document together with the warnings reported while parsing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub document: Document,
    pub warnings: Vec<Warning>,
}

pub struct DocumentLoader {
    source: String,
}

impl DocumentLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let source = fs::read_to_string(path)?;
        Ok(DocumentLoader { source })
    }

    pub fn from_string<S: Into<String>>(source: S) -> Self {
        DocumentLoader {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    fn lexer(&self) -> Lexer {
        Lexer::from_source(self.source.clone())
    }

    /// Run the lexer alone with its built in stages.
    pub fn tokenize(&self) -> Result<Vec<Token>, LoaderError> {
        self.lexer()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| LoaderError::ParseError(e.into()))
    }

    /// Parse the source into its structural result with the bundled addons available.
    pub fn parse(&self) -> Result<Document, LoaderError> {
        Ok(self.parse_with(AddonResolver::builtin())?.document)
    }

    /// Parse with a caller supplied set of resolvable addons, keeping the warnings.
    pub fn parse_with(&self, resolver: AddonResolver) -> Result<Loaded, LoaderError> {
        let mut parser = Parser::with_resolver(self.lexer(), resolver);
        let document = parser.parse()?;
        Ok(Loaded {
            document,
            warnings: parser.warnings().to_vec(),
        })
    }

    /// Parse into a caller supplied event sink, returning the warnings.
    pub fn parse_into(&self, sink: &mut dyn EventSink) -> Result<Vec<Warning>, LoaderError> {
        let mut parser = Parser::new(self.lexer());
        parser.parse_into(sink)?;
        Ok(parser.warnings().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdml::parsing::Event;
    use crate::sdml::token::TokenKind;

    #[test]
    fn test_tokenize() {
        let tokens = DocumentLoader::from_string("Hello world\n").tokenize().unwrap();
        assert_eq!(tokens.len(), 2);
        assert!(tokens.iter().all(|t| t.is(TokenKind::Text)));
    }

    #[test]
    fn test_parse_keeps_warnings() {
        let loaded = DocumentLoader::from_string(".. unuse: markdown\ntext\n")
            .parse_with(AddonResolver::builtin())
            .unwrap();
        assert_eq!(loaded.document.node_count(), 1);
        assert_eq!(
            loaded.warnings,
            vec![Warning::AddonNotActive {
                name: "markdown".to_string(),
                line: 1
            }]
        );
    }

    #[test]
    fn test_parse_into_sink() {
        let mut events: Vec<Event> = Vec::new();
        let warnings = DocumentLoader::from_string("a\n")
            .parse_into(&mut events)
            .unwrap();
        assert!(warnings.is_empty());
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = DocumentLoader::from_path("/nonexistent/file.sdml")
            .err()
            .unwrap();
        assert!(matches!(err, LoaderError::IoError(_)));
    }

    #[test]
    fn test_parse_error_is_wrapped() {
        let err = DocumentLoader::from_string(".. nope: x\n").parse().unwrap_err();
        assert!(matches!(
            err,
            LoaderError::ParseError(ParseError::UnknownDirective { .. })
        ));
    }
}
