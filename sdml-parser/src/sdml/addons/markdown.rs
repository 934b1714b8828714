//! Markdown style headings
//!
//!     With `.. use: markdown` active, a line starting with a run of `#` becomes a title whose
//!     `depth` argument is the length of the run:
//!
//!         # Heading text
//!
//!     is lexed as if it had been written with the title directive, i.e. the stage synthesizes
//!
//!         DIRECTIVE(title)  ARGUMENT(depth)  TEXT(1)  ARGUMENT(value)
//!
//!     ahead of the line's own words, and the parser's existing `title` handling does the rest.
//!     The marker run is stripped so it does not end up in the title text.

use crate::sdml::addons::Addon;
use crate::sdml::lexing::{FnStage, LexerState, StageHandle};
use crate::sdml::parsing::directives::names;
use crate::sdml::parsing::Parser;
use crate::sdml::token::Token;
use once_cell::sync::Lazy;
use regex::Regex;

pub const NAME: &str = "markdown";

/// Between scope computation (20) and directive detection (30).
pub const HEADING_PRIORITY: u32 = 25;

static HEADING_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#+)[^#]").unwrap());

pub struct MarkdownHeadings {
    stage: StageHandle,
}

impl MarkdownHeadings {
    pub fn new() -> Self {
        MarkdownHeadings {
            stage: FnStage::handle("markdown-headings", split_heading),
        }
    }

    /// The stage this instance registers.
    pub fn stage(&self) -> &StageHandle {
        &self.stage
    }
}

impl Default for MarkdownHeadings {
    fn default() -> Self {
        Self::new()
    }
}

impl Addon for MarkdownHeadings {
    fn bind(&mut self, parser: &mut Parser) {
        parser
            .lexer_mut()
            .set_stage(HEADING_PRIORITY, self.stage.clone());
    }

    fn unbind(&mut self, parser: &mut Parser) {
        parser
            .lexer_mut()
            .clear_stage(HEADING_PRIORITY, &self.stage);
    }
}

/// Lexer stage: turn a leading `#` run into title tokens.
pub fn split_heading(state: &mut LexerState, line: String) -> Option<String> {
    let line = line.trim_start();
    let Some(captures) = HEADING_MARKER.captures(line) else {
        return Some(line.to_string());
    };

    let depth = captures[1].len();
    let scope = state.scope();
    let number = state.line();
    state.push(Token::directive(scope, names::TITLE, number));
    state.push(Token::argument(scope + 1, "depth", number));
    state.push(Token::text(scope + 1, depth.to_string(), number));
    state.push(Token::argument(scope + 1, "value", number));

    Some(line[depth..].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_tokens() {
        let mut state = LexerState::new();
        state.set_line(4);
        state.set_scope(1);

        let rest = split_heading(&mut state, "  ### Deep heading".to_string());
        assert_eq!(rest, Some(" Deep heading".to_string()));
        assert_eq!(
            state.drain(),
            vec![
                Token::directive(1, "title", 4),
                Token::argument(2, "depth", 4),
                Token::text(2, "3", 4),
                Token::argument(2, "value", 4),
            ]
        );
    }

    #[test]
    fn test_marker_only_line_is_not_a_heading() {
        let mut state = LexerState::new();
        assert_eq!(
            split_heading(&mut state, "###".to_string()),
            Some("###".to_string())
        );
        assert_eq!(state.pending_len(), 0);
    }

    #[test]
    fn test_plain_text_passes_through() {
        let mut state = LexerState::new();
        assert_eq!(
            split_heading(&mut state, "no heading # here".to_string()),
            Some("no heading # here".to_string())
        );
        assert_eq!(state.pending_len(), 0);
    }
}
