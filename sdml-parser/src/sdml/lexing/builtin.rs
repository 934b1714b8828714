//! Built in lexer stages
//!
//! The five stages every lexer starts with. See the [lexing](super) module docs for the order
//! they run in.

use super::lexer::LexerState;
use crate::sdml::token::TokenKind;
use once_cell::sync::Lazy;
use regex::Regex;

/// Leading whitespace run that defines a line's scope.
static LEADING_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+").unwrap());

/// `<non-word run>..<name>:`, where the name runs up to the colon.
static DIRECTIVE_PREAMBLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\W*\.\.\s*([^:\s]+)\s*:").unwrap());

/// Drop the line terminator and any trailing whitespace.
pub fn trim_trailing(_state: &mut LexerState, mut line: String) -> Option<String> {
    let trimmed = line.trim_end().len();
    line.truncate(trimmed);
    Some(line)
}

/// A blank line becomes a single BREAK at the scope left by the previous line.
pub fn blank_breaks(state: &mut LexerState, line: String) -> Option<String> {
    if line.is_empty() {
        state.emit(TokenKind::Break, None);
        return None;
    }
    Some(line)
}

/// Recompute the scope from the leading whitespace.
///
/// The first indented line fixes the scope step for the rest of the document.
pub fn handle_scope(state: &mut LexerState, line: String) -> Option<String> {
    state.set_scope(0);
    if let Some(prefix) = LEADING_WHITESPACE.find(&line) {
        let width = prefix.as_str().chars().count();
        if state.scope_step() == 0 {
            tracing::debug!(
                line = state.line(),
                "First scoped block, using {} characters as the scope step",
                width
            );
            state.set_scope_step(width);
        }
        state.set_scope(width / state.scope_step());
    }
    Some(line)
}

/// Split a `..name:` preamble off as a DIRECTIVE token.
pub fn handle_directive(state: &mut LexerState, line: String) -> Option<String> {
    let Some(captures) = DIRECTIVE_PREAMBLE.captures(&line) else {
        return Some(line);
    };
    let consumed = captures.get(0).map_or(0, |m| m.end());
    let name = captures[1].to_string();
    state.emit(TokenKind::Directive, Some(name));
    Some(line[consumed..].trim_start().to_string())
}

/// Everything left is text, one token per word.
pub fn handle_text(state: &mut LexerState, line: String) -> Option<String> {
    for word in line.split_whitespace() {
        state.emit(TokenKind::Text, Some(word.to_string()));
    }
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdml::token::Token;

    fn state_at_line(line: usize) -> LexerState {
        let mut state = LexerState::new();
        state.set_line(line);
        state
    }

    #[test]
    fn test_trim_drops_terminator_and_trailing_space() {
        let mut state = LexerState::new();
        assert_eq!(
            trim_trailing(&mut state, "  words \t\r\n".to_string()),
            Some("  words".to_string())
        );
    }

    #[test]
    fn test_blank_line_ends_processing() {
        let mut state = state_at_line(3);
        state.set_scope(2);

        assert_eq!(blank_breaks(&mut state, String::new()), None);
        assert_eq!(state.drain(), vec![Token::blank(2, 3)]);
    }

    #[test]
    fn test_first_indent_fixes_step() {
        let mut state = LexerState::new();
        handle_scope(&mut state, "   three".to_string());
        assert_eq!(state.scope_step(), 3);
        assert_eq!(state.scope(), 1);

        handle_scope(&mut state, "      six".to_string());
        assert_eq!(state.scope_step(), 3);
        assert_eq!(state.scope(), 2);

        handle_scope(&mut state, "flush".to_string());
        assert_eq!(state.scope(), 0);
    }

    #[test]
    fn test_directive_name_and_remainder() {
        let mut state = state_at_line(1);
        let rest = handle_directive(&mut state, "-- .. title:   My Doc".to_string());

        assert_eq!(rest, Some("My Doc".to_string()));
        assert_eq!(state.drain(), vec![Token::directive(0, "title", 1)]);
    }

    #[test]
    fn test_ellipsis_in_prose_is_not_a_directive() {
        let mut state = state_at_line(1);
        let rest = handle_directive(&mut state, "Wait.. what: now".to_string());

        assert_eq!(rest, Some("Wait.. what: now".to_string()));
        assert!(state.drain().is_empty());
    }
}
