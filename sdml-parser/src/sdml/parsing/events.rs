//! Structural events
//!
//!     The parser does not print or build anything itself. It writes a flat sequence of events
//!     into an [`EventSink`] supplied by the caller: one `Descend`/`Ascend` per unit change in
//!     nesting depth, plus one event per content word, blank line or title.
//!
//!     The sequence is balanced: every `Descend` is matched by an `Ascend` before the parse
//!     returns, because the parser closes any open levels at the end of the document.
//!
//!     [`DocumentBuilder`](crate::sdml::ast::DocumentBuilder) is the sink behind
//!     [`Parser::parse`](super::Parser::parse); a `Vec<Event>` records the raw trace.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// Nesting went one level deeper, to `depth`
    Descend { depth: usize },
    /// Nesting went one level up, to `depth`
    Ascend { depth: usize },
    Text {
        text: String,
        depth: usize,
        line: usize,
    },
    Break { line: usize },
    Title {
        text: String,
        arguments: BTreeMap<String, String>,
        line: usize,
    },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Descend { depth } => write!(f, "descend {}", depth),
            Event::Ascend { depth } => write!(f, "ascend {}", depth),
            Event::Text { text, depth, .. } => write!(f, "text@{} {}", depth, text),
            Event::Break { .. } => write!(f, "break"),
            Event::Title {
                text, arguments, ..
            } => {
                write!(f, "title {:?}", text)?;
                for (name, value) in arguments {
                    write!(f, " {}={:?}", name, value)?;
                }
                Ok(())
            }
        }
    }
}

/// Receives the parser's structural events in document order.
pub trait EventSink {
    fn event(&mut self, event: Event);
}

impl EventSink for Vec<Event> {
    fn event(&mut self, event: Event) {
        self.push(event);
    }
}

/// Render an event trace one event per line.
pub fn format_events(events: &[Event]) -> String {
    events
        .iter()
        .map(|event| format!("{}\n", event))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_display_lists_arguments_in_name_order() {
        let mut arguments = BTreeMap::new();
        arguments.insert("value".to_string(), String::new());
        arguments.insert("depth".to_string(), "2".to_string());
        let event = Event::Title {
            text: "Heading".to_string(),
            arguments,
            line: 4,
        };

        assert_eq!(event.to_string(), r#"title "Heading" depth="2" value="""#);
    }

    #[test]
    fn test_format_events() {
        let events = vec![
            Event::Descend { depth: 1 },
            Event::Text {
                text: "Body".to_string(),
                depth: 1,
                line: 2,
            },
            Event::Ascend { depth: 0 },
            Event::Break { line: 3 },
        ];
        assert_eq!(
            format_events(&events),
            "descend 1\ntext@1 Body\nascend 0\nbreak\n"
        );
    }
}
