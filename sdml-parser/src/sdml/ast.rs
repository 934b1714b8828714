//! Structural result
//!
//!     The tree assembled from parser events: content lines, blank line markers, titles, and
//!     one `Block` per nesting level. Rendering it to an output format is someone else's job;
//!     this is only the shape of the document.

use crate::sdml::parsing::events::{Event, EventSink};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Content words from one source line, joined by single spaces
    Text { text: String, line: usize },
    Break { line: usize },
    Title {
        text: String,
        arguments: BTreeMap<String, String>,
        line: usize,
    },
    /// Everything nested one level deeper, at `depth`
    Block { depth: usize, children: Vec<Node> },
}

impl Node {
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Block { children, .. } => children,
            _ => &[],
        }
    }

    /// Text of a text or title node.
    pub fn text(&self) -> Option<&str> {
        match self {
            Node::Text { text, .. } | Node::Title { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn is_title(&self) -> bool {
        matches!(self, Node::Title { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub nodes: Vec<Node>,
}

impl Document {
    /// Number of nodes in the whole tree.
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[Node]) -> usize {
            nodes.iter().map(|n| 1 + count(n.children())).sum()
        }
        count(&self.nodes)
    }

    /// Every title in document order, at any depth.
    pub fn titles(&self) -> Vec<&Node> {
        fn collect<'a>(nodes: &'a [Node], out: &mut Vec<&'a Node>) {
            for node in nodes {
                if node.is_title() {
                    out.push(node);
                }
                collect(node.children(), out);
            }
        }
        let mut titles = Vec::new();
        collect(&self.nodes, &mut titles);
        titles
    }
}

/// Event sink that assembles a [`Document`].
#[derive(Debug)]
pub struct DocumentBuilder {
    /// Open levels, innermost last; index 0 is the document root
    open: Vec<(usize, Vec<Node>)>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        DocumentBuilder {
            open: vec![(0, Vec::new())],
        }
    }

    fn current(&mut self) -> &mut Vec<Node> {
        if self.open.is_empty() {
            self.open.push((0, Vec::new()));
        }
        let last = self.open.len() - 1;
        &mut self.open[last].1
    }

    fn close(&mut self) {
        if self.open.len() < 2 {
            return;
        }
        if let Some((depth, children)) = self.open.pop() {
            self.current().push(Node::Block { depth, children });
        }
    }

    fn push_text(&mut self, text: String, line: usize) {
        let nodes = self.current();
        if let Some(Node::Text {
            text: existing,
            line: existing_line,
        }) = nodes.last_mut()
        {
            if *existing_line == line {
                existing.push(' ');
                existing.push_str(&text);
                return;
            }
        }
        nodes.push(Node::Text { text, line });
    }

    /// Close any open levels and return the document.
    pub fn finish(mut self) -> Document {
        while self.open.len() > 1 {
            self.close();
        }
        let nodes = self.open.pop().map(|(_, nodes)| nodes).unwrap_or_default();
        Document { nodes }
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for DocumentBuilder {
    fn event(&mut self, event: Event) {
        match event {
            Event::Descend { depth } => self.open.push((depth, Vec::new())),
            Event::Ascend { .. } => self.close(),
            Event::Text { text, line, .. } => self.push_text(text, line),
            Event::Break { line } => self.current().push(Node::Break { line }),
            Event::Title {
                text,
                arguments,
                line,
            } => self.current().push(Node::Title {
                text,
                arguments,
                line,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(text: &str, depth: usize, line: usize) -> Event {
        Event::Text {
            text: text.to_string(),
            depth,
            line,
        }
    }

    #[test]
    fn test_words_on_one_line_merge() {
        let mut builder = DocumentBuilder::new();
        builder.event(text("Body", 0, 2));
        builder.event(text("text", 0, 2));
        builder.event(text("next", 0, 3));

        let doc = builder.finish();
        assert_eq!(
            doc.nodes,
            vec![
                Node::Text {
                    text: "Body text".to_string(),
                    line: 2
                },
                Node::Text {
                    text: "next".to_string(),
                    line: 3
                },
            ]
        );
    }

    #[test]
    fn test_blocks_follow_descend_and_ascend() {
        let mut builder = DocumentBuilder::new();
        builder.event(text("Title", 0, 1));
        builder.event(Event::Descend { depth: 1 });
        builder.event(text("Body", 1, 2));
        builder.event(Event::Ascend { depth: 0 });
        builder.event(Event::Break { line: 3 });

        let doc = builder.finish();
        assert_eq!(doc.nodes.len(), 3);
        assert_eq!(doc.nodes[1].children().len(), 1);
        assert_eq!(doc.nodes[1].children()[0].text(), Some("Body"));
        assert_eq!(doc.node_count(), 4);
    }

    #[test]
    fn test_finish_closes_open_blocks() {
        let mut builder = DocumentBuilder::new();
        builder.event(Event::Descend { depth: 1 });
        builder.event(Event::Descend { depth: 2 });
        builder.event(text("deep", 2, 1));

        let doc = builder.finish();
        assert_eq!(doc.nodes.len(), 1);
        assert!(matches!(&doc.nodes[0], Node::Block { depth: 1, children } if children.len() == 1));
    }

    #[test]
    fn test_stray_ascend_is_ignored() {
        let mut builder = DocumentBuilder::new();
        builder.event(Event::Ascend { depth: 0 });
        builder.event(text("still here", 0, 1));
        assert_eq!(builder.finish().node_count(), 1);
    }
}
