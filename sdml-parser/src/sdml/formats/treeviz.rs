//! Treeviz formatter for the structural result
//!
//! One line per node, nesting drawn with box characters, labels truncated to 30 characters.
//!
//!     ⧉ document
//!     ├─ ¶ Title
//!     ├─ ➔ block 1
//!     │ ├─ ¶ Body text
//!     │ └─ ↵ break
//!     └─ § My Doc
//!
//! Icons
//!     Document: ⧉
//!     Text: ¶
//!     Title: §
//!     Block: ➔
//!     Break: ↵

use super::registry::{FormatError, Formatter};
use crate::sdml::ast::{Document, Node};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn icon_and_label(node: &Node) -> (&'static str, String) {
    match node {
        Node::Text { text, .. } => ("¶", text.clone()),
        Node::Break { .. } => ("↵", "break".to_string()),
        Node::Title {
            text, arguments, ..
        } => {
            let mut label = text.clone();
            if let Some(depth) = arguments.get("depth") {
                label = format!("{} (h{})", label, depth);
            }
            ("§", label)
        }
        Node::Block { depth, .. } => ("➔", format!("block {}", depth)),
    }
}

fn format_node(node: &Node, prefix: &str, is_last: bool, output: &mut String) {
    let connector = if is_last { "└─" } else { "├─" };
    let (icon, label) = icon_and_label(node);
    output.push_str(&format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        icon,
        truncate(&label, 30)
    ));

    let children = node.children();
    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    for (i, child) in children.iter().enumerate() {
        format_node(child, &child_prefix, i == children.len() - 1, output);
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    let mut output = String::from("⧉ document\n");
    for (i, node) in doc.nodes.iter().enumerate() {
        format_node(node, "", i == doc.nodes.len() - 1, &mut output);
    }
    output
}

/// Formatter implementation for treeviz format
pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn description(&self) -> &str {
        "Visual tree representation with Unicode icons"
    }
}
