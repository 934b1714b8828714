//! JSON and YAML dumps of the structural result, straight from the serde derives.

use super::registry::{FormatError, Formatter};
use crate::sdml::ast::Document;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_json::to_string_pretty(doc)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Pretty printed JSON of the node tree"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_yaml::to_string(doc).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "YAML of the node tree"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdml::ast::Node;
    use std::collections::BTreeMap;

    #[test]
    fn test_json_tags_node_types() {
        let mut arguments = BTreeMap::new();
        arguments.insert("depth".to_string(), "1".to_string());
        let doc = Document {
            nodes: vec![Node::Title {
                text: "Intro".to_string(),
                arguments,
                line: 2,
            }],
        };

        let json = JsonFormatter.serialize(&doc).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["nodes"][0]["type"], "title");
        assert_eq!(value["nodes"][0]["arguments"]["depth"], "1");
        assert_eq!(value["nodes"][0]["line"], 2);
    }

    #[test]
    fn test_yaml_mentions_every_node() {
        let doc = Document {
            nodes: vec![
                Node::Text {
                    text: "hello".to_string(),
                    line: 1,
                },
                Node::Break { line: 2 },
            ],
        };
        let yaml = YamlFormatter.serialize(&doc).unwrap();
        assert!(yaml.contains("type: text"));
        assert!(yaml.contains("type: break"));
    }
}
