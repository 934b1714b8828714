//! Format registry for structural result serialization
//!
//! Each format implements the `Formatter` trait and can be registered with `FormatRegistry`.

use crate::sdml::ast::Document;
use std::collections::HashMap;
use std::fmt;

/// Error that can occur during formatting
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Error during serialization
    SerializationError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

pub trait Formatter {
    /// The name of this format (e.g., "treeviz", "json")
    fn name(&self) -> &str;

    fn serialize(&self, doc: &Document) -> Result<String, FormatError>;

    fn description(&self) -> &str {
        ""
    }
}

pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, returning the one it replaced under the same name.
    pub fn register<F>(&mut self, formatter: F) -> Option<Box<dyn Formatter>>
    where
        F: Formatter + 'static,
    {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter))
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Serialize a document using the specified format
    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(doc)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// `(name, description)` pairs sorted by name; an empty description falls back to the name.
    pub fn descriptions(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .formatters
            .values()
            .map(|f| {
                let description = match f.description() {
                    "" => f.name(),
                    text => text,
                };
                (f.name(), description)
            })
            .collect();
        entries.sort();
        entries
    }

    /// Create a registry with the built in formatters
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(super::TreevizFormatter);
        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
