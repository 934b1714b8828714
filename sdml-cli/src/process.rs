//! Per-file processing: parse with fresh lexer and parser instances, write the structural
//! result to the build directory, and render the requested stdout view.

use sdml_parser::sdml::ast::DocumentBuilder;
use sdml_parser::sdml::formats::{FormatError, FormatRegistry};
use sdml_parser::sdml::loader::{DocumentLoader, LoaderError};
use sdml_parser::sdml::parsing::{format_events, Event, EventSink};
use std::fmt;
use std::fs;
use std::path::Path;

/// What gets printed for each processed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    /// `path: N nodes, W warnings`
    Summary,
    Events,
    /// Lexer output only; nothing is parsed or written
    Tokens,
    /// A named format from the library's format registry
    Registry(String),
}

impl OutputFormat {
    pub fn parse(name: &str, registry: &FormatRegistry) -> Option<Self> {
        match name {
            "summary" => Some(OutputFormat::Summary),
            "events" => Some(OutputFormat::Events),
            "tokens" => Some(OutputFormat::Tokens),
            other if registry.has(other) => Some(OutputFormat::Registry(other.to_string())),
            _ => None,
        }
    }

    /// Every accepted format name.
    pub fn names(registry: &FormatRegistry) -> Vec<String> {
        let mut names = vec![
            "summary".to_string(),
            "events".to_string(),
            "tokens".to_string(),
        ];
        names.extend(registry.list_formats());
        names
    }

    /// One `name  description` line per accepted format, for the unknown format error.
    pub fn describe(registry: &FormatRegistry) -> String {
        let mut entries = vec![
            ("summary", "Node and warning count per file"),
            ("events", "Parser event trace"),
            ("tokens", "Lexer tokens, nothing is parsed or written"),
        ];
        entries.extend(registry.descriptions());
        let width = entries.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        entries
            .iter()
            .map(|(name, description)| format!("  {name:<width$}  {description}\n"))
            .collect()
    }
}

#[derive(Debug)]
pub enum ProcessError {
    Load(LoaderError),
    Format(FormatError),
    Io(String),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Load(err) => write!(f, "{}", err),
            ProcessError::Format(err) => write!(f, "{}", err),
            ProcessError::Io(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for ProcessError {}

impl From<LoaderError> for ProcessError {
    fn from(err: LoaderError) -> Self {
        ProcessError::Load(err)
    }
}

impl From<FormatError> for ProcessError {
    fn from(err: FormatError) -> Self {
        ProcessError::Format(err)
    }
}

impl From<std::io::Error> for ProcessError {
    fn from(err: std::io::Error) -> Self {
        ProcessError::Io(err.to_string())
    }
}

/// Builds the document while keeping the event trace.
struct Recorder {
    events: Vec<Event>,
    builder: DocumentBuilder,
}

impl EventSink for Recorder {
    fn event(&mut self, event: Event) {
        self.events.push(event.clone());
        self.builder.event(event);
    }
}

/// Process `source`, writing its structural result to `output`, and return the text to print.
pub fn process_file(
    source: &Path,
    output: &Path,
    format: &OutputFormat,
    registry: &FormatRegistry,
) -> Result<String, ProcessError> {
    let loader = DocumentLoader::from_path(source)?;

    if *format == OutputFormat::Tokens {
        let tokens = loader.tokenize()?;
        return Ok(tokens.iter().map(|t| format!("{}\n", t)).collect());
    }

    let mut recorder = Recorder {
        events: Vec::new(),
        builder: DocumentBuilder::new(),
    };
    let warnings = loader.parse_into(&mut recorder)?;
    let events = recorder.events;
    let document = recorder.builder.finish();

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, registry.serialize(&document, "json")?)?;
    tracing::info!(
        source = %source.display(),
        output = %output.display(),
        "wrote structural result"
    );

    let printed = match format {
        OutputFormat::Summary => format!(
            "{}: {} nodes, {} warnings\n",
            source.display(),
            document.node_count(),
            warnings.len()
        ),
        OutputFormat::Events => format_events(&events),
        OutputFormat::Registry(name) => registry.serialize(&document, name)?,
        OutputFormat::Tokens => String::new(),
    };
    Ok(printed)
}
