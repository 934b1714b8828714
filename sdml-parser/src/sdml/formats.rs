//! Debug views of the structural result
//!
//! These are inspection formats for tooling and tests, not renderers: a one line per node tree
//! and the serde based JSON / YAML dumps. Formats are looked up by name through
//! [`FormatRegistry`].

pub mod registry;
pub mod structured;
pub mod treeviz;

pub use registry::{FormatError, FormatRegistry, Formatter};
pub use structured::{JsonFormatter, YamlFormatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
