//! Non-fatal anomalies
//!
//!     Some misuse is reported and skipped rather than aborting the document: overwriting an
//!     occupied lexer stage, removing a stage with the wrong handle, and deactivating an addon
//!     that was never activated. Each one is logged through `tracing` and kept in a per-document
//!     [`Diagnostics`] log so callers (and tests) can inspect exactly what was reported.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A stage was registered at a priority that already held one
    StageOverwritten {
        priority: u32,
        previous: String,
        replacement: String,
    },
    /// A removal named a different stage than the one registered at that priority
    StageRemovalRefused {
        priority: u32,
        registered: String,
        supplied: String,
    },
    /// `unuse` named an addon that is not active
    AddonNotActive { name: String, line: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::StageOverwritten {
                priority,
                previous,
                replacement,
            } => write!(
                f,
                "Lexer stage {} was already in use by '{}', overwritten by '{}'",
                priority, previous, replacement
            ),
            Warning::StageRemovalRefused {
                priority,
                registered,
                supplied,
            } => write!(
                f,
                "Lexer stage {} is held by '{}', not '{}'; refusing to remove",
                priority, registered, supplied
            ),
            Warning::AddonNotActive { name, line } => write!(
                f,
                "No addon named '{}' is active on line {}, skipped unbind",
                name, line
            ),
        }
    }
}

/// Ordered log of the warnings reported while processing one document.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log the warning and keep it.
    pub fn report(&mut self, warning: Warning) {
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}
