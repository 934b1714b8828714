//! Stage registry
//!
//!     The lexer's per-line pipeline is a sparse table from priority to stage. Iteration is
//!     always in ascending priority and gaps are skipped, so addons can slot a stage in between
//!     two built in ones without renumbering anything.
//!
//!     Stages are shared through [`StageHandle`] (an `Rc`), and identity is the handle's
//!     allocation: whoever registered a stage keeps a clone of the handle and must present that
//!     same handle to remove it again. Two stages built from the same function are still two
//!     different stages.
//!
//!     The registry itself never reports anything. [`StageRegistry::insert`] hands back what it
//!     replaced and [`StageRegistry::remove`] hands back what it refused to remove, and the
//!     [`Lexer`](super::Lexer) turns those into warnings.

use super::lexer::LexerState;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Priorities of the built in stages.
pub mod priority {
    pub const TRIM: u32 = 0;
    pub const BLANK_LINES: u32 = 10;
    pub const SCOPE: u32 = 20;
    pub const DIRECTIVE: u32 = 30;
    pub const TEXT: u32 = 100;
}

/// One step of the per-line pipeline.
///
/// `run` gets the line as left by the previous stage. Returning `None` ends processing of the
/// line: later stages do not see it.
pub trait LexStage {
    fn name(&self) -> &str;

    fn run(&self, state: &mut LexerState, line: String) -> Option<String>;
}

pub type StageHandle = Rc<dyn LexStage>;

pub type StageFn = fn(&mut LexerState, String) -> Option<String>;

/// A stage backed by a plain function.
pub struct FnStage {
    name: &'static str,
    func: StageFn,
}

impl FnStage {
    pub fn new(name: &'static str, func: StageFn) -> Self {
        FnStage { name, func }
    }

    /// Wrap `func` in a fresh handle.
    pub fn handle(name: &'static str, func: StageFn) -> StageHandle {
        Rc::new(Self::new(name, func))
    }
}

impl LexStage for FnStage {
    fn name(&self) -> &str {
        self.name
    }

    fn run(&self, state: &mut LexerState, line: String) -> Option<String> {
        (self.func)(state, line)
    }
}

impl fmt::Debug for FnStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnStage").field("name", &self.name).finish()
    }
}

/// Ordered, sparse priority -> stage table.
#[derive(Clone, Default)]
pub struct StageRegistry {
    stages: BTreeMap<u32, StageHandle>,
}

impl StageRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding fresh handles for the built in stages.
    pub fn builtin() -> Self {
        use super::builtin;

        let mut registry = Self::new();
        registry.insert(
            priority::TRIM,
            FnStage::handle("trim", builtin::trim_trailing),
        );
        registry.insert(
            priority::BLANK_LINES,
            FnStage::handle("blank-lines", builtin::blank_breaks),
        );
        registry.insert(
            priority::SCOPE,
            FnStage::handle("scope", builtin::handle_scope),
        );
        registry.insert(
            priority::DIRECTIVE,
            FnStage::handle("directive", builtin::handle_directive),
        );
        registry.insert(priority::TEXT, FnStage::handle("text", builtin::handle_text));
        registry
    }

    /// Register `stage` at `priority`, returning the stage it replaced, if any.
    pub fn insert(&mut self, priority: u32, stage: StageHandle) -> Option<StageHandle> {
        self.stages.insert(priority, stage)
    }

    /// Remove the stage at `priority`, provided it is `stage`.
    ///
    /// An empty slot is a no-op (`Ok(None)`). When the slot holds a different stage nothing is
    /// removed and the registered stage is returned as the error.
    pub fn remove(
        &mut self,
        priority: u32,
        stage: &StageHandle,
    ) -> Result<Option<StageHandle>, StageHandle> {
        match self.stages.get(&priority) {
            None => Ok(None),
            Some(registered) if !Rc::ptr_eq(registered, stage) => Err(registered.clone()),
            Some(_) => Ok(self.stages.remove(&priority)),
        }
    }

    pub fn get(&self, priority: u32) -> Option<&StageHandle> {
        self.stages.get(&priority)
    }

    /// Whether `stage` is the handle registered at `priority`.
    pub fn holds(&self, priority: u32, stage: &StageHandle) -> bool {
        self.get(priority)
            .is_some_and(|registered| Rc::ptr_eq(registered, stage))
    }

    /// Stages in execution order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &StageHandle)> {
        self.stages.iter().map(|(priority, stage)| (*priority, stage))
    }

    pub fn priorities(&self) -> Vec<u32> {
        self.stages.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl fmt::Debug for StageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.stages.iter().map(|(p, s)| (p, s.name())))
            .finish()
    }
}
