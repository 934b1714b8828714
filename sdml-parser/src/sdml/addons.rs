//! Addons
//!
//!     An addon extends the format without touching the lexer or parser. It is activated by
//!     `.. use: NAME`, at which point [`Addon::bind`] runs and typically slots a stage into the
//!     lexer pipeline, registers directive handlers, or both. `.. unuse: NAME` (or the end of the
//!     document) runs [`Addon::unbind`], which must undo exactly what `bind` did: stages are
//!     removed by priority and by the same handle that was registered.
//!
//!     Names are resolved through an [`AddonResolver`], an explicit table of factories. The
//!     parser never loads anything on its own.
//!
//!     Binding is not reentrant: an addon must not activate or deactivate addons from inside
//!     its own `bind` or `unbind`.

pub mod markdown;

use crate::sdml::parsing::Parser;
use std::collections::BTreeMap;
use std::fmt;

pub use markdown::MarkdownHeadings;

pub trait Addon {
    /// Called on activation.
    fn bind(&mut self, parser: &mut Parser);

    /// Called on deactivation; reverses `bind`.
    fn unbind(&mut self, parser: &mut Parser);
}

pub type AddonFactory = Box<dyn Fn() -> Box<dyn Addon>>;

/// Name -> factory table consulted by `use`.
#[derive(Default)]
pub struct AddonResolver {
    factories: BTreeMap<String, AddonFactory>,
}

impl AddonResolver {
    /// A resolver that knows no addons.
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolver that knows the addons bundled with the crate.
    pub fn builtin() -> Self {
        let mut resolver = Self::new();
        resolver.register(markdown::NAME, || Box::new(MarkdownHeadings::new()));
        resolver
    }

    /// Make `name` resolvable. A factory already registered under `name` is replaced.
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn() -> Box<dyn Addon> + 'static,
    {
        self.factories.insert(name.to_string(), Box::new(factory));
    }

    /// A fresh instance of the addon called `name`.
    pub fn resolve(&self, name: &str) -> Option<Box<dyn Addon>> {
        self.factories.get(name).map(|factory| factory())
    }

    pub fn has(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Known names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}

impl fmt::Debug for AddonResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddonResolver")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Inert;

    impl Addon for Inert {
        fn bind(&mut self, _parser: &mut Parser) {}
        fn unbind(&mut self, _parser: &mut Parser) {}
    }

    #[test]
    fn test_builtin_resolver_knows_markdown() {
        let resolver = AddonResolver::builtin();
        assert!(resolver.has("markdown"));
        assert!(resolver.resolve("markdown").is_some());
        assert!(resolver.resolve("latex").is_none());
    }

    #[test]
    fn test_register_custom_addon() {
        let mut resolver = AddonResolver::new();
        resolver.register("inert", || Box::new(Inert));
        assert_eq!(resolver.names(), ["inert"]);
        assert!(resolver.resolve("inert").is_some());
    }
}
