//! # sdml
//!
//! A lexer and parser for SDML, an indentation scoped markup format.
//!
//! File Layout
//!
//!     The crate keeps the two halves of the pipeline apart, with the shared token model
//!     between them:
//!
//! src/sdml
//!   ├── token        The token record exchanged between lexer and parser
//!   ├── lexing       The staged, pull based lexer and its stage registry
//!   ├── parsing      The recursive descent parser, directives and event sinks
//!   ├── addons       The bind/unbind plugin capability and the bundled addons
//!   ├── ast          The structural result built from parser events
//!   ├── formats      Debug views of the structural result
//!   └── loader       Convenience entry points over strings and files
//!
//! A document is lexed lazily: the parser pulls one token at a time, and the lexer only reads
//! a further source line when its pending queue runs dry. That is what lets an addon activated
//! by `.. use: markdown` change how the very next line is tokenized.

pub mod sdml;
