//! # turtle-lex
//!
//! A lexical tokenizer for the Turtle RDF serialization syntax.
//!
//! Given raw Turtle source text, [`tokenize`] produces a lazy sequence of
//! classified tokens (keywords, IRIs, prefixed names, literals, punctuation,
//! comments) suitable for syntax highlighting or lightweight downstream
//! processing. The tokenizer is a small stack-based automaton: named lexical
//! states, each with an ordered list of pattern-to-classification rules and
//! explicit push/pop transitions. Turtle needs the stack because its string
//! literals are context-sensitive — four quoting flavors with independent
//! escape handling, each optionally followed by a language tag or datatype
//! suffix that depends on what produced the string.
//!
//! This crate classifies character spans and nothing more. It never resolves
//! prefixes, builds triples, or validates RDF semantics, and it is not a
//! conformance-grade Turtle grammar: character classes are pragmatically
//! simplified, and malformed input degrades to `error` tokens instead of
//! failing. Scanning never panics and never returns an error.
//!
//! ```text
//! @prefix ex: <http://example.org/> .
//! ex:subject a ex:Class ;
//!     ex:label "hello"@en .
//! ```
//!
//! The rule table is built once per process and shared read-only by all
//! scans, so tokenizing many documents concurrently needs no locking.

pub mod metadata;
pub mod rules;
pub mod scanner;
pub mod tokens;

pub use metadata::{TurtleMetadata, METADATA};
pub use rules::{LexState, RuleError, RuleTable};
pub use scanner::{tokenize, Tokens};
pub use tokens::{Token, TokenCategory};
