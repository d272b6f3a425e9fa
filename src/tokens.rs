//! Token types for the Turtle tokenizer
//!
//!     Tokens are pure lexical classifications: a category from a small closed
//!     set, the exact substring that was matched, and its byte range in the
//!     source. They carry no RDF semantics — a namespace token is not resolved
//!     against any prefix table, an IRI token is not validated. The categories
//!     exist for downstream consumers (syntax highlighting, lightweight
//!     filtering), nothing more.

use std::fmt;
use std::ops::Range;

/// Classification of a Turtle token.
///
/// This is a closed set: the scanner never produces anything outside it.
/// [`TokenCategory::Error`] is the resilient-lexer fallback for input no rule
/// recognizes; it never indicates a failure of the scan itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TokenCategory {
    /// Directive keywords: `@prefix`, `@base` and their SPARQL-style forms.
    Keyword,
    /// The predicate shorthand `a`.
    KeywordType,
    /// Structural punctuation: brackets, braces, `.`, `;`, `,`, `:`, `^`.
    Punctuation,
    /// String delimiters, string content, and escaped characters.
    String,
    /// Integer literals, with optional sign.
    NumberInteger,
    /// Decimal and exponential float literals, with optional sign.
    NumberFloat,
    /// The language-tag marker `@` and the datatype marker `^^`.
    Operator,
    /// Runs of whitespace, including line breaks.
    Whitespace,
    /// IRI references, e.g. `<http://example.org/>`.
    NameVariable,
    /// Namespace prefixes, e.g. `ex:` (including the empty prefix `:`).
    NameNamespace,
    /// Local names following a namespace prefix, e.g. the `Class` in `ex:Class`.
    NameTag,
    /// Boolean literals `true` and `false`.
    Literal,
    /// Line comments starting with `#`.
    Comment,
    /// Emphasized suffix text: language tags and datatype local names.
    GenericEmph,
    /// One-character fallback for input no rule matched.
    Error,
}

impl TokenCategory {
    /// Dotted lowercase name of this category, e.g. `name.namespace`.
    ///
    /// These names are stable and intended for display and for highlighting
    /// themes keyed by category name.
    pub fn name(self) -> &'static str {
        match self {
            TokenCategory::Keyword => "keyword",
            TokenCategory::KeywordType => "keyword.type",
            TokenCategory::Punctuation => "punctuation",
            TokenCategory::String => "string",
            TokenCategory::NumberInteger => "number.integer",
            TokenCategory::NumberFloat => "number.float",
            TokenCategory::Operator => "operator",
            TokenCategory::Whitespace => "whitespace",
            TokenCategory::NameVariable => "name.variable",
            TokenCategory::NameNamespace => "name.namespace",
            TokenCategory::NameTag => "name.tag",
            TokenCategory::Literal => "literal",
            TokenCategory::Comment => "comment",
            TokenCategory::GenericEmph => "generic.emph",
            TokenCategory::Error => "error",
        }
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified span of Turtle source text.
///
/// `text` is always exactly `&input[span.start..span.end]` — tokens borrow
/// from the scanned input and never allocate. Tokens are immutable once
/// emitted; ownership transfers to the caller as the scan produces them.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Token<'a> {
    /// The classification of this token.
    pub category: TokenCategory,
    /// Borrowed slice of the source input for this token.
    pub text: &'a str,
    /// Byte range of this token in the source input.
    pub span: Range<usize>,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.category, self.text)
    }
}
