//! Rule table for the Turtle tokenizer
//!
//!     The tokenizer is a small stack-based automaton. Each lexical state owns
//!     an ordered list of rules; a rule pairs an anchored regex with a
//!     classification (whole match, or one category per capture group) and a
//!     state-transition action (stay, push, or pop-N). The scanner tries the
//!     current state's rules in order and takes the first that matches, so
//!     rule order is semantically significant: more specific rules must
//!     precede more general ones (the exponential float rule sits before the
//!     plain float rule for exactly this reason).
//!
//!     The whole table is case-insensitive. This is a single global
//!     configuration, not a per-rule choice: `@prefix`/`PREFIX`,
//!     `@base`/`BASE`, and `true`/`TRUE` all match uniformly, and local names
//!     written with a leading capital (`ex:Class`) match the simplified
//!     lowercase-led local-name pattern.
//!
//! Sub-pattern composition
//!
//!     Three fragments are shared across several rules and states: the
//!     namespace prefix, the IRI reference, and the prefixed name built from
//!     the two. They are composed by string substitution exactly once, when
//!     the table is built, so a change to one fragment propagates everywhere
//!     it is embedded.
//!
//!     The character classes are deliberately simplified relative to the full
//!     Turtle grammar (local names are lowercase-letter-led with `\w-`
//!     continuation, IRI content is "anything but the bracket/quote/brace/
//!     backtick/backslash set and control characters"). The goal is robust
//!     tokenization of real documents, not grammar-perfect rejection of
//!     malformed ones.
//!
//! Construction-time validation
//!
//!     Building the table is the only fallible operation in the crate. A rule
//!     whose regex fails to compile, a per-group classification list whose
//!     arity disagrees with its pattern, a pop count of zero, or a zero-width
//!     default rule that is not the final rule of its state are all surfaced
//!     as [`RuleError`] at construction. Scanning never fails.

use std::fmt;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::tokens::TokenCategory;

/// Namespace prefix: an optional letter-led identifier followed by `:`.
pub(crate) const PNAME_NS: &str = r"((?:[a-zA-Z][\w-]*)?:)";

/// IRI reference: text between `<` and `>`, excluding control characters and
/// the bracket/quote/brace/pipe/caret/backtick/backslash set.
pub(crate) const IRIREF: &str = r#"(<[^<>"{}|^`\\\x00-\x20]*>)"#;

/// Local part of a prefixed name, simplified to a lowercase-letter-led word.
pub(crate) const PN_LOCAL: &str = r"([a-z][\w-]*)";

/// The lexical states of the automaton.
///
/// Identity is the variant; [`LexState::name`] gives the stable display name.
/// `Root` is the base state and is never popped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexState {
    /// Top-level Turtle: directives, terms, literals, punctuation.
    Root,
    /// Inside a `"""`-delimited string.
    TripleDoubleQuotedString,
    /// Inside a `"`-delimited string.
    SingleDoubleQuotedString,
    /// Inside a `'''`-delimited string.
    TripleSingleQuotedString,
    /// Inside a `'`-delimited string.
    SingleSingleQuotedString,
    /// Immediately after a backslash inside any string.
    StringEscape,
    /// Immediately after a closing quote: language tag or datatype suffix.
    EndOfString,
}

/// Number of lexical states; the rule table is indexed by state.
pub(crate) const STATE_COUNT: usize = 7;

impl LexState {
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Stable display name of this state, e.g. `triple-double-quoted-string`.
    pub fn name(self) -> &'static str {
        match self {
            LexState::Root => "root",
            LexState::TripleDoubleQuotedString => "triple-double-quoted-string",
            LexState::SingleDoubleQuotedString => "single-double-quoted-string",
            LexState::TripleSingleQuotedString => "triple-single-quoted-string",
            LexState::SingleSingleQuotedString => "single-single-quoted-string",
            LexState::StringEscape => "string-escape",
            LexState::EndOfString => "end-of-string",
        }
    }
}

impl fmt::Display for LexState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// State-stack transition applied after a rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    /// No stack change.
    Stay,
    /// Push the given state; it becomes the current state.
    Push(LexState),
    /// Pop this many states (at least 1; the base state is never removed).
    Pop(usize),
}

/// What a rule matches: an anchored pattern, or the zero-width default.
///
/// The default matcher always succeeds without consuming input. It is only
/// legal as the last rule of a state and only paired with a pop action — the
/// "no suffix followed this string" exit of the end-of-string state.
#[derive(Debug)]
pub(crate) enum Matcher {
    Pattern(Regex),
    Default,
}

/// How a match is classified into tokens.
#[derive(Debug)]
pub(crate) enum Classify {
    /// The whole match becomes one token of this category.
    Whole(TokenCategory),
    /// One entry per capture group, in group order. A `None` entry means the
    /// group does not emit a token; empty optional captures are skipped by
    /// the scanner regardless.
    Groups(&'static [Option<TokenCategory>]),
}

/// A single rule: matcher, classification, transition, and an optional
/// preceded-by-whitespace guard.
#[derive(Debug)]
pub(crate) struct Rule {
    pub(crate) matcher: Matcher,
    pub(crate) classify: Classify,
    pub(crate) action: Action,
    /// When set, the rule only applies if the character before the scan
    /// position is whitespace. Fails at offset 0. Used by the bareword `a`
    /// rule so the shorthand never matches inside an identifier.
    pub(crate) after_whitespace: bool,
}

impl Rule {
    fn new(pattern: &str, classify: Classify, action: Action) -> Result<Rule, RuleError> {
        if let Action::Pop(0) = action {
            return Err(RuleError::InvalidPop {
                pattern: pattern.to_string(),
            });
        }
        let regex = RegexBuilder::new(&format!("^(?:{pattern})"))
            .case_insensitive(true)
            .build()
            .map_err(|e| RuleError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
        if let Classify::Groups(classes) = &classify {
            let groups = regex.captures_len() - 1;
            if groups != classes.len() {
                return Err(RuleError::GroupArityMismatch {
                    pattern: pattern.to_string(),
                    groups,
                    classes: classes.len(),
                });
            }
        }
        Ok(Rule {
            matcher: Matcher::Pattern(regex),
            classify,
            action,
            after_whitespace: false,
        })
    }

    /// Whole-match rule with no stack change.
    fn emit(pattern: &str, category: TokenCategory) -> Result<Rule, RuleError> {
        Rule::new(pattern, Classify::Whole(category), Action::Stay)
    }

    /// Whole-match rule that pushes a state.
    fn emit_push(
        pattern: &str,
        category: TokenCategory,
        target: LexState,
    ) -> Result<Rule, RuleError> {
        Rule::new(pattern, Classify::Whole(category), Action::Push(target))
    }

    /// Whole-match rule that pops `count` states.
    fn emit_pop(pattern: &str, category: TokenCategory, count: usize) -> Result<Rule, RuleError> {
        Rule::new(pattern, Classify::Whole(category), Action::Pop(count))
    }

    /// Per-group rule with no stack change.
    fn groups(
        pattern: &str,
        classes: &'static [Option<TokenCategory>],
    ) -> Result<Rule, RuleError> {
        Rule::new(pattern, Classify::Groups(classes), Action::Stay)
    }

    /// Per-group rule that pops `count` states.
    fn groups_pop(
        pattern: &str,
        classes: &'static [Option<TokenCategory>],
        count: usize,
    ) -> Result<Rule, RuleError> {
        Rule::new(pattern, Classify::Groups(classes), Action::Pop(count))
    }

    /// Zero-width default rule: emits nothing, pops `count` states.
    fn default_pop(count: usize) -> Result<Rule, RuleError> {
        if count == 0 {
            return Err(RuleError::InvalidPop {
                pattern: "<default>".to_string(),
            });
        }
        Ok(Rule {
            matcher: Matcher::Default,
            classify: Classify::Groups(&[]),
            action: Action::Pop(count),
            after_whitespace: false,
        })
    }

    /// Restrict this rule to positions preceded by whitespace.
    fn after_whitespace(mut self) -> Rule {
        self.after_whitespace = true;
        self
    }
}

/// Error raised while building the rule table.
///
/// This is the only failure class in the crate; it indicates a misconfigured
/// table, caught at construction time so that scanning can be infallible.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleError {
    /// A rule pattern failed to compile.
    InvalidPattern {
        /// The offending pattern source.
        pattern: String,
        /// The regex engine's error message.
        message: String,
    },
    /// A per-group classification list disagrees with its pattern's capture
    /// group count.
    GroupArityMismatch {
        /// The offending pattern source.
        pattern: String,
        /// Capture groups in the pattern.
        groups: usize,
        /// Entries in the classification list.
        classes: usize,
    },
    /// A pop action with a count of zero.
    InvalidPop {
        /// The offending pattern source.
        pattern: String,
    },
    /// A zero-width default rule that is not the final rule of its state.
    DefaultNotLast {
        /// Name of the offending state.
        state: &'static str,
    },
    /// A zero-width default rule paired with a non-pop action.
    DefaultWithoutPop {
        /// Name of the offending state.
        state: &'static str,
    },
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleError::InvalidPattern { pattern, message } => {
                write!(f, "invalid pattern {pattern:?}: {message}")
            }
            RuleError::GroupArityMismatch {
                pattern,
                groups,
                classes,
            } => write!(
                f,
                "pattern {pattern:?} has {groups} capture groups but {classes} classifications"
            ),
            RuleError::InvalidPop { pattern } => {
                write!(f, "rule {pattern:?} pops zero states")
            }
            RuleError::DefaultNotLast { state } => {
                write!(f, "state {state:?} has a default rule before the end of its rule list")
            }
            RuleError::DefaultWithoutPop { state } => {
                write!(f, "state {state:?} has a default rule without a pop action")
            }
        }
    }
}

impl std::error::Error for RuleError {}

/// The immutable rule table: one ordered rule list per lexical state.
///
/// Built once, then shared read-only by every scan. The process-wide instance
/// lives behind a `Lazy` static; [`RuleTable::build`] is exposed so hosts can
/// validate construction explicitly if they want the `Result`.
pub struct RuleTable {
    states: [Vec<Rule>; STATE_COUNT],
}

impl RuleTable {
    /// Build and validate the full Turtle rule table.
    pub fn build() -> Result<RuleTable, RuleError> {
        use TokenCategory as C;

        let prefixed_name = format!("{PNAME_NS}{PN_LOCAL}");

        let root = vec![
            Rule::emit(r"\s+", C::Whitespace)?,
            // Base directive: keyword, whitespace, IRI, optional terminator
            Rule::groups(
                &format!(r"(@base|BASE)(\s+){IRIREF}(\s*)(\.?)"),
                &[
                    Some(C::Keyword),
                    Some(C::Whitespace),
                    Some(C::NameVariable),
                    Some(C::Whitespace),
                    Some(C::Punctuation),
                ],
            )?,
            // Prefix directive: keyword, whitespace, namespace, whitespace,
            // IRI, optional terminator
            Rule::groups(
                &format!(r"(@prefix|PREFIX)(\s+){PNAME_NS}(\s+){IRIREF}(\s*)(\.?)"),
                &[
                    Some(C::Keyword),
                    Some(C::Whitespace),
                    Some(C::NameNamespace),
                    Some(C::Whitespace),
                    Some(C::NameVariable),
                    Some(C::Whitespace),
                    Some(C::Punctuation),
                ],
            )?,
            // The predicate shorthand `a`, only between whitespace. The
            // trailing whitespace is captured and classified instead of
            // looked ahead at; the leading side is the rule guard.
            Rule::groups(r"(a)(\s+)", &[Some(C::KeywordType), Some(C::Whitespace)])?
                .after_whitespace(),
            Rule::emit(IRIREF, C::NameVariable)?,
            Rule::groups(
                &prefixed_name,
                &[Some(C::NameNamespace), Some(C::NameTag)],
            )?,
            Rule::emit(r"#[^\n]+", C::Comment)?,
            Rule::emit(r"\b(true|false)\b", C::Literal)?,
            // Exponential floats before plain floats: `1.0E10` must not stop
            // at `1.0`.
            Rule::emit(r"[+\-]?\d*(?:\.\d+)?E[+\-]?\d+", C::NumberFloat)?,
            Rule::emit(r"[+\-]?\d*\.\d+", C::NumberFloat)?,
            Rule::emit(r"[+\-]?\d+", C::NumberInteger)?,
            Rule::emit(r"[\[\](){}.;,:^]", C::Punctuation)?,
            Rule::emit_push(r#"""""#, C::String, LexState::TripleDoubleQuotedString)?,
            Rule::emit_push(r#"""#, C::String, LexState::SingleDoubleQuotedString)?,
            Rule::emit_push(r"'''", C::String, LexState::TripleSingleQuotedString)?,
            Rule::emit_push(r"'", C::String, LexState::SingleSingleQuotedString)?,
        ];

        let triple_double = vec![
            Rule::emit_push(r#"""""#, C::String, LexState::EndOfString)?,
            Rule::emit(r#"[^"\\]+"#, C::String)?,
            Rule::emit_push(r"\\", C::String, LexState::StringEscape)?,
        ];

        // Single-quoted content additionally stops at raw line breaks, so an
        // unterminated string does not swallow the following lines.
        let single_double = vec![
            Rule::emit_push(r#"""#, C::String, LexState::EndOfString)?,
            Rule::emit(r#"[^"\\\n]+"#, C::String)?,
            Rule::emit_push(r"\\", C::String, LexState::StringEscape)?,
        ];

        let triple_single = vec![
            Rule::emit_push(r"'''", C::String, LexState::EndOfString)?,
            Rule::emit(r"[^'\\]+", C::String)?,
            Rule::emit_push(r"\\", C::String, LexState::StringEscape)?,
        ];

        let single_single = vec![
            Rule::emit_push(r"'", C::String, LexState::EndOfString)?,
            Rule::emit(r"[^'\\\n]+", C::String)?,
            Rule::emit_push(r"\\", C::String, LexState::StringEscape)?,
        ];

        // Exactly one character, whatever it is. Which escapes are legal is
        // not this tokenizer's business.
        let string_escape = vec![Rule::emit_pop(r".", C::String, 1)?];

        // Optional suffix after a closing quote. Every exit pops two states:
        // past this state and the string state, back to whichever state
        // pushed the string opener.
        let end_of_string = vec![
            Rule::groups_pop(
                r"(@)([a-zA-Z]+(?:-[a-zA-Z0-9]+)*)",
                &[Some(C::Operator), Some(C::GenericEmph)],
                2,
            )?,
            Rule::groups_pop(
                &format!(r"(\^\^){IRIREF}"),
                &[Some(C::Operator), Some(C::GenericEmph)],
                2,
            )?,
            Rule::groups_pop(
                &format!(r"(\^\^){prefixed_name}"),
                &[Some(C::Operator), Some(C::NameNamespace), Some(C::GenericEmph)],
                2,
            )?,
            Rule::default_pop(2)?,
        ];

        let table = RuleTable {
            states: [
                root,
                triple_double,
                single_double,
                triple_single,
                single_single,
                string_escape,
                end_of_string,
            ],
        };
        table.validate()?;
        Ok(table)
    }

    /// Check the default-rule invariants across all states.
    fn validate(&self) -> Result<(), RuleError> {
        let names = [
            LexState::Root,
            LexState::TripleDoubleQuotedString,
            LexState::SingleDoubleQuotedString,
            LexState::TripleSingleQuotedString,
            LexState::SingleSingleQuotedString,
            LexState::StringEscape,
            LexState::EndOfString,
        ];
        for (state, rules) in names.iter().zip(self.states.iter()) {
            for (position, rule) in rules.iter().enumerate() {
                if let Matcher::Default = rule.matcher {
                    if position + 1 != rules.len() {
                        return Err(RuleError::DefaultNotLast { state: state.name() });
                    }
                    if !matches!(rule.action, Action::Pop(_)) {
                        return Err(RuleError::DefaultWithoutPop { state: state.name() });
                    }
                }
            }
        }
        Ok(())
    }

    /// The ordered rules of one state.
    pub(crate) fn rules(&self, state: LexState) -> &[Rule] {
        &self.states[state.index()]
    }
}

static TABLE: Lazy<RuleTable> = Lazy::new(|| match RuleTable::build() {
    Ok(table) => table,
    Err(e) => panic!("turtle rule table failed to build: {e}"),
});

/// The process-wide rule table, built on first use.
pub(crate) fn table() -> &'static RuleTable {
    &TABLE
}
