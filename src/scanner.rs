//! Scan loop for the Turtle tokenizer
//!
//!     This module drives a cursor through one input document and lazily
//!     yields classified tokens. The cursor is a byte offset plus a stack of
//!     lexical states; the rule table is shared, read-only, process-wide
//!     configuration (see [rules](crate::rules)).
//!
//!     At each step the scanner tries the current state's rules in order and
//!     takes the first match, emits its token(s), advances past the consumed
//!     text, and applies the rule's transition to the state stack. A rule with
//!     capture-group classifications emits one token per non-empty group, in
//!     group order.
//!
//! Invariants
//!
//!     The offset is monotonically non-decreasing. Every step either consumes
//!     at least one character or is the zero-width default rule, which is
//!     immediately followed by a pop, so no state can loop at the same offset.
//!     The state stack is never empty: pops clamp at the base `root` state.
//!
//!     If no rule matches, the scanner emits a one-character `Error` token and
//!     moves on. This is the standard resilient-lexer fallback; it guarantees
//!     termination on arbitrary input and means malformed Turtle degrades to
//!     partial classification instead of a failure. There is no fatal error
//!     path during scanning.

use std::collections::VecDeque;

use crate::rules::{self, Action, Classify, LexState, Matcher, RuleTable};
use crate::tokens::{Token, TokenCategory};

/// Tokenize a Turtle document.
///
/// Returns a lazy iterator over the token stream. The scan is a pure function
/// of the input and the fixed rule table: tokenizing the same input twice
/// yields identical sequences, and abandoning the iterator abandons the scan
/// at no cost.
///
/// At end of input the zero-width default rules still apply (a suffix-less
/// string at the end of a document pops back to `root`), but no other
/// state-closing happens: an unterminated string leaves its residual states
/// on the stack, discarded with the cursor.
pub fn tokenize(input: &str) -> Tokens<'_> {
    Tokens {
        input,
        pos: 0,
        stack: vec![LexState::Root],
        pending: VecDeque::new(),
        table: rules::table(),
    }
}

/// Lazy token stream over one input document.
///
/// Created by [`tokenize`]. Holds the scan cursor (byte offset plus live
/// state stack) for the duration of one pass.
pub struct Tokens<'a> {
    input: &'a str,
    pos: usize,
    stack: Vec<LexState>,
    pending: VecDeque<Token<'a>>,
    table: &'static RuleTable,
}

impl<'a> Tokens<'a> {
    /// Current byte offset into the input.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// The live state stack, bottom first. Always starts with `root`.
    pub fn states(&self) -> &[LexState] {
        &self.stack
    }

    fn current_state(&self) -> LexState {
        self.stack.last().copied().unwrap_or(LexState::Root)
    }

    fn preceded_by_whitespace(&self) -> bool {
        self.input[..self.pos]
            .chars()
            .next_back()
            .map(char::is_whitespace)
            .unwrap_or(false)
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Stay => {}
            Action::Push(state) => self.stack.push(state),
            Action::Pop(count) => {
                // Clamp so the base state survives arbitrary input.
                let keep = self.stack.len().saturating_sub(count).max(1);
                self.stack.truncate(keep);
            }
        }
    }

    /// Run one automaton step: match, emit into `pending`, advance, transition.
    fn step(&mut self) {
        let input = self.input;
        let rest = &input[self.pos..];
        let rules = self.table.rules(self.current_state());

        for rule in rules {
            if rule.after_whitespace && !self.preceded_by_whitespace() {
                continue;
            }
            match &rule.matcher {
                Matcher::Pattern(regex) => {
                    let Some(caps) = regex.captures(rest) else {
                        continue;
                    };
                    let Some(whole) = caps.get(0) else {
                        continue;
                    };
                    // Zero-width consumption is reserved for the default rule.
                    if whole.end() == 0 {
                        continue;
                    }
                    match &rule.classify {
                        Classify::Whole(category) => {
                            let span = self.pos..self.pos + whole.end();
                            self.pending.push_back(Token {
                                category: *category,
                                text: &input[span.clone()],
                                span,
                            });
                        }
                        Classify::Groups(classes) => {
                            for (index, class) in classes.iter().enumerate() {
                                let Some(category) = class else {
                                    continue;
                                };
                                let Some(group) = caps.get(index + 1) else {
                                    continue;
                                };
                                if group.is_empty() {
                                    continue;
                                }
                                let span = self.pos + group.start()..self.pos + group.end();
                                self.pending.push_back(Token {
                                    category: *category,
                                    text: &input[span.clone()],
                                    span,
                                });
                            }
                        }
                    }
                    self.pos += whole.end();
                    self.apply(rule.action);
                    return;
                }
                Matcher::Default => {
                    self.apply(rule.action);
                    return;
                }
            }
        }

        // No rule matched: consume exactly one character as an error token.
        let width = rest.chars().next().map(char::len_utf8).unwrap_or(1);
        let span = self.pos..self.pos + width;
        self.pending.push_back(Token {
            category: TokenCategory::Error,
            text: &input[span.clone()],
            span,
        });
        self.pos += width;
    }

    /// Apply trailing zero-width default rules once the cursor has reached
    /// end of input.
    ///
    /// A default matcher consumes nothing, so it still applies at end of
    /// input: a suffix-less string at the very end of a document pops back
    /// out of `end-of-string` the same way it would mid-document. Each
    /// default pops at least one state and the base state has none, so this
    /// stops. States without a default (an unterminated string, a dangling
    /// escape) keep their residual stack, discarded with the cursor.
    fn finish(&mut self) {
        while self.stack.len() > 1 {
            match self.table.rules(self.current_state()).last() {
                Some(rule) if matches!(rule.matcher, Matcher::Default) => {
                    self.apply(rule.action);
                }
                _ => break,
            }
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            if self.pos >= self.input.len() {
                self.finish();
                return None;
            }
            self.step();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenCategory as C;

    fn pairs(input: &str) -> Vec<(C, &str)> {
        tokenize(input).map(|t| (t.category, t.text)).collect()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(pairs(""), vec![]);
    }

    #[test]
    fn test_whitespace_only() {
        assert_eq!(pairs("  \t\n "), vec![(C::Whitespace, "  \t\n ")]);
    }

    #[test]
    fn test_comment_to_end_of_line() {
        assert_eq!(
            pairs("# a comment\n<http://x/>"),
            vec![
                (C::Comment, "# a comment"),
                (C::Whitespace, "\n"),
                (C::NameVariable, "<http://x/>"),
            ]
        );
    }

    #[test]
    fn test_base_directive() {
        assert_eq!(
            pairs("@base <http://example.org/> ."),
            vec![
                (C::Keyword, "@base"),
                (C::Whitespace, " "),
                (C::NameVariable, "<http://example.org/>"),
                (C::Whitespace, " "),
                (C::Punctuation, "."),
            ]
        );
    }

    #[test]
    fn test_sparql_style_directives_match_case_insensitively() {
        assert_eq!(
            pairs("PREFIX ex: <http://example.org/>"),
            vec![
                (C::Keyword, "PREFIX"),
                (C::Whitespace, " "),
                (C::NameNamespace, "ex:"),
                (C::Whitespace, " "),
                (C::NameVariable, "<http://example.org/>"),
            ]
        );
        assert_eq!(pairs("BASE <http://x/>")[0], (C::Keyword, "BASE"));
    }

    #[test]
    fn test_directive_without_terminator_emits_no_empty_tokens() {
        let tokens = pairs("@base <http://x/>");
        assert_eq!(
            tokens,
            vec![
                (C::Keyword, "@base"),
                (C::Whitespace, " "),
                (C::NameVariable, "<http://x/>"),
            ]
        );
    }

    #[test]
    fn test_booleans_as_whole_words() {
        assert_eq!(pairs("true")[0], (C::Literal, "true"));
        assert_eq!(pairs("FALSE")[0], (C::Literal, "FALSE"));
        // Not a whole word: tokenizes as a local-name-shaped error run instead
        let tokens = pairs("truest");
        assert_ne!(tokens[0].0, C::Literal);
    }

    #[test]
    fn test_shorthand_a_requires_surrounding_whitespace() {
        // At offset 0 there is no preceding whitespace
        let tokens = pairs("a <http://x/>");
        assert_ne!(tokens[0].0, C::KeywordType);
        // Between whitespace it is the predicate shorthand
        let tokens = pairs("ex:s a ex:o");
        assert!(tokens.contains(&(C::KeywordType, "a")));
    }

    #[test]
    fn test_triple_quoted_string_spans_lines() {
        assert_eq!(
            pairs("\"\"\"line one\nline two\"\"\""),
            vec![
                (C::String, "\"\"\""),
                (C::String, "line one\nline two"),
                (C::String, "\"\"\""),
            ]
        );
    }

    #[test]
    fn test_single_quoted_string_content_stops_at_line_break() {
        let tokens = pairs("\"abc\ndef\"");
        assert_eq!(tokens[0], (C::String, "\""));
        assert_eq!(tokens[1], (C::String, "abc"));
        // The raw line break is not string content; it falls out of the
        // string rules and degrades to an error token.
        assert_eq!(tokens[2], (C::Error, "\n"));
    }

    #[test]
    fn test_string_escape_consumes_one_character() {
        assert_eq!(
            pairs(r#""a\"b""#),
            vec![
                (C::String, "\""),
                (C::String, "a"),
                (C::String, "\\"),
                (C::String, "\""),
                (C::String, "b"),
                (C::String, "\""),
            ]
        );
    }

    #[test]
    fn test_no_rule_matched_consumes_one_char() {
        let tokens = pairs("\u{1}\u{2}");
        assert_eq!(
            tokens,
            vec![(C::Error, "\u{1}"), (C::Error, "\u{2}")]
        );
    }

    #[test]
    fn test_error_fallback_respects_char_boundaries() {
        // Multi-byte characters unknown to every rule come out whole.
        let tokens = pairs("héllo");
        let reassembled: String = tokens.iter().map(|(_, text)| *text).collect();
        assert_eq!(reassembled, "héllo");
    }

    #[test]
    fn test_spans_tile_the_input() {
        let input = "@prefix ex: <http://example.org/> .\nex:s a ex:o ; ex:p \"v\"@en .";
        let mut expected_start = 0;
        for token in tokenize(input) {
            assert_eq!(token.span.start, expected_start);
            assert_eq!(&input[token.span.clone()], token.text);
            expected_start = token.span.end;
        }
        assert_eq!(expected_start, input.len());
    }

    #[test]
    fn test_stack_returns_to_root_on_well_formed_input() {
        let mut tokens = tokenize("ex:s ex:p \"value\"^^xsd:string .");
        while tokens.next().is_some() {}
        assert_eq!(tokens.states(), &[LexState::Root]);
    }

    #[test]
    fn test_suffixless_string_at_end_of_input_balances_stack() {
        // The zero-width default of end-of-string applies at end of input
        // just as it does mid-document.
        let mut tokens = tokenize("\"hello\"");
        let collected: Vec<_> = tokens.by_ref().map(|t| (t.category, t.text)).collect();
        assert_eq!(
            collected,
            vec![
                (C::String, "\""),
                (C::String, "hello"),
                (C::String, "\""),
            ]
        );
        assert_eq!(tokens.states(), &[LexState::Root]);
    }

    #[test]
    fn test_unterminated_string_terminates_with_residual_state() {
        let mut tokens = tokenize("'abc");
        let collected: Vec<_> = tokens.by_ref().map(|t| (t.category, t.text)).collect();
        assert_eq!(
            collected,
            vec![(C::String, "'"), (C::String, "abc")]
        );
        assert_eq!(tokens.offset(), 4);
        assert_eq!(
            tokens.states(),
            &[LexState::Root, LexState::SingleSingleQuotedString]
        );
    }

    #[test]
    fn test_restartable() {
        let input = "@prefix ex: <http://e/> . ex:s a ex:o .";
        let first: Vec<_> = tokenize(input).collect();
        let second: Vec<_> = tokenize(input).collect();
        assert_eq!(first, second);
    }
}
