//! Parses rule sets, words and alphabets from source text.
//!
//! A rule set is written as a list of rules separated by commas, semicolons or newlines:
//!
//! ```text
//! bbb -> b, bab -> aa
//! aaa -> aa; ab -> ε
//! ```
//!
//! Whitespace is insignificant. The empty word is written as "ε", "_", or nothing at all.
//! Parsing never stops at the first problem; every malformed rule gets its own diagnostic.

use crate::common::Span;
use crate::diagnostics::{Diagnostic, DiagnosticRecord};
use crate::errors::{EmptyPattern, MalformedAlphabet, MissingArrow, UnknownSymbol};
use crate::grammar::{Alphabet, Rule, RuleSet, Symbol, Word, EMPTY_WORD};

/// A rule set together with the source span of each rule.
#[derive(Clone, Debug)]
pub struct SpannedRuleSet {
    pub rule_set: RuleSet,
    /// `spans[i]` covers rule `i` in the source, from pattern to replacement.
    pub spans: Vec<Span>,
}

fn is_rule_separator(c: char) -> bool {
    c == ',' || c == ';' || c == '\n'
}

fn is_empty_word_marker(c: char) -> bool {
    c == EMPTY_WORD || c == '_'
}

/// Parses a rule set.
///
/// If `alphabet` is given, every symbol must belong to it. Otherwise the alphabet is inferred
/// from the rules. Returns no rule set if any error diagnostic was produced.
pub fn parse_rule_set(
    source: &str,
    alphabet: Option<&Alphabet>,
) -> (Option<SpannedRuleSet>, Vec<Diagnostic>) {
    RuleSetParser::new(source, alphabet).parse()
}

/// Parses a word over `alphabet`.
pub fn parse_word(source: &str, alphabet: &Alphabet) -> (Option<Word>, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let mut symbols = Vec::with_capacity(source.len());
    for (i, c) in source.chars().enumerate() {
        if c.is_whitespace() || is_empty_word_marker(c) {
            continue;
        }
        if !alphabet.contains(c) {
            diagnostics.push(UnknownSymbol!(i..i + 1, c, alphabet));
            continue;
        }
        symbols.push(c);
    }

    if diagnostics.is_empty() {
        (Some(Word::from(symbols)), diagnostics)
    } else {
        (None, diagnostics)
    }
}

/// Parses an alphabet written as a list of symbols, like "ab" or "a, b, c".
pub fn parse_alphabet(source: &str) -> (Option<Alphabet>, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let mut symbols: Vec<(Symbol, usize)> = Vec::with_capacity(source.len());
    for (i, c) in source.chars().enumerate() {
        if c.is_whitespace() || c == ',' {
            continue;
        }
        if Alphabet::is_reserved(c) {
            diagnostics.push(MalformedAlphabet!(i..i + 1, c));
            continue;
        }
        if let Some(&(_, first)) = symbols.iter().find(|(s, _)| *s == c) {
            diagnostics.push(
                Diagnostic::span_err(
                    i..i + 1,
                    format!(r#"Duplicate symbol "{}""#, c),
                    MalformedAlphabet::CODE,
                    "symbol listed again here".to_string(),
                )
                .with_spanned_note(first..first + 1, "first listed here"),
            );
            continue;
        }
        symbols.push((c, i));
    }

    if symbols.is_empty() && diagnostics.is_empty() {
        diagnostics.push(Diagnostic::span_err(
            0..source.chars().count(),
            "Empty alphabet",
            MalformedAlphabet::CODE,
            "no symbols listed".to_string(),
        ));
    }
    if !diagnostics.is_empty() {
        return (None, diagnostics);
    }

    match Alphabet::new(symbols.into_iter().map(|(s, _)| s)) {
        Ok(alphabet) => (Some(alphabet), diagnostics),
        Err(err) => {
            let span = 0..source.chars().count();
            diagnostics.push(Diagnostic::span_err(span, err.to_string(), err.code(), None));
            (None, diagnostics)
        }
    }
}

struct RuleSetParser<'a> {
    chars: Vec<char>,
    alphabet: Option<&'a Alphabet>,
    rules: Vec<Rule>,
    spans: Vec<Span>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> RuleSetParser<'a> {
    fn new(source: &str, alphabet: Option<&'a Alphabet>) -> Self {
        Self {
            chars: source.chars().collect(),
            alphabet,
            rules: Vec::new(),
            spans: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn parse(mut self) -> (Option<SpannedRuleSet>, Vec<Diagnostic>) {
        let mut start = 0;
        for i in 0..=self.chars.len() {
            if i == self.chars.len() || is_rule_separator(self.chars[i]) {
                self.parse_rule(start, i);
                start = i + 1;
            }
        }

        if self.diagnostics.iter().any(Diagnostic::is_fatal) {
            return (None, self.diagnostics);
        }

        let alphabet = match self.alphabet {
            Some(alphabet) => alphabet.clone(),
            None => Alphabet::infer(&self.rules),
        };
        match RuleSet::new(alphabet, self.rules) {
            Ok(rule_set) => (
                Some(SpannedRuleSet {
                    rule_set,
                    spans: self.spans,
                }),
                self.diagnostics,
            ),
            Err(err) => {
                self.diagnostics.push(Diagnostic::span_err(
                    0..self.chars.len(),
                    err.to_string(),
                    err.code(),
                    None,
                ));
                (None, self.diagnostics)
            }
        }
    }

    /// Parses the rule between `lo` and `hi`. Blank stretches are skipped.
    fn parse_rule(&mut self, mut lo: usize, mut hi: usize) {
        while lo < hi && self.chars[lo].is_whitespace() {
            lo += 1;
        }
        while hi > lo && self.chars[hi - 1].is_whitespace() {
            hi -= 1;
        }
        if lo == hi {
            return;
        }
        let span = Span::from(lo..hi);

        let arrow = (lo..hi - 1).find(|&i| self.chars[i] == '-' && self.chars[i + 1] == '>');
        let arrow = match arrow {
            Some(arrow) => arrow,
            None => {
                self.diagnostics.push(MissingArrow!(span));
                return;
            }
        };

        let pattern = self.parse_side(lo, arrow);
        let replacement = self.parse_side(arrow + 2, hi);
        let (pattern, replacement) = match (pattern, replacement) {
            (Some(pattern), Some(replacement)) => (pattern, replacement),
            _ => return,
        };

        match Rule::new(pattern, replacement) {
            Ok(rule) => {
                self.rules.push(rule);
                self.spans.push(span);
            }
            Err(_) => self.diagnostics.push(EmptyPattern!(span)),
        }
    }

    /// Parses one side of a rule into a word, reporting symbols that cannot appear in it.
    fn parse_side(&mut self, lo: usize, hi: usize) -> Option<Word> {
        let mut symbols = Vec::with_capacity(hi - lo);
        let mut ok = true;
        for i in lo..hi {
            let c = self.chars[i];
            if c.is_whitespace() || is_empty_word_marker(c) {
                continue;
            }
            if Alphabet::is_reserved(c) {
                self.diagnostics.push(MalformedAlphabet!(i..i + 1, c));
                ok = false;
                continue;
            }
            if let Some(alphabet) = self.alphabet {
                if !alphabet.contains(c) {
                    self.diagnostics.push(UnknownSymbol!(i..i + 1, c, alphabet));
                    ok = false;
                    continue;
                }
            }
            symbols.push(c);
        }

        if ok {
            Some(Word::from(symbols))
        } else {
            None
        }
    }
}
