//! Configuration errors.
//!
//! A [`ConfigurationError`] is fatal to the run or trial that hit it and is never silently
//! corrected. Errors found while parsing source text are reported as [`Diagnostic`]s instead,
//! using the generator macros defined here, so they can point at the offending span.
//!
//! [`Diagnostic`]: crate::diagnostics::Diagnostic

use crate::diagnostics::{DiagnosticRecord, DiagnosticRegistry};
use crate::grammar::{Alphabet, Occurrence, Symbol, Word};

use core::fmt;
use std::error::Error;

macro_rules! define_errors {
    ($($(#[doc = $doc:expr])+ $code:ident: $error:ident $(=> $gen_macro:tt)?)*) => {$(
        $(#[doc = $doc])+
        pub(crate) struct $error;

        impl DiagnosticRecord for $error {
            const CODE: &'static str = stringify!($code);
            const EXPLANATION: &'static str = concat!($($doc, "\n"),+);
        })*

        /// Configuration errors and their explanations.
        pub struct ConfigErrors;

        impl DiagnosticRegistry for ConfigErrors {
            #[allow(clippy::vec_init_then_push)]
            fn codes_with_explanations() -> Vec<(&'static str, &'static str)> {
                let mut vec = Vec::new();
                $(vec.push(($error::CODE, $error::EXPLANATION));)*
                vec
            }
        }

        $($(
            macro_rules! $error $gen_macro
        )?)*
    };
}

define_errors! {
    ///A rule's pattern must contain at least one symbol.
    ///
    ///An empty pattern occurs at every position of every word, including the empty word, so a
    ///rule like
    ///
    ///```text
    /// -> ab
    ///```
    ///
    ///would apply everywhere forever. Rule sets containing such a rule are rejected rather than
    ///having the rule dropped.
    C0001: EmptyPattern => {
        ($span:expr) => {
            $crate::diagnostics::Diagnostic::span_err(
                $span,
                "Empty rule pattern",
                EmptyPattern::CODE,
                "this rule has no pattern".to_string(),
            )
            .with_note("a pattern must contain at least one symbol")
        }
    }

    ///Every rule in a rule set must be written as
    ///
    ///```text
    ///<pattern> -> <replacement>
    ///```
    ///
    ///Rules are separated by commas, semicolons or newlines. For example,
    ///
    ///```text
    ///bbb -> b, bab -> aa
    ///```
    ///
    ///The replacement may be left empty, or written as "ε", to erase the pattern.
    C0002: MissingArrow => {
        ($span:expr) => {
            $crate::diagnostics::Diagnostic::span_err(
                $span,
                "Expected a rule",
                MissingArrow::CODE,
                r#"missing "->""#.to_string(),
            )
            .with_help(r#"write rules as "<pattern> -> <replacement>""#)
        }
    }

    ///Rules and words may only use symbols of the alphabet they are checked against.
    ///
    ///When an alphabet is given explicitly, for example with `--alphabet ab`, every symbol of
    ///every rule and every word must be one of its symbols. When no alphabet is given, the
    ///alphabet is the set of symbols the rule set mentions.
    C0003: UnknownSymbol => {
        ($span:expr, $symbol:expr, $alphabet:expr) => {
            $crate::diagnostics::Diagnostic::span_err(
                $span,
                format!(r#"Unknown symbol "{}""#, $symbol),
                UnknownSymbol::CODE,
                "not in the alphabet".to_string(),
            )
            .with_note(format!("the alphabet is {}", $alphabet))
        }
    }

    ///An alphabet must be a non-empty list of distinct symbols.
    ///
    ///Whitespace and the characters `ε _ - > , ; @` are reserved by the rule-set syntax and
    ///cannot be symbols.
    C0004: MalformedAlphabet => {
        ($span:expr, $symbol:expr) => {
            $crate::diagnostics::Diagnostic::span_err(
                $span,
                format!(r#"Reserved symbol "{}""#, $symbol),
                MalformedAlphabet::CODE,
                "this character is part of the rule syntax".to_string(),
            )
        }
    }

    ///Numeric configuration values must describe a non-empty range.
    ///
    ///For example, a word length range of `--min-len 10 --max-len 8` is empty and is rejected,
    ///as is a batch of zero trials.
    C0005: InvalidBounds

    ///An occurrence can only be applied to a word its rule's pattern actually occurs in, at the
    ///occurrence's position.
    ///
    ///Occurrences produced by the occurrence finder for a word are always valid for that word.
    ///This error means an occurrence was carried over to a different word.
    C0006: InvalidOccurrence

    ///Named rule sets are written with a leading "@", for example `@t-prime`. The known names
    ///are listed by `srs --help`.
    C0007: UnknownRuleSet

    ///Invariants are named `parity:<symbol>` (the parity of the number of occurrences of the
    ///symbol) or `count-plus-length:<symbol>` (the parity of the number of occurrences of the
    ///symbol plus the word length).
    C0008: UnknownInvariant
}

/// A fatal configuration error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigurationError {
    EmptyPattern {
        replacement: Word,
    },
    MissingArrow {
        rule: String,
    },
    UnknownSymbol {
        symbol: Symbol,
        alphabet: Alphabet,
    },
    EmptyAlphabet,
    DuplicateSymbol(Symbol),
    ReservedSymbol(Symbol),
    InvalidBounds {
        what: &'static str,
        min: usize,
        max: usize,
    },
    NoTrials,
    InvalidOccurrence {
        occurrence: Occurrence,
        word: Word,
    },
    UnknownRuleSet(String),
    UnknownInvariant(String),
}

impl ConfigurationError {
    /// The diagnostic code explaining this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyPattern { .. } => EmptyPattern::CODE,
            Self::MissingArrow { .. } => MissingArrow::CODE,
            Self::UnknownSymbol { .. } => UnknownSymbol::CODE,
            Self::EmptyAlphabet | Self::DuplicateSymbol(_) | Self::ReservedSymbol(_) => {
                MalformedAlphabet::CODE
            }
            Self::InvalidBounds { .. } | Self::NoTrials => InvalidBounds::CODE,
            Self::InvalidOccurrence { .. } => InvalidOccurrence::CODE,
            Self::UnknownRuleSet(_) => UnknownRuleSet::CODE,
            Self::UnknownInvariant(_) => UnknownInvariant::CODE,
        }
    }

    /// Checks `min..=max` is a non-empty range.
    pub fn check_range(what: &'static str, min: usize, max: usize) -> Result<(), Self> {
        if min > max {
            return Err(Self::InvalidBounds { what, min, max });
        }
        Ok(())
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPattern { replacement } => {
                write!(f, r#"rule "-> {}" has an empty pattern"#, replacement)
            }
            Self::MissingArrow { rule } => write!(f, r#"expected a rule, found "{}""#, rule),
            Self::UnknownSymbol { symbol, alphabet } => {
                write!(f, r#"symbol "{}" is not in the alphabet {}"#, symbol, alphabet)
            }
            Self::EmptyAlphabet => write!(f, "the alphabet is empty"),
            Self::DuplicateSymbol(symbol) => {
                write!(f, r#"symbol "{}" appears in the alphabet twice"#, symbol)
            }
            Self::ReservedSymbol(symbol) => write!(f, r#""{}" cannot be an alphabet symbol"#, symbol),
            Self::InvalidBounds { what, min, max } => write!(
                f,
                "{} range is empty: minimum {} is greater than maximum {}",
                what, min, max
            ),
            Self::NoTrials => write!(f, "a batch must run at least one trial"),
            Self::InvalidOccurrence { occurrence, word } => write!(
                f,
                r#"rule #{} does not occur in "{}" at position {}"#,
                occurrence.rule, word, occurrence.position
            ),
            Self::UnknownRuleSet(name) => write!(f, r#"no rule set is named "{}""#, name),
            Self::UnknownInvariant(name) => write!(f, r#"no invariant is named "{}""#, name),
        }
    }
}

impl Error for ConfigurationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes() {
        assert_eq!(ConfigurationError::EmptyAlphabet.code(), "C0004");
        assert_eq!(ConfigurationError::NoTrials.code(), "C0005");
        assert_eq!(
            ConfigurationError::UnknownRuleSet("x".into()).code(),
            "C0007"
        );
    }

    #[test]
    fn check_range() {
        assert!(ConfigurationError::check_range("word length", 3, 3).is_ok());
        assert_eq!(
            ConfigurationError::check_range("word length", 10, 8)
                .unwrap_err()
                .to_string(),
            "word length range is empty: minimum 10 is greater than maximum 8"
        );
    }

    #[test]
    fn invalid_occurrence_message() {
        let err = ConfigurationError::InvalidOccurrence {
            occurrence: Occurrence::new(2, 5),
            word: Word::from("ab"),
        };
        assert_eq!(err.to_string(), r#"rule #2 does not occur in "ab" at position 5"#);
    }
}
