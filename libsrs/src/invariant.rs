//! Word invariants.
//!
//! An invariant maps a word to an integer that every valid rewrite step of some system
//! preserves. Checking invariants along a derivation catches rules that are not valid steps of
//! the system the invariant characterizes.

use crate::errors::ConfigurationError;
use crate::grammar::{Symbol, Word};

use core::fmt;
use std::str::FromStr;

/// A named function from words to integers.
#[allow(unpredictable_function_pointer_comparisons)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Invariant {
    /// `count(symbol) mod 2`.
    SymbolParity(Symbol),
    /// `(count(symbol) + length) mod 2`.
    CountPlusLengthParity(Symbol),
    /// Any other function.
    Custom {
        name: &'static str,
        eval: fn(&Word) -> i64,
    },
}

/// The value of one invariant at one derivation step, compared against its baseline.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct InvariantCheck {
    pub name: String,
    pub value: i64,
    pub holds: bool,
}

impl Invariant {
    pub fn evaluate(&self, word: &Word) -> i64 {
        match self {
            Self::SymbolParity(symbol) => (word.count(*symbol) % 2) as i64,
            Self::CountPlusLengthParity(symbol) => ((word.count(*symbol) + word.len()) % 2) as i64,
            Self::Custom { eval, .. } => eval(word),
        }
    }

    /// Evaluates the invariant on `word`; it holds iff the value equals `baseline`.
    pub fn check_against_baseline(&self, word: &Word, baseline: i64) -> InvariantCheck {
        let value = self.evaluate(word);
        InvariantCheck {
            name: self.to_string(),
            value,
            holds: value == baseline,
        }
    }
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SymbolParity(symbol) => write!(f, "count({}) mod 2", symbol),
            Self::CountPlusLengthParity(symbol) => {
                write!(f, "(count({}) + length) mod 2", symbol)
            }
            Self::Custom { name, .. } => write!(f, "{}", name),
        }
    }
}

impl fmt::Debug for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invariant({})", self)
    }
}

impl FromStr for Invariant {
    type Err = ConfigurationError;

    /// Parses `parity:<symbol>` or `count-plus-length:<symbol>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || ConfigurationError::UnknownInvariant(s.to_owned());
        let mut parts = s.splitn(2, ':');
        let kind = parts.next().ok_or_else(unknown)?;
        let mut symbol = parts.next().ok_or_else(unknown)?.chars();
        let symbol = match (symbol.next(), symbol.next()) {
            (Some(symbol), None) => symbol,
            _ => return Err(unknown()),
        };
        match kind {
            "parity" => Ok(Self::SymbolParity(symbol)),
            "count-plus-length" => Ok(Self::CountPlusLengthParity(symbol)),
            _ => Err(unknown()),
        }
    }
}

/// A set of invariants checked together along a derivation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvariantChecker {
    invariants: Vec<Invariant>,
}

impl Default for InvariantChecker {
    /// The parity of `b`s and the parity of `a`s plus length, which the `{a, b}` systems in
    /// the registry preserve.
    fn default() -> Self {
        Self::new(vec![
            Invariant::SymbolParity('b'),
            Invariant::CountPlusLengthParity('a'),
        ])
    }
}

impl InvariantChecker {
    pub fn new(invariants: Vec<Invariant>) -> Self {
        Self { invariants }
    }

    pub fn invariants(&self) -> &[Invariant] {
        &self.invariants
    }

    /// Every invariant's value on `word`, in registration order.
    pub fn baseline(&self, word: &Word) -> Vec<i64> {
        self.invariants.iter().map(|inv| inv.evaluate(word)).collect()
    }

    /// Checks every invariant on `word` against `baseline`.
    pub fn check(&self, word: &Word, baseline: &[i64]) -> Vec<InvariantCheck> {
        self.invariants
            .iter()
            .zip(baseline.iter())
            .map(|(inv, &base)| inv.check_against_baseline(word, base))
            .collect()
    }
}
