use super::{Rule, Symbol, Word, EMPTY_WORD};
use crate::errors::ConfigurationError;

use core::fmt;

/// Symbols that structure rule-set sources and so cannot be alphabet symbols.
const RESERVED: &[Symbol] = &[EMPTY_WORD, '_', '-', '>', ',', ';', '@'];

/// A finite set of symbols, in declaration order.
///
/// The order matters only for enumeration, e.g. when generating every word of a length.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<Symbol>,
}

impl Alphabet {
    /// Creates an alphabet, rejecting empty, duplicated, whitespace and reserved symbols.
    pub fn new<I>(symbols: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = Symbol>,
    {
        let mut seen = Vec::new();
        for symbol in symbols {
            if symbol.is_whitespace() || RESERVED.contains(&symbol) {
                return Err(ConfigurationError::ReservedSymbol(symbol));
            }
            if seen.contains(&symbol) {
                return Err(ConfigurationError::DuplicateSymbol(symbol));
            }
            seen.push(symbol);
        }
        if seen.is_empty() {
            return Err(ConfigurationError::EmptyAlphabet);
        }
        Ok(Self { symbols: seen })
    }

    /// The sorted set of symbols mentioned by `rules`. May be empty.
    pub fn infer(rules: &[Rule]) -> Self {
        let mut symbols: Vec<Symbol> = rules
            .iter()
            .flat_map(|rule| {
                rule.pattern()
                    .symbols()
                    .iter()
                    .chain(rule.replacement().symbols())
                    .copied()
            })
            .collect();
        symbols.sort_unstable();
        symbols.dedup();
        Self { symbols }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.symbols.contains(&symbol)
    }

    /// Whether `symbol` may appear in an alphabet at all.
    pub fn is_reserved(symbol: Symbol) -> bool {
        symbol.is_whitespace() || RESERVED.contains(&symbol)
    }

    /// Checks every symbol of `word` belongs to the alphabet.
    pub fn check_word(&self, word: &Word) -> Result<(), ConfigurationError> {
        match word.symbols().iter().find(|&&s| !self.contains(s)) {
            Some(&symbol) => Err(ConfigurationError::UnknownSymbol {
                symbol,
                alphabet: self.clone(),
            }),
            None => Ok(()),
        }
    }

    /// The union of two alphabets, keeping `self`'s order first.
    pub fn union(&self, other: &Alphabet) -> Alphabet {
        let mut symbols = self.symbols.clone();
        for &symbol in other.symbols.iter() {
            if !symbols.contains(&symbol) {
                symbols.push(symbol);
            }
        }
        Alphabet { symbols }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols: Vec<String> = self.symbols.iter().map(|s| s.to_string()).collect();
        write!(f, "{{{}}}", symbols.join(", "))
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Alphabet({})", self)
    }
}

#[cfg(feature = "json")]
impl serde::Serialize for Alphabet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.symbols.iter().collect::<String>())
    }
}
