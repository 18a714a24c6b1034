use core::fmt;

/// A single alphabet symbol.
pub type Symbol = char;

/// How the empty word is written in rule-set sources and emitted output.
pub const EMPTY_WORD: Symbol = 'ε';

/// A finite, immutable sequence of symbols.
///
/// The empty word is a valid word; it is displayed as "ε".
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Word {
    symbols: Vec<Symbol>,
}

impl Word {
    pub fn new<I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = Symbol>,
    {
        Self {
            symbols: symbols.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Number of times `symbol` occurs in the word.
    pub fn count(&self, symbol: Symbol) -> usize {
        self.symbols.iter().filter(|&&s| s == symbol).count()
    }

    /// Every start position at which `pattern` occurs as a contiguous subword, in ascending
    /// order. Overlapping occurrences are all reported: "aaa" occurs in "aaaa" at 0 and 1.
    ///
    /// The empty pattern occurs nowhere.
    pub fn positions_of(&self, pattern: &Word) -> Vec<usize> {
        if pattern.is_empty() || pattern.len() > self.len() {
            return Vec::new();
        }
        self.symbols
            .windows(pattern.len())
            .enumerate()
            .filter(|(_, window)| *window == pattern.symbols())
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether `pattern` occurs in the word starting exactly at `position`.
    pub fn matches_at(&self, pattern: &Word, position: usize) -> bool {
        self.symbols
            .get(position..position + pattern.len())
            .map_or(false, |window| window == pattern.symbols())
    }

    /// Replaces the `len` symbols starting at `at` with `with`.
    ///
    /// Callers must ensure `at + len <= self.len()`.
    pub(crate) fn splice(&self, at: usize, len: usize, with: &Word) -> Word {
        let mut symbols = Vec::with_capacity(self.len() - len + with.len());
        symbols.extend_from_slice(&self.symbols[..at]);
        symbols.extend_from_slice(&with.symbols);
        symbols.extend_from_slice(&self.symbols[at + len..]);
        Word { symbols }
    }
}

impl From<&str> for Word {
    fn from(s: &str) -> Self {
        Self::new(s.chars().filter(|&c| c != EMPTY_WORD))
    }
}

impl From<Vec<Symbol>> for Word {
    fn from(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "{}", EMPTY_WORD);
        }
        for symbol in self.symbols.iter() {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({:?})", self.symbols.iter().collect::<String>())
    }
}

#[cfg(feature = "json")]
impl serde::Serialize for Word {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.symbols.iter().collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! positions_tests {
        ($($name:ident: $word:expr, $pattern:expr => $positions:expr)*) => {
        $(
            #[test]
            fn $name() {
                let word = Word::from($word);
                let expected: &[usize] = &$positions;
                assert_eq!(word.positions_of(&Word::from($pattern)), expected);
            }
        )*
        }
    }

    mod positions_of {
        use super::*;

        positions_tests! {
            single:              "baaa", "baa"  => [0]
            overlapping:         "aaaa", "aaa"  => [0, 1]
            overlapping_pairs:   "ababab", "abab" => [0, 2]
            none:                "bbbb", "a"    => []
            longer_than_word:    "ab", "abb"    => []
            whole_word:          "abb", "abb"   => [0]
            every_symbol:        "aaa", "a"     => [0, 1, 2]
            empty_pattern:       "ab", ""       => []
            empty_word:          "", "a"        => []
        }
    }

    #[test]
    fn splice_replaces_window() {
        let word = Word::from("baaa");
        assert_eq!(word.splice(1, 3, &Word::from("aa")), Word::from("baa"));
        assert_eq!(word.splice(0, 3, &Word::from("ab")), Word::from("aba"));
        assert_eq!(word.splice(0, 4, &Word::empty()), Word::empty());
    }

    #[test]
    fn matches_at_checks_bounds() {
        let word = Word::from("abab");
        assert!(word.matches_at(&Word::from("ab"), 2));
        assert!(!word.matches_at(&Word::from("ab"), 1));
        assert!(!word.matches_at(&Word::from("ab"), 3));
        assert!(!word.matches_at(&Word::from("ab"), 17));
    }

    #[test]
    fn display() {
        assert_eq!(Word::from("abba").to_string(), "abba");
        assert_eq!(Word::empty().to_string(), "ε");
        assert_eq!(Word::from("ε"), Word::empty());
        assert_eq!(format!("{:?}", Word::from("ab")), r#"Word("ab")"#);
    }

    #[test]
    fn count() {
        let word = Word::from("abbab");
        assert_eq!(word.count('a'), 2);
        assert_eq!(word.count('b'), 3);
        assert_eq!(word.count('c'), 0);
    }
}
