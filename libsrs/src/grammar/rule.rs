use super::{Alphabet, Word};
use crate::errors::ConfigurationError;

use core::fmt;

/// A rewrite rule `pattern -> replacement` over contiguous subwords.
///
/// The pattern is never empty; the replacement may be.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Rule {
    pattern: Word,
    replacement: Word,
}

impl Rule {
    pub fn new<P, R>(pattern: P, replacement: R) -> Result<Self, ConfigurationError>
    where
        P: Into<Word>,
        R: Into<Word>,
    {
        let pattern = pattern.into();
        let replacement = replacement.into();
        if pattern.is_empty() {
            return Err(ConfigurationError::EmptyPattern { replacement });
        }
        Ok(Self {
            pattern,
            replacement,
        })
    }

    pub fn pattern(&self) -> &Word {
        &self.pattern
    }

    pub fn replacement(&self) -> &Word {
        &self.replacement
    }

    /// How much applying the rule changes a word's length.
    pub fn length_delta(&self) -> isize {
        self.replacement.len() as isize - self.pattern.len() as isize
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.pattern, self.replacement)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule({})", self)
    }
}

/// One place a rule's pattern occurs inside a specific word.
///
/// Two occurrences are distinct if either field differs, even when applying them yields the
/// same word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Occurrence {
    /// Index of the rule in its owning [`RuleSet`].
    pub rule: usize,
    /// Start position of the pattern in the word.
    pub position: usize,
}

impl Occurrence {
    pub fn new(rule: usize, position: usize) -> Self {
        Self { rule, position }
    }
}

/// An ordered set of rules over one alphabet.
///
/// Rule order has no effect on which rewrites exist. It fixes the order occurrences are
/// reported in and how rules are numbered in output.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct RuleSet {
    alphabet: Alphabet,
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates a rule set, checking every rule only mentions symbols of `alphabet`.
    pub fn new(alphabet: Alphabet, rules: Vec<Rule>) -> Result<Self, ConfigurationError> {
        for rule in rules.iter() {
            alphabet.check_word(rule.pattern())?;
            alphabet.check_word(rule.replacement())?;
        }
        Ok(Self { alphabet, rules })
    }

    /// Creates a rule set from `(pattern, replacement)` pairs, inferring the alphabet.
    ///
    /// ```
    /// use libsrs::RuleSet;
    ///
    /// let rules = RuleSet::from_pairs(&[("ab", "ba"), ("bb", "")]).unwrap();
    /// assert_eq!(rules.len(), 2);
    /// assert_eq!(rules.alphabet().symbols(), &['a', 'b']);
    /// ```
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Result<Self, ConfigurationError> {
        let rules = pairs
            .iter()
            .map(|&(pattern, replacement)| Rule::new(pattern, replacement))
            .collect::<Result<Vec<_>, _>>()?;
        let alphabet = Alphabet::infer(&rules);
        Ok(Self { alphabet, rules })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// A display name for the rule at `index`, like "#2 aaa -> aa".
    pub fn describe(&self, index: usize) -> String {
        match self.rules.get(index) {
            Some(rule) => format!("#{} {}", index, rule),
            None => format!("#{} <no such rule>", index),
        }
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules: Vec<String> = self.rules.iter().map(|r| r.to_string()).collect();
        write!(f, "{}", rules.join(", "))
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("alphabet", &self.alphabet)
            .field("rules", &self.rules)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_pattern() {
        assert_eq!(
            Rule::new("", "ab").unwrap_err(),
            ConfigurationError::EmptyPattern {
                replacement: Word::from("ab")
            }
        );
        assert!(RuleSet::from_pairs(&[("a", "b"), ("ε", "a")]).is_err());
    }

    #[test]
    fn allows_empty_replacement() {
        let rule = Rule::new("ab", "").unwrap();
        assert!(rule.replacement().is_empty());
        assert_eq!(rule.to_string(), "ab -> ε");
        assert_eq!(rule.length_delta(), -2);
    }

    #[test]
    fn new_checks_alphabet() {
        let alphabet = Alphabet::new("ab".chars()).unwrap();
        let rules = vec![Rule::new("ab", "c").unwrap()];
        assert!(matches!(
            RuleSet::new(alphabet, rules),
            Err(ConfigurationError::UnknownSymbol { symbol: 'c', .. })
        ));
    }

    #[test]
    fn describe_and_display() {
        let rules = RuleSet::from_pairs(&[("bbb", "b"), ("aaa", "aa")]).unwrap();
        assert_eq!(rules.describe(1), "#1 aaa -> aa");
        assert_eq!(rules.describe(2), "#2 <no such rule>");
        assert_eq!(rules.to_string(), "bbb -> b, aaa -> aa");
    }
}
