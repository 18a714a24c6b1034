//! Exhaustive confluence sweeps.

use crate::errors::ConfigurationError;
use crate::generator::all_words;
use crate::grammar::{Alphabet, RuleSet, Word};
use crate::normal_forms::{normal_forms_within, Confluence};

use std::collections::BTreeSet;

/// A word that does not have exactly one normal form.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(tag = "kind", rename_all = "kebab-case"))]
pub enum SweepFinding {
    /// The word reduces to every one of these distinct normal forms.
    Ambiguous { word: Word, forms: BTreeSet<Word> },
    /// Every reduction of the word can be continued forever.
    NoNormalForm { word: Word },
    /// The state bound was hit before the word's normal forms were known.
    Exhausted { word: Word },
}

impl SweepFinding {
    pub fn word(&self) -> &Word {
        match self {
            Self::Ambiguous { word, .. } | Self::NoNormalForm { word } | Self::Exhausted { word } => {
                word
            }
        }
    }
}

/// The result of sweeping every word of one length.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct SweepReport {
    pub length: usize,
    /// Number of words checked.
    pub checked: usize,
    /// Words without a unique normal form, in enumeration order.
    pub findings: Vec<SweepFinding>,
}

impl SweepReport {
    /// Whether every word checked has a unique normal form.
    pub fn is_confluent(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Computes the normal forms of every word of length `len` over `alphabet`, visiting at most
/// `max_states` words per start word.
pub fn confluence_sweep(
    rules: &RuleSet,
    alphabet: &Alphabet,
    len: usize,
    max_states: usize,
) -> Result<SweepReport, ConfigurationError> {
    if alphabet.is_empty() {
        return Err(ConfigurationError::EmptyAlphabet);
    }

    let words = all_words(alphabet, len);
    let mut findings = Vec::new();
    for word in words.iter() {
        let report = normal_forms_within(word, rules, max_states);
        let finding = match report.confluence() {
            Confluence::Unique(_) => continue,
            Confluence::Ambiguous(forms) => SweepFinding::Ambiguous {
                word: word.clone(),
                forms: forms.clone(),
            },
            Confluence::NoNormalForm => SweepFinding::NoNormalForm { word: word.clone() },
            Confluence::Exhausted => SweepFinding::Exhausted { word: word.clone() },
        };
        log::debug!("{:?}", finding);
        findings.push(finding);
    }

    log::info!(
        "swept {} words of length {}: {} without a unique normal form",
        words.len(),
        len,
        findings.len()
    );
    Ok(SweepReport {
        length: len,
        checked: words.len(),
        findings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::DEFAULT_MAX_STATES;
    use crate::utils::test::{t, t_prime};

    use pretty_assertions::assert_eq;

    fn ab() -> Alphabet {
        Alphabet::new("ab".chars()).unwrap()
    }

    #[test]
    fn t_prime_is_confluent() {
        let report = confluence_sweep(&t_prime(), &ab(), 8, DEFAULT_MAX_STATES).unwrap();
        assert_eq!(report.checked, 256);
        assert!(report.is_confluent());
    }

    #[test]
    fn t_is_not_confluent() {
        let report = confluence_sweep(&t(), &ab(), 4, DEFAULT_MAX_STATES).unwrap();
        assert!(!report.is_confluent());
        assert_eq!(
            report.findings,
            vec![SweepFinding::Ambiguous {
                word: Word::from("abab"),
                forms: vec![Word::from("aaa"), Word::from("aabb")].into_iter().collect(),
            }]
        );
    }

    #[test]
    fn findings_by_kind() {
        let rules = RuleSet::from_pairs(&[("ab", "a"), ("ab", "b"), ("ba", "ab")]).unwrap();
        let report = confluence_sweep(&rules, &ab(), 2, DEFAULT_MAX_STATES).unwrap();
        assert_eq!(
            report.findings,
            vec![
                SweepFinding::Ambiguous {
                    word: Word::from("ab"),
                    forms: vec![Word::from("a"), Word::from("b")].into_iter().collect(),
                },
                SweepFinding::Ambiguous {
                    word: Word::from("ba"),
                    forms: vec![Word::from("a"), Word::from("b")].into_iter().collect(),
                },
            ]
        );

        let rules = RuleSet::from_pairs(&[("ab", "ba"), ("ba", "ab")]).unwrap();
        let report = confluence_sweep(&rules, &ab(), 2, DEFAULT_MAX_STATES).unwrap();
        let words: Vec<&Word> = report.findings.iter().map(SweepFinding::word).collect();
        assert_eq!(words, vec![&Word::from("ab"), &Word::from("ba")]);

        let rules = RuleSet::from_pairs(&[("a", "aa")]).unwrap();
        let report = confluence_sweep(&rules, &ab(), 1, 10).unwrap();
        assert_eq!(
            report.findings,
            vec![SweepFinding::Exhausted { word: Word::from("a") }]
        );
    }
}
