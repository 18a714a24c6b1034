//! Enumerating normal forms.
//!
//! A rule set is confluent on a word if every way of reducing the word ends at the same
//! irreducible word. [`normal_forms`] probes this by exploring every word reachable from the
//! start and collecting the irreducible ones.

use crate::grammar::{RuleSet, Word};
use crate::rewriter::successors;
use crate::search::DEFAULT_MAX_STATES;

use rustc_hash::FxHashSet;
use std::collections::{BTreeSet, VecDeque};

/// Every normal form reachable from a word, as far as the state bound allowed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct NormalFormReport {
    pub start: Word,
    /// Irreducible words found, in word order.
    pub forms: BTreeSet<Word>,
    /// Distinct words dequeued and expanded.
    pub explored: usize,
    /// Whether exploration stopped at the state bound with words left unexplored.
    pub exhausted: bool,
}

/// What a [`NormalFormReport`] says about confluence on its start word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Confluence<'a> {
    /// Every reduction ends at this word.
    Unique(&'a Word),
    /// At least two distinct normal forms are reachable.
    Ambiguous(&'a BTreeSet<Word>),
    /// No normal form is reachable; every reduction can be continued forever.
    NoNormalForm,
    /// The state bound was hit before a verdict.
    Exhausted,
}

impl NormalFormReport {
    pub fn confluence(&self) -> Confluence<'_> {
        match (self.forms.len(), self.exhausted) {
            (n, _) if n > 1 => Confluence::Ambiguous(&self.forms),
            (_, true) => Confluence::Exhausted,
            (0, false) => Confluence::NoNormalForm,
            _ => match self.forms.iter().next() {
                Some(form) => Confluence::Unique(form),
                None => Confluence::NoNormalForm,
            },
        }
    }

    /// Whether the start word provably has exactly one normal form.
    pub fn is_unique(&self) -> bool {
        matches!(self.confluence(), Confluence::Unique(_))
    }
}

/// Finds every normal form reachable from `word`, visiting at most [`DEFAULT_MAX_STATES`]
/// distinct words.
pub fn normal_forms(word: &Word, rules: &RuleSet) -> NormalFormReport {
    normal_forms_within(word, rules, DEFAULT_MAX_STATES)
}

/// Finds every normal form reachable from `word`, visiting at most `max_states` distinct
/// words.
pub fn normal_forms_within(word: &Word, rules: &RuleSet, max_states: usize) -> NormalFormReport {
    let mut report = NormalFormReport {
        start: word.clone(),
        forms: BTreeSet::new(),
        explored: 0,
        exhausted: false,
    };

    let mut visited = FxHashSet::default();
    let mut queue = VecDeque::new();
    visited.insert(word.clone());
    queue.push_back(word.clone());

    'explore: while let Some(current) = queue.pop_front() {
        report.explored += 1;
        let next = successors(&current, rules);
        if next.is_empty() {
            report.forms.insert(current);
            continue;
        }
        for successor in next {
            if visited.contains(&successor) {
                continue;
            }
            if visited.len() >= max_states {
                log::debug!(
                    "normal forms of {}: stopped after {} words",
                    word,
                    visited.len()
                );
                report.exhausted = true;
                break 'explore;
            }
            visited.insert(successor.clone());
            queue.push_back(successor);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Occurrence;
    use crate::rewriter::{apply, find_occurrences, is_irreducible};
    use crate::utils::test::{rng, t_prime};
    use crate::walker::{derive, WalkPolicy};

    use pretty_assertions::assert_eq;

    fn set(words: &[&str]) -> BTreeSet<Word> {
        words.iter().map(|w| Word::from(*w)).collect()
    }

    #[test]
    fn t_prime_is_confluent_on_baaa() {
        let report = normal_forms(&Word::from("baaa"), &t_prime());
        assert_eq!(report.forms, set(&["ab"]));
        assert_eq!(report.explored, 4);
        assert!(!report.exhausted);
        assert_eq!(report.confluence(), Confluence::Unique(&Word::from("ab")));
    }

    #[test]
    fn both_reduction_orders_of_baaa_meet() {
        let rules = t_prime();
        let baaa = Word::from("baaa");
        // "baa -> ab" first: baaa -> aba -> ab.
        let by_baa = apply(&baaa, Occurrence::new(6, 0), &rules).unwrap();
        assert_eq!(by_baa, Word::from("aba"));
        let by_baa = apply(&by_baa, Occurrence::new(4, 0), &rules).unwrap();
        // "aaa -> aa" first: baaa -> baa -> ab.
        let by_aaa = apply(&baaa, Occurrence::new(2, 1), &rules).unwrap();
        assert_eq!(by_aaa, Word::from("baa"));
        let by_aaa = apply(&by_aaa, Occurrence::new(6, 0), &rules).unwrap();

        assert_eq!(by_baa, Word::from("ab"));
        assert_eq!(by_aaa, Word::from("ab"));
        assert!(is_irreducible(&by_baa, &rules));
    }

    #[test]
    fn every_form_is_a_fixpoint() {
        let rules = t_prime();
        for word in &["bbabaabbba", "aaaaaaa", "babababab", ""] {
            let report = normal_forms(&Word::from(*word), &rules);
            for form in report.forms.iter() {
                assert!(find_occurrences(form, &rules).is_empty());
            }
        }
    }

    #[test]
    fn random_fixpoints_are_among_the_forms() {
        let rules = t_prime();
        let word = Word::from("abbaabab");
        let report = normal_forms(&word, &rules);
        let policy = WalkPolicy::ToFixpoint { max_steps: 100 };
        for seed in 0..10 {
            let walk = derive(&word, &rules, &mut rng(seed), policy);
            assert!(report.forms.contains(&walk.word));
        }
    }

    #[test]
    fn ambiguous() {
        let rules = RuleSet::from_pairs(&[("ab", "a"), ("ab", "b")]).unwrap();
        let report = normal_forms(&Word::from("ab"), &rules);
        assert_eq!(report.forms, set(&["a", "b"]));
        assert_eq!(report.confluence(), Confluence::Ambiguous(&set(&["a", "b"])));
    }

    #[test]
    fn cycle_without_exit() {
        let rules = RuleSet::from_pairs(&[("ab", "ba"), ("ba", "ab")]).unwrap();
        let report = normal_forms(&Word::from("ab"), &rules);
        assert!(report.forms.is_empty());
        assert_eq!(report.explored, 2);
        assert_eq!(report.confluence(), Confluence::NoNormalForm);
    }

    #[test]
    fn irreducible_start() {
        let report = normal_forms(&Word::from("ab"), &t_prime());
        assert_eq!(report.forms, set(&["ab"]));
        assert_eq!(report.explored, 1);
    }

    #[test]
    fn state_bound() {
        let rules = RuleSet::from_pairs(&[("a", "aa"), ("a", "ab")]).unwrap();
        let report = normal_forms_within(&Word::from("a"), &rules, 20);
        assert!(report.exhausted);
        assert!(!report.is_unique());
        assert_eq!(report.confluence(), Confluence::Exhausted);
    }
}
