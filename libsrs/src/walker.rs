//! Random derivations.
//!
//! A random step picks a rule uniformly among the rules that apply, then a position uniformly
//! among that rule's occurrences. This is not the same distribution as picking uniformly among
//! all occurrences: a rule with many occurrences is as likely to be chosen as a rule with one.
//! Randomized trials depend on this two-stage law, so it must not be "simplified".

use crate::grammar::{Occurrence, RuleSet, Word};
use crate::rewriter::{is_irreducible, rewrite_at};

use core::fmt;
use rand::Rng;

/// When a random derivation stops.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum WalkPolicy {
    /// Stop after this many steps, or earlier at a fixpoint.
    Bounded(usize),
    /// Stop at a fixpoint. `max_steps` guards against rule sets that never terminate.
    ToFixpoint { max_steps: usize },
}

impl WalkPolicy {
    fn max_steps(self) -> usize {
        match self {
            Self::Bounded(steps) => steps,
            Self::ToFixpoint { max_steps } => max_steps,
        }
    }
}

impl fmt::Display for WalkPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bounded(steps) => write!(f, "{} steps", steps),
            Self::ToFixpoint { max_steps } => write!(f, "fixpoint (at most {} steps)", max_steps),
        }
    }
}

/// The end of a random derivation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Walk {
    /// The derived word.
    pub word: Word,
    /// Number of rewrite steps taken.
    pub steps: usize,
    /// Whether `word` is irreducible. If false, the derivation stopped at its step bound.
    pub at_fixpoint: bool,
}

/// Picks a random occurrence in `word` by the two-stage law, or `None` if no rule applies.
pub fn choose_occurrence<R>(word: &Word, rules: &RuleSet, rng: &mut R) -> Option<Occurrence>
where
    R: Rng + ?Sized,
{
    let applicable: Vec<(usize, Vec<usize>)> = rules
        .iter()
        .enumerate()
        .map(|(i, rule)| (i, word.positions_of(rule.pattern())))
        .filter(|(_, positions)| !positions.is_empty())
        .collect();
    if applicable.is_empty() {
        return None;
    }

    let (rule, positions) = &applicable[rng.gen_range(0..applicable.len())];
    let position = positions[rng.gen_range(0..positions.len())];
    Some(Occurrence::new(*rule, position))
}

/// Takes one random rewrite step, returning the occurrence applied and the new word.
///
/// Returns `None` at a fixpoint.
pub fn step_with_occurrence<R>(
    word: &Word,
    rules: &RuleSet,
    rng: &mut R,
) -> Option<(Occurrence, Word)>
where
    R: Rng + ?Sized,
{
    let occurrence = choose_occurrence(word, rules, rng)?;
    let rule = &rules.rules()[occurrence.rule];
    Some((occurrence, rewrite_at(word, rule, occurrence.position)))
}

/// Takes one random rewrite step. A word no rule applies to is returned unchanged.
pub fn step<R>(word: &Word, rules: &RuleSet, rng: &mut R) -> Word
where
    R: Rng + ?Sized,
{
    match step_with_occurrence(word, rules, rng) {
        Some((_, next)) => next,
        None => word.clone(),
    }
}

/// Repeatedly takes random steps from `word` until `policy` says to stop.
pub fn derive<R>(word: &Word, rules: &RuleSet, rng: &mut R, policy: WalkPolicy) -> Walk
where
    R: Rng + ?Sized,
{
    let mut current = word.clone();
    let mut steps = 0;
    while steps < policy.max_steps() {
        match step_with_occurrence(&current, rules, rng) {
            Some((_, next)) => {
                current = next;
                steps += 1;
            }
            None => {
                return Walk {
                    word: current,
                    steps,
                    at_fixpoint: true,
                }
            }
        }
    }

    let at_fixpoint = is_irreducible(&current, rules);
    if !at_fixpoint {
        if let WalkPolicy::ToFixpoint { max_steps } = policy {
            log::debug!(
                "derivation from {} stopped after {} steps without reaching a fixpoint",
                word,
                max_steps
            );
        }
    }
    Walk {
        word: current,
        steps,
        at_fixpoint,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewriter::find_occurrences;
    use crate::utils::test::{rng, t_prime};

    #[test]
    fn step_at_fixpoint_is_noop() {
        let rules = t_prime();
        let word = Word::from("ab");
        assert_eq!(step(&word, &rules, &mut rng(0)), word);
        assert_eq!(step_with_occurrence(&word, &rules, &mut rng(0)), None);
    }

    #[test]
    fn step_applies_a_real_occurrence() {
        let rules = t_prime();
        let word = Word::from("baabbbab");
        let occurrences = find_occurrences(&word, &rules);
        let mut rng = rng(7);
        for _ in 0..50 {
            let (occurrence, _) = step_with_occurrence(&word, &rules, &mut rng).unwrap();
            assert!(occurrences.contains(&occurrence));
        }
    }

    #[test]
    fn same_seed_same_choices() {
        let rules = t_prime();
        let word = Word::from("babbaabababbbaab");
        let policy = WalkPolicy::ToFixpoint { max_steps: 100 };
        let first = derive(&word, &rules, &mut rng(42), policy);
        let second = derive(&word, &rules, &mut rng(42), policy);
        assert_eq!(first, second);
    }

    #[test]
    fn rules_are_chosen_uniformly_not_occurrences() {
        // "a" occurs 9 times and "b" once; rule choice must still be a coin flip.
        let rules = RuleSet::from_pairs(&[("a", "c"), ("b", "c")]).unwrap();
        let word = Word::from("aaaaaaaaab");
        let mut rng = rng(3);
        let trials = 4000;
        let b_rewrites = (0..trials)
            .filter_map(|_| choose_occurrence(&word, &rules, &mut rng))
            .filter(|occ| occ.rule == 1)
            .count();
        let ratio = b_rewrites as f64 / trials as f64;
        assert!(ratio > 0.45 && ratio < 0.55, "ratio {}", ratio);
    }

    #[test]
    fn positions_are_chosen_uniformly() {
        let rules = RuleSet::from_pairs(&[("a", "b")]).unwrap();
        let word = Word::from("aaaa");
        let mut counts = [0usize; 4];
        let mut rng = rng(11);
        for _ in 0..4000 {
            let occ = choose_occurrence(&word, &rules, &mut rng).unwrap();
            counts[occ.position] += 1;
        }
        for count in counts.iter() {
            assert!(*count > 850 && *count < 1150, "{:?}", counts);
        }
    }

    #[test]
    fn bounded_policy() {
        let rules = RuleSet::from_pairs(&[("ab", "ba"), ("ba", "ab")]).unwrap();
        let walk = derive(&Word::from("aabb"), &rules, &mut rng(1), WalkPolicy::Bounded(5));
        assert_eq!(walk.steps, 5);
        assert!(!walk.at_fixpoint);

        let walk = derive(&Word::from("aabb"), &rules, &mut rng(1), WalkPolicy::Bounded(0));
        assert_eq!(walk.word, Word::from("aabb"));
        assert_eq!(walk.steps, 0);
    }

    #[test]
    fn bounded_policy_stops_early_at_fixpoint() {
        let rules = RuleSet::from_pairs(&[("b", "")]).unwrap();
        let walk = derive(&Word::from("abab"), &rules, &mut rng(1), WalkPolicy::Bounded(10));
        assert_eq!(walk.word, Word::from("aa"));
        assert_eq!(walk.steps, 2);
        assert!(walk.at_fixpoint);
    }

    #[test]
    fn fixpoint_policy_reaches_normal_form() {
        let rules = t_prime();
        let policy = WalkPolicy::ToFixpoint { max_steps: 1000 };
        for seed in 0..20 {
            let walk = derive(&Word::from("bbabaabbbaba"), &rules, &mut rng(seed), policy);
            assert!(walk.at_fixpoint);
            assert!(is_irreducible(&walk.word, &rules));
        }
    }

    #[test]
    fn fixpoint_policy_is_bounded() {
        let rules = RuleSet::from_pairs(&[("a", "aa")]).unwrap();
        let policy = WalkPolicy::ToFixpoint { max_steps: 25 };
        let walk = derive(&Word::from("a"), &rules, &mut rng(0), policy);
        assert_eq!(walk.steps, 25);
        assert_eq!(walk.word.len(), 26);
        assert!(!walk.at_fixpoint);
    }
}
