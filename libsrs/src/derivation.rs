//! Traced random derivations.

use crate::grammar::{RuleSet, Word};
use crate::invariant::{InvariantCheck, InvariantChecker};
use crate::walker::step_with_occurrence;

use rand::Rng;

/// One word in a [`Derivation`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct DerivationStep {
    pub word: Word,
    /// Index of this step; the start word is step 0.
    pub step: usize,
    /// The rule that produced `word`, like `#3 aaa -> aa`. `None` for the start word.
    pub rule: Option<String>,
    /// Every registered invariant evaluated on `word`.
    pub invariants: Vec<InvariantCheck>,
}

impl DerivationStep {
    /// Whether every invariant holds at this step.
    pub fn holds(&self) -> bool {
        self.invariants.iter().all(|check| check.holds)
    }
}

/// A path through the rewrite relation from a start word.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Derivation {
    pub steps: Vec<DerivationStep>,
}

impl Derivation {
    pub fn start(&self) -> Option<&Word> {
        self.steps.first().map(|step| &step.word)
    }

    pub fn end(&self) -> Option<&Word> {
        self.steps.last().map(|step| &step.word)
    }

    /// Rewrite steps taken, not counting the start word.
    pub fn len(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Steps at which some invariant did not hold.
    pub fn violations(&self) -> impl Iterator<Item = &DerivationStep> {
        self.steps.iter().filter(|step| !step.holds())
    }

    pub fn holds(&self) -> bool {
        self.violations().next().is_none()
    }
}

/// Takes up to `max_steps` random steps from `word`, checking `checker`'s invariants against
/// their values on `word` after every step.
///
/// An invariant that stops holding does not end the derivation, so the whole trace is kept.
pub fn trace<R>(
    word: &Word,
    rules: &RuleSet,
    checker: &InvariantChecker,
    rng: &mut R,
    max_steps: usize,
) -> Derivation
where
    R: Rng + ?Sized,
{
    let baseline = checker.baseline(word);
    let mut steps = vec![DerivationStep {
        word: word.clone(),
        step: 0,
        rule: None,
        invariants: checker.check(word, &baseline),
    }];

    let mut current = word.clone();
    for step in 1..=max_steps {
        let (occurrence, next) = match step_with_occurrence(&current, rules, rng) {
            Some(applied) => applied,
            None => break,
        };
        let derivation_step = DerivationStep {
            invariants: checker.check(&next, &baseline),
            rule: Some(rules.describe(occurrence.rule)),
            word: next.clone(),
            step,
        };
        if !derivation_step.holds() {
            log::warn!(
                "{} -> {} by {} breaks an invariant",
                current,
                next,
                rules.describe(occurrence.rule)
            );
        }
        steps.push(derivation_step);
        current = next;
    }

    Derivation { steps }
}
