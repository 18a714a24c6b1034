//! Randomized equivalence trials.
//!
//! A trial generates a random word `w`, derives `WA` from it under the first rule set and `WB`
//! under the second (or takes `WB = w`), then asks whether `WA` and `WB` are connected under a
//! reference rule set, in either direction. If the first and second rule sets induce the same
//! congruence as the reference, every trial passes.

use super::Verdict;
use crate::errors::ConfigurationError;
use crate::generator::{random_length, random_word};
use crate::grammar::{Alphabet, RuleSet, Word};
use crate::search::{reachable_within, Reachability, SearchLimits};
use crate::utils::percent;
use crate::walker::{derive, WalkPolicy};

use rand::Rng;

/// How far the sides of a trial are derived.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrialPolicy {
    /// Derive to a fixpoint, taking at most `max_steps` steps.
    Fixpoint { max_steps: usize },
    /// Derive for a number of steps drawn uniformly from `min..=max`, stopping early at a
    /// fixpoint. Both sides of a trial take the same number of steps.
    RandomSteps { min: usize, max: usize },
}

/// Where the second word of a trial comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SecondSide {
    /// The start word itself.
    Original,
    /// A derivation of the start word under this rule set.
    Derive(RuleSet),
}

/// The configuration of an equivalence trial.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrialConfig {
    /// Symbols start words are drawn from.
    pub alphabet: Alphabet,
    pub first: RuleSet,
    pub second: SecondSide,
    /// The rule set reachability is decided under.
    pub reference: RuleSet,
    pub min_len: usize,
    pub max_len: usize,
    pub policy: TrialPolicy,
    pub limits: SearchLimits,
}

impl TrialConfig {
    /// Compares `first` against `reference`, deriving both sides to a fixpoint from words of
    /// length 8 to 10.
    pub fn new(first: RuleSet, reference: RuleSet) -> Self {
        Self {
            alphabet: first.alphabet().union(reference.alphabet()),
            second: SecondSide::Derive(reference.clone()),
            first,
            reference,
            min_len: 8,
            max_len: 10,
            policy: TrialPolicy::Fixpoint { max_steps: 100 },
            limits: SearchLimits::default(),
        }
    }

    /// Checks every range in the configuration is non-empty.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        ConfigurationError::check_range("word length", self.min_len, self.max_len)?;
        if let TrialPolicy::RandomSteps { min, max } = self.policy {
            ConfigurationError::check_range("step count", min, max)?;
        }
        if self.alphabet.is_empty() {
            return Err(ConfigurationError::EmptyAlphabet);
        }
        Ok(())
    }
}

/// The record of one equivalence trial.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct TrialResult {
    pub start: Word,
    /// `WA`, the start word derived under the first rule set.
    pub first: Word,
    /// `WB`, the start word or its derivation under the second rule set.
    pub second: Word,
    /// Whether `WA` is reachable from `WB`.
    pub forward: Reachability,
    /// Whether `WB` is reachable from `WA`.
    pub backward: Reachability,
    pub verdict: Verdict,
}

impl TrialResult {
    fn decide(forward: &Reachability, backward: &Reachability) -> Verdict {
        if forward.outcome.is_found() || backward.outcome.is_found() {
            Verdict::Passed
        } else if forward.outcome.is_exhausted() || backward.outcome.is_exhausted() {
            Verdict::Inconclusive
        } else {
            Verdict::Failed
        }
    }
}

/// Aggregated results of a batch of equivalence trials.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct BatchReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub inconclusive: usize,
    /// Every trial that did not pass, in the order it ran. Trial numbers start at 1.
    pub failures: Vec<(usize, TrialResult)>,
}

impl BatchReport {
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }

    /// `count` out of the batch total as a percentage with one decimal.
    pub fn percent(&self, count: usize) -> String {
        percent(count, self.total)
    }
}

/// Runs one equivalence trial.
pub fn random_trial<R>(config: &TrialConfig, rng: &mut R) -> Result<TrialResult, ConfigurationError>
where
    R: Rng + ?Sized,
{
    config.validate()?;
    let len = random_length(config.min_len, config.max_len, rng)?;
    let start = random_word(&config.alphabet, len, rng);

    let walk_policy = match config.policy {
        TrialPolicy::Fixpoint { max_steps } => WalkPolicy::ToFixpoint { max_steps },
        TrialPolicy::RandomSteps { min, max } => WalkPolicy::Bounded(rng.gen_range(min..=max)),
    };
    let first = derive(&start, &config.first, rng, walk_policy).word;
    let second = match &config.second {
        SecondSide::Original => start.clone(),
        SecondSide::Derive(rules) => derive(&start, rules, rng, walk_policy).word,
    };

    let forward = reachable_within(&second, &first, &config.reference, &config.limits);
    let backward = reachable_within(&first, &second, &config.reference, &config.limits);
    let verdict = TrialResult::decide(&forward, &backward);

    Ok(TrialResult {
        start,
        first,
        second,
        forward,
        backward,
        verdict,
    })
}

/// Runs `n` independent equivalence trials and aggregates them.
pub fn run_batch<R>(n: usize, config: &TrialConfig, rng: &mut R) -> Result<BatchReport, ConfigurationError>
where
    R: Rng + ?Sized,
{
    if n == 0 {
        return Err(ConfigurationError::NoTrials);
    }
    config.validate()?;

    let mut report = BatchReport {
        total: n,
        passed: 0,
        failed: 0,
        inconclusive: 0,
        failures: Vec::new(),
    };
    for i in 1..=n {
        let trial = random_trial(config, rng)?;
        match trial.verdict {
            Verdict::Passed => {
                report.passed += 1;
                continue;
            }
            Verdict::Failed => report.failed += 1,
            Verdict::Inconclusive => report.inconclusive += 1,
        }
        log::debug!("trial {} {}: {}", i, trial.verdict, trial);
        report.failures.push((i, trial));
    }

    log::info!(
        "{} equivalence trials: {} passed, {} failed, {} inconclusive",
        report.total,
        report.passed,
        report.failed,
        report.inconclusive
    );
    Ok(report)
}
