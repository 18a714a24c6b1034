//! Invariant trials.
//!
//! A rule set that is a valid presentation of a system must preserve that system's invariants
//! at every single step. These trials take short random derivations and check each step.

use super::Verdict;
use crate::derivation::{trace, Derivation};
use crate::errors::ConfigurationError;
use crate::generator::{random_length, random_word};
use crate::grammar::{Alphabet, RuleSet};
use crate::invariant::InvariantChecker;
use crate::utils::percent;

use rand::Rng;

/// The configuration of an invariant trial.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvariantTrialConfig {
    pub alphabet: Alphabet,
    pub rules: RuleSet,
    pub checker: InvariantChecker,
    pub min_len: usize,
    pub max_len: usize,
    pub max_steps: usize,
}

impl InvariantTrialConfig {
    /// Checks the default invariants under `rules` on words of length 3 to 20, five steps at a
    /// time.
    pub fn new(rules: RuleSet) -> Self {
        Self {
            alphabet: rules.alphabet().clone(),
            rules,
            checker: InvariantChecker::default(),
            min_len: 3,
            max_len: 20,
            max_steps: 5,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        ConfigurationError::check_range("word length", self.min_len, self.max_len)?;
        if self.alphabet.is_empty() {
            return Err(ConfigurationError::EmptyAlphabet);
        }
        Ok(())
    }
}

/// Aggregated results of a batch of invariant trials.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct InvariantBatchReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Every trial's derivation, in the order it ran.
    pub trials: Vec<Derivation>,
}

impl InvariantBatchReport {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn percent(&self, count: usize) -> String {
        percent(count, self.total)
    }
}

/// Runs one invariant trial. It fails iff some invariant stops holding at some step.
pub fn invariant_trial<R>(
    config: &InvariantTrialConfig,
    rng: &mut R,
) -> Result<(Verdict, Derivation), ConfigurationError>
where
    R: Rng + ?Sized,
{
    config.validate()?;
    let len = random_length(config.min_len, config.max_len, rng)?;
    let start = random_word(&config.alphabet, len, rng);
    let derivation = trace(&start, &config.rules, &config.checker, rng, config.max_steps);
    let verdict = if derivation.holds() {
        Verdict::Passed
    } else {
        Verdict::Failed
    };
    Ok((verdict, derivation))
}

/// Runs `n` independent invariant trials and aggregates them.
pub fn run_invariant_batch<R>(
    n: usize,
    config: &InvariantTrialConfig,
    rng: &mut R,
) -> Result<InvariantBatchReport, ConfigurationError>
where
    R: Rng + ?Sized,
{
    if n == 0 {
        return Err(ConfigurationError::NoTrials);
    }
    config.validate()?;

    let mut report = InvariantBatchReport {
        total: n,
        passed: 0,
        failed: 0,
        trials: Vec::with_capacity(n),
    };
    for _ in 0..n {
        let (verdict, derivation) = invariant_trial(config, rng)?;
        match verdict {
            Verdict::Passed => report.passed += 1,
            _ => report.failed += 1,
        }
        report.trials.push(derivation);
    }

    log::info!(
        "{} invariant trials: {} passed, {} failed",
        report.total,
        report.passed,
        report.failed
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invariant::Invariant;
    use crate::registry::RuleSetName;
    use crate::utils::test::{rng, t_prime};

    #[test]
    fn t_prime_ext_preserves_invariants() {
        let rules = RuleSetName::TPrimeExt.build().unwrap();
        let config = InvariantTrialConfig::new(rules);
        let report = run_invariant_batch(15, &config, &mut rng(15)).unwrap();
        assert!(report.all_passed());
        assert_eq!(report.passed, 15);
        assert_eq!(report.trials.len(), 15);
        for derivation in report.trials.iter() {
            assert!(derivation.len() <= 5);
            let start = derivation.start().unwrap();
            assert!((3..=20).contains(&start.len()));
        }
    }

    #[test]
    fn parity_breaking_rule_fails() {
        let rules = RuleSet::from_pairs(&[("b", "a")]).unwrap();
        let mut config = InvariantTrialConfig::new(rules);
        config.checker = InvariantChecker::new(vec![Invariant::SymbolParity('b')]);
        config.min_len = 6;
        config.alphabet = Alphabet::new("b".chars()).unwrap();
        let (verdict, derivation) = invariant_trial(&config, &mut rng(0)).unwrap();
        assert_eq!(verdict, Verdict::Failed);
        assert_eq!(derivation.violations().next().map(|s| s.step), Some(1));
    }

    #[test]
    fn percentages() {
        let config = InvariantTrialConfig::new(t_prime());
        let report = run_invariant_batch(4, &config, &mut rng(4)).unwrap();
        assert_eq!(report.percent(report.passed), "100.0%");
        assert_eq!(report.percent(report.failed), "0.0%");
    }

    #[test]
    fn rejects_empty_length_range() {
        let mut config = InvariantTrialConfig::new(t_prime());
        config.max_len = 2;
        assert_eq!(
            run_invariant_batch(1, &config, &mut rng(0)).unwrap_err().code(),
            "C0005"
        );
    }
}
