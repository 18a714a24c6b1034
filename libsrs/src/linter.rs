//! Provides linter-like diagnostics for rule sets.
//!
//! Lints never make a rule set invalid. They point at rules that are legal but very likely not
//! what was meant, or that weaken the guarantees the searches rely on.

macro_rules! explain_lint {
    ($(#[doc = $doc:expr])+ $code:ident: $linter:ident) => {
        use crate::diagnostics::DiagnosticRecord;

        $(#[doc = $doc])+
        impl DiagnosticRecord for $linter {
            const CODE: &'static str = stringify!($code);
            const EXPLANATION: &'static str = concat!($($doc, "\n"),+);
        }
    };
}

mod duplicate_rule;
mod length_increasing;
mod trivial_rule;
use duplicate_rule::*;
use length_increasing::*;
use trivial_rule::*;

use crate::diagnostics::{Diagnostic, DiagnosticRecord, DiagnosticRegistry};
use crate::parser::SpannedRuleSet;

/// Describes a rule-set lint.
pub trait LintRule
where
    Self: DiagnosticRecord,
{
    /// Lints a rule set given the source it was parsed from.
    fn lint(rule_set: &SpannedRuleSet, source: &str) -> Vec<Diagnostic>;
}

macro_rules! define_rule_set_lints {
    ($($linter:ident,)*) => {
        /// A lint applying to a rule set.
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        pub enum RuleSetLint {
            $($linter),*
        }

        impl RuleSetLint {
            pub fn lint(&self, rule_set: &SpannedRuleSet, source: &str) -> Vec<Diagnostic> {
                match self {
                    $(Self::$linter => $linter::lint(rule_set, source)),*
                }
            }

            pub fn all() -> Vec<Self> {
                vec![$(Self::$linter),*]
            }

            pub fn all_explanations() -> Vec<(&'static str, &'static str)> {
                vec![$(($linter::CODE, $linter::EXPLANATION)),*]
            }
        }
    };
}

define_rule_set_lints! {
    TrivialRuleLinter,
    DuplicateRuleLinter,
    LengthIncreasingRuleLinter,
}

/// Describes the configuration to use when linting a rule set.
pub struct LintConfig {
    rule_set_linters: Vec<RuleSetLint>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            rule_set_linters: RuleSetLint::all(),
        }
    }
}

impl DiagnosticRegistry for LintConfig {
    /// All lint codes and their explanations.
    fn codes_with_explanations() -> Vec<(&'static str, &'static str)> {
        RuleSetLint::all_explanations()
    }
}

/// Lints a parsed rule set. Diagnostics are ordered by lint, then by rule.
pub fn lint_rule_set(rule_set: &SpannedRuleSet, source: &str) -> Vec<Diagnostic> {
    let config = LintConfig::default();
    let mut diags = vec![];
    for linter in config.rule_set_linters.iter() {
        diags.extend(linter.lint(rule_set, source));
    }
    diags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_rule_set;

    pub(super) fn lint(source: &str) -> Vec<Diagnostic> {
        let (parsed, diagnostics) = parse_rule_set(source, None);
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        lint_rule_set(&parsed.unwrap(), source)
    }

    #[test]
    fn clean_rule_set() {
        assert!(lint("bbb -> b, bab -> aa, aaa -> aa").is_empty());
    }

    #[test]
    fn lints_are_warnings() {
        let diags = lint("a -> a, a -> a, b -> bb");
        let codes: Vec<_> = diags.iter().map(|d| d.code.unwrap()).collect();
        assert_eq!(codes, vec!["L0001", "L0001", "L0002", "L0003"]);
        assert!(diags.iter().all(|d| !d.is_fatal()));
    }

    #[test]
    fn lint_codes_are_registered() {
        let codes: Vec<_> = LintConfig::codes_with_explanations()
            .into_iter()
            .map(|(code, _)| code)
            .collect();
        assert_eq!(codes, vec!["L0001", "L0002", "L0003"]);
    }
}
