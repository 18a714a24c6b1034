explain_lint! {
    ///The trivial rule lint detects rules whose replacement is the same as their pattern.
    ///
    ///For example, the rule
    ///
    ///```text
    ///ab -> ab
    ///```
    ///
    ///rewrites every occurrence of "ab" to itself. Such a rule never changes a word, but it does
    ///mean no word containing "ab" is ever irreducible, so derivations run "to a fixpoint" will
    ///always stop at their step bound instead.
    L0001: TrivialRuleLinter
}

use crate::diagnostics::Diagnostic;
use crate::linter::LintRule;
use crate::parser::SpannedRuleSet;

pub struct TrivialRuleLinter;

impl LintRule for TrivialRuleLinter {
    fn lint(rule_set: &SpannedRuleSet, _source: &str) -> Vec<Diagnostic> {
        rule_set
            .rule_set
            .iter()
            .zip(rule_set.spans.iter())
            .filter(|(rule, _)| rule.pattern() == rule.replacement())
            .map(|(_, &span)| {
                Diagnostic::span_warn(
                    span,
                    "Trivial rule",
                    Self::CODE,
                    "this rule rewrites its pattern to itself".to_string(),
                )
                .with_help("consider removing this rule")
            })
            .collect()
    }
}
