explain_lint! {
    ///The length-increasing rule lint detects rules whose replacement is longer than their
    ///pattern.
    ///
    ///For example, the rule
    ///
    ///```text
    ///a -> ab
    ///```
    ///
    ///makes every word containing "a" longer. When every rule shortens words, every derivation
    ///terminates and every word has finitely many successors. A length-increasing rule gives up
    ///that guarantee: derivations run to a fixpoint may stop at their step bound instead, and
    ///reachability and normal-form searches may stop at their state bound and report an
    ///inconclusive result.
    L0003: LengthIncreasingRuleLinter
}

use crate::diagnostics::Diagnostic;
use crate::linter::LintRule;
use crate::parser::SpannedRuleSet;

pub struct LengthIncreasingRuleLinter;

impl LintRule for LengthIncreasingRuleLinter {
    fn lint(rule_set: &SpannedRuleSet, _source: &str) -> Vec<Diagnostic> {
        rule_set
            .rule_set
            .iter()
            .zip(rule_set.spans.iter())
            .filter(|(rule, _)| rule.length_delta() > 0)
            .map(|(rule, &span)| {
                Diagnostic::span_warn(
                    span,
                    "Length-increasing rule",
                    Self::CODE,
                    format!("this rule lengthens words by {}", rule.length_delta()),
                )
                .with_note("searches over this rule set may not terminate before their bounds")
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::linter::tests::lint;

    #[test]
    fn only_longer_replacements() {
        let diags = lint("ab -> ba, a -> abb, bb -> ε");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].msg.as_deref(), Some("this rule lengthens words by 2"));
    }
}
