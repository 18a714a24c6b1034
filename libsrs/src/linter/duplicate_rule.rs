explain_lint! {
    ///The duplicate rule lint detects rules that appear more than once in a rule set.
    ///
    ///For example, in
    ///
    ///```text
    ///bbb -> b, aaa -> aa, bbb -> b
    ///```
    ///
    ///the third rule is the same as the first. Duplicates do not change which rewrites exist,
    ///but random derivations choose uniformly among applicable rules, so a duplicated rule is
    ///chosen twice as often as it otherwise would be.
    L0002: DuplicateRuleLinter
}

use crate::diagnostics::Diagnostic;
use crate::linter::LintRule;
use crate::parser::SpannedRuleSet;

pub struct DuplicateRuleLinter;

impl LintRule for DuplicateRuleLinter {
    fn lint(rule_set: &SpannedRuleSet, source: &str) -> Vec<Diagnostic> {
        let rules = rule_set.rule_set.rules();
        let spans = &rule_set.spans;
        let mut diagnostics = Vec::new();
        for (i, rule) in rules.iter().enumerate() {
            let first = match rules[..i].iter().position(|other| other == rule) {
                Some(first) => first,
                None => continue,
            };
            diagnostics.push(
                Diagnostic::span_warn(
                    spans[i],
                    "Duplicate rule",
                    Self::CODE,
                    format!(r#""{}" is already in this rule set"#, spans[i].over(source)),
                )
                .with_spanned_note(spans[first], "first defined here"),
            );
        }
        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use crate::common::Span;
    use crate::linter::tests::lint;

    #[test]
    fn points_at_both_rules() {
        let diags = lint("bbb -> b, aaa -> aa, bbb->b");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].span, Span::from(21..27));
        assert_eq!(
            diags[0].msg.as_deref(),
            Some(r#""bbb->b" is already in this rule set"#)
        );
        assert_eq!(diags[0].associated_diagnostics[0].span, Span::from(0..8));
    }

    #[test]
    fn same_pattern_is_not_a_duplicate() {
        assert!(lint("ab -> a, ab -> b").is_empty());
    }
}
