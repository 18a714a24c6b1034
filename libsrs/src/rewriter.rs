//! Finding and applying rule occurrences.

use crate::errors::ConfigurationError;
use crate::grammar::{Occurrence, Rule, RuleSet, Word};

use rustc_hash::FxHashSet;

/// Every occurrence of every rule of `rules` in `word`.
///
/// Occurrences are grouped by rule order, then ordered by ascending position. Overlapping
/// matches of the same pattern are all reported.
pub fn find_occurrences(word: &Word, rules: &RuleSet) -> Vec<Occurrence> {
    rules
        .iter()
        .enumerate()
        .flat_map(|(i, rule)| {
            word.positions_of(rule.pattern())
                .into_iter()
                .map(move |position| Occurrence::new(i, position))
        })
        .collect()
}

/// Whether no rule of `rules` applies to `word`.
pub fn is_irreducible(word: &Word, rules: &RuleSet) -> bool {
    rules
        .iter()
        .all(|rule| word.positions_of(rule.pattern()).is_empty())
}

/// Applies `occurrence` to `word`, replacing the rule's pattern with its replacement.
///
/// Fails if the occurrence's rule does not exist or its pattern does not occur in `word` at
/// the occurrence's position.
pub fn apply(
    word: &Word,
    occurrence: Occurrence,
    rules: &RuleSet,
) -> Result<Word, ConfigurationError> {
    match rules.get(occurrence.rule) {
        Some(rule) if word.matches_at(rule.pattern(), occurrence.position) => {
            Ok(rewrite_at(word, rule, occurrence.position))
        }
        _ => Err(ConfigurationError::InvalidOccurrence {
            occurrence,
            word: word.clone(),
        }),
    }
}

/// Rewrites `rule`'s pattern at `position`. The pattern must occur there.
pub(crate) fn rewrite_at(word: &Word, rule: &Rule, position: usize) -> Word {
    word.splice(position, rule.pattern().len(), rule.replacement())
}

/// Every distinct word reachable from `word` in exactly one rewrite step, in occurrence order.
pub fn successors(word: &Word, rules: &RuleSet) -> Vec<Word> {
    let mut seen = FxHashSet::default();
    let mut next = Vec::new();
    for (i, rule) in rules.iter().enumerate() {
        for position in word.positions_of(rule.pattern()) {
            let rewritten = rewrite_at(word, rule, position);
            log::trace!("{} -> {} by {} at {}", word, rewritten, rules.describe(i), position);
            if seen.insert(rewritten.clone()) {
                next.push(rewritten);
            }
        }
    }
    next
}
