//! Reachability by breadth-first search over the rewrite relation.
//!
//! The search is exhaustive rather than random: level `d` holds every word obtainable in one
//! step from level `d - 1` that has not been seen before. Rule sets come from users and may
//! have cycles or grow words without bound, so every search runs under [`SearchLimits`] and
//! reports running out of budget as [`SearchOutcome::Exhausted`], which is distinct from a
//! proof that the target is unreachable.

use crate::grammar::{RuleSet, Word};
use crate::rewriter::successors;

use core::fmt;
use rustc_hash::FxHashSet;

/// Default number of BFS levels explored before giving up.
pub const DEFAULT_MAX_DEPTH: usize = 100;
/// Default number of distinct words a search may visit before giving up.
pub const DEFAULT_MAX_STATES: usize = 100_000;

/// Bounds on one search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_depth: usize,
    pub max_states: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_states: DEFAULT_MAX_STATES,
        }
    }
}

impl SearchLimits {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }
}

/// The answer to a reachability query.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(tag = "outcome", rename_all = "kebab-case"))]
pub enum SearchOutcome {
    /// The target was produced after `depth` rewrite steps, the fewest possible.
    Found { depth: usize },
    /// Every word reachable from the source was visited and none was the target.
    Unreachable,
    /// A limit was hit with words left to explore. The target may or may not be reachable.
    Exhausted,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found { depth: 1 } => write!(f, "reachable in 1 step"),
            Self::Found { depth } => write!(f, "reachable in {} steps", depth),
            Self::Unreachable => write!(f, "unreachable"),
            Self::Exhausted => write!(f, "unknown (search limit reached)"),
        }
    }
}

/// A [`SearchOutcome`] and the number of distinct words visited to reach it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Reachability {
    #[cfg_attr(feature = "json", serde(flatten))]
    pub outcome: SearchOutcome,
    /// Distinct words visited, including the source.
    pub visited: usize,
}

/// Decides whether `target` is reachable from `source` in at most `max_depth` steps.
pub fn reachable(source: &Word, target: &Word, rules: &RuleSet, max_depth: usize) -> Reachability {
    reachable_within(source, target, rules, &SearchLimits::with_max_depth(max_depth))
}

/// Decides whether `target` is reachable from `source` within `limits`.
pub fn reachable_within(
    source: &Word,
    target: &Word,
    rules: &RuleSet,
    limits: &SearchLimits,
) -> Reachability {
    if source == target {
        return Reachability {
            outcome: SearchOutcome::Found { depth: 0 },
            visited: 1,
        };
    }

    let mut visited = FxHashSet::default();
    visited.insert(source.clone());
    let mut frontier = vec![source.clone()];
    let mut depth = 0;

    while depth < limits.max_depth && !frontier.is_empty() {
        depth += 1;
        let mut next = Vec::new();
        for word in frontier.iter() {
            for successor in successors(word, rules) {
                if &successor == target {
                    log::trace!("found {} from {} at depth {}", target, source, depth);
                    return Reachability {
                        outcome: SearchOutcome::Found { depth },
                        visited: visited.len(),
                    };
                }
                if visited.contains(&successor) {
                    continue;
                }
                if visited.len() >= limits.max_states {
                    log::debug!(
                        "search {} => {} visited {} words without an answer",
                        source,
                        target,
                        visited.len()
                    );
                    return Reachability {
                        outcome: SearchOutcome::Exhausted,
                        visited: visited.len(),
                    };
                }
                visited.insert(successor.clone());
                next.push(successor);
            }
        }
        log::trace!("depth {}: {} new words", depth, next.len());
        frontier = next;
    }

    // A frontier left at the depth limit only matters if it can still be rewritten somewhere new.
    let unexplored = frontier
        .iter()
        .filter(|word| {
            successors(word, rules)
                .iter()
                .any(|successor| !visited.contains(successor))
        })
        .count();
    let outcome = if unexplored == 0 {
        SearchOutcome::Unreachable
    } else {
        log::debug!(
            "search {} => {} stopped at depth {} with {} words unexplored",
            source,
            target,
            depth,
            unexplored
        );
        SearchOutcome::Exhausted
    };
    Reachability {
        outcome,
        visited: visited.len(),
    }
}
