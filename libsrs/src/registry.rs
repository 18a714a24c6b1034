//! Built-in rule sets over `{a, b}`.
//!
//! `t` is a small semi-Thue system; `t-prime` is an equivalent system that is terminating and
//! confluent, so every word has exactly one normal form under it. `t-prime-ext` adds the
//! length-preserving rules of `t` back to `t-prime`, which keeps it equivalent but gives random
//! derivations more room to wander.

use crate::errors::ConfigurationError;
use crate::grammar::RuleSet;

use core::fmt;
use std::str::FromStr;

macro_rules! define_rule_sets {
    ($($kind:ident, $name:literal: [$(($pattern:literal, $replacement:literal)),* $(,)?])*) => {
        /// The name of a built-in rule set.
        #[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
        pub enum RuleSetName {
            $($kind,)*
        }

        impl RuleSetName {
            /// Every built-in rule set, in definition order.
            pub fn all() -> &'static [Self] {
                &[$(Self::$kind,)*]
            }

            /// The name a rule set is referred to by, without the leading "@".
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$kind => $name,)*
                }
            }

            fn pairs(self) -> &'static [(&'static str, &'static str)] {
                match self {
                    $(Self::$kind => &[$(($pattern, $replacement),)*],)*
                }
            }
        }
    };
}

define_rule_sets! {
    T,         "t":           [("baaa", "aaab"), ("abab", "aabb"), ("aaab", "ab"), ("bab", "aa"),
                               ("bbb", "b")]
    TPrime,    "t-prime":     [("bbb", "b"), ("bab", "aa"), ("aaa", "aa"), ("aab", "ab"),
                               ("aba", "ab"), ("abb", "aa"), ("baa", "ab")]
    TPrimeExt, "t-prime-ext": [("bbb", "b"), ("bab", "aa"), ("aaa", "aa"), ("aab", "ab"),
                               ("aba", "ab"), ("abb", "aa"), ("baa", "ab"), ("baaa", "aaab"),
                               ("abab", "aabb")]
}

impl RuleSetName {
    /// Builds the rule set.
    pub fn build(self) -> Result<RuleSet, ConfigurationError> {
        RuleSet::from_pairs(self.pairs())
    }

    /// The rule set written in rule-set source syntax.
    pub fn source(self) -> String {
        self.pairs()
            .iter()
            .map(|(pattern, replacement)| format!("{} -> {}", pattern, replacement))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for RuleSetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name())
    }
}

impl FromStr for RuleSetName {
    type Err = ConfigurationError;

    /// Parses a rule set name, with or without its leading "@".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix('@').unwrap_or(s);
        Self::all()
            .iter()
            .copied()
            .find(|rule_set| rule_set.name() == name)
            .ok_or_else(|| ConfigurationError::UnknownRuleSet(name.to_owned()))
    }
}
