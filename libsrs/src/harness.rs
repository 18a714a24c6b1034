//! Randomized trials built on the rewriting engine.
//!
//! - [`equivalence`] compares two rule sets that should induce the same rewriting relation by
//!   deriving a random word under each and asking a reference system whether the results are
//!   connected.
//! - [`metamorphic`] derives random words under one rule set and checks invariants along the
//!   way.
//! - [`sweep`] enumerates every word of a length and reports those without a unique normal
//!   form.
//!
//! Trials are independent. Every trial draws from the random source it is given, so a batch
//! replays exactly from its seed.

pub mod equivalence;
pub mod metamorphic;
pub mod sweep;

use core::fmt;

/// The outcome of one trial.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "kebab-case"))]
pub enum Verdict {
    Passed,
    Failed,
    /// A search ran out of budget before it could decide the trial.
    Inconclusive,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Failed => write!(f, "FAILED"),
            Self::Inconclusive => write!(f, "inconclusive"),
        }
    }
}
