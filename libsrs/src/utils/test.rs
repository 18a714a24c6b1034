//! Fixtures shared by unit tests.

use crate::grammar::RuleSet;
use crate::registry::RuleSetName;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// A seeded random source, initializing test logging on first use.
pub fn rng(seed: u64) -> StdRng {
    let _ = env_logger::builder().is_test(true).try_init();
    StdRng::seed_from_u64(seed)
}

/// The built-in confluent system.
pub fn t_prime() -> RuleSet {
    RuleSetName::TPrime.build().unwrap()
}

/// The built-in original system.
pub fn t() -> RuleSet {
    RuleSetName::T.build().unwrap()
}
