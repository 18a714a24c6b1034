//! The value types a string rewriting system is built from.
//!
//! A [`Word`] is a finite sequence of symbols drawn from an [`Alphabet`]. A [`Rule`] rewrites a
//! contiguous occurrence of its pattern into its replacement, and a [`RuleSet`] is an ordered
//! collection of rules over one alphabet. An [`Occurrence`] locates one place a rule applies
//! inside one word.
//!
//! All of these are immutable once built. Equality is structural.

mod alphabet;
mod rule;
mod word;

pub use alphabet::Alphabet;
pub use rule::{Occurrence, Rule, RuleSet};
pub use word::{Symbol, Word, EMPTY_WORD};
