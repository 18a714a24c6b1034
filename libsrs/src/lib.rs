//! A string rewriting engine, and randomized trials built on it.
//!
//! Rule sets are parsed from text with [`parse_rule_set`]. Single rewrite steps are found with
//! [`find_occurrences`] and applied with [`apply`] or at random with [`walker::step`]. The
//! rewrite relation is searched with [`reachable`] and [`normal_forms`], always under an
//! explicit bound. The [`harness`] composes these into batches of randomized trials.

pub mod common;
pub mod diagnostics;

#[macro_use]
mod errors;
pub use errors::ConfigurationError;

mod grammar;
pub use grammar::{Alphabet, Occurrence, Rule, RuleSet, Symbol, Word, EMPTY_WORD};

mod parser;
pub use parser::{parse_alphabet, parse_rule_set, parse_word, SpannedRuleSet};

mod rewriter;
pub use rewriter::{apply, find_occurrences, is_irreducible, successors};

pub mod walker;

mod search;
pub use search::{
    reachable, reachable_within, Reachability, SearchLimits, SearchOutcome, DEFAULT_MAX_DEPTH,
    DEFAULT_MAX_STATES,
};

mod normal_forms;
pub use normal_forms::{normal_forms, normal_forms_within, Confluence, NormalFormReport};

mod invariant;
pub use invariant::{Invariant, InvariantCheck, InvariantChecker};

mod derivation;
pub use derivation::{trace, Derivation, DerivationStep};

mod generator;
pub use generator::{random_length, random_word};

#[cfg(feature = "benchmark-internals")]
pub use generator::all_words;

mod registry;
pub use registry::RuleSetName;

pub mod harness;

mod linter;
pub use linter::lint_rule_set;

mod emit;
pub use emit::{Emit, EmitFormat};

mod utils;
