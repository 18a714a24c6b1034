//! The srs app. For an overview of srs's design, see [libsrs's documentation](libsrs).

#![deny(missing_docs)]

#[cfg(test)]
mod test;

mod diagnostics;
use diagnostics::{emit_configuration_error, emit_srs_diagnostics, sanitize_source_for_diagnostics};

mod opts;
pub use opts::{get_opts, Command, Opts};

use libsrs::diagnostics::Diagnostic;
use libsrs::harness::equivalence::{run_batch, SecondSide, TrialConfig, TrialPolicy};
use libsrs::harness::metamorphic::{run_invariant_batch, InvariantTrialConfig};
use libsrs::harness::sweep::confluence_sweep;
use libsrs::{
    lint_rule_set, normal_forms_within, parse_alphabet, parse_rule_set, parse_word,
    reachable_within, trace, Alphabet, ConfigurationError, Confluence, Emit, EmitFormat,
    Invariant, InvariantChecker, RuleSet, RuleSetName, SearchLimits, SpannedRuleSet, Word,
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_STATES,
};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Output of a srs execution.
#[derive(Default)]
pub struct SrsResult {
    /// Exit code
    pub code: i32,
    /// Emit for stdout
    pub stdout: String,
    /// Emit for stderr
    pub stderr: String,
    /// Whether the stdout should be emit as paged
    pub page: bool,
}

/// Builds a [SrsResult](self::SrsResult).
struct SrsResultBuilder {
    emit_format: EmitFormat,
    color: bool,
    stdout: String,
    stderr: String,
    page: bool,
}

impl SrsResultBuilder {
    fn new(emit_format: impl Into<EmitFormat>, color: bool) -> Self {
        Self {
            emit_format: emit_format.into(),
            color,
            page: false,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    fn emit<E: Emit>(&mut self, obj: &E) {
        self.stdout.push_str(&obj.emit(self.emit_format));
    }

    /// Emits diagnostics for `source`, which came from `origin`.
    fn err(&mut self, origin: Option<&str>, source: &str, diagnostics: &[Diagnostic]) {
        if diagnostics.is_empty() {
            return;
        }
        if !self.stderr.is_empty() {
            self.stderr.push('\n');
        }
        self.stderr.push_str(&emit_srs_diagnostics(
            origin,
            &sanitize_source_for_diagnostics(source),
            diagnostics,
            self.color,
        ));
    }

    fn config_err(&mut self, error: &ConfigurationError) {
        self.stderr
            .push_str(&emit_configuration_error(error, self.color));
    }

    fn page(&mut self, page: bool) {
        self.page = page;
    }

    fn ok(self) -> SrsResult {
        SrsResult {
            code: 0,
            stdout: self.stdout,
            stderr: self.stderr,
            page: self.page,
        }
    }

    fn failed(self) -> SrsResult {
        SrsResult {
            code: 1,
            stdout: self.stdout,
            stderr: self.stderr,
            page: self.page,
        }
    }

    fn finish(self, success: bool) -> SrsResult {
        if success {
            self.ok()
        } else {
            self.failed()
        }
    }
}

/// Runs srs end-to-end.
pub fn run_srs(opts: Opts) -> SrsResult {
    let mut result = SrsResultBuilder::new(opts.emit_format, opts.color);

    if let Some(diag_code) = opts.explain_diagnostic {
        let codes = Diagnostic::all_codes_with_explanations();
        return match codes.get::<str>(&diag_code) {
            Some(explanation) => {
                result.stdout.push_str(explanation);
                result.page(true);
                result.ok()
            }
            None => {
                result
                    .stderr
                    .push_str(&format!("{} is not a diagnostic code", diag_code));
                result.failed()
            }
        };
    }

    let command = match opts.command {
        Some(command) => command,
        None => {
            result
                .stderr
                .push_str("a subcommand is required; see `srs --help`");
            return result.failed();
        }
    };

    let alphabet = match opts.alphabet {
        Some(source) => {
            let (alphabet, diagnostics) = parse_alphabet(&source);
            result.err(Some("--alphabet"), &source, &diagnostics);
            match alphabet {
                Some(alphabet) => Some(alphabet),
                None => return result.failed(),
            }
        }
        None => None,
    };

    let mut evaluator = CommandEvaluator::new(result, alphabet);
    let rules = match evaluator.rule_set(None, &opts.rules) {
        Some(rules) => rules,
        None => return evaluator.result.failed(),
    };
    evaluator.eval(command, rules)
}

/// A rule set parsed from a command-line argument.
struct ParsedRuleSet {
    /// Where the source came from, if not the positional rules argument.
    origin: Option<String>,
    source: String,
    spanned: SpannedRuleSet,
}

impl ParsedRuleSet {
    fn rules(&self) -> &RuleSet {
        &self.spanned.rule_set
    }
}

/// Expands a rule-set argument. A built-in name like "@t" is replaced by the rule set's source.
fn expand_rule_set(
    origin: Option<&str>,
    arg: &str,
) -> Result<(Option<String>, String), ConfigurationError> {
    let trimmed = arg.trim();
    if trimmed.starts_with('@') {
        let name: RuleSetName = trimmed.parse()?;
        return Ok((Some(name.to_string()), name.source()));
    }
    Ok((origin.map(str::to_owned), arg.to_owned()))
}

/// Evaluates a srs subcommand.
struct CommandEvaluator {
    result: SrsResultBuilder,
    /// Alphabet given on the command line, if any.
    alphabet: Option<Alphabet>,
}

impl CommandEvaluator {
    fn new(result: SrsResultBuilder, alphabet: Option<Alphabet>) -> Self {
        Self { result, alphabet }
    }

    /// Parses a rule-set argument, emitting its diagnostics.
    fn rule_set(&mut self, origin: Option<&str>, arg: &str) -> Option<ParsedRuleSet> {
        let (origin, source) = match expand_rule_set(origin, arg) {
            Ok(expanded) => expanded,
            Err(err) => {
                self.result.config_err(&err);
                return None;
            }
        };
        let (spanned, diagnostics) = parse_rule_set(&source, self.alphabet.as_ref());
        self.result
            .err(origin.as_deref(), &source, &diagnostics);
        Some(ParsedRuleSet {
            origin,
            source,
            spanned: spanned?,
        })
    }

    /// Parses a word given by the option `origin`, emitting its diagnostics.
    fn word(&mut self, origin: &str, source: &str, alphabet: &Alphabet) -> Option<Word> {
        let (word, diagnostics) = parse_word(source, alphabet);
        let origin = format!("--{}", origin);
        self.result.err(Some(origin.as_str()), source, &diagnostics);
        word
    }

    fn invariants(&mut self, names: &[String]) -> Option<InvariantChecker> {
        let mut invariants = Vec::with_capacity(names.len());
        for name in names.iter() {
            match name.parse::<Invariant>() {
                Ok(invariant) => invariants.push(invariant),
                Err(err) => {
                    self.result.config_err(&err);
                    return None;
                }
            }
        }
        Some(InvariantChecker::new(invariants))
    }

    /// Returns the seed to use, drawing and announcing one if none was given.
    fn seed(&mut self, seed: Option<u64>) -> u64 {
        match seed {
            Some(seed) => seed,
            None => {
                let seed = rand::random();
                self.result.stderr.push_str(&format!("Seed: {}\n", seed));
                seed
            }
        }
    }

    fn eval(mut self, command: Command, rules: ParsedRuleSet) -> SrsResult {
        match command {
            Command::Equiv {
                reference,
                against,
                original,
                min_len,
                max_len,
                steps,
                fixpoint_limit,
                trials,
                seed,
                max_depth,
                max_states,
            } => {
                let reference = match self.rule_set(Some("--reference"), &reference) {
                    Some(reference) => reference,
                    None => return self.result.failed(),
                };
                let mut config =
                    TrialConfig::new(rules.rules().clone(), reference.rules().clone());
                if original {
                    config.second = SecondSide::Original;
                } else if let Some(against) = against {
                    let against = match self.rule_set(Some("--against"), &against) {
                        Some(against) => against,
                        None => return self.result.failed(),
                    };
                    config.alphabet = config.alphabet.union(against.rules().alphabet());
                    config.second = SecondSide::Derive(against.rules().clone());
                }
                if let Some(alphabet) = &self.alphabet {
                    config.alphabet = alphabet.clone();
                }
                config.min_len = min_len;
                config.max_len = max_len;
                config.policy = match steps {
                    Some((min, max)) => TrialPolicy::RandomSteps { min, max },
                    None => TrialPolicy::Fixpoint {
                        max_steps: fixpoint_limit,
                    },
                };
                config.limits = limits(max_depth, max_states);

                let mut rng = StdRng::seed_from_u64(self.seed(seed));
                match run_batch(trials, &config, &mut rng) {
                    Ok(report) => {
                        self.result.emit(&report);
                        self.result.finish(report.all_passed())
                    }
                    Err(err) => {
                        self.result.config_err(&err);
                        self.result.failed()
                    }
                }
            }
            Command::Invariants {
                invariants,
                min_len,
                max_len,
                max_steps,
                trials,
                seed,
            } => {
                let mut config = InvariantTrialConfig::new(rules.rules().clone());
                if !invariants.is_empty() {
                    config.checker = match self.invariants(&invariants) {
                        Some(checker) => checker,
                        None => return self.result.failed(),
                    };
                }
                if let Some(alphabet) = &self.alphabet {
                    config.alphabet = alphabet.clone();
                }
                config.min_len = min_len;
                config.max_len = max_len;
                config.max_steps = max_steps;

                let mut rng = StdRng::seed_from_u64(self.seed(seed));
                match run_invariant_batch(trials, &config, &mut rng) {
                    Ok(report) => {
                        self.result.emit(&report);
                        self.result.finish(report.all_passed())
                    }
                    Err(err) => {
                        self.result.config_err(&err);
                        self.result.failed()
                    }
                }
            }
            Command::Reach {
                from,
                to,
                max_depth,
                max_states,
            } => {
                let alphabet = rules.rules().alphabet().clone();
                let from = self.word("from", &from, &alphabet);
                let to = self.word("to", &to, &alphabet);
                let (from, to) = match (from, to) {
                    (Some(from), Some(to)) => (from, to),
                    _ => return self.result.failed(),
                };
                let reachability = reachable_within(
                    &from,
                    &to,
                    rules.rules(),
                    &limits(max_depth, max_states),
                );
                self.result.emit(&reachability);
                self.result.finish(reachability.outcome.is_found())
            }
            Command::NormalForms { word, max_states } => {
                let alphabet = rules.rules().alphabet().clone();
                let word = match self.word("word", &word, &alphabet) {
                    Some(word) => word,
                    None => return self.result.failed(),
                };
                let report = normal_forms_within(
                    &word,
                    rules.rules(),
                    max_states.unwrap_or(DEFAULT_MAX_STATES),
                );
                self.result.emit(&report);
                let unique = matches!(report.confluence(), Confluence::Unique(_));
                self.result.finish(unique)
            }
            Command::Sweep { length, max_states } => {
                let alphabet = rules.rules().alphabet().clone();
                match confluence_sweep(
                    rules.rules(),
                    &alphabet,
                    length,
                    max_states.unwrap_or(DEFAULT_MAX_STATES),
                ) {
                    Ok(report) => {
                        self.result.emit(&report);
                        self.result.finish(report.is_confluent())
                    }
                    Err(err) => {
                        self.result.config_err(&err);
                        self.result.failed()
                    }
                }
            }
            Command::Step {
                word,
                steps,
                invariants,
                seed,
            } => {
                let alphabet = rules.rules().alphabet().clone();
                let word = self.word("word", &word, &alphabet);
                let checker = self.invariants(&invariants);
                let (word, checker) = match (word, checker) {
                    (Some(word), Some(checker)) => (word, checker),
                    _ => return self.result.failed(),
                };
                let mut rng = StdRng::seed_from_u64(self.seed(seed));
                let derivation = trace(&word, rules.rules(), &checker, &mut rng, steps);
                self.result.emit(&derivation);
                self.result.finish(derivation.holds())
            }
            Command::Lint => {
                let lints = lint_rule_set(&rules.spanned, &rules.source);
                self.result
                    .err(rules.origin.as_deref(), &rules.source, &lints);
                self.result.emit(rules.rules());
                self.result.ok()
            }
        }
    }
}

fn limits(max_depth: Option<usize>, max_states: Option<usize>) -> SearchLimits {
    SearchLimits {
        max_depth: max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
        max_states: max_states.unwrap_or(DEFAULT_MAX_STATES),
    }
}
