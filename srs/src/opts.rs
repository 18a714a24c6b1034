//! Command-line options.

use clap::value_t;
use std::fmt::Display;
use std::str::FromStr;

const RULES_HELP: &str = "Rule set to run. Either rule-set source text, like \"bbb -> b, bab -> aa\", \
                          or the name of a built-in rule set: @t, @t-prime or @t-prime-ext.";

/// Options to run srs with.
#[derive(Clone, Debug, PartialEq)]
pub struct Opts {
    /// What to run. [None](Option::None) only if `explain_diagnostic` is set.
    pub command: Option<Command>,
    /// Rule set the command runs on, as source text or a "@name".
    pub rules: String,
    /// Alphabet all rule sets and words must be over. Inferred from the rules if absent.
    pub alphabet: Option<String>,
    /// How the result of srs's execution should be emitted.
    pub emit_format: String,
    /// When is [Some](Option::Some) diagnostic code, will explain that code.
    pub explain_diagnostic: Option<String>,
    /// When true, srs emit will be colored.
    pub color: bool,
}

/// A srs subcommand and its options.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Randomized equivalence trials of the rules against a reference rule set.
    Equiv {
        /// Rule set reachability between the two derived words is decided under.
        reference: String,
        /// Rule set the second word is derived under. Defaults to the reference.
        against: Option<String>,
        /// Compare against the start word itself instead of a second derivation.
        original: bool,
        /// Shortest random start word.
        min_len: usize,
        /// Longest random start word.
        max_len: usize,
        /// `Some((min, max))` to take a random number of steps instead of running to a fixpoint.
        steps: Option<(usize, usize)>,
        /// Most steps a derivation to a fixpoint may take.
        fixpoint_limit: usize,
        /// Number of trials.
        trials: usize,
        /// Seed for the random source.
        seed: Option<u64>,
        /// Depth bound of reachability searches.
        max_depth: Option<usize>,
        /// State bound of reachability searches.
        max_states: Option<usize>,
    },
    /// Randomized derivations checked against invariants.
    Invariants {
        /// Invariant names. The default invariants are checked if empty.
        invariants: Vec<String>,
        /// Shortest random start word.
        min_len: usize,
        /// Longest random start word.
        max_len: usize,
        /// Most steps per derivation.
        max_steps: usize,
        /// Number of trials.
        trials: usize,
        /// Seed for the random source.
        seed: Option<u64>,
    },
    /// Reachability of one word from another.
    Reach {
        /// Word to start from.
        from: String,
        /// Word to reach.
        to: String,
        /// Depth bound of the search.
        max_depth: Option<usize>,
        /// State bound of the search.
        max_states: Option<usize>,
    },
    /// The normal forms of a word.
    NormalForms {
        /// Word to reduce.
        word: String,
        /// State bound of the enumeration.
        max_states: Option<usize>,
    },
    /// Normal forms of every word of a length.
    Sweep {
        /// Length of the words to check.
        length: usize,
        /// State bound of each enumeration.
        max_states: Option<usize>,
    },
    /// A single random derivation.
    Step {
        /// Word to start from.
        word: String,
        /// Most steps to take.
        steps: usize,
        /// Invariant names to check along the derivation.
        invariants: Vec<String>,
        /// Seed for the random source.
        seed: Option<u64>,
    },
    /// Lint warnings for the rules.
    Lint,
}

fn rules_arg<'a, 'b>() -> clap::Arg<'a, 'b> {
    clap::Arg::with_name("rules").help(RULES_HELP).required(true)
}

fn seed_arg<'a, 'b>() -> clap::Arg<'a, 'b> {
    clap::Arg::with_name("seed")
        .long("--seed")
        .takes_value(true)
        .help("Seed for the random source. Drawn at random and printed if absent.")
}

fn trials_arg<'a, 'b>(default: &'a str) -> clap::Arg<'a, 'b> {
    clap::Arg::with_name("trials")
        .long("--trials")
        .takes_value(true)
        .default_value(default)
        .help("Number of trials to run.")
}

fn length_args<'a, 'b>(min: &'a str, max: &'a str) -> [clap::Arg<'a, 'b>; 2] {
    [
        clap::Arg::with_name("min-len")
            .long("--min-len")
            .takes_value(true)
            .default_value(min)
            .help("Shortest random start word."),
        clap::Arg::with_name("max-len")
            .long("--max-len")
            .takes_value(true)
            .default_value(max)
            .help("Longest random start word."),
    ]
}

fn invariant_arg<'a, 'b>() -> clap::Arg<'a, 'b> {
    clap::Arg::with_name("invariant")
        .long("--invariant")
        .takes_value(true)
        .multiple(true)
        .number_of_values(1)
        .next_line_help(true)
        .help(
            "Invariant to check after every step. Possible values:\n\
            \tparity:<s>:            Parity of the number of <s> symbols.\n\
            \tcount-plus-length:<s>: Parity of the number of <s> symbols plus the word length.\n\
            ",
        )
}

fn max_depth_arg<'a, 'b>() -> clap::Arg<'a, 'b> {
    clap::Arg::with_name("max-depth")
        .long("--max-depth")
        .takes_value(true)
        .help("Most rewrite steps a reachability search explores. Defaults to 100.")
}

fn max_states_arg<'a, 'b>() -> clap::Arg<'a, 'b> {
    clap::Arg::with_name("max-states")
        .long("--max-states")
        .takes_value(true)
        .help("Most distinct words a search visits. Defaults to 100000.")
}

fn word_arg<'a, 'b>(name: &'a str, help: &'a str) -> clap::Arg<'a, 'b> {
    clap::Arg::with_name(name)
        .long(name)
        .takes_value(true)
        .required(true)
        .allow_hyphen_values(true)
        .help(help)
}

/// Parses [Opts](self::Opts) from the command line or given a parser that acts on the clap
/// [App](clap::App).
pub fn get_opts<P>(parser: P, color: bool) -> Result<Opts, clap::Error>
where
    P: for<'a> FnOnce(clap::App<'a, '_>) -> Result<clap::ArgMatches<'a>, clap::Error>,
{
    let app = clap::App::new(clap::crate_name!())
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .author(clap::crate_authors!())
        .arg(
            clap::Arg::with_name("alphabet")
                .long("--alphabet")
                .takes_value(true)
                .global(true)
                .help("Alphabet of the rule sets and words, like \"ab\". Inferred from the rules if absent."),
        )
        .arg(
            clap::Arg::with_name("output-form")
                .short("-o")
                .long("--output-form")
                .next_line_help(true)
                .help(
                    "srs emit format. Possible values:\n\
                    \tpretty: Human-readable text.\n\
                    \tjson:   JSON objects, one per result.\n\
                    \tdebug:  Opaque internal representation. Note: this format is not stable.\n\
                    ",
                )
                .hide_possible_values(true)
                .default_value("pretty")
                .takes_value(true)
                .global(true)
                .possible_values(&["pretty", "json", "debug"]),
        )
        .arg(
            clap::Arg::with_name("explain")
                .long("--explain")
                .value_name("diagnostic")
                .help("Provide a detailed explanation for a diagnostic code.")
                .takes_value(true),
        )
        .subcommand(
            clap::SubCommand::with_name("equiv")
                .about("Checks the rules induce the same congruence as a reference rule set")
                .arg(rules_arg())
                .arg(
                    clap::Arg::with_name("reference")
                        .long("--reference")
                        .takes_value(true)
                        .required(true)
                        .help("Rule set reachability is decided under."),
                )
                .arg(
                    clap::Arg::with_name("against")
                        .long("--against")
                        .takes_value(true)
                        .help("Rule set the second word is derived under. Defaults to the reference."),
                )
                .arg(
                    clap::Arg::with_name("original")
                        .long("--original")
                        .conflicts_with("against")
                        .help("Compare against the start word itself."),
                )
                .args(&length_args("8", "10"))
                .arg(
                    clap::Arg::with_name("min-steps")
                        .long("--min-steps")
                        .takes_value(true)
                        .requires("max-steps")
                        .help("Fewest random steps per derivation. Defaults to 0."),
                )
                .arg(
                    clap::Arg::with_name("max-steps")
                        .long("--max-steps")
                        .takes_value(true)
                        .help("Most random steps per derivation. Derivations run to a fixpoint if absent."),
                )
                .arg(
                    clap::Arg::with_name("fixpoint-limit")
                        .long("--fixpoint-limit")
                        .takes_value(true)
                        .default_value("100")
                        .help("Most steps a derivation to a fixpoint may take."),
                )
                .arg(trials_arg("100"))
                .arg(seed_arg())
                .arg(max_depth_arg())
                .arg(max_states_arg()),
        )
        .subcommand(
            clap::SubCommand::with_name("invariants")
                .about("Checks invariants hold along random derivations")
                .arg(rules_arg())
                .arg(invariant_arg())
                .args(&length_args("3", "20"))
                .arg(
                    clap::Arg::with_name("max-steps")
                        .long("--max-steps")
                        .takes_value(true)
                        .default_value("5")
                        .help("Most steps per derivation."),
                )
                .arg(trials_arg("15"))
                .arg(seed_arg()),
        )
        .subcommand(
            clap::SubCommand::with_name("reach")
                .about("Searches for a derivation from one word to another")
                .arg(rules_arg())
                .arg(word_arg("from", "Word to start from."))
                .arg(word_arg("to", "Word to reach."))
                .arg(max_depth_arg())
                .arg(max_states_arg()),
        )
        .subcommand(
            clap::SubCommand::with_name("normal-forms")
                .about("Enumerates the normal forms of a word")
                .arg(rules_arg())
                .arg(word_arg("word", "Word to reduce."))
                .arg(max_states_arg()),
        )
        .subcommand(
            clap::SubCommand::with_name("sweep")
                .about("Reports every word of a length without a unique normal form")
                .arg(rules_arg())
                .arg(
                    clap::Arg::with_name("length")
                        .long("--length")
                        .takes_value(true)
                        .required(true)
                        .help("Length of the words to check."),
                )
                .arg(max_states_arg()),
        )
        .subcommand(
            clap::SubCommand::with_name("step")
                .about("Derives a word by random steps")
                .arg(rules_arg())
                .arg(word_arg("word", "Word to start from."))
                .arg(
                    clap::Arg::with_name("steps")
                        .long("--steps")
                        .takes_value(true)
                        .default_value("100")
                        .help("Most steps to take. The derivation stops early at an irreducible word."),
                )
                .arg(invariant_arg())
                .arg(seed_arg()),
        )
        .subcommand(
            clap::SubCommand::with_name("lint")
                .about("Emits lint warnings for the rules, if any")
                .arg(rules_arg()),
        );
    let matches = parser(app)?;

    let explain_diagnostic = matches.value_of("explain").map(str::to_owned);
    let (command, scoped) = match matches.subcommand() {
        (name, Some(sub)) => (Some(get_command(name, sub)?), sub),
        _ if explain_diagnostic.is_some() => (None, &matches),
        _ => {
            return Err(clap::Error::with_description(
                "a subcommand is required; see `srs --help`",
                clap::ErrorKind::MissingSubcommand,
            ))
        }
    };

    Ok(Opts {
        command,
        rules: scoped.value_of("rules").unwrap_or_default().to_owned(),
        alphabet: scoped.value_of("alphabet").map(str::to_owned),
        emit_format: scoped.value_of("output-form").unwrap_or("pretty").to_owned(),
        explain_diagnostic,
        color,
    })
}

fn get_command(name: &str, matches: &clap::ArgMatches) -> Result<Command, clap::Error> {
    let owned = |arg: &str| matches.value_of(arg).unwrap_or_default().to_owned();
    let invariants = || {
        matches
            .values_of("invariant")
            .map(|names| names.map(str::to_owned).collect())
            .unwrap_or_default()
    };

    let command = match name {
        "equiv" => {
            let steps = match value::<usize>(matches, "max-steps")? {
                Some(max) => Some((value(matches, "min-steps")?.unwrap_or(0), max)),
                None => None,
            };
            Command::Equiv {
                reference: owned("reference"),
                against: matches.value_of("against").map(str::to_owned),
                original: matches.is_present("original"),
                min_len: value_t!(matches, "min-len", usize)?,
                max_len: value_t!(matches, "max-len", usize)?,
                steps,
                fixpoint_limit: value_t!(matches, "fixpoint-limit", usize)?,
                trials: value_t!(matches, "trials", usize)?,
                seed: value(matches, "seed")?,
                max_depth: value(matches, "max-depth")?,
                max_states: value(matches, "max-states")?,
            }
        }
        "invariants" => Command::Invariants {
            invariants: invariants(),
            min_len: value_t!(matches, "min-len", usize)?,
            max_len: value_t!(matches, "max-len", usize)?,
            max_steps: value_t!(matches, "max-steps", usize)?,
            trials: value_t!(matches, "trials", usize)?,
            seed: value(matches, "seed")?,
        },
        "reach" => Command::Reach {
            from: owned("from"),
            to: owned("to"),
            max_depth: value(matches, "max-depth")?,
            max_states: value(matches, "max-states")?,
        },
        "normal-forms" => Command::NormalForms {
            word: owned("word"),
            max_states: value(matches, "max-states")?,
        },
        "sweep" => Command::Sweep {
            length: value_t!(matches, "length", usize)?,
            max_states: value(matches, "max-states")?,
        },
        "step" => Command::Step {
            word: owned("word"),
            steps: value_t!(matches, "steps", usize)?,
            invariants: invariants(),
            seed: value(matches, "seed")?,
        },
        "lint" => Command::Lint,
        other => {
            return Err(clap::Error::with_description(
                &format!("unknown subcommand {}", other),
                clap::ErrorKind::UnrecognizedSubcommand,
            ))
        }
    };
    Ok(command)
}

/// Parses an optional numeric option.
fn value<T>(matches: &clap::ArgMatches, name: &str) -> Result<Option<T>, clap::Error>
where
    T: FromStr,
    <T as FromStr>::Err: Display,
{
    if matches.is_present(name) {
        value_t!(matches, name, T).map(Some)
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Opts, clap::Error> {
        let args: Vec<&str> = std::iter::once("srs").chain(args.iter().copied()).collect();
        get_opts(|app| app.get_matches_from_safe(args), false)
    }

    #[test]
    fn equiv_defaults() {
        let opts = parse(&["equiv", "--reference", "@t-prime", "--", "@t"]).unwrap();
        assert_eq!(opts.rules, "@t");
        assert_eq!(opts.emit_format, "pretty");
        assert_eq!(opts.alphabet, None);
        assert_eq!(
            opts.command,
            Some(Command::Equiv {
                reference: "@t-prime".to_owned(),
                against: None,
                original: false,
                min_len: 8,
                max_len: 10,
                steps: None,
                fixpoint_limit: 100,
                trials: 100,
                seed: None,
                max_depth: None,
                max_states: None,
            })
        );
    }

    #[test]
    fn random_steps_default_to_zero_minimum() {
        let opts = parse(&[
            "equiv",
            "--reference",
            "@t-prime",
            "--max-steps",
            "4",
            "--",
            "@t",
        ])
        .unwrap();
        match opts.command {
            Some(Command::Equiv { steps, .. }) => assert_eq!(steps, Some((0, 4))),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn global_options_after_subcommand() {
        let opts = parse(&[
            "reach", "--from", "baaa", "--to", "ab", "-o", "json", "--alphabet", "ab", "--",
            "@t-prime",
        ])
        .unwrap();
        assert_eq!(opts.emit_format, "json");
        assert_eq!(opts.alphabet.as_deref(), Some("ab"));
    }

    #[test]
    fn repeated_invariants() {
        let opts = parse(&[
            "invariants",
            "--invariant",
            "parity:b",
            "--invariant",
            "count-plus-length:a",
            "--",
            "@t-prime-ext",
        ])
        .unwrap();
        match opts.command {
            Some(Command::Invariants {
                invariants,
                trials,
                max_steps,
                ..
            }) => {
                assert_eq!(invariants, vec!["parity:b", "count-plus-length:a"]);
                assert_eq!(trials, 15);
                assert_eq!(max_steps, 5);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn explain_needs_no_subcommand() {
        let opts = parse(&["--explain", "C0002"]).unwrap();
        assert_eq!(opts.command, None);
        assert_eq!(opts.explain_diagnostic.as_deref(), Some("C0002"));
    }

    #[test]
    fn subcommand_required() {
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn bad_number() {
        assert!(parse(&["sweep", "--length", "four", "--", "@t"]).is_err());
    }

    #[test]
    fn optional_numbers() {
        let opts = parse(&[
            "reach",
            "--from",
            "ab",
            "--to",
            "a",
            "--max-depth",
            "3",
            "--",
            "@t",
        ])
        .unwrap();
        match opts.command {
            Some(Command::Reach {
                max_depth,
                max_states,
                ..
            }) => {
                assert_eq!(max_depth, Some(3));
                assert_eq!(max_states, None);
            }
            other => panic!("expected reach, got {:?}", other),
        }
        assert!(parse(&[
            "reach",
            "--from",
            "ab",
            "--to",
            "a",
            "--max-states",
            "many",
            "--",
            "@t",
        ])
        .is_err());
    }

    #[test]
    fn original_conflicts_with_against() {
        assert!(parse(&[
            "equiv",
            "--reference",
            "@t",
            "--against",
            "@t",
            "--original",
            "--",
            "@t",
        ])
        .is_err());
    }
}
