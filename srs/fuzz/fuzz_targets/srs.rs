#![no_main]
use libfuzzer_sys::fuzz_target;

use srs::{run_srs, Command, Opts};

// Arbitrary rule-set text must produce diagnostics or lints, never a panic.
fuzz_target!(|rules: String| {
    run_srs(Opts {
        command: Some(Command::Lint),
        rules,
        alphabet: None,
        emit_format: "pretty".to_owned(),
        explain_diagnostic: None,
        color: false,
    });
});
