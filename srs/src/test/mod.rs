use difference::{Changeset, Difference};
use libtest_mimic::{run_tests, Arguments, Outcome, Test};
use std::error::Error;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

#[macro_use]
mod common;

use common::*;
use exec::*;
use replay_test::ReplayTest;
use srs_emit_test::SrsEmitTest;

#[allow(unused)]
fn main() -> Result<(), Box<dyn Error>> {
    let args = Arguments::from_args();
    let test_files = collect_test_files()?;
    let tests = test_files.into_iter().flat_map(TestCase::new).collect();
    run_tests(&args, tests, TestCase::drive_test).exit();
}

/// Collects all `.srs` system test files, starting from srs/src/test and visiting all nested
/// directories.
fn collect_test_files() -> Result<Vec<Test<PathBuf>>, Box<dyn Error>> {
    let root_test_path = Path::new("src/test");
    let mut dirs_to_visit = vec![root_test_path.to_path_buf()];
    let mut tests = Vec::with_capacity(50);
    while let Some(dir) = dirs_to_visit.pop() {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            let entry_type = entry.file_type()?;
            if entry_type.is_dir() {
                dirs_to_visit.push(path);
                continue;
            }
            if path.extension() == Some(OsStr::new("srs")) {
                let name = path.strip_prefix(root_test_path)?.display().to_string();

                tests.push(Test {
                    name,
                    kind: "system".to_owned(),
                    is_ignored: false,
                    is_bench: false,
                    data: path,
                });
            }
        }
    }
    Ok(tests)
}

#[derive(Clone)]
struct TestCase {
    path: PathBuf,
    variant: TestCaseVariant,
}

impl TestCase {
    /// Executes a srs system test.
    fn drive_test(test: &Test<Self>) -> Outcome {
        let test_name = test.name.clone();
        let test_path = test.data.path.clone();
        match test.data.variant.clone() {
            TestCaseVariant::FailedTestConstruction(report) => fail!(report),
            TestCaseVariant::SrsEmit(tc) => tc.drive_test(test_name, test_path),
            TestCaseVariant::Replay(tc) => tc.drive_test(),
        }
    }

    /// Creates a set of test cases from a srs system test file.
    fn new(test_file: Test<PathBuf>) -> Vec<Test<Self>> {
        let mut cases = Vec::with_capacity(2);
        let path = &test_file.data;

        let mut builder = TestCaseBuilder::new(&mut cases, &test_file);

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                builder.add(format!("Failed to read {}: {}\n", real_path!(path.display()), e));
                return cases;
            }
        };

        let srs_emit_test = match SrsEmitTest::new(&test_file, content) {
            Ok(test) => test,
            Err(failed_test) => {
                builder.add(failed_test);
                return cases;
            }
        };

        // Seeded runs must be reproducible, so run them twice.
        if srs_emit_test.args.contains("--seed") {
            builder.add_suffixed(ReplayTest::from(&srs_emit_test), " replay");
        }

        builder.add(srs_emit_test);
        cases
    }
}

struct TestCaseBuilder<'a> {
    collector: &'a mut Vec<Test<TestCase>>,
    test_file: &'a Test<PathBuf>,
}

impl<'a> TestCaseBuilder<'a> {
    fn new(collector: &'a mut Vec<Test<TestCase>>, test_file: &'a Test<PathBuf>) -> Self {
        Self {
            collector,
            test_file,
        }
    }

    fn add(&mut self, test_case: impl Into<TestCaseVariant>) {
        self.add_suffixed(test_case, "");
    }

    fn add_suffixed(&mut self, test_case: impl Into<TestCaseVariant>, suffix: &str) {
        self.collector.push(Test {
            name: format!("{}{}", self.test_file.name, suffix),
            data: TestCase {
                path: self.test_file.data.clone(),
                variant: test_case.into(),
            },
            kind: "system".to_owned(),
            is_ignored: false,
            is_bench: false,
        });
    }
}

#[derive(Clone)]
enum TestCaseVariant {
    SrsEmit(SrsEmitTest),
    Replay(ReplayTest),
    /// A test file that could not be turned into a test case, and the reason why.
    FailedTestConstruction(String),
}

macro_rules! variant_from_test {
    ($($variant:ident from $test:ident)*) => {$(
        impl From<$test> for TestCaseVariant {
            fn from(test: $test) -> Self {
                Self::$variant(test)
            }
        }
    )*};
}

variant_from_test! {
    SrsEmit from SrsEmitTest
    Replay from ReplayTest
    FailedTestConstruction from String
}

/// Returns the command to bless a test file.
fn get_bless_cmd(test_name: &str) -> String {
    format!(
        "BLESS=1 cargo test --test system_tests -- \"{}\"",
        test_name
    )
}

/// Writes a diff between two texts to a failure report.
fn print_diff(report: &mut String, text1: &str, text2: &str) {
    let Changeset { diffs, .. } = Changeset::new(text1, text2, "\n");

    for diff in diffs {
        let (content, prefix) = match diff {
            Difference::Same(ref x) => (x.clone(), " "),
            Difference::Add(ref x) => (x.clone(), "+"),
            Difference::Rem(ref x) => (x.clone(), "-"),
        };
        for line in content.lines() {
            report.push_str(&format!("{}{}\n", prefix, line));
        }
    }
}
