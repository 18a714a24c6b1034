//! Emit strategies for libsrs values and reports.

use crate::derivation::Derivation;
use crate::grammar::{RuleSet, Word};
use crate::harness::equivalence::{BatchReport, TrialResult};
use crate::harness::metamorphic::InvariantBatchReport;
use crate::harness::sweep::{SweepFinding, SweepReport};
use crate::normal_forms::{Confluence, NormalFormReport};
use crate::search::{Reachability, SearchOutcome};
use crate::utils::indent;

use core::fmt;

/// The format in which a value should be emitted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EmitFormat {
    /// Canonical, human-readable form.
    Pretty,
    /// JSON form. Without the `json` feature this falls back to the debug form.
    Json,
    /// libsrs internal debug form.
    /// NB: this form is not stable, and no assumptions should be made about it.
    Debug,
}

impl From<String> for EmitFormat {
    fn from(form: String) -> Self {
        match form.as_ref() {
            "json" => EmitFormat::Json,
            "debug" => EmitFormat::Debug,
            _ => EmitFormat::Pretty,
        }
    }
}

#[cfg(feature = "json")]
#[doc(hidden)]
pub trait Serializable: serde::Serialize {}
#[cfg(feature = "json")]
impl<T: serde::Serialize + ?Sized> Serializable for T {}

#[cfg(not(feature = "json"))]
#[doc(hidden)]
pub trait Serializable {}
#[cfg(not(feature = "json"))]
impl<T: ?Sized> Serializable for T {}

/// Implements the emission of a type in an [EmitFormat][EmitFormat].
pub trait Emit
where
    Self: fmt::Display + fmt::Debug + Serializable,
{
    /// Emit `self` with the given [EmitFormat][EmitFormat].
    fn emit(&self, form: EmitFormat) -> String {
        match form {
            EmitFormat::Pretty => self.emit_pretty(),
            EmitFormat::Json => self.emit_json(),
            EmitFormat::Debug => self.emit_debug(),
        }
    }

    /// Emit `self` with the [pretty emit format][EmitFormat::Pretty]
    fn emit_pretty(&self) -> String;

    /// Emit `self` with the [debug emit format][EmitFormat::Debug]
    fn emit_debug(&self) -> String {
        format!("{:#?}", self)
    }

    /// Emit `self` with the [JSON emit format][EmitFormat::Json]
    #[cfg(feature = "json")]
    fn emit_json(&self) -> String {
        match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(err) => format!(r#"{{"error": "{}"}}"#, err),
        }
    }

    /// Emit `self` with the [JSON emit format][EmitFormat::Json]
    #[cfg(not(feature = "json"))]
    fn emit_json(&self) -> String {
        self.emit_debug()
    }
}

/// Implements `core::fmt::Display` for a type implementing `Emit`.
#[doc(hidden)]
macro_rules! fmt_emit_impl {
    ($S:path) => {
        impl core::fmt::Display for $S {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.emit_pretty(),)
            }
        }
    };
}

impl Emit for Word {
    fn emit_pretty(&self) -> String {
        self.to_string()
    }
}

impl Emit for RuleSet {
    fn emit_pretty(&self) -> String {
        (0..self.len())
            .map(|i| self.describe(i))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Emit for SearchOutcome {
    fn emit_pretty(&self) -> String {
        self.to_string()
    }
}

fmt_emit_impl!(Reachability);
impl Emit for Reachability {
    fn emit_pretty(&self) -> String {
        let noun = if self.visited == 1 { "word" } else { "words" };
        format!("{} ({} {} visited)", self.outcome, self.visited, noun)
    }
}

fmt_emit_impl!(Derivation);
impl Emit for Derivation {
    fn emit_pretty(&self) -> String {
        let mut lines = Vec::with_capacity(self.steps.len());
        for step in self.steps.iter() {
            let mut line = format!(r#"{}: "{}""#, step.step, step.word);
            if let Some(rule) = &step.rule {
                line.push_str(&format!(" [{}]", rule));
            }
            lines.push(line);
            for check in step.invariants.iter() {
                let status = if check.holds { "ok" } else { "not ok" };
                lines.push(indent(
                    format!("{} {} = {}", status, check.name, check.value),
                    3,
                ));
            }
        }
        lines.join("\n")
    }
}

fmt_emit_impl!(TrialResult);
impl Emit for TrialResult {
    fn emit_pretty(&self) -> String {
        format!(
            r#"start "{}" -> "{}" | "{}"; forward: {}; backward: {}"#,
            self.start, self.first, self.second, self.forward.outcome, self.backward.outcome
        )
    }
}

fn summary_line(label: &str, count: usize, total: usize) -> String {
    format!(
        "{}: {}/{} ({})",
        label,
        count,
        total,
        crate::utils::percent(count, total)
    )
}

fmt_emit_impl!(BatchReport);
impl Emit for BatchReport {
    fn emit_pretty(&self) -> String {
        let mut lines = Vec::new();
        for (number, trial) in self.failures.iter() {
            lines.push(format!("{} trial {}: {}", trial.verdict, number, trial));
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(summary_line("Passed", self.passed, self.total));
        lines.push(summary_line("Failed", self.failed, self.total));
        lines.push(summary_line("Inconclusive", self.inconclusive, self.total));
        lines.push(if self.all_passed() {
            "All trials passed.".to_owned()
        } else {
            "Some trials did not pass.".to_owned()
        });
        lines.join("\n")
    }
}

fmt_emit_impl!(InvariantBatchReport);
impl Emit for InvariantBatchReport {
    fn emit_pretty(&self) -> String {
        let mut lines = Vec::new();
        for (i, derivation) in self.trials.iter().enumerate() {
            let verdict = if derivation.holds() { "passed" } else { "FAILED" };
            lines.push(format!("Trial {}: {}", i + 1, verdict));
            lines.push(indent(derivation.emit_pretty(), 2));
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(summary_line("Passed", self.passed, self.total));
        lines.push(summary_line("Failed", self.failed, self.total));
        lines.push(if self.all_passed() {
            "All invariants held.".to_owned()
        } else {
            "Some invariants did not hold.".to_owned()
        });
        lines.join("\n")
    }
}

fn quoted_forms<'a>(forms: impl Iterator<Item = &'a Word>) -> String {
    forms
        .map(|form| format!(r#""{}""#, form))
        .collect::<Vec<_>>()
        .join(", ")
}

fmt_emit_impl!(NormalFormReport);
impl Emit for NormalFormReport {
    fn emit_pretty(&self) -> String {
        let verdict = match self.confluence() {
            Confluence::Unique(form) => format!(r#"has the unique normal form "{}""#, form),
            Confluence::Ambiguous(forms) => format!(
                "has {} normal forms: {}",
                forms.len(),
                quoted_forms(forms.iter())
            ),
            Confluence::NoNormalForm => "has no normal form".to_owned(),
            Confluence::Exhausted if self.forms.is_empty() => {
                "has no normal form found before the search limit".to_owned()
            }
            Confluence::Exhausted => format!(
                "has at least the normal form {} (search limit reached)",
                quoted_forms(self.forms.iter())
            ),
        };
        format!(
            r#""{}" {} ({} words explored)"#,
            self.start, verdict, self.explored
        )
    }
}

fmt_emit_impl!(SweepFinding);
impl Emit for SweepFinding {
    fn emit_pretty(&self) -> String {
        match self {
            Self::Ambiguous { word, forms } => {
                format!(r#""{}": normal forms {}"#, word, quoted_forms(forms.iter()))
            }
            Self::NoNormalForm { word } => format!(r#""{}": no normal form"#, word),
            Self::Exhausted { word } => format!(r#""{}": search limit reached"#, word),
        }
    }
}

fmt_emit_impl!(SweepReport);
impl Emit for SweepReport {
    fn emit_pretty(&self) -> String {
        let mut lines: Vec<String> = self.findings.iter().map(Emit::emit_pretty).collect();
        lines.push(if self.is_confluent() {
            format!(
                "All {} words of length {} have a unique normal form.",
                self.checked, self.length
            )
        } else {
            format!(
                "{} of {} words of length {} do not have a unique normal form.",
                self.findings.len(),
                self.checked,
                self.length
            )
        });
        lines.join("\n")
    }
}
