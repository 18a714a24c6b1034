//! Diagnostics for rule-set sources and run configuration.
//!
//! Every diagnostic has a code. Codes and their long-form explanations are collected from the
//! registries of the components that emit them; see [`Diagnostic::all_codes_with_explanations`].

use crate::common::Span;
use crate::errors::ConfigErrors;
use crate::linter::LintConfig;

use std::collections::HashMap;

/// The kind of a srs diagnostic.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// An error diagnostic. Errors are fatal to the run that produced them.
    Error,
    /// A warning diagnostic. Warnings point at rule sets that are legal but probably not what
    /// was intended, for example a rule that rewrites a word to itself.
    Warning,
    /// A note diagnostic is a generic annotation with no specific connotation like `error`. It
    /// is most useful as an associated diagnostic expanding on a primary one.
    Note,
    /// A help diagnostic instructs the user how their input can be changed.
    Help,
}

/// A secondary diagnostic associated with a primary `Diagnostic`.
#[derive(Clone, Debug)]
pub struct AssociatedDiagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
    pub msg: String,
}

/// A diagnostic for a rule-set source or a word.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
    pub title: String,
    pub code: Option<&'static str>,
    pub msg: Option<String>,
    pub associated_diagnostics: Vec<AssociatedDiagnostic>,
    pub unspanned_associated_diagnostics: Vec<AssociatedDiagnostic>,
}

/// Describes a record of a diagnostic code and its explanation.
pub trait DiagnosticRecord {
    /// The diagnostic code.
    const CODE: &'static str;
    /// A detailed explanation of the diagnostic.
    const EXPLANATION: &'static str;
}

/// Describes a registry of diagnostic codes.
pub trait DiagnosticRegistry {
    /// All codes in the registry, paired with their explanations.
    fn codes_with_explanations() -> Vec<(&'static str, &'static str)>;
}

macro_rules! make_diagnostic {
    ($(($new:ident, $kind:ident))*) => {$(
        pub(crate) fn $new<S, M, N>(span: S, title: M, code: &'static str, msg: N) -> Diagnostic
        where
            S: Into<Span>,
            M: Into<String>,
            N: Into<Option<String>>,
        {
            Diagnostic {
                kind: DiagnosticKind::$kind,
                span: span.into(),
                title: title.into(),
                code: Some(code),
                msg: msg.into(),
                associated_diagnostics: Vec::with_capacity(2),
                unspanned_associated_diagnostics: Vec::with_capacity(2),
            }
        }
    )*};
}

macro_rules! with_associated {
    ($(($with:ident, $kind:ident))*) => {$(
        pub(crate) fn $with<M>(mut self, msg: M) -> Diagnostic
        where
            M: Into<String>,
        {
            self.unspanned_associated_diagnostics
                .push(AssociatedDiagnostic {
                    kind: DiagnosticKind::$kind,
                    span: self.span,
                    msg: msg.into(),
                });
            self
        }
    )*};
}

macro_rules! with_spanned_associated {
    ($(($with:ident, $kind:ident))*) => {$(
        pub(crate) fn $with<S, M>(mut self, span: S, msg: M) -> Diagnostic
        where
            S: Into<Span>,
            M: Into<String>,
        {
            self.associated_diagnostics.push(AssociatedDiagnostic {
                kind: DiagnosticKind::$kind,
                span: span.into(),
                msg: msg.into(),
            });
            self
        }
    )*};
}

impl Diagnostic {
    make_diagnostic! {
        (span_err, Error)
        (span_warn, Warning)
    }

    with_associated! {
        (with_note, Note)
        (with_help, Help)
    }

    with_spanned_associated! {
        (with_spanned_note, Note)
    }

    /// Whether this diagnostic should stop a run.
    pub fn is_fatal(&self) -> bool {
        self.kind == DiagnosticKind::Error
    }

    /// All diagnostic codes known to libsrs, mapped to their explanations.
    pub fn all_codes_with_explanations() -> HashMap<&'static str, &'static str> {
        let mut map = HashMap::new();
        map.extend(ConfigErrors::codes_with_explanations());
        map.extend(LintConfig::codes_with_explanations());
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_unique_across_registries() {
        let config = ConfigErrors::codes_with_explanations();
        let lints = LintConfig::codes_with_explanations();
        let all = Diagnostic::all_codes_with_explanations();
        assert_eq!(all.len(), config.len() + lints.len());
    }

    #[test]
    fn explanations_are_not_empty() {
        for (code, explanation) in Diagnostic::all_codes_with_explanations() {
            assert!(!explanation.trim().is_empty(), "{} has no explanation", code);
        }
    }

    #[test]
    fn builders_attach_associated_diagnostics() {
        let diag = Diagnostic::span_warn(0..2, "title", "L0001", None)
            .with_note("a note")
            .with_spanned_note(3..4, "over there");
        assert!(!diag.is_fatal());
        assert_eq!(diag.unspanned_associated_diagnostics.len(), 1);
        assert_eq!(diag.associated_diagnostics[0].span, Span::from(3..4));
    }
}
