//! Core types for lint violations and results.

use crate::syntax::{Position, Span};
use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::PathBuf;

/// Severity level for lint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Style issue that should be addressed.
    Warning,
    /// Style issue that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A suggested fix for a violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
}

impl Suggestion {
    /// Creates a new suggestion.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A single reported instance of non-conformance to one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule identifier (e.g., "hex-case").
    pub rule: String,
    /// Rule code (e.g., "SC006").
    pub code: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Line number (1-indexed) of the start of `span`.
    pub line: usize,
    /// Column number (1-indexed) of the start of `span`.
    pub column: usize,
    /// Source span the violation is anchored to.
    pub span: Span,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        rule: impl Into<String>,
        code: impl Into<String>,
        severity: Severity,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            code: code.into(),
            severity,
            line: span.start.line,
            column: span.start.column,
            span,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Creates a violation anchored at a single position.
    #[must_use]
    pub fn at(
        rule: impl Into<String>,
        code: impl Into<String>,
        severity: Severity,
        position: Position,
        message: impl Into<String>,
    ) -> Self {
        Self::new(rule, code, severity, Span::point(position), message)
    }

    /// Adds a suggestion to this violation.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    /// Total order used for reports: position, then rule id.
    ///
    /// End position and message break any remaining ties so that output is
    /// byte-for-byte stable.
    #[must_use]
    pub fn report_order(&self, other: &Self) -> Ordering {
        self.span
            .start
            .cmp(&other.span.start)
            .then_with(|| self.rule.cmp(&other.rule))
            .then_with(|| self.span.end.cmp(&other.span.end))
            .then_with(|| self.message.cmp(&other.message))
    }

    /// Formats the violation for terminal output.
    #[must_use]
    pub fn format(&self, file: &str) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} at {}:{}:{}\n",
            self.code, self.rule, file, self.line, self.column,
        );
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if let Some(suggestion) = &self.suggestion {
            let _ = writeln!(output, "  = help: {}", suggestion.message);
        }
        output
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {} [{}] {}",
            self.line, self.column, self.severity, self.rule, self.message
        )
    }
}

/// Converts a Violation to a miette Diagnostic for rich error display.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl ViolationDiagnostic {
    /// Builds a diagnostic with the violation's span resolved against `source`.
    #[must_use]
    pub fn new(v: &Violation, source: &crate::SourceContext<'_>) -> Self {
        let start = source.offset_for(v.span.start);
        let end = source.offset_for(v.span.end).max(start);
        Self {
            message: format!("[{}] {}", v.code, v.message),
            help: v.suggestion.as_ref().map(|s| s.message.clone()),
            span: SourceSpan::from((start, (end - start).max(1))),
            label_message: v.rule.clone(),
        }
    }
}

/// Violations found in one file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileReport {
    /// Path of the linted file.
    pub path: PathBuf,
    /// Violations in report order.
    pub violations: Vec<Violation>,
}

/// Result of running lint analysis over many files.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// Per-file reports, sorted by path. Files without violations are omitted.
    pub files: Vec<FileReport>,
    /// Number of files checked.
    pub files_checked: usize,
    /// Files that could not be parsed, with the parse error message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<(PathBuf, String)>,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates over every violation with the path of its file.
    pub fn violations(&self) -> impl Iterator<Item = (&PathBuf, &Violation)> {
        self.files
            .iter()
            .flat_map(|f| f.violations.iter().map(move |v| (&f.path, v)))
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_violations_at(Severity::Error)
    }

    /// Checks if any violations meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.violations().any(|(_, v)| v.severity >= severity)
    }

    /// Counts violations by severity as `(errors, warnings)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize) {
        self.violations()
            .fold((0, 0), |(errors, warnings), (_, v)| match v.severity {
                Severity::Error => (errors + 1, warnings),
                Severity::Warning => (errors, warnings + 1),
            })
    }

    /// Formats violations as a plain-text report.
    #[must_use]
    pub fn format_report(&self) -> String {
        use std::fmt::Write;

        let mut report = String::new();
        for (path, v) in self.violations() {
            let _ = writeln!(report, "{}", v.format(&path.display().to_string()));
        }

        let (errors, warnings) = self.count_by_severity();
        let _ = writeln!(
            report,
            "Found {} error(s), {} warning(s) in {} file(s)",
            errors, warnings, self.files_checked
        );
        report
    }
}
