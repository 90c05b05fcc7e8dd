//! Shared output formatting for lint results.

use anyhow::{Context, Result};
use miette::{NamedSource, Report};
use std::fmt::Write;
use stylecheck_core::{LintResult, Severity, SourceContext, ViolationDiagnostic};

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    print!("{}", render(result, format)?);
    Ok(())
}

/// Renders lint results in the specified format.
pub fn render(result: &LintResult, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => render_text(result),
        OutputFormat::Json => render_json(result)?,
        OutputFormat::Compact => render_compact(result),
        OutputFormat::Pretty => render_pretty(result)?,
    })
}

fn render_text(result: &LintResult) -> String {
    let mut out = String::new();

    for (path, violation) in result.violations() {
        let severity_indicator = match violation.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
        };

        let _ = writeln!(
            out,
            "{} {} at {}:{}:{}",
            violation.code,
            violation.rule,
            path.display(),
            violation.line,
            violation.column,
        );
        let _ = writeln!(out, "  {}: {}", severity_indicator, violation.message);
        if let Some(suggestion) = &violation.suggestion {
            let _ = writeln!(out, "  = help: {}", suggestion.message);
        }
        out.push('\n');
    }

    write_skipped(&mut out, result);
    write_summary(&mut out, result);
    out
}

fn render_json(result: &LintResult) -> Result<String> {
    let mut json = serde_json::to_string_pretty(result)?;
    json.push('\n');
    Ok(json)
}

fn render_compact(result: &LintResult) -> String {
    let mut out = String::new();
    for (path, violation) in result.violations() {
        let _ = writeln!(
            out,
            "{}:{}:{}: {} [{}] {}",
            path.display(),
            violation.line,
            violation.column,
            violation.severity,
            violation.code,
            violation.message,
        );
    }
    out
}

fn render_pretty(result: &LintResult) -> Result<String> {
    let mut out = String::new();

    for file in &result.files {
        let content = std::fs::read_to_string(&file.path)
            .with_context(|| format!("Failed to re-read {}", file.path.display()))?;
        let source = SourceContext::new(&content);
        let name = file.path.display().to_string();

        for violation in &file.violations {
            let report = Report::new(ViolationDiagnostic::new(violation, &source))
                .with_source_code(NamedSource::new(&name, content.clone()));
            let _ = writeln!(out, "{report:?}");
        }
    }

    write_skipped(&mut out, result);
    write_summary(&mut out, result);
    Ok(out)
}

fn write_skipped(out: &mut String, result: &LintResult) {
    for (path, reason) in &result.skipped {
        let _ = writeln!(out, "skipped {}: {}", path.display(), reason);
    }
}

fn write_summary(out: &mut String, result: &LintResult) {
    let (errors, warnings) = result.count_by_severity();
    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    let _ = writeln!(
        out,
        "{}Found {} error(s), {} warning(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, result.files_checked
    );
}
