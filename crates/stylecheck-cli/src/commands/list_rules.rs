//! List rules command implementation.

use std::fmt::Write;
use stylecheck_rules::all_rules;

/// Renders the rule table.
fn render() -> String {
    let mut out = String::from("Available rules:\n\n");
    let _ = writeln!(out, "{:<8} {:<32} {:<9} Description", "Code", "Name", "Severity");
    let _ = writeln!(out, "{}", "-".repeat(100));

    for rule in all_rules() {
        let _ = writeln!(
            out,
            "{:<8} {:<32} {:<9} {}",
            rule.code(),
            rule.name(),
            rule.default_severity().to_string(),
            rule.description()
        );
        let params = rule.default_params();
        for (key, value) in params.iter() {
            let _ = writeln!(out, "{:<51}{key} = {value}", "");
        }
    }

    out.push_str("\nUse --rules to run specific rules, e.g.:\n");
    out.push_str("  stylecheck check --rules hex-case,zero-unit\n");
    out.push_str("  stylecheck check --rules SC006,SC009\n");
    out
}

/// Runs the list-rules command.
pub fn run() {
    print!("{}", render());
}
