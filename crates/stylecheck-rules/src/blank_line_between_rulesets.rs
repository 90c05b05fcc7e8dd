//! Rule requiring a blank line between consecutive rulesets.
//!
//! Applies to sibling rulesets at any depth. A ruleset in single-line form
//! (`.icon-b { ... }`) may sit directly below the previous ruleset.

use stylecheck_core::{
    Context, NodeKind, Params, Rule, Suggestion, SyntaxNode, Violation,
};

/// Rule code for blank-line-between-rulesets.
pub const CODE: &str = "SC012";

/// Rule name for blank-line-between-rulesets.
pub const NAME: &str = "blank-line-between-rulesets";

/// Flags a ruleset that directly follows another without a blank line.
#[derive(Debug, Clone, Default)]
pub struct BlankLineBetweenRulesets;

impl BlankLineBetweenRulesets {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for BlankLineBetweenRulesets {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires a blank line between consecutive rulesets"
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        &[NodeKind::Ruleset]
    }

    fn check(&self, node: &SyntaxNode, ctx: &mut Context<'_>, _params: &Params) -> Vec<Violation> {
        let Some(previous) = ctx.previous_sibling else {
            return Vec::new();
        };
        if previous.kind != NodeKind::Ruleset || node.is_single_line() {
            return Vec::new();
        }

        let separated = (previous.span.end.line + 1..node.span.start.line)
            .any(|line| ctx.source.is_blank(line));
        if separated {
            return Vec::new();
        }

        vec![Violation::at(
            NAME,
            CODE,
            self.default_severity(),
            node.span.start,
            "Expected a blank line before this ruleset",
        )
        .with_suggestion(Suggestion::new("Insert an empty line between rulesets"))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylecheck_core::{Config, Linter};

    fn check_code(code: &str) -> Vec<Violation> {
        Linter::builder()
            .rule(BlankLineBetweenRulesets::new())
            .build()
            .expect("Failed to build linter")
            .lint_source(code, &Config::new())
            .expect("Failed to lint")
    }

    #[test]
    fn test_detects_adjacent_rulesets() {
        let violations = check_code(".a {\n  color: red;\n}\n.b {\n  color: blue;\n}\n");
        assert_eq!(violations.len(), 1);
        assert_eq!((violations[0].line, violations[0].column), (4, 1));
    }

    #[test]
    fn test_accepts_separated_rulesets() {
        let violations = check_code(".a {\n  color: red;\n}\n\n.b {\n  color: blue;\n}\n");
        assert!(violations.is_empty());
    }

    #[test]
    fn test_single_line_rulesets_are_exempt() {
        let violations = check_code(".a { width: 10%; }\n.b { width: 20%; }\n");
        assert!(violations.is_empty());
    }

    #[test]
    fn test_single_line_ruleset_after_multi_line_is_exempt() {
        let violations = check_code(".a {\n  color: red;\n}\n.b { color: red; }\n");
        assert!(violations.is_empty());
    }

    #[test]
    fn test_multi_line_ruleset_after_single_line_is_checked() {
        let violations = check_code(".a { color: red; }\n.b {\n  color: red;\n}\n");
        assert_eq!(violations.len(), 1);
        assert_eq!((violations[0].line, violations[0].column), (2, 1));
    }

    #[test]
    fn test_checks_nested_rulesets() {
        let violations = check_code(".a {\n  .b {\n    color: red;\n  }\n  .c {\n    color: blue;\n  }\n}\n");
        assert_eq!(violations.len(), 1);
        assert_eq!((violations[0].line, violations[0].column), (5, 3));
    }

    #[test]
    fn test_first_ruleset_in_block_is_not_checked() {
        let violations = check_code(".a {\n  color: red;\n  .b {\n    color: blue;\n  }\n}\n");
        assert!(violations.is_empty());
    }
}
