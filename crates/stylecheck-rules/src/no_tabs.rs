//! Rule forbidding tab characters in indentation.

use stylecheck_core::{
    Context, NodeKind, Params, Position, Rule, Severity, Suggestion, SyntaxNode, Violation,
};

/// Rule code for no-tabs.
pub const CODE: &str = "SC002";

/// Rule name for no-tabs.
pub const NAME: &str = "no-tabs";

/// Forbids tabs in leading whitespace. Reports once per line, at the first tab.
#[derive(Debug, Clone, Default)]
pub struct NoTabs;

impl NoTabs {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NoTabs {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids tab characters in indentation"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        &[NodeKind::Stylesheet]
    }

    fn check(&self, _node: &SyntaxNode, ctx: &mut Context<'_>, _params: &Params) -> Vec<Violation> {
        ctx.source
            .lines()
            .filter_map(|(line, text)| {
                let column = text
                    .chars()
                    .take_while(|c| c.is_whitespace())
                    .position(|c| c == '\t')?;
                Some(
                    Violation::at(
                        NAME,
                        CODE,
                        self.default_severity(),
                        Position::new(line, column + 1),
                        "Tab character in indentation",
                    )
                    .with_suggestion(Suggestion::new("Indent with spaces")),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylecheck_core::{Config, Linter};

    fn check_code(code: &str) -> Vec<Violation> {
        Linter::builder()
            .rule(NoTabs::new())
            .build()
            .expect("Failed to build linter")
            .lint_source(code, &Config::new())
            .expect("Failed to lint")
    }

    #[test]
    fn test_detects_leading_tabs() {
        let violations = check_code(".a {\n\tcolor: red;\n  \tmargin: 0;\n}\n");
        let positions: Vec<_> = violations.iter().map(|v| (v.line, v.column)).collect();
        assert_eq!(positions, vec![(2, 1), (3, 3)]);
        assert!(violations.iter().all(|v| v.severity == Severity::Error));
    }

    #[test]
    fn test_ignores_tabs_after_content() {
        let violations = check_code(".a {\n  color:\tred;\n}\n");
        assert!(violations.is_empty());
    }
}
