//! Rule enforcing brace placement for rulesets and at-rule blocks.
//!
//! # Detected Patterns
//!
//! - `{` not preceded by exactly one space (`.a{`, `.a  {`, or `{` on its own line)
//! - In multi-line blocks, `}` not aligned with the first column of the statement

use stylecheck_core::{Context, NodeKind, Params, Rule, Severity, Suggestion, SyntaxNode, Violation};

/// Rule code for brace-style.
pub const CODE: &str = "SC003";

/// Rule name for brace-style.
pub const NAME: &str = "brace-style";

/// Enforces `selector {` with a single space and an aligned closing brace.
#[derive(Debug, Clone, Default)]
pub struct BraceStyle;

impl BraceStyle {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for BraceStyle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires one space before `{` and `}` aligned with its statement"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        &[NodeKind::Ruleset, NodeKind::AtRule]
    }

    fn check(&self, node: &SyntaxNode, _ctx: &mut Context<'_>, _params: &Params) -> Vec<Violation> {
        let Some(header) = node.block_header() else {
            return Vec::new();
        };

        let mut violations = Vec::new();

        if header.before_brace != " " {
            let found = if header.before_brace.is_empty() {
                "no space".to_string()
            } else if header.before_brace.contains('\n') {
                "a line break".to_string()
            } else {
                format!("{} characters of whitespace", header.before_brace.chars().count())
            };
            violations.push(
                Violation::at(
                    NAME,
                    CODE,
                    self.default_severity(),
                    header.open_brace,
                    format!("Expected exactly one space before `{{`, found {found}"),
                )
                .with_suggestion(Suggestion::new(format!("Write `{} {{`", header.prelude))),
            );
        }

        if !header.single_line && header.close_brace.column != node.span.start.column {
            violations.push(Violation::at(
                NAME,
                CODE,
                self.default_severity(),
                header.close_brace,
                format!(
                    "Closing brace at column {} should align with column {}",
                    header.close_brace.column, node.span.start.column
                ),
            ));
        }

        violations
    }
}
