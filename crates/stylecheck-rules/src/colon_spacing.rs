//! Rule enforcing spacing around the colon of a declaration.
//!
//! # Detected Patterns
//!
//! - Whitespace between the property and `:` (`color : red`)
//! - Anything other than a single space after `:` (`color:red`, `color:  red`)
//!
//! A value that starts on the line after the colon is accepted, which lets
//! long SCSS maps and `grid-template-areas` values wrap.

use stylecheck_core::{
    Context, NodeData, NodeKind, Params, Rule, Suggestion, SyntaxNode, Violation,
};

/// Rule code for declaration-colon-spacing.
pub const CODE: &str = "SC016";

/// Rule name for declaration-colon-spacing.
pub const NAME: &str = "declaration-colon-spacing";

/// Requires `property: value` spacing.
#[derive(Debug, Clone, Default)]
pub struct ColonSpacing;

impl ColonSpacing {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ColonSpacing {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires no space before and one space after a declaration colon"
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        &[NodeKind::Declaration]
    }

    fn check(&self, node: &SyntaxNode, _ctx: &mut Context<'_>, _params: &Params) -> Vec<Violation> {
        let NodeData::Declaration {
            property,
            before_colon,
            colon,
            after_colon,
            value,
            ..
        } = &node.data
        else {
            return Vec::new();
        };

        if value.is_empty() {
            return Vec::new();
        }

        let mut violations = Vec::new();

        if !before_colon.is_empty() {
            violations.push(
                Violation::at(
                    NAME,
                    CODE,
                    self.default_severity(),
                    node.span.start.advance(property),
                    "Unexpected whitespace before `:`",
                )
                .with_suggestion(Suggestion::new(format!("Write `{property}:`"))),
            );
        }

        if after_colon != " " && !after_colon.contains('\n') {
            let found = if after_colon.is_empty() {
                "no space".to_string()
            } else {
                format!("{} characters of whitespace", after_colon.chars().count())
            };
            violations.push(
                Violation::at(
                    NAME,
                    CODE,
                    self.default_severity(),
                    *colon,
                    format!("Expected one space after `:`, found {found}"),
                )
                .with_suggestion(Suggestion::new(format!("Write `{property}: {value}`"))),
            );
        }

        violations
    }
}
