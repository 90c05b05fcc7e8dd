//! Rule requiring every declaration to end with a semicolon.

use stylecheck_core::{
    Context, NodeData, NodeKind, Params, Rule, Severity, Suggestion, SyntaxNode, Violation,
};

/// Rule code for trailing-semicolon.
pub const CODE: &str = "SC011";

/// Rule name for trailing-semicolon.
pub const NAME: &str = "trailing-semicolon";

/// Flags declarations without a terminating `;`, which can only be the last
/// declaration of a block.
#[derive(Debug, Clone, Default)]
pub struct TrailingSemicolon;

impl TrailingSemicolon {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for TrailingSemicolon {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires a semicolon after the last declaration of a block"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        &[NodeKind::Declaration]
    }

    fn check(&self, node: &SyntaxNode, _ctx: &mut Context<'_>, _params: &Params) -> Vec<Violation> {
        match &node.data {
            NodeData::Declaration {
                property,
                semicolon: None,
                ..
            } => vec![Violation::at(
                NAME,
                CODE,
                self.default_severity(),
                node.span.end,
                format!("Missing semicolon after `{property}` declaration"),
            )
            .with_suggestion(Suggestion::new("Add `;`"))],
            _ => Vec::new(),
        }
    }
}
