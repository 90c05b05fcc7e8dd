//! Rule requiring each declaration on its own line.
//!
//! Blocks the parser flags as single-line (`.icon { width: 10%; height: 10%; }`)
//! are exempt.

use stylecheck_core::{
    Context, NodeKind, Params, Rule, Suggestion, SyntaxNode, Violation,
};

/// Rule code for one-declaration-per-line.
pub const CODE: &str = "SC005";

/// Rule name for one-declaration-per-line.
pub const NAME: &str = "one-declaration-per-line";

/// Flags a declaration that starts on the line where the previous one ended.
#[derive(Debug, Clone, Default)]
pub struct OneDeclarationPerLine;

impl OneDeclarationPerLine {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for OneDeclarationPerLine {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires each declaration on its own line"
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        &[NodeKind::Declaration]
    }

    fn check(&self, node: &SyntaxNode, ctx: &mut Context<'_>, _params: &Params) -> Vec<Violation> {
        if ctx.single_line {
            return Vec::new();
        }

        match ctx.previous_declaration {
            Some(previous) if previous.end.line == node.span.start.line => {
                vec![Violation::at(
                    NAME,
                    CODE,
                    self.default_severity(),
                    node.span.start,
                    "Declaration shares a line with the previous declaration",
                )
                .with_suggestion(Suggestion::new("Move the declaration to its own line"))]
            }
            _ => Vec::new(),
        }
    }
}
