//! Rule requiring each selector of a selector list on its own line.
//!
//! Commas inside parentheses (`:is(.a, .b)`), strings and interpolation do
//! not separate selectors.

use stylecheck_core::utils::value::{tokenize, TokenKind};
use stylecheck_core::{
    Context, NodeKind, Params, Rule, Suggestion, SyntaxNode, Violation,
};

/// Rule code for one-selector-per-line.
pub const CODE: &str = "SC004";

/// Rule name for one-selector-per-line.
pub const NAME: &str = "one-selector-per-line";

/// Requires a line break after every top-level comma in a selector list.
#[derive(Debug, Clone, Default)]
pub struct OneSelectorPerLine;

impl OneSelectorPerLine {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for OneSelectorPerLine {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires each selector in a list on its own line"
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        &[NodeKind::Ruleset]
    }

    fn check(&self, node: &SyntaxNode, _ctx: &mut Context<'_>, _params: &Params) -> Vec<Violation> {
        let Some(header) = node.block_header() else {
            return Vec::new();
        };

        let prelude = header.prelude.as_str();
        let tokens = tokenize(prelude);
        let mut violations = Vec::new();
        let mut depth = 0usize;

        for (i, token) in tokens.iter().enumerate() {
            match token.kind {
                TokenKind::Function | TokenKind::OpenParen => depth += 1,
                TokenKind::CloseParen => depth = depth.saturating_sub(1),
                TokenKind::Comma if depth == 0 => {
                    let mut rest = tokens[i + 1..].iter();
                    let next = match rest.next() {
                        Some(ws) if ws.kind == TokenKind::Whitespace => {
                            if ws.text.contains('\n') {
                                continue;
                            }
                            rest.next()
                        }
                        other => other,
                    };
                    if let Some(selector) = next {
                        violations.push(
                            Violation::at(
                                NAME,
                                CODE,
                                self.default_severity(),
                                selector.position(prelude, header.prelude_start),
                                "Selector shares a line with the previous selector",
                            )
                            .with_suggestion(Suggestion::new("Put a line break after the comma")),
                        );
                    }
                }
                _ => {}
            }
        }

        violations
    }
}
