//! Rule requiring exactly one space after commas in values.
//!
//! A comma at the end of a line is fine; values like long `font-family`
//! lists or `box-shadow` layers may wrap. Commas inside `url()` are part of
//! the address and are skipped.

use stylecheck_core::utils::value::{tokenize, TokenKind};
use stylecheck_core::{
    Context, NodeData, NodeKind, Params, Rule, Suggestion, SyntaxNode, Violation,
};

/// Rule code for comma-space.
pub const CODE: &str = "SC010";

/// Rule name for comma-space.
pub const NAME: &str = "comma-space";

/// Requires `, ` (or a line break) after every comma in a declaration value.
#[derive(Debug, Clone, Default)]
pub struct CommaSpace;

impl CommaSpace {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for CommaSpace {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires exactly one space after commas in values"
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        &[NodeKind::Declaration]
    }

    fn check(&self, node: &SyntaxNode, _ctx: &mut Context<'_>, _params: &Params) -> Vec<Violation> {
        let NodeData::Declaration {
            value, value_start, ..
        } = &node.data
        else {
            return Vec::new();
        };

        let tokens = tokenize(value);
        let mut violations = Vec::new();
        let mut in_url = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            match token.kind {
                TokenKind::Function => in_url.push(
                    token
                        .function_name()
                        .is_some_and(|name| name.eq_ignore_ascii_case("url")),
                ),
                TokenKind::OpenParen => in_url.push(false),
                TokenKind::CloseParen => {
                    in_url.pop();
                }
                TokenKind::Comma if !in_url.contains(&true) => {
                    let found = match tokens.get(i + 1) {
                        None => continue,
                        Some(next) if next.kind != TokenKind::Whitespace => "no space",
                        Some(ws) if ws.text == " " || ws.text.contains('\n') => continue,
                        Some(_) => "extra whitespace",
                    };
                    violations.push(
                        Violation::at(
                            NAME,
                            CODE,
                            self.default_severity(),
                            token.position(value, *value_start),
                            format!("Expected one space after comma, found {found}"),
                        )
                        .with_suggestion(Suggestion::new("Write `, ` between values")),
                    );
                }
                _ => {}
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylecheck_core::{Config, Linter};

    fn check_code(code: &str) -> Vec<Violation> {
        Linter::builder()
            .rule(CommaSpace::new())
            .build()
            .expect("Failed to build linter")
            .lint_source(code, &Config::new())
            .expect("Failed to lint")
    }

    #[test]
    fn test_detects_missing_and_extra_space() {
        let violations = check_code(".a {\n  color: rgba(0,0, 0,  .5);\n}\n");
        let found: Vec<_> = violations
            .iter()
            .map(|v| (v.column, v.message.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![
                (16, "Expected one space after comma, found no space"),
                (21, "Expected one space after comma, found extra whitespace"),
            ]
        );
    }

    #[test]
    fn test_allows_line_breaks_after_commas() {
        let violations = check_code(
            ".a {\n  font-family: \"Helvetica Neue\",\n    Arial, sans-serif;\n}\n",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_ignores_commas_in_urls_and_strings() {
        let violations = check_code(
            ".a {\n  background: url(data:image/png;base64,iVBORw0KGgo=);\n  content: \"a,b\";\n}\n",
        );
        assert!(violations.is_empty());
    }
}
