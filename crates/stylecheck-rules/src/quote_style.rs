//! Rule enforcing one quote character for strings.
//!
//! Strings in selectors (`[type='text']`), at-rule parameters
//! (`@import 'base'`) and property values are checked. A string that contains
//! the preferred quote character is left alone, since switching would
//! require escaping.
//!
//! # Configuration
//!
//! - `style`: `"double"` (default) or `"single"`

use stylecheck_core::utils::value::{tokenize, TokenKind};
use stylecheck_core::{
    Context, NodeData, NodeKind, Params, Position, Rule, Suggestion, SyntaxNode, Violation,
};

/// Rule code for quote-style.
pub const CODE: &str = "SC008";

/// Rule name for quote-style.
pub const NAME: &str = "quote-style";

/// Requires strings to use the configured quote character.
#[derive(Debug, Clone)]
pub struct QuoteStyle {
    /// Default style, `"double"` or `"single"`.
    pub style: String,
}

impl Default for QuoteStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteStyle {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            style: "double".to_string(),
        }
    }

    /// Sets the default style.
    #[must_use]
    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    fn check_text(&self, text: &str, start: Position, preferred: char) -> Vec<Violation> {
        tokenize(text)
            .iter()
            .filter_map(|token| {
                let TokenKind::String { quote } = token.kind else {
                    return None;
                };
                let inner = token
                    .text
                    .get(1..token.text.len().saturating_sub(1))
                    .unwrap_or_default();
                if quote == preferred || inner.contains(preferred) {
                    return None;
                }

                Some(
                    Violation::at(
                        NAME,
                        CODE,
                        self.default_severity(),
                        token.position(text, start),
                        format!("Expected {preferred} quotes, found {quote}"),
                    )
                    .with_suggestion(Suggestion::new(format!(
                        "Use {preferred}{inner}{preferred}"
                    ))),
                )
            })
            .collect()
    }
}

/// Locates the parameters of an at-rule within its text.
fn at_rule_prelude_start(node: &SyntaxNode, name: &str, prelude: &str) -> Option<Position> {
    let after_name = 1 + name.len();
    let offset = node.text.get(after_name..)?.find(prelude)? + after_name;
    Some(node.span.start.advance(&node.text[..offset]))
}

impl Rule for QuoteStyle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires strings to use one quote character"
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        &[NodeKind::Ruleset, NodeKind::AtRule, NodeKind::Declaration]
    }

    fn default_params(&self) -> Params {
        Params::new().with("style", self.style.as_str())
    }

    fn check(&self, node: &SyntaxNode, _ctx: &mut Context<'_>, params: &Params) -> Vec<Violation> {
        let preferred = if params
            .get_str("style", &self.style)
            .eq_ignore_ascii_case("single")
        {
            '\''
        } else {
            '"'
        };

        match &node.data {
            NodeData::Ruleset { header } => {
                self.check_text(&header.prelude, header.prelude_start, preferred)
            }
            NodeData::AtRule { name, prelude, .. } if !prelude.is_empty() => {
                at_rule_prelude_start(node, name, prelude)
                    .map(|start| self.check_text(prelude, start, preferred))
                    .unwrap_or_default()
            }
            NodeData::Declaration {
                value, value_start, ..
            } => self.check_text(value, *value_start, preferred),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylecheck_core::{Config, Linter};

    fn check_code(code: &str, config: &Config) -> Vec<Violation> {
        Linter::builder()
            .rule(QuoteStyle::new())
            .build()
            .expect("Failed to build linter")
            .lint_source(code, config)
            .expect("Failed to lint")
    }

    #[test]
    fn test_detects_single_quotes_everywhere() {
        let violations = check_code(
            "@import 'base';\n\ninput[type='text'] {\n  font-family: 'Helvetica', sans-serif;\n}\n",
            &Config::new(),
        );
        let positions: Vec<_> = violations.iter().map(|v| (v.line, v.column)).collect();
        assert_eq!(positions, vec![(1, 9), (3, 12), (4, 16)]);
    }

    #[test]
    fn test_allows_strings_containing_preferred_quote() {
        let violations = check_code(".a::after {\n  content: 'say \"hi\"';\n}\n", &Config::new());
        assert!(violations.is_empty());
    }

    #[test]
    fn test_single_style() {
        let config = Config::new().with_param(NAME, "style", "single");
        let violations = check_code(".a::after {\n  content: \"x\";\n}\n", &config);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("Expected ' quotes"));
    }
}
