//! Rule enforcing the letter case of hex color literals.
//!
//! # Configuration
//!
//! - `case`: `"upper"` (default) or `"lower"`

use stylecheck_core::utils::value::tokenize;
use stylecheck_core::{
    Context, NodeData, NodeKind, Params, Rule, Suggestion, SyntaxNode, Violation,
};

/// Rule code for hex-case.
pub const CODE: &str = "SC006";

/// Rule name for hex-case.
pub const NAME: &str = "hex-case";

/// Requires hex colors in one letter case.
#[derive(Debug, Clone)]
pub struct HexCase {
    /// Default case, `"upper"` or `"lower"`.
    pub case: String,
}

impl Default for HexCase {
    fn default() -> Self {
        Self::new()
    }
}

impl HexCase {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            case: "upper".to_string(),
        }
    }

    /// Sets the default case.
    #[must_use]
    pub fn case(mut self, case: impl Into<String>) -> Self {
        self.case = case.into();
        self
    }
}

impl Rule for HexCase {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires hex color literals in one letter case"
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        &[NodeKind::Declaration]
    }

    fn default_params(&self) -> Params {
        Params::new().with("case", self.case.as_str())
    }

    fn check(&self, node: &SyntaxNode, _ctx: &mut Context<'_>, params: &Params) -> Vec<Violation> {
        let NodeData::Declaration {
            value, value_start, ..
        } = &node.data
        else {
            return Vec::new();
        };

        let lower = params.get_str("case", &self.case).eq_ignore_ascii_case("lower");

        tokenize(value)
            .iter()
            .filter_map(|token| {
                let digits = token.hex_color()?;
                let wrong_case = if lower {
                    digits.chars().any(|c| c.is_ascii_uppercase())
                } else {
                    digits.chars().any(|c| c.is_ascii_lowercase())
                };
                if !wrong_case {
                    return None;
                }

                let (expected, case_name) = if lower {
                    (token.text.to_ascii_lowercase(), "lowercase")
                } else {
                    (token.text.to_ascii_uppercase(), "uppercase")
                };
                Some(
                    Violation::at(
                        NAME,
                        CODE,
                        self.default_severity(),
                        token.position(value, *value_start),
                        format!("Hex color `{}` should be {case_name}", token.text),
                    )
                    .with_suggestion(Suggestion::new(format!("Use `{expected}`"))),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylecheck_core::{Config, Linter};

    fn check_code(code: &str, config: &Config) -> Vec<Violation> {
        Linter::builder()
            .rule(HexCase::new())
            .build()
            .expect("Failed to build linter")
            .lint_source(code, config)
            .expect("Failed to lint")
    }

    #[test]
    fn test_detects_lowercase_hex() {
        let violations = check_code(".a {\n  color: #ffffff;\n}\n", &Config::new());
        assert_eq!(violations.len(), 1);
        assert_eq!((violations[0].line, violations[0].column), (2, 10));
        assert_eq!(
            violations[0].suggestion.as_ref().map(|s| s.message.as_str()),
            Some("Use `#FFFFFF`")
        );
    }

    #[test]
    fn test_accepts_uppercase_and_digits() {
        let violations = check_code(
            ".a {\n  border: 1px solid #E5E5E5;\n  color: #333;\n}\n",
            &Config::new(),
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_ignores_trailing_comment_after_last_declaration() {
        let violations = check_code(".a {\n  color: red // was #fff\n}\n", &Config::new());
        assert!(violations.is_empty());
    }

    #[test]
    fn test_ignores_strings_and_non_colors() {
        let violations = check_code(
            ".a {\n  background: url(\"#fff\");\n  content: \"#abc\";\n}\n",
            &Config::new(),
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_lower_case_configuration() {
        let config = Config::new().with_param(NAME, "case", "lower");
        let violations = check_code(".a {\n  color: #FFF;\n  background: #eee;\n}\n", &config);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 2);
        assert!(violations[0].message.contains("lowercase"));
    }
}
