//! Rule requiring indentation in multiples of a fixed width.
//!
//! # Detected Patterns
//!
//! - A statement (ruleset, at-rule, declaration, comment) that starts a line
//!   with leading spaces not divisible by `size`
//! - A multi-line block's closing brace indented the same way
//!
//! Lines whose indentation contains tabs are left to `no-tabs`. Continuation
//! lines inside values and multi-line comments are not checked.
//!
//! # Configuration
//!
//! - `size`: Indent width in spaces (default: 2)

use stylecheck_core::{
    Context, NodeKind, Params, Position, Rule, Suggestion, SyntaxNode, Violation,
};

/// Rule code for indent-width.
pub const CODE: &str = "SC001";

/// Rule name for indent-width.
pub const NAME: &str = "indent-width";

/// Requires indentation to be a multiple of the indent size.
#[derive(Debug, Clone)]
pub struct IndentWidth {
    /// Default indent width in spaces.
    pub size: usize,
}

impl Default for IndentWidth {
    fn default() -> Self {
        Self::new()
    }
}

impl IndentWidth {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self { size: 2 }
    }

    /// Sets the default indent width.
    #[must_use]
    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Checks the indentation of the line `position` sits on, if `position`
    /// is the first non-whitespace character of that line.
    fn check_line(&self, ctx: &Context<'_>, position: Position, size: usize) -> Option<Violation> {
        let line = ctx.source.line(position.line)?;
        let indent: String = line.chars().take_while(|c| c.is_whitespace()).collect();
        let width = indent.chars().count();

        if width + 1 != position.column || indent.contains('\t') || width % size == 0 {
            return None;
        }

        let expected = width / size * size;
        Some(
            Violation::at(
                NAME,
                CODE,
                self.default_severity(),
                Position::new(position.line, 1),
                format!("Indentation of {width} spaces is not a multiple of {size}"),
            )
            .with_suggestion(Suggestion::new(format!(
                "Indent with {expected} or {} spaces",
                expected + size
            ))),
        )
    }
}

impl Rule for IndentWidth {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires indentation to be a multiple of the indent size"
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        &[
            NodeKind::Ruleset,
            NodeKind::AtRule,
            NodeKind::Declaration,
            NodeKind::Comment,
        ]
    }

    fn default_params(&self) -> Params {
        Params::new().with("size", i64::try_from(self.size).unwrap_or(i64::MAX))
    }

    fn check(&self, node: &SyntaxNode, ctx: &mut Context<'_>, params: &Params) -> Vec<Violation> {
        let size = params.get_usize("size", self.size);
        if size == 0 {
            return Vec::new();
        }

        let mut violations = Vec::new();
        violations.extend(self.check_line(ctx, node.span.start, size));

        if let Some(header) = node.block_header() {
            if !header.single_line {
                violations.extend(self.check_line(ctx, header.close_brace, size));
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylecheck_core::{Config, Linter};

    fn check_code(code: &str, config: &Config) -> Vec<Violation> {
        Linter::builder()
            .rule(IndentWidth::new())
            .build()
            .expect("Failed to build linter")
            .lint_source(code, config)
            .expect("Failed to lint")
    }

    #[test]
    fn test_accepts_two_space_indent() {
        let violations = check_code(
            ".a {\n  color: red;\n  .b {\n    margin: 0;\n  }\n}\n",
            &Config::new(),
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_detects_odd_indent() {
        let violations = check_code(".a {\n   color: red;\n}\n", &Config::new());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code, CODE);
        assert_eq!((violations[0].line, violations[0].column), (2, 1));
        assert!(violations[0].message.contains("3 spaces"));
    }

    #[test]
    fn test_detects_misindented_close_brace() {
        let violations = check_code(".a {\n  color: red;\n }\n", &Config::new());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 3);
    }

    #[test]
    fn test_ignores_statements_not_starting_a_line() {
        let violations = check_code(".a { color: red; }\n", &Config::new());
        assert!(violations.is_empty());
    }

    #[test]
    fn test_ignores_tab_indentation() {
        let violations = check_code(".a {\n\tcolor: red;\n}\n", &Config::new());
        assert!(violations.is_empty());
    }

    #[test]
    fn test_configured_size() {
        let config = Config::new().with_param(NAME, "size", 4);
        let violations = check_code(".a {\n  color: red;\n}\n", &config);
        assert_eq!(violations.len(), 1);

        let violations = check_code(".a {\n    color: red;\n}\n", &config);
        assert!(violations.is_empty());
    }
}
