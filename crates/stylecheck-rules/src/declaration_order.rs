//! Rule requiring alphabetical property order within a declaration cluster.
//!
//! A cluster is a run of declarations in one block. Clusters end at comments
//! on their own line and at nested rulesets and at-rules (such as `@include`).
//! A trailing annotation comment (`width: 1px; /* 1 */`) does not end one. With
//! `cluster-delimiter = "blank-line"`, an empty line between two declarations
//! also starts a new cluster.
//!
//! Vendor prefixes are ignored when comparing, so `-webkit-box-sizing` sorts
//! as `box-sizing`. SCSS variables and custom properties are not ordered.
//!
//! # Configuration
//!
//! - `cluster-delimiter`: `"comment"` (default) or `"blank-line"`

use stylecheck_core::{
    Context, NodeData, NodeKind, Params, PreviousProperty, Rule, Suggestion, SyntaxNode,
    Violation,
};

/// Rule code for declaration-alphabetical-order.
pub const CODE: &str = "SC013";

/// Rule name for declaration-alphabetical-order.
pub const NAME: &str = "declaration-alphabetical-order";

/// How declaration clusters are delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterDelimiter {
    /// Only comments and nested blocks separate clusters.
    Comment,
    /// Blank lines separate clusters as well.
    BlankLine,
}

impl ClusterDelimiter {
    /// Parameter value for this delimiter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::BlankLine => "blank-line",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "comment" => Some(Self::Comment),
            "blank-line" => Some(Self::BlankLine),
            _ => None,
        }
    }
}

/// Requires properties in ascending order within each cluster.
#[derive(Debug, Clone)]
pub struct DeclarationOrder {
    /// Default cluster delimiter.
    pub delimiter: ClusterDelimiter,
}

impl Default for DeclarationOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationOrder {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            delimiter: ClusterDelimiter::Comment,
        }
    }

    /// Sets the default cluster delimiter.
    #[must_use]
    pub fn delimiter(mut self, delimiter: ClusterDelimiter) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Sort key for a property: lowercase, vendor prefix removed.
fn sort_key(property: &str) -> String {
    let lower = property.to_ascii_lowercase();
    let unprefixed = lower
        .strip_prefix('-')
        .and_then(|rest| rest.split_once('-'))
        .map_or(lower.as_str(), |(_, name)| name);
    unprefixed.to_string()
}

/// A comment that starts on the line where the previous sibling ends is an
/// annotation, not a cluster heading.
fn trails_previous(comment: &SyntaxNode, ctx: &Context<'_>) -> bool {
    ctx.previous_sibling
        .is_some_and(|s| s.span.end.line == comment.span.start.line)
}

impl Rule for DeclarationOrder {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires alphabetical property order within declaration clusters"
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        &[
            NodeKind::Declaration,
            NodeKind::Comment,
            NodeKind::Ruleset,
            NodeKind::AtRule,
        ]
    }

    fn default_params(&self) -> Params {
        Params::new().with("cluster-delimiter", self.delimiter.as_str())
    }

    fn check(&self, node: &SyntaxNode, ctx: &mut Context<'_>, params: &Params) -> Vec<Violation> {
        let delimiter = ClusterDelimiter::parse(params.get_str("cluster-delimiter", ""))
            .unwrap_or(self.delimiter);

        let property = match &node.data {
            NodeData::Declaration { property, .. } => property,
            NodeData::Comment { .. } if trails_previous(node, ctx) => return Vec::new(),
            _ => {
                ctx.previous_property = None;
                return Vec::new();
            }
        };

        if property.starts_with('$') || property.starts_with("--") {
            return Vec::new();
        }

        let key = sort_key(property);
        let previous = ctx.previous_property.take().filter(|previous| {
            delimiter != ClusterDelimiter::BlankLine
                || !(previous.end_line + 1..node.span.start.line).any(|l| ctx.source.is_blank(l))
        });

        let mut violations = Vec::new();
        if let Some(previous) = previous {
            if key < previous.key {
                violations.push(
                    Violation::at(
                        NAME,
                        CODE,
                        self.default_severity(),
                        node.span.start,
                        format!("`{property}` should come before `{}`", previous.key),
                    )
                    .with_suggestion(Suggestion::new(
                        "Sort declarations alphabetically within the group",
                    )),
                );
            }
        }

        ctx.previous_property = Some(PreviousProperty {
            key,
            end_line: node.span.end.line,
        });
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylecheck_core::{Config, Linter};

    fn check_code(code: &str, config: &Config) -> Vec<Violation> {
        Linter::builder()
            .rule(DeclarationOrder::new())
            .build()
            .expect("Failed to build linter")
            .lint_source(code, config)
            .expect("Failed to lint")
    }

    #[test]
    fn test_sort_key_strips_vendor_prefix() {
        assert_eq!(sort_key("-webkit-Box-Sizing"), "box-sizing");
        assert_eq!(sort_key("margin-top"), "margin-top");
    }

    #[test]
    fn test_detects_out_of_order_property() {
        let violations = check_code(
            ".a {\n  margin: 0;\n  color: red;\n  padding: 0;\n}\n",
            &Config::new(),
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 3);
        assert_eq!(violations[0].message, "`color` should come before `margin`");
    }

    #[test]
    fn test_comments_start_new_cluster() {
        let violations = check_code(
            ".a {\n  margin: 0;\n  padding: 0;\n  /* Typography */\n  color: red;\n  font-size: 1rem;\n}\n",
            &Config::new(),
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_trailing_comment_keeps_cluster() {
        let violations = check_code(".a {\n  width: 1px; /* 1 */\n  color: red;\n}\n", &Config::new());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 3);
        assert_eq!(violations[0].message, "`color` should come before `width`");
    }

    #[test]
    fn test_nested_blocks_reset_cluster_and_do_not_leak() {
        let violations = check_code(
            ".a {\n  width: 1px;\n  .b {\n    color: red;\n  }\n  height: 1px;\n}\n",
            &Config::new(),
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_vendor_prefixes_sort_with_standard_property() {
        let violations = check_code(
            ".a {\n  -webkit-box-sizing: border-box;\n  box-sizing: border-box;\n  color: red;\n}\n",
            &Config::new(),
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_blank_line_delimiter() {
        let source = ".a {\n  margin: 0;\n  padding: 0;\n\n  color: red;\n  background: none;\n}\n";

        let comment_mode = check_code(source, &Config::new());
        let lines: Vec<_> = comment_mode.iter().map(|v| v.line).collect();
        assert_eq!(lines, vec![5, 6]);

        let config = Config::new().with_param(NAME, "cluster-delimiter", "blank-line");
        let blank_mode = check_code(source, &config);
        let lines: Vec<_> = blank_mode.iter().map(|v| v.line).collect();
        assert_eq!(lines, vec![6]);
    }
}
