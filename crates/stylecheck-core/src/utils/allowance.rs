//! Comment-based allowance directives.
//!
//! Supports directives like:
//! ```text
//! /* stylecheck: allow(hex-case) reason="brand palette" */
//! // stylecheck: allow(zero-unit, comma-space)
//! ```
//!
//! A directive covers the line it starts on and the line after it ends.

use crate::syntax::{NodeData, SyntaxNode};
use crate::types::Violation;
use std::collections::HashSet;

/// Parsed allowance directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowDirective {
    /// Rule names that are allowed; `all` matches every rule.
    pub rules: HashSet<String>,
    /// Optional reason for the allowance.
    pub reason: Option<String>,
}

impl AllowDirective {
    /// Whether this directive covers `rule_name`.
    #[must_use]
    pub fn allows(&self, rule_name: &str) -> bool {
        self.rules.contains(rule_name) || self.rules.contains("all")
    }
}

/// Allowance directives found in a syntax tree, with the lines they cover.
#[derive(Debug, Clone, Default)]
pub struct Allowances {
    entries: Vec<(usize, usize, AllowDirective)>,
}

impl Allowances {
    /// Collects every directive comment in `tree`.
    #[must_use]
    pub fn from_tree(tree: &SyntaxNode) -> Self {
        let entries = tree
            .walk()
            .filter_map(|node| match &node.data {
                NodeData::Comment { body, .. } => parse_allow_directive(body)
                    .map(|d| (node.span.start.line, node.span.end.line + 1, d)),
                _ => None,
            })
            .collect();
        Self { entries }
    }

    /// Returns true if no directives were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `violation` is covered by a directive.
    #[must_use]
    pub fn allows(&self, violation: &Violation) -> bool {
        self.entries.iter().any(|(first, next, directive)| {
            (violation.line == *first || violation.line == *next)
                && directive.allows(&violation.rule)
        })
    }
}

/// Parses an allowance directive from the body of a comment.
#[must_use]
pub fn parse_allow_directive(body: &str) -> Option<AllowDirective> {
    let comment_content = body.trim().trim_start_matches('*').trim();

    let directive = comment_content.strip_prefix("stylecheck:")?.trim();
    let allow_content = directive.strip_prefix("allow(")?.trim();

    let paren_end = allow_content.find(')')?;
    let rules: HashSet<String> = allow_content[..paren_end]
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest.strip_prefix("reason=").and_then(|reason_part| {
        let quoted = reason_part.trim().strip_prefix('"')?;
        let end = quoted.find('"')?;
        Some(quoted[..end].to_string())
    });

    Some(AllowDirective { rules, reason })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::syntax::Position;
    use crate::types::Severity;

    #[test]
    fn test_parse_allow_directive() {
        let directive = parse_allow_directive(" stylecheck: allow(hex-case) ").unwrap();
        assert!(directive.rules.contains("hex-case"));
        assert!(directive.reason.is_none());
    }

    #[test]
    fn test_parse_allow_directive_with_reason() {
        let directive =
            parse_allow_directive(" stylecheck: allow(zero-unit) reason=\"flex basis\" ").unwrap();
        assert!(directive.allows("zero-unit"));
        assert_eq!(directive.reason.as_deref(), Some("flex basis"));
    }

    #[test]
    fn test_parse_multiple_rules_and_all() {
        let directive = parse_allow_directive("stylecheck: allow(a, b , c)").unwrap();
        assert_eq!(directive.rules.len(), 3);
        assert!(parse_allow_directive("stylecheck: allow(all)")
            .unwrap()
            .allows("anything"));
    }

    #[test]
    fn test_rejects_other_comments() {
        assert!(parse_allow_directive(" plain comment ").is_none());
        assert!(parse_allow_directive("stylecheck: allow()").is_none());
    }

    #[test]
    fn covers_same_and_following_line() {
        let tree = parse(
            ".a {\n  /* stylecheck: allow(hex-case) */\n  color: #fff;\n  background: #abc; // stylecheck: allow(hex-case)\n  border-color: #ddd;\n}\n",
        )
        .unwrap();
        let allowances = Allowances::from_tree(&tree);
        assert!(!allowances.is_empty());

        let at = |line| {
            Violation::at("hex-case", "SC006", Severity::Warning, Position::new(line, 10), "x")
        };
        assert!(allowances.allows(&at(3)));
        assert!(allowances.allows(&at(4)));
        assert!(!allowances.allows(&Violation::at(
            "zero-unit",
            "SC009",
            Severity::Warning,
            Position::new(3, 1),
            "x"
        )));
        assert!(allowances.allows(&at(5)));
        assert!(!allowances.allows(&at(6)));
    }
}
