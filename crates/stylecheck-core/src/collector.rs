//! Accumulates violations during a lint pass.

use crate::syntax::Span;
use crate::types::Violation;
use std::collections::HashSet;

/// Collects violations in emission order and produces the final report order.
///
/// A `(rule, span)` pair is kept only once, so a rule that reports the same
/// span twice yields a single violation.
#[derive(Debug, Default)]
pub struct ViolationCollector {
    seen: HashSet<(String, Span)>,
    violations: Vec<Violation>,
}

impl ViolationCollector {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a violation. Returns `false` if it duplicates an earlier one.
    pub fn push(&mut self, violation: Violation) -> bool {
        if !self.seen.insert((violation.rule.clone(), violation.span)) {
            return false;
        }
        self.violations.push(violation);
        true
    }

    /// Adds several violations.
    pub fn extend(&mut self, violations: impl IntoIterator<Item = Violation>) {
        for violation in violations {
            self.push(violation);
        }
    }

    /// Number of distinct violations collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if nothing has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Consumes the collector, returning violations sorted by
    /// [`Violation::report_order`].
    #[must_use]
    pub fn finalize(self) -> Vec<Violation> {
        let mut violations = self.violations;
        violations.sort_by(Violation::report_order);
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Position;
    use crate::types::Severity;

    fn violation(rule: &str, line: usize, column: usize) -> Violation {
        Violation::at(rule, "T", Severity::Warning, Position::new(line, column), "msg")
    }

    #[test]
    fn deduplicates_rule_and_span() {
        let mut collector = ViolationCollector::new();
        assert!(collector.push(violation("hex-case", 1, 5)));
        assert!(!collector.push(violation("hex-case", 1, 5)));
        assert!(collector.push(violation("hex-shorthand", 1, 5)));
        assert_eq!(collector.len(), 2);
    }

    #[test]
    fn finalize_orders_by_position_then_rule() {
        let mut collector = ViolationCollector::new();
        collector.extend([
            violation("zero-unit", 3, 1),
            violation("hex-case", 1, 9),
            violation("brace-style", 1, 9),
            violation("no-tabs", 1, 1),
        ]);

        let rules: Vec<_> = collector
            .finalize()
            .into_iter()
            .map(|v| (v.line, v.column, v.rule))
            .collect();
        assert_eq!(
            rules,
            vec![
                (1, 1, "no-tabs".to_string()),
                (1, 9, "brace-style".to_string()),
                (1, 9, "hex-case".to_string()),
                (3, 1, "zero-unit".to_string()),
            ]
        );
    }
}
