//! Depth-first traversal that dispatches nodes to rules.

use crate::collector::ViolationCollector;
use crate::context::{Context, SourceContext, Sibling};
use crate::registry::ResolvedRule;
use crate::syntax::{NodeKind, SyntaxNode};
use tracing::trace;

/// Visits a syntax tree in document order, invoking every resolved rule whose
/// kind filter matches the current node.
pub struct Walker<'p, 'r> {
    rules: &'p [ResolvedRule<'r>],
}

impl<'p, 'r> Walker<'p, 'r> {
    /// Creates a walker over a resolved rule set.
    #[must_use]
    pub fn new(rules: &'p [ResolvedRule<'r>]) -> Self {
        Self { rules }
    }

    /// Walks `tree`, feeding violations into `collector`.
    pub fn walk(&self, tree: &SyntaxNode, source: &SourceContext<'_>, collector: &mut ViolationCollector) {
        let mut ctx = Context::root(source);
        self.apply(tree, &mut ctx, collector);
        self.visit_children(tree, &mut ctx, collector);
    }

    fn visit_children(
        &self,
        parent: &SyntaxNode,
        ctx: &mut Context<'_>,
        collector: &mut ViolationCollector,
    ) {
        for child in &parent.children {
            self.apply(child, ctx, collector);
            if child.is_block() {
                let mut inner = ctx.enter(child);
                self.visit_children(child, &mut inner, collector);
            }
            if child.kind() == NodeKind::Declaration {
                ctx.previous_declaration = Some(child.span);
            }
            ctx.previous_sibling = Some(Sibling::of(child));
        }
    }

    fn apply(&self, node: &SyntaxNode, ctx: &mut Context<'_>, collector: &mut ViolationCollector) {
        let kind = node.kind();
        for resolved in self.rules.iter().filter(|r| r.applies_to(kind)) {
            let mut violations = resolved.rule.check(node, ctx, &resolved.params);
            if violations.is_empty() {
                continue;
            }
            trace!(
                "{} reported {} violation(s) on {} at {}",
                resolved.rule.name(),
                violations.len(),
                kind,
                node.span.start
            );
            if let Some(severity) = resolved.severity_override {
                for v in &mut violations {
                    v.severity = severity;
                }
            }
            collector.extend(violations);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Params};
    use crate::parser::parse;
    use crate::registry::RuleRegistry;
    use crate::rule::Rule;
    use crate::types::{Severity, Violation};

    /// Reports every visited node with its depth and previous sibling kind.
    struct Tracer;

    impl Rule for Tracer {
        fn name(&self) -> &'static str {
            "tracer"
        }
        fn code(&self) -> &'static str {
            "T001"
        }
        fn applies_to(&self) -> &'static [NodeKind] {
            &[
                NodeKind::Ruleset,
                NodeKind::AtRule,
                NodeKind::Declaration,
                NodeKind::Comment,
            ]
        }
        fn check(&self, node: &SyntaxNode, ctx: &mut Context<'_>, _: &Params) -> Vec<Violation> {
            let previous = ctx
                .previous_sibling
                .map_or_else(|| "-".to_string(), |s| s.kind.to_string());
            vec![Violation::at(
                self.name(),
                self.code(),
                Severity::Warning,
                node.span.start,
                format!("{} depth={} prev={}", node.kind(), ctx.depth, previous),
            )]
        }
    }

    fn trace(source: &str) -> Vec<String> {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(Tracer)).unwrap();
        let rules = registry.resolve(&Config::new()).unwrap();
        let tree = parse(source).unwrap();
        let source = SourceContext::new(&tree.text);

        let mut collector = ViolationCollector::new();
        Walker::new(&rules).walk(&tree, &source, &mut collector);
        collector.finalize().into_iter().map(|v| v.message).collect()
    }

    #[test]
    fn visits_in_document_order_with_scoped_depth() {
        let messages = trace(
            "/* top */\n.a {\n  color: red;\n  .b {\n    width: 0;\n  }\n  height: 1px;\n}\n.c {}\n",
        );
        assert_eq!(
            messages,
            vec![
                "comment depth=0 prev=-",
                "ruleset depth=0 prev=comment",
                "declaration depth=1 prev=-",
                "ruleset depth=1 prev=declaration",
                "declaration depth=2 prev=-",
                "declaration depth=1 prev=ruleset",
                "ruleset depth=0 prev=ruleset",
            ]
        );
    }

    #[test]
    fn media_queries_count_as_nesting() {
        let messages = trace("@media print {\n  .a {\n    color: red;\n  }\n}\n");
        assert_eq!(
            messages,
            vec![
                "at-rule depth=0 prev=-",
                "ruleset depth=1 prev=-",
                "declaration depth=2 prev=-",
            ]
        );
    }

    #[test]
    fn severity_override_is_applied() {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(Tracer)).unwrap();
        let mut config = Config::new();
        config.rules.entry("tracer".to_string()).or_default().severity = Some(Severity::Error);
        let rules = registry.resolve(&config).unwrap();

        let tree = parse(".a {}").unwrap();
        let source = SourceContext::new(&tree.text);
        let mut collector = ViolationCollector::new();
        Walker::new(&rules).walk(&tree, &source, &mut collector);

        let violations = collector.finalize();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::Error);
    }
}
