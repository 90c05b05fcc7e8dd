//! Single-file lint orchestration: resolve, walk, collect, filter.

use crate::collector::ViolationCollector;
use crate::config::{Config, ConfigError};
use crate::context::SourceContext;
use crate::parser::{parse, ParseError};
use crate::registry::{ResolvedRule, RuleRegistry};
use crate::rule::{Rule, RuleBox};
use crate::syntax::SyntaxNode;
use crate::types::Violation;
use crate::utils::allowance::Allowances;
use crate::walker::Walker;
use thiserror::Error;
use tracing::debug;

/// Errors from [`Linter::lint_source`].
#[derive(Debug, Error)]
pub enum LintError {
    /// The configuration could not be resolved against the registry.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The source could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Builder for configuring a [`Linter`].
#[derive(Default)]
pub struct LinterBuilder {
    rules: Vec<RuleBox>,
}

impl LinterBuilder {
    /// Creates a new builder with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules, keeping their order.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Builds the linter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateRule`] if two rules share an identifier.
    pub fn build(self) -> Result<Linter, ConfigError> {
        let mut registry = RuleRegistry::new();
        for rule in self.rules {
            registry.register(rule)?;
        }
        Ok(Linter::new(registry))
    }
}

/// Lints parsed stylesheets against a rule registry.
///
/// The linter holds no per-pass state; every call builds its own contexts and
/// collector, so one linter can serve many threads.
pub struct Linter {
    registry: RuleRegistry,
}

impl Linter {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> LinterBuilder {
        LinterBuilder::new()
    }

    /// Creates a linter over an existing registry.
    #[must_use]
    pub fn new(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    /// Returns the rule registry.
    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Resolves `config` once so that many trees can be linted with it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownRule`] if `config` names an unregistered rule.
    pub fn plan(&self, config: &Config) -> Result<LintPlan<'_>, ConfigError> {
        let rules = self.registry.resolve(config)?;
        debug!(
            "Resolved {} of {} rules",
            rules.len(),
            self.registry.len()
        );
        Ok(LintPlan { rules })
    }

    /// Lints one syntax tree.
    ///
    /// # Errors
    ///
    /// Returns a configuration error before any rule runs; no partial
    /// results are produced.
    pub fn lint(&self, tree: &SyntaxNode, config: &Config) -> Result<Vec<Violation>, ConfigError> {
        Ok(self.plan(config)?.lint(tree))
    }

    /// Parses `source` and lints the result.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::Config`] for configuration problems and
    /// [`LintError::Parse`] when the source is not valid CSS/SCSS.
    pub fn lint_source(&self, source: &str, config: &Config) -> Result<Vec<Violation>, LintError> {
        let plan = self.plan(config)?;
        let tree = parse(source)?;
        Ok(plan.lint(&tree))
    }
}

/// Rules resolved against one configuration, ready to lint trees.
pub struct LintPlan<'r> {
    rules: Vec<ResolvedRule<'r>>,
}

impl LintPlan<'_> {
    /// Number of enabled rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Lints one tree, returning violations in report order.
    #[must_use]
    pub fn lint(&self, tree: &SyntaxNode) -> Vec<Violation> {
        if self.rules.is_empty() {
            return Vec::new();
        }

        let source = SourceContext::new(&tree.text);
        let mut collector = ViolationCollector::new();
        Walker::new(&self.rules).walk(tree, &source, &mut collector);

        let mut violations = collector.finalize();
        let allowances = Allowances::from_tree(tree);
        if !allowances.is_empty() {
            let before = violations.len();
            violations.retain(|v| !allowances.allows(v));
            debug!("Suppressed {} violation(s)", before - violations.len());
        }

        debug!("Lint pass complete: {} violation(s)", violations.len());
        violations
    }
}
