//! Rule trait for defining style rules.

use crate::config::Params;
use crate::context::Context;
use crate::syntax::{NodeKind, SyntaxNode};
use crate::types::{Severity, Violation};

/// A style rule: a kind filter plus a check over one syntax node.
///
/// Rules are stateless across invocations. Anything a rule needs to remember
/// between sibling nodes (the previous property name, the previous sibling)
/// lives in the [`Context`] the walker passes in, which is scoped to a single
/// block.
///
/// # Example
///
/// ```ignore
/// use stylecheck_core::{Context, NodeKind, Params, Rule, Severity, SyntaxNode, Violation};
///
/// pub struct NoImportant;
///
/// impl Rule for NoImportant {
///     fn name(&self) -> &'static str { "no-important" }
///     fn code(&self) -> &'static str { "SC900" }
///     fn applies_to(&self) -> &'static [NodeKind] { &[NodeKind::Declaration] }
///
///     fn check(&self, node: &SyntaxNode, _ctx: &mut Context, params: &Params) -> Vec<Violation> {
///         // ...
///         vec![]
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case identifier of this rule (e.g., "hex-case").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "SC006").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Node kinds this rule is invoked on.
    fn applies_to(&self) -> &'static [NodeKind];

    /// Default parameters; configuration values override them key by key.
    fn default_params(&self) -> Params {
        Params::new()
    }

    /// Checks a single node and returns any violations found.
    ///
    /// # Arguments
    ///
    /// * `node` - The node being visited
    /// * `ctx` - State scoped to the block containing `node`
    /// * `params` - Merged rule parameters
    ///
    /// Violations should use [`Rule::default_severity`]; the linter rewrites
    /// severity when the configuration overrides it.
    fn check(&self, node: &SyntaxNode, ctx: &mut Context<'_>, params: &Params) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
