//! Rule limiting how deeply blocks may nest.
//!
//! Top-level rulesets are level 1. Nested rulesets and at-rule blocks
//! (`@media`, `@supports`, mixin content blocks) each add one level.
//!
//! # Configuration
//!
//! - `max`: Deepest allowed level (default: 2)

use stylecheck_core::{
    Context, NodeKind, Params, Rule, Severity, Suggestion, SyntaxNode, Violation,
};

/// Rule code for nesting-depth.
pub const CODE: &str = "SC014";

/// Rule name for nesting-depth.
pub const NAME: &str = "nesting-depth";

/// Flags blocks nested deeper than `max` levels.
#[derive(Debug, Clone)]
pub struct NestingDepth {
    /// Default maximum level.
    pub max: usize,
}

impl Default for NestingDepth {
    fn default() -> Self {
        Self::new()
    }
}

impl NestingDepth {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self { max: 2 }
    }

    /// Sets the default maximum level.
    #[must_use]
    pub fn max(mut self, max: usize) -> Self {
        self.max = max;
        self
    }
}

impl Rule for NestingDepth {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Limits nesting of rulesets and at-rule blocks"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        &[NodeKind::Ruleset, NodeKind::AtRule]
    }

    fn default_params(&self) -> Params {
        Params::new().with("max", i64::try_from(self.max).unwrap_or(i64::MAX))
    }

    fn check(&self, node: &SyntaxNode, ctx: &mut Context<'_>, params: &Params) -> Vec<Violation> {
        let Some(header) = node.block_header() else {
            return Vec::new();
        };

        let max = params.get_usize("max", self.max);
        let level = ctx.depth + 1;
        if level <= max {
            return Vec::new();
        }

        vec![Violation::at(
            NAME,
            CODE,
            self.default_severity(),
            header.open_brace,
            format!("Block nested {level} levels deep (max {max})"),
        )
        .with_suggestion(Suggestion::new(
            "Flatten the selector or move the block up a level",
        ))]
    }
}
