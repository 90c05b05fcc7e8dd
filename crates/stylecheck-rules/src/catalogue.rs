//! Constructors for the built-in rule set.

use crate::{
    BlankLineBetweenRulesets, BraceStyle, ColonSpacing, CommaSpace, CommentBlockDelimiter,
    DeclarationOrder, HexCase, HexShorthand, IndentWidth, NestingDepth, NoTabs,
    OneDeclarationPerLine, OneSelectorPerLine, QuoteStyle, TrailingSemicolon, ZeroUnit,
};
use stylecheck_core::{ConfigError, Linter, RuleBox, RuleRegistry};
use tracing::debug;

/// Returns every built-in rule with default settings, in code order.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(IndentWidth::new()),
        Box::new(NoTabs::new()),
        Box::new(BraceStyle::new()),
        Box::new(OneSelectorPerLine::new()),
        Box::new(OneDeclarationPerLine::new()),
        Box::new(HexCase::new()),
        Box::new(HexShorthand::new()),
        Box::new(QuoteStyle::new()),
        Box::new(ZeroUnit::new()),
        Box::new(CommaSpace::new()),
        Box::new(TrailingSemicolon::new()),
        Box::new(BlankLineBetweenRulesets::new()),
        Box::new(DeclarationOrder::new()),
        Box::new(NestingDepth::new()),
        Box::new(CommentBlockDelimiter::new()),
        Box::new(ColonSpacing::new()),
    ]
}

/// Returns a registry holding [`all_rules`].
///
/// # Errors
///
/// Returns [`ConfigError::DuplicateRule`] if two built-in rules share an
/// identifier.
pub fn default_registry() -> Result<RuleRegistry, ConfigError> {
    let mut registry = RuleRegistry::new();
    for rule in all_rules() {
        registry.register(rule)?;
    }
    debug!("Registered {} built-in rules", registry.len());
    Ok(registry)
}

/// Returns a linter over [`all_rules`].
///
/// # Errors
///
/// Returns [`ConfigError::DuplicateRule`] if two built-in rules share an
/// identifier.
pub fn default_linter() -> Result<Linter, ConfigError> {
    default_registry().map(Linter::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rule_names_and_codes_are_unique() {
        let rules = all_rules();
        let names: HashSet<_> = rules.iter().map(|r| r.name()).collect();
        let codes: HashSet<_> = rules.iter().map(|r| r.code()).collect();
        assert_eq!(names.len(), rules.len());
        assert_eq!(codes.len(), rules.len());
    }

    #[test]
    fn test_rules_are_in_code_order() {
        let codes: Vec<_> = all_rules().iter().map(|r| r.code()).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        assert_eq!(codes, sorted);
        assert_eq!(codes.len(), 16);
    }

    #[test]
    fn test_every_rule_is_described() {
        for rule in all_rules() {
            assert!(!rule.description().is_empty(), "{} has no description", rule.name());
            assert!(!rule.applies_to().is_empty(), "{} applies to nothing", rule.name());
        }
    }

    #[test]
    fn test_default_registry_builds() {
        let registry = default_registry().unwrap();
        assert_eq!(registry.len(), 16);
        assert!(registry.get("hex-case").is_some());
    }
}
