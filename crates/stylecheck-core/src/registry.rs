//! Ordered, named collection of rules.

use crate::config::{Config, ConfigError, Params};
use crate::rule::{Rule, RuleBox};
use crate::syntax::NodeKind;
use crate::types::Severity;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Registry of rules, keyed by their unique identifier and kept in
/// registration order.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<RuleBox>,
    index: HashMap<&'static str, usize>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateRule`] if a rule with the same
    /// identifier is already registered.
    pub fn register(&mut self, rule: RuleBox) -> Result<(), ConfigError> {
        let name = rule.name();
        if self.index.contains_key(name) {
            return Err(ConfigError::DuplicateRule {
                rule_id: name.to_string(),
            });
        }
        self.index.insert(name, self.rules.len());
        self.rules.push(rule);
        Ok(())
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Looks up a rule by identifier.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.index.get(name).map(|&i| self.rules[i].as_ref())
    }

    /// Iterates over rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(AsRef::as_ref)
    }

    /// Resolves the enabled rules against a configuration.
    ///
    /// Rules missing from the configuration are enabled with their default
    /// parameters. The result keeps registration order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownRule`] if the configuration references a
    /// rule that is not registered.
    pub fn resolve(&self, config: &Config) -> Result<Vec<ResolvedRule<'_>>, ConfigError> {
        if let Some(unknown) = config.rules.keys().find(|id| !self.index.contains_key(id.as_str())) {
            return Err(ConfigError::UnknownRule {
                rule_id: unknown.clone(),
            });
        }

        let mut resolved = Vec::new();
        for rule in self.iter() {
            let name = rule.name();
            if !config.is_rule_enabled(name) {
                debug!("Skipping disabled rule: {}", name);
                continue;
            }

            let defaults = rule.default_params();
            let params = match config.rules.get(name) {
                Some(rule_config) => {
                    for key in rule_config.params.keys() {
                        if !defaults.contains(key) {
                            warn!("Unknown parameter `{}` for rule {}", key, name);
                        }
                    }
                    defaults.merged(&rule_config.params)
                }
                None => defaults,
            };

            resolved.push(ResolvedRule {
                rule,
                params,
                severity_override: config.rule_severity(name),
            });
        }
        Ok(resolved)
    }
}

/// A rule paired with its merged parameters for one configuration.
pub struct ResolvedRule<'r> {
    /// The rule.
    pub rule: &'r dyn Rule,
    /// Rule defaults overridden by configured values.
    pub params: Params,
    /// Severity from configuration, if overridden.
    pub severity_override: Option<Severity>,
}

impl ResolvedRule<'_> {
    /// Whether the rule is invoked on nodes of `kind`.
    #[must_use]
    pub fn applies_to(&self, kind: NodeKind) -> bool {
        self.rule.applies_to().contains(&kind)
    }

    /// Effective severity for this rule's violations.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity_override
            .unwrap_or_else(|| self.rule.default_severity())
    }
}
