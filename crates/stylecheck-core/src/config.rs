//! Configuration types for stylecheck.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Top-level configuration for stylecheck.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations, keyed by rule identifier.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled. Rules absent from the configuration are enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<crate::Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Enables or disables a rule.
    #[must_use]
    pub fn with_rule_enabled(mut self, rule_name: &str, enabled: bool) -> Self {
        self.rules.entry(rule_name.to_string()).or_default().enabled = Some(enabled);
        self
    }

    /// Sets a rule parameter.
    #[must_use]
    pub fn with_param(
        mut self,
        rule_name: &str,
        key: &str,
        value: impl Into<toml::Value>,
    ) -> Self {
        self.rules
            .entry(rule_name.to_string())
            .or_default()
            .params
            .insert(key, value);
        self
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// File extensions to lint.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: vec!["**/node_modules/**".to_string(), "**/vendor/**".to_string()],
            extensions: default_extensions(),
            respect_gitignore: true,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_extensions() -> Vec<String> {
    vec!["css".to_string(), "scss".to_string()]
}

fn default_true() -> bool {
    true
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<crate::Severity>,

    /// Rule-specific parameters as key-value pairs.
    #[serde(flatten)]
    pub params: Params,
}

/// Rule parameters: rule defaults merged with configured overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, toml::Value>);

impl Params {
    /// Creates an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, builder style.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<toml::Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts or replaces a parameter.
    pub fn insert(&mut self, key: &str, value: impl Into<toml::Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Returns a copy of `self` with every entry of `overrides` applied on top.
    #[must_use]
    pub fn merged(&self, overrides: &Self) -> Self {
        let mut merged = self.clone();
        for (key, value) in &overrides.0 {
            merged.0.insert(key.clone(), value.clone());
        }
        merged
    }

    /// Whether a parameter is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterates over parameter names.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates over parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &toml::Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Gets a boolean parameter with a default value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.0
            .get(key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }

    /// Gets an integer parameter with a default value.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.0
            .get(key)
            .and_then(toml::Value::as_integer)
            .unwrap_or(default)
    }

    /// Gets a non-negative integer parameter as `usize`.
    #[must_use]
    pub fn get_usize(&self, key: &str, default: usize) -> usize {
        self.0
            .get(key)
            .and_then(toml::Value::as_integer)
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(default)
    }

    /// Gets a string parameter with a default value.
    #[must_use]
    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.0
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or(default)
    }

    /// Gets a string array parameter.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Vec<String> {
        self.0
            .get(key)
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Configuration errors. All of them abort a lint pass before traversal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Configuration references a rule that is not registered.
    #[error("Unknown rule in configuration: {rule_id}")]
    UnknownRule {
        /// The unrecognized identifier.
        rule_id: String,
    },

    /// Two rules were registered under the same identifier.
    #[error("Rule registered twice: {rule_id}")]
    DuplicateRule {
        /// The repeated identifier.
        rule_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.analyzer.respect_gitignore);
        assert_eq!(config.analyzer.extensions, vec!["css", "scss"]);
        assert!(config.rules.is_empty());
        assert!(config.is_rule_enabled("anything"));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[analyzer]
root = "./styles"
exclude = ["**/generated/**"]

[rules.indent-width]
size = 4

[rules.hex-case]
enabled = false

[rules.zero-unit]
severity = "error"
ignore-properties = ["flex"]
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.analyzer.root, PathBuf::from("./styles"));
        assert!(config.is_rule_enabled("indent-width"));
        assert!(!config.is_rule_enabled("hex-case"));
        assert_eq!(
            config.rule_severity("zero-unit"),
            Some(crate::Severity::Error)
        );

        let indent = &config.rules["indent-width"];
        assert_eq!(indent.params.get_int("size", 2), 4);
        assert_eq!(
            config.rules["zero-unit"].params.get_str_array("ignore-properties"),
            vec!["flex"]
        );
        assert!(!config.rules["zero-unit"].params.contains("severity"));
    }

    #[test]
    fn test_parse_error() {
        let err = Config::parse("[rules\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn params_merge_overrides_defaults() {
        let defaults = Params::new().with("max", 2).with("style", "double");
        let overrides = Params::new().with("max", 3);

        let merged = defaults.merged(&overrides);
        assert_eq!(merged.get_usize("max", 0), 3);
        assert_eq!(merged.get_str("style", "single"), "double");
        assert!(merged.get_bool("missing", true));
    }

    #[test]
    fn builder_helpers_fill_rule_tables() {
        let config = Config::new()
            .with_rule_enabled("no-tabs", false)
            .with_param("nesting-depth", "max", 3);

        assert!(!config.is_rule_enabled("no-tabs"));
        assert_eq!(config.rules["nesting-depth"].params.get_int("max", 2), 3);
    }
}
