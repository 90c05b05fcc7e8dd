//! Check command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;
use stylecheck_core::{Analyzer, Config, RuleBox};
use stylecheck_rules::all_rules;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command. Returns `true` when an error-severity violation was found.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<&str>,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<bool> {
    let mut config = source.load()?;
    let rules = all_rules();

    if let Some(filter) = rules_filter {
        config = select_rules(config, &rules, filter)?;
    }

    let analyzer = Analyzer::builder()
        .root(path)
        .config(config)
        .rules(rules)
        .excludes(exclude)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!("Checking {} with {} rules", path.display(), analyzer.rule_count());

    let result = analyzer.analyze().context("Analysis failed")?;
    super::output::print(&result, format)?;

    Ok(result.has_errors())
}

/// Disables every rule not named in the comma-separated `filter`.
///
/// Entries may be rule names or codes.
fn select_rules(mut config: Config, rules: &[RuleBox], filter: &str) -> Result<Config> {
    let wanted: Vec<&str> = filter
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    for name in &wanted {
        if !rules.iter().any(|r| r.name() == *name || r.code() == *name) {
            bail!("Unknown rule: {name}. Run `stylecheck list-rules` to see available rules");
        }
    }

    for rule in rules {
        let selected = wanted.iter().any(|w| rule.name() == *w || rule.code() == *w);
        if !selected {
            config = config.with_rule_enabled(rule.name(), false);
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MESSY: &str = ".a{color:#fff;}\n";

    fn enabled(config: &Config) -> Vec<String> {
        all_rules()
            .iter()
            .filter(|r| config.is_rule_enabled(r.name()))
            .map(|r| r.name().to_string())
            .collect()
    }

    #[test]
    fn select_rules_accepts_names_and_codes() {
        let config = select_rules(Config::new(), &all_rules(), "hex-case, SC003").unwrap();
        assert_eq!(enabled(&config), vec!["brace-style", "hex-case"]);
    }

    #[test]
    fn select_rules_rejects_unknown_entries() {
        let err = select_rules(Config::new(), &all_rules(), "hex-case,no-such-rule").unwrap_err();
        assert!(err.to_string().contains("no-such-rule"));
    }

    #[test]
    fn run_reports_errors() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("main.scss"), MESSY).unwrap();

        let failed = run(
            tmp.path(),
            OutputFormat::Compact,
            None,
            Vec::new(),
            &ConfigSource::Default,
        )
        .unwrap();
        assert!(failed);
    }

    #[test]
    fn run_with_warning_rules_only_succeeds() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("main.scss"), MESSY).unwrap();

        let failed = run(
            tmp.path(),
            OutputFormat::Compact,
            Some("hex-case"),
            Vec::new(),
            &ConfigSource::Default,
        )
        .unwrap();
        assert!(!failed);
    }

    #[test]
    fn run_honours_excludes() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("legacy")).unwrap();
        fs::write(tmp.path().join("legacy/old.css"), MESSY).unwrap();

        let failed = run(
            tmp.path(),
            OutputFormat::Compact,
            None,
            vec!["**/legacy/**".to_string()],
            &ConfigSource::Default,
        )
        .unwrap();
        assert!(!failed);
    }

    #[test]
    fn run_uses_loaded_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("main.scss"), MESSY).unwrap();
        let config = tmp.path().join("stylecheck.toml");
        fs::write(
            &config,
            "[rules.brace-style]\nseverity = \"warning\"\n\n[rules.trailing-semicolon]\nenabled = false\n\n[rules.no-tabs]\nenabled = false\n",
        )
        .unwrap();

        let failed = run(
            tmp.path(),
            OutputFormat::Compact,
            None,
            Vec::new(),
            &ConfigSource::Project(config),
        )
        .unwrap();
        assert!(!failed);
    }
}
