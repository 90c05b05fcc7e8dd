//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::fmt::Write;
use std::path::Path;
use stylecheck_rules::all_rules;

const HEADER: &str = r#"# stylecheck configuration

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./scss"

# Glob patterns to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/vendor/**",
]

# File extensions to lint
extensions = ["css", "scss"]

# Respect .gitignore files
respect_gitignore = true

# Rule configurations
# Each rule can be enabled/disabled, have its severity overridden,
# and take the parameters listed under it.
"#;

/// Builds the starter configuration from the built-in rules' defaults.
fn template() -> String {
    let mut out = HEADER.to_string();
    for rule in all_rules() {
        let _ = writeln!(out, "\n# {}: {}", rule.code(), rule.description());
        let _ = writeln!(out, "[rules.{}]", rule.name());
        let _ = writeln!(out, "enabled = true");
        let _ = writeln!(out, "severity = \"{}\"", rule.default_severity());
        for (key, value) in rule.default_params().iter() {
            let _ = writeln!(out, "{key} = {value}");
        }
    }
    out
}

/// Runs the init command, writing `stylecheck.toml` into `dir`.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join("stylecheck.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, template())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit stylecheck.toml to configure rules");
    println!("  2. Run: stylecheck check");

    Ok(())
}
