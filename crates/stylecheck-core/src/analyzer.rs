//! Core analyzer for linting every stylesheet under a directory.

use crate::config::{Config, ConfigError};
use crate::linter::{LintPlan, Linter, LinterBuilder};
use crate::parser::{parse, ParseError};
use crate::rule::{Rule, RuleBox};
use crate::types::{FileReport, LintResult, Violation};

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error walking the directory tree.
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Error parsing a stylesheet.
    #[error("Parse error in {path}: {source}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Underlying parse error.
        source: ParseError,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    linter: LinterBuilder,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory (or single file) to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.linter = self.linter.rule(rule);
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.linter = self.linter.rule_box(rule);
        self
    }

    /// Adds several boxed rules, keeping their order.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.linter = self.linter.rules(rules);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined, an
    /// exclude pattern is invalid, or two rules share an identifier.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();
        let root = self
            .root
            .unwrap_or_else(|| config.analyzer.root.clone());

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());
        let excludes = exclude_patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Analyzer {
            root,
            linter: self.linter.build()?,
            exclude_patterns,
            excludes,
            config,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// Lints every stylesheet below a root directory.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    linter: Linter,
    exclude_patterns: Vec<String>,
    excludes: Vec<glob::Pattern>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.linter.registry().len()
    }

    /// Returns the underlying linter.
    #[must_use]
    pub fn linter(&self) -> &Linter {
        &self.linter
    }

    /// Analyzes all files and returns the results.
    ///
    /// The configuration is resolved once, before any file is read, so an
    /// unknown rule fails the whole run. Files are linted in parallel and
    /// reported sorted by path.
    ///
    /// # Errors
    ///
    /// Returns an error on configuration problems, directory walk failures,
    /// unreadable files, or (with `fail_on_parse_error`) unparsable files.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let plan = self.linter.plan(&self.config)?;
        let files = self.discover_files()?;
        info!(
            "Found {} files to analyze with {} rules",
            files.len(),
            plan.rule_count()
        );

        let outcomes: Vec<_> = files
            .par_iter()
            .map(|path| (path, Self::analyze_file(&plan, path)))
            .collect();

        let mut result = LintResult::new();
        for (path, outcome) in outcomes {
            match outcome {
                Ok(violations) => {
                    result.files_checked += 1;
                    if !violations.is_empty() {
                        result.files.push(FileReport {
                            path: path.clone(),
                            violations,
                        });
                    }
                }
                Err(AnalyzerError::Parse { path, source }) => {
                    warn!("Failed to parse {}: {}", path.display(), source);
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Parse { path, source });
                    }
                    result.skipped.push((path, source.to_string()));
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations().count(),
            result.files_checked
        );

        Ok(result)
    }

    /// Lints a single file.
    fn analyze_file(plan: &LintPlan<'_>, path: &Path) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let tree = parse(&content).map_err(|source| AnalyzerError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(plan.lint(&tree))
    }

    /// Discovers stylesheets to analyze, sorted by path.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let walker = ignore::WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(self.config.analyzer.respect_gitignore)
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let path = entry.into_path();
            if !self.has_lintable_extension(&path) {
                continue;
            }
            if self.should_exclude(&path) {
                debug!("Excluding: {}", path.display());
                continue;
            }
            files.push(path);
        }

        files.sort();
        Ok(files)
    }

    fn has_lintable_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.config
                    .analyzer
                    .extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        if self.excludes.iter().any(|p| p.matches(&path_str)) {
            return true;
        }

        // Also check as substring for patterns like "**/vendor/**"
        self.exclude_patterns.iter().any(|pattern| {
            let normalized = pattern.replace("**", "");
            !normalized.is_empty() && normalized != "/" && path_str.contains(&normalized)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::syntax::{NodeKind, SyntaxNode};
    use crate::types::Severity;
    use crate::Params;
    use std::fs;

    struct EveryDeclaration;

    impl Rule for EveryDeclaration {
        fn name(&self) -> &'static str {
            "every-declaration"
        }
        fn code(&self) -> &'static str {
            "T200"
        }
        fn applies_to(&self) -> &'static [NodeKind] {
            &[NodeKind::Declaration]
        }
        fn check(&self, node: &SyntaxNode, _: &mut Context<'_>, _: &Params) -> Vec<Violation> {
            vec![Violation::at(
                self.name(),
                self.code(),
                Severity::Warning,
                node.span.start,
                "declaration",
            )]
        }
    }

    #[test]
    fn test_exclude_patterns() {
        let analyzer = Analyzer::builder()
            .root(".")
            .exclude("**/dist/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.should_exclude(Path::new("/foo/dist/app.css")));
        assert!(analyzer.should_exclude(Path::new("/foo/node_modules/x/a.css")));
        assert!(!analyzer.should_exclude(Path::new("/foo/styles/app.scss")));
    }

    #[test]
    fn analyzes_stylesheets_sorted_and_skips_others() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("b/z.scss"), ".a {\n  color: red;\n}\n").unwrap();
        fs::write(dir.path().join("a.css"), ".a {\n  margin: 0;\n  padding: 0;\n}\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "color: red;").unwrap();

        let result = Analyzer::builder()
            .root(dir.path())
            .rule(EveryDeclaration)
            .build()
            .unwrap()
            .analyze()
            .unwrap();

        assert_eq!(result.files_checked, 2);
        let files: Vec<_> = result
            .files
            .iter()
            .map(|f| (f.path.strip_prefix(dir.path()).unwrap().to_path_buf(), f.violations.len()))
            .collect();
        assert_eq!(
            files,
            vec![(PathBuf::from("a.css"), 2), (PathBuf::from("b/z.scss"), 1)]
        );
    }

    #[test]
    fn parse_failures_are_skipped_unless_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.css"), ".a { color: red;").unwrap();
        fs::write(dir.path().join("ok.css"), ".a { color: red; }").unwrap();

        let result = Analyzer::builder()
            .root(dir.path())
            .rule(EveryDeclaration)
            .build()
            .unwrap()
            .analyze()
            .unwrap();
        assert_eq!(result.files_checked, 1);
        assert_eq!(result.skipped.len(), 1);

        let err = Analyzer::builder()
            .root(dir.path())
            .rule(EveryDeclaration)
            .fail_on_parse_error(true)
            .build()
            .unwrap()
            .analyze()
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::Parse { .. }));
    }

    #[test]
    fn unknown_rule_fails_before_reading_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ok.css"), ".a { color: red; }").unwrap();

        let err = Analyzer::builder()
            .root(dir.path())
            .rule(EveryDeclaration)
            .config(Config::new().with_rule_enabled("nope", false))
            .build()
            .unwrap()
            .analyze()
            .unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::Config(ConfigError::UnknownRule { .. })
        ));
    }
}
