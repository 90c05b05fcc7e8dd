//! # stylecheck-core
//!
//! Core framework for checking CSS and SCSS stylesheets against a style guide.
//!
//! This crate provides the foundational traits and types for building
//! style linters. It includes:
//!
//! - [`parse`] producing a [`SyntaxNode`] tree with exact source spans
//! - [`Rule`] trait for node-level style rules
//! - [`RuleRegistry`], [`Walker`] and [`ViolationCollector`], the pieces of a lint pass
//! - [`Linter`] for linting one tree and [`Analyzer`] for whole directories
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use stylecheck_core::{Config, Linter};
//!
//! let linter = Linter::builder().rule(MyRule::new()).build()?;
//! let violations = linter.lint_source(".a { color: red; }", &Config::new())?;
//! for v in &violations {
//!     println!("{v}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod collector;
mod config;
mod context;
mod linter;
mod parser;
mod registry;
mod rule;
mod syntax;
mod types;
mod walker;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use collector::ViolationCollector;
pub use config::{AnalyzerConfig, Config, ConfigError, Params, RuleConfig};
pub use context::{Context, PreviousProperty, Sibling, SourceContext};
pub use linter::{LintError, LintPlan, Linter, LinterBuilder};
pub use parser::{parse, ParseError};
pub use registry::{ResolvedRule, RuleRegistry};
pub use rule::{Rule, RuleBox};
pub use syntax::{BlockHeader, CommentStyle, NodeData, NodeKind, Position, Span, SyntaxNode};
pub use types::{FileReport, LintResult, Severity, Suggestion, Violation, ViolationDiagnostic};
pub use walker::Walker;
