//! # stylecheck-rules
//!
//! Built-in style rules for stylecheck.
//!
//! Every rule is enabled by default and can be disabled, re-severitied or
//! tuned under `[rules.<name>]` in `stylecheck.toml`.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | SC001 | `indent-width` | Indentation in multiples of `size` spaces |
//! | SC002 | `no-tabs` | No tab characters in indentation |
//! | SC003 | `brace-style` | One space before `{`, `}` aligned with its statement |
//! | SC004 | `one-selector-per-line` | Each selector of a list on its own line |
//! | SC005 | `one-declaration-per-line` | Each declaration on its own line |
//! | SC006 | `hex-case` | Hex colors in one letter case |
//! | SC007 | `hex-shorthand` | `#FFF` instead of `#FFFFFF` |
//! | SC008 | `quote-style` | One quote character for strings |
//! | SC009 | `zero-unit` | `0` instead of `0px` |
//! | SC010 | `comma-space` | One space after commas in values |
//! | SC011 | `trailing-semicolon` | Semicolon after the last declaration |
//! | SC012 | `blank-line-between-rulesets` | Blank line between rulesets |
//! | SC013 | `declaration-alphabetical-order` | Sorted properties within a cluster |
//! | SC014 | `nesting-depth` | At most `max` levels of nested blocks |
//! | SC015 | `comment-block-delimiter` | Fixed-width `===`/`---` banner comments |
//! | SC016 | `declaration-colon-spacing` | `property: value` spacing |
//!
//! ## Usage
//!
//! ```ignore
//! use stylecheck_core::Config;
//! use stylecheck_rules::default_linter;
//!
//! let linter = default_linter()?;
//! let violations = linter.lint_source(".a{color:#fff}", &Config::new())?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod blank_line_between_rulesets;
mod brace_style;
mod catalogue;
mod colon_spacing;
mod comma_space;
mod comment_block_delimiter;
mod declaration_order;
mod hex_case;
mod hex_shorthand;
mod indent_width;
mod nesting_depth;
mod no_tabs;
mod one_declaration_per_line;
mod one_selector_per_line;
mod quote_style;
mod trailing_semicolon;
mod zero_unit;

pub use blank_line_between_rulesets::BlankLineBetweenRulesets;
pub use brace_style::BraceStyle;
pub use catalogue::{all_rules, default_linter, default_registry};
pub use colon_spacing::ColonSpacing;
pub use comma_space::CommaSpace;
pub use comment_block_delimiter::CommentBlockDelimiter;
pub use declaration_order::{ClusterDelimiter, DeclarationOrder};
pub use hex_case::HexCase;
pub use hex_shorthand::HexShorthand;
pub use indent_width::IndentWidth;
pub use nesting_depth::NestingDepth;
pub use no_tabs::NoTabs;
pub use one_declaration_per_line::OneDeclarationPerLine;
pub use one_selector_per_line::OneSelectorPerLine;
pub use quote_style::QuoteStyle;
pub use trailing_semicolon::TrailingSemicolon;
pub use zero_unit::ZeroUnit;

/// Re-export core types for convenience.
pub use stylecheck_core::{Rule, Severity, Violation};
