//! Rule enforcing the format of section banner comments.
//!
//! A banner is a comment containing a delimiter line: a line made only of
//! `=` (level 1) or only of `-` (level 2), at least three characters long.
//!
//! ```text
//! /* ==========================================================================
//!    Section
//!    ========================================================================== */
//! ```
//!
//! # Detected Patterns
//!
//! - Delimiter runs that are not exactly `width` characters long
//! - Delimiter lines that mix `=` and `-`, or banners that mix levels
//! - Banners without enough blank lines above them (level 1 needs
//!   `l1-blank-lines`, level 2 needs `l2-blank-lines`)
//!
//! Banners at the start of the file or directly after `{` need no blank lines.
//! Consecutive `//` banner lines are treated as one banner.
//!
//! # Configuration
//!
//! - `width`: Delimiter length (default: 74)
//! - `l1-blank-lines`: Blank lines before a level 1 banner (default: 2)
//! - `l2-blank-lines`: Blank lines before a level 2 banner (default: 1)

use stylecheck_core::{
    CommentStyle, Context, NodeData, NodeKind, Params, Position, Rule, Suggestion, SyntaxNode,
    Violation,
};

/// Rule code for comment-block-delimiter.
pub const CODE: &str = "SC015";

/// Rule name for comment-block-delimiter.
pub const NAME: &str = "comment-block-delimiter";

/// Banner level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    L1,
    L2,
}

impl Level {
    fn of(run: &str) -> Option<Self> {
        if run.chars().all(|c| c == '=') {
            Some(Self::L1)
        } else if run.chars().all(|c| c == '-') {
            Some(Self::L2)
        } else {
            None
        }
    }

    fn glyph(self) -> char {
        match self {
            Self::L1 => '=',
            Self::L2 => '-',
        }
    }
}

/// A delimiter line found in a comment.
struct Delimiter<'a> {
    run: &'a str,
    level: Option<Level>,
    position: Position,
}

/// Finds delimiter lines in a comment node.
fn delimiters<'a>(node: &'a SyntaxNode, body: &str) -> Vec<Delimiter<'a>> {
    // Both `/*` and `//` are two characters; the body follows them.
    const OPENER: usize = 2;

    let mut found = Vec::new();
    let mut offset = 0;
    for line in body.split_inclusive('\n') {
        let trimmed = line.trim();
        let lead = line.len() - line.trim_start().len();
        if trimmed.len() >= 3 && trimmed.chars().all(|c| c == '=' || c == '-') {
            let run = &node.text[OPENER + offset + lead..OPENER + offset + lead + trimmed.len()];
            found.push(Delimiter {
                run,
                level: Level::of(run),
                position: node.span.start.advance(&node.text[..OPENER + offset + lead]),
            });
        }
        offset += line.len();
    }
    found
}

/// Enforces fixed-width `===` / `---` banner comments.
#[derive(Debug, Clone)]
pub struct CommentBlockDelimiter {
    /// Default delimiter width.
    pub width: usize,
    /// Default blank lines required before a level 1 banner.
    pub l1_blank_lines: usize,
    /// Default blank lines required before a level 2 banner.
    pub l2_blank_lines: usize,
}

impl Default for CommentBlockDelimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentBlockDelimiter {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            width: 74,
            l1_blank_lines: 2,
            l2_blank_lines: 1,
        }
    }

    /// Sets the default delimiter width.
    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    fn violation(&self, position: Position, message: String) -> Violation {
        Violation::at(NAME, CODE, self.default_severity(), position, message)
    }

    /// Checks the blank lines above a banner starting at `node`.
    fn check_spacing(
        &self,
        node: &SyntaxNode,
        ctx: &Context<'_>,
        level: Level,
        params: &Params,
    ) -> Option<Violation> {
        let start = node.span.start;
        let found = ctx.source.blank_lines_before(start.line)?;

        let previous_line = ctx.source.line(start.line - found - 1)?;
        let text_before = ctx
            .source
            .line(start.line)
            .and_then(|l| l.get(..start.column.saturating_sub(1)))
            .unwrap_or_default();
        let opens_block = if text_before.trim().is_empty() {
            previous_line.trim_end().ends_with('{')
        } else {
            text_before.trim_end().ends_with('{')
        };
        if opens_block {
            return None;
        }

        let (required, name) = match level {
            Level::L1 => (params.get_usize("l1-blank-lines", self.l1_blank_lines), "level 1"),
            Level::L2 => (params.get_usize("l2-blank-lines", self.l2_blank_lines), "level 2"),
        };
        (found < required).then(|| {
            self.violation(
                start,
                format!("Expected {required} blank line(s) before {name} banner, found {found}"),
            )
            .with_suggestion(Suggestion::new(format!(
                "Insert {} blank line(s) above the comment",
                required - found
            )))
        })
    }
}

impl Rule for CommentBlockDelimiter {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Enforces fixed-width banner comments with blank lines above them"
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        &[NodeKind::Comment]
    }

    fn default_params(&self) -> Params {
        let int = |v: usize| i64::try_from(v).unwrap_or(i64::MAX);
        Params::new()
            .with("width", int(self.width))
            .with("l1-blank-lines", int(self.l1_blank_lines))
            .with("l2-blank-lines", int(self.l2_blank_lines))
    }

    fn check(&self, node: &SyntaxNode, ctx: &mut Context<'_>, params: &Params) -> Vec<Violation> {
        let NodeData::Comment { style, body } = &node.data else {
            return Vec::new();
        };

        let found = delimiters(node, body);
        let Some(banner_level) = found.iter().find_map(|d| d.level) else {
            return found
                .iter()
                .map(|d| {
                    self.violation(
                        d.position,
                        "Delimiter mixes `=` and `-`".to_string(),
                    )
                })
                .collect();
        };

        let width = params.get_usize("width", self.width);
        let mut violations = Vec::new();

        for delimiter in &found {
            match delimiter.level {
                None => violations.push(
                    self.violation(delimiter.position, "Delimiter mixes `=` and `-`".to_string()),
                ),
                Some(level) if level != banner_level => violations.push(self.violation(
                    delimiter.position,
                    format!(
                        "Banner mixes `{}` and `{}` delimiters",
                        banner_level.glyph(),
                        level.glyph()
                    ),
                )),
                Some(level) => {
                    let length = delimiter.run.chars().count();
                    if length != width {
                        violations.push(
                            self.violation(
                                delimiter.position,
                                format!("Delimiter is {length} characters wide, expected {width}"),
                            )
                            .with_suggestion(Suggestion::new(format!(
                                "Use {width} `{}` characters",
                                level.glyph()
                            ))),
                        );
                    }
                }
            }
        }

        let continues_banner = *style == CommentStyle::Line
            && ctx.previous_sibling.is_some_and(|s| {
                s.kind == NodeKind::Comment && s.span.end.line + 1 == node.span.start.line
            });
        if !continues_banner {
            violations.extend(self.check_spacing(node, ctx, banner_level, params));
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylecheck_core::{Config, Linter};

    fn check_code(code: &str, config: &Config) -> Vec<Violation> {
        Linter::builder()
            .rule(CommentBlockDelimiter::new())
            .build()
            .expect("Failed to build linter")
            .lint_source(code, config)
            .expect("Failed to lint")
    }

    fn banner(glyph: char, width: usize, title: &str) -> String {
        let rule = glyph.to_string().repeat(width);
        format!("/* {rule}\n   {title}\n   {rule} */\n")
    }

    #[test]
    fn test_accepts_well_formed_banners() {
        let source = format!(
            "{}\n.a {{\n  color: red;\n}}\n\n\n{}\n.b {{\n  color: red;\n\n  {}}}\n",
            banner('=', 74, "Base"),
            banner('=', 74, "Layout"),
            "/* ---------- */\n".replace("----------", &"-".repeat(74)),
        );
        let violations = check_code(&source, &Config::new());
        assert!(violations.is_empty(), "{violations:#?}");
    }

    #[test]
    fn test_detects_wrong_width() {
        let violations = check_code(&banner('=', 10, "Base"), &Config::new());
        let found: Vec<_> = violations.iter().map(|v| (v.line, v.column)).collect();
        assert_eq!(found, vec![(1, 4), (3, 4)]);
        assert!(violations[0].message.contains("10 characters wide"));
    }

    #[test]
    fn test_detects_mixed_delimiters() {
        let source = format!(
            "/* {}\n   Title\n   {} */\n",
            "=".repeat(74),
            "-".repeat(74)
        );
        let violations = check_code(&source, &Config::new());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 3);
        assert!(violations[0].message.contains("mixes"));
    }

    #[test]
    fn test_detects_missing_blank_lines() {
        let source = format!(".a {{\n  color: red;\n}}\n\n{}", banner('=', 74, "Next"));
        let violations = check_code(&source, &Config::new());
        assert_eq!(violations.len(), 1);
        assert_eq!((violations[0].line, violations[0].column), (5, 1));
        assert!(violations[0].message.contains("found 1"));
    }

    #[test]
    fn test_level_two_needs_one_blank_line() {
        let rule = "-".repeat(74);
        let ok = format!(".a {{\n  color: red;\n}}\n\n/* {rule} */\n");
        assert!(check_code(&ok, &Config::new()).is_empty());

        let tight = format!(".a {{\n  color: red;\n}}\n/* {rule} */\n");
        assert_eq!(check_code(&tight, &Config::new()).len(), 1);
    }

    #[test]
    fn test_line_comment_banner_counts_once() {
        let rule = "=".repeat(74);
        let source = format!(".a {{\n  color: red;\n}}\n\n\n// {rule}\n// Title\n// {rule}\n");
        assert!(check_code(&source, &Config::new()).is_empty());
    }

    #[test]
    fn test_ordinary_comments_are_ignored() {
        let source = ".a {\n  color: red;\n}\n/* a -- b == c */\n";
        assert!(check_code(source, &Config::new()).is_empty());
    }

    #[test]
    fn test_configured_width() {
        let config = Config::new().with_param(NAME, "width", 10);
        assert!(check_code(&banner('=', 10, "Base"), &config).is_empty());
    }
}
