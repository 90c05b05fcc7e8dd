//! Context types for rule execution.

use crate::syntax::{NodeKind, Position, Span, SyntaxNode};

/// Read-only view of the source being linted, shared by every rule in a pass.
#[derive(Debug, Clone)]
pub struct SourceContext<'a> {
    /// Full source text.
    pub content: &'a str,
    lines: Vec<&'a str>,
}

impl<'a> SourceContext<'a> {
    /// Creates a new source context.
    #[must_use]
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            lines: content.lines().collect(),
        }
    }

    /// Returns the text of a 1-indexed line, without its line terminator.
    #[must_use]
    pub fn line(&self, line: usize) -> Option<&'a str> {
        line.checked_sub(1).and_then(|i| self.lines.get(i).copied())
    }

    /// Returns the number of lines in the source.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Iterates over `(line_number, text)` pairs.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        self.lines.iter().enumerate().map(|(i, l)| (i + 1, *l))
    }

    /// Whether a 1-indexed line is empty or whitespace only.
    #[must_use]
    pub fn is_blank(&self, line: usize) -> bool {
        self.line(line).map_or(true, |l| l.trim().is_empty())
    }

    /// Counts consecutive blank lines directly above `line`.
    ///
    /// Returns `None` when nothing but blank lines precede `line`.
    #[must_use]
    pub fn blank_lines_before(&self, line: usize) -> Option<usize> {
        let mut count = 0;
        let mut current = line.checked_sub(1)?;
        while current >= 1 {
            if !self.is_blank(current) {
                return Some(count);
            }
            count += 1;
            current -= 1;
        }
        None
    }

    /// Calculates byte offset for a given position.
    ///
    /// Columns are counted in characters. Out-of-range positions clamp to the
    /// end of the line or the end of the file.
    #[must_use]
    pub fn offset_for(&self, position: Position) -> usize {
        if position.line == 0 {
            return 0;
        }

        let mut offset = 0;
        for (i, line_content) in self.content.split_inclusive('\n').enumerate() {
            if i + 1 == position.line {
                let within = line_content
                    .char_indices()
                    .nth(position.column.saturating_sub(1))
                    .map_or(line_content.trim_end_matches('\n').len(), |(idx, _)| idx);
                return offset + within;
            }
            offset += line_content.len();
        }

        offset
    }
}

/// Summary of the previously visited node in the same block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sibling {
    /// Kind of the previous node.
    pub kind: NodeKind,
    /// Its source span.
    pub span: Span,
    /// Whether it was a block in single-line form.
    pub single_line: bool,
}

impl Sibling {
    /// Summarizes a node.
    #[must_use]
    pub fn of(node: &SyntaxNode) -> Self {
        Self {
            kind: node.kind(),
            span: node.span,
            single_line: node.is_single_line(),
        }
    }
}

/// The last declaration seen in the current ordering cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviousProperty {
    /// Normalized sort key of the property.
    pub key: String,
    /// Line the declaration ended on.
    pub end_line: usize,
}

/// Mutable state scoped to one block (one set of siblings).
///
/// The walker creates a fresh `Context` when it enters a block and drops it
/// on exit, so state never leaks between blocks or between lint passes.
#[derive(Debug, Clone)]
pub struct Context<'a> {
    /// The source being linted.
    pub source: &'a SourceContext<'a>,
    /// Number of enclosing rulesets and at-rule blocks (0 at top level).
    pub depth: usize,
    /// Whether the enclosing block is in single-line form.
    pub single_line: bool,
    /// The node visited just before the current one in this block.
    pub previous_sibling: Option<Sibling>,
    /// Span of the last declaration in this block, skipping comments and nested blocks.
    pub previous_declaration: Option<Span>,
    /// Ordering state for the current declaration cluster.
    pub previous_property: Option<PreviousProperty>,
}

impl<'a> Context<'a> {
    /// Creates the context for the top-level statements of a stylesheet.
    #[must_use]
    pub fn root(source: &'a SourceContext<'a>) -> Self {
        Self {
            source,
            depth: 0,
            single_line: false,
            previous_sibling: None,
            previous_declaration: None,
            previous_property: None,
        }
    }

    /// Creates the context for the children of `block`, a ruleset or at-rule.
    #[must_use]
    pub fn enter(&self, block: &SyntaxNode) -> Self {
        Self {
            source: self.source,
            depth: self.depth + 1,
            single_line: block.is_single_line(),
            previous_sibling: None,
            previous_declaration: None,
            previous_property: None,
        }
    }
}
