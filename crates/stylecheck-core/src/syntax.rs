//! Syntax tree produced by the parser and consumed by rules.
//!
//! The tree is read-only for the duration of a lint pass. Every node carries
//! its source span and raw text so rules can inspect exact formatting.

use serde::{Deserialize, Serialize};

/// A position in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, counted in characters).
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Returns the position reached after consuming `text` from this position.
    #[must_use]
    pub fn advance(self, text: &str) -> Self {
        let mut pos = self;
        for ch in text.chars() {
            if ch == '\n' {
                pos.line += 1;
                pos.column = 1;
            } else {
                pos.column += 1;
            }
        }
        pos
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open range of source positions; `end` points just past the last character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    /// First character of the span.
    pub start: Position,
    /// Position just past the last character.
    pub end: Position,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Creates a span covering `text` starting at `start`.
    #[must_use]
    pub fn covering(start: Position, text: &str) -> Self {
        Self {
            start,
            end: start.advance(text),
        }
    }

    /// Creates a zero-width span at `at`.
    #[must_use]
    pub const fn point(at: Position) -> Self {
        Self { start: at, end: at }
    }
}

/// Kind of a syntax node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    /// Root of a parsed file.
    Stylesheet,
    /// Selector plus declaration block.
    Ruleset,
    /// `@media`, `@include`, `@import` and friends.
    AtRule,
    /// `property: value`.
    Declaration,
    /// Block (`/* */`) or line (`//`) comment.
    Comment,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Stylesheet => "stylesheet",
            Self::Ruleset => "ruleset",
            Self::AtRule => "at-rule",
            Self::Declaration => "declaration",
            Self::Comment => "comment",
        };
        f.write_str(name)
    }
}

/// Comment syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStyle {
    /// `/* ... */`
    Block,
    /// `// ...` (SCSS only)
    Line,
}

/// Header of a `{ ... }` block: the prelude and brace positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Selector list or at-rule parameters, trimmed.
    pub prelude: String,
    /// Position of the first character of the prelude.
    pub prelude_start: Position,
    /// Raw whitespace between the end of the prelude and `{`.
    pub before_brace: String,
    /// Position of `{`.
    pub open_brace: Position,
    /// Position of the matching `}`.
    pub close_brace: Position,
    /// Set by the parser when `{` and `}` sit on the same line.
    pub single_line: bool,
}

/// Kind-specific payload of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum NodeData {
    /// Root node; children are the top-level statements.
    Stylesheet,
    /// A selector with a block.
    Ruleset {
        /// Selector and brace details.
        header: BlockHeader,
    },
    /// An at-rule, with or without a block.
    AtRule {
        /// Name without the `@`.
        name: String,
        /// Parameters between the name and `;` or `{`, trimmed.
        prelude: String,
        /// Present when the at-rule has a block.
        header: Option<BlockHeader>,
    },
    /// A property/value pair.
    Declaration {
        /// Property name as written.
        property: String,
        /// Raw whitespace between the property and `:`.
        before_colon: String,
        /// Position of `:`.
        colon: Position,
        /// Raw whitespace between `:` and the value.
        after_colon: String,
        /// Value text, trimmed.
        value: String,
        /// Position of the first character of the value.
        value_start: Position,
        /// Position of the terminating `;`, if any.
        semicolon: Option<Position>,
    },
    /// A comment.
    Comment {
        /// Block or line comment.
        style: CommentStyle,
        /// Text between the delimiters.
        body: String,
    },
}

/// A node of the CSS/SCSS syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxNode {
    /// Source span of the whole node.
    pub span: Span,
    /// Raw source text covered by `span`.
    pub text: String,
    /// Child nodes in document order.
    pub children: Vec<SyntaxNode>,
    /// Kind-specific payload.
    pub data: NodeData,
}

impl SyntaxNode {
    /// Returns the kind of this node.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self.data {
            NodeData::Stylesheet => NodeKind::Stylesheet,
            NodeData::Ruleset { .. } => NodeKind::Ruleset,
            NodeData::AtRule { .. } => NodeKind::AtRule,
            NodeData::Declaration { .. } => NodeKind::Declaration,
            NodeData::Comment { .. } => NodeKind::Comment,
        }
    }

    /// Returns the block header for rulesets and at-rules with a block.
    #[must_use]
    pub fn block_header(&self) -> Option<&BlockHeader> {
        match &self.data {
            NodeData::Ruleset { header } => Some(header),
            NodeData::AtRule { header, .. } => header.as_ref(),
            _ => None,
        }
    }

    /// Whether this node opens a block whose children get their own context.
    #[must_use]
    pub fn is_block(&self) -> bool {
        matches!(self.data, NodeData::Stylesheet) || self.block_header().is_some()
    }

    /// Whether this node is a block flagged as single-line form.
    #[must_use]
    pub fn is_single_line(&self) -> bool {
        self.block_header().is_some_and(|h| h.single_line)
    }

    /// Iterates over this node and all descendants in document order.
    pub fn walk(&self) -> impl Iterator<Item = &SyntaxNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}
