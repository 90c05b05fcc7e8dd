//! Tolerant, position-preserving CSS/SCSS parser.
//!
//! The parser keeps every piece of formatting a style rule may need: raw
//! whitespace around braces and colons, exact brace positions, and comments as
//! first-class nodes. It does not validate CSS semantics.

use crate::syntax::{BlockHeader, CommentStyle, NodeData, Position, Span, SyntaxNode};
use thiserror::Error;

/// Error returned when the source cannot be turned into a syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at {position}")]
pub struct ParseError {
    /// What went wrong.
    pub message: String,
    /// Where it went wrong.
    pub position: Position,
}

impl ParseError {
    fn new(message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

/// Parses CSS or SCSS source into a [`SyntaxNode`] tree rooted at a stylesheet.
///
/// # Errors
///
/// Returns [`ParseError`] for unterminated comments or strings, unclosed
/// blocks, stray `}` and declarations without a `:`.
pub fn parse(source: &str) -> Result<SyntaxNode, ParseError> {
    let mut parser = Parser::new(source);
    let children = parser.parse_statements(None)?;
    Ok(SyntaxNode {
        span: Span::new(Position::new(1, 1), parser.position()),
        text: source.to_string(),
        children,
        data: NodeData::Stylesheet,
    })
}

/// How a statement ends, found by scanning ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    OpenBrace(usize),
    Semicolon(usize),
    CloseBrace(usize),
    Eof,
}

struct Parser<'a> {
    src: &'a str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn rest(&self) -> &'a str {
        &self.src[self.offset..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Moves the cursor to `target` (a byte offset at a char boundary).
    fn advance_to(&mut self, target: usize) {
        let pos = self.position().advance(&self.src[self.offset..target]);
        self.line = pos.line;
        self.column = pos.column;
        self.offset = target;
    }

    fn bump(&mut self) {
        if let Some(ch) = self.peek() {
            self.advance_to(self.offset + ch.len_utf8());
        }
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.rest().trim_start();
        let target = self.src.len() - trimmed.len();
        self.advance_to(target);
    }

    /// Parses statements until EOF (top level) or the `}` closing `open`.
    fn parse_statements(&mut self, open: Option<Position>) -> Result<Vec<SyntaxNode>, ParseError> {
        let mut nodes = Vec::new();
        loop {
            self.skip_whitespace();
            let rest = self.rest();
            match self.peek() {
                None => {
                    return match open {
                        Some(at) => Err(ParseError::new("unclosed block", at)),
                        None => Ok(nodes),
                    };
                }
                Some('}') => {
                    if open.is_some() {
                        return Ok(nodes);
                    }
                    return Err(ParseError::new("unexpected '}'", self.position()));
                }
                Some(';') => self.bump(),
                Some('/') if rest.starts_with("/*") => nodes.push(self.parse_block_comment()?),
                Some('/') if rest.starts_with("//") => nodes.push(self.parse_line_comment()),
                Some('@') => nodes.push(self.parse_at_rule()?),
                Some(_) => nodes.push(self.parse_ruleset_or_declaration()?),
            }
        }
    }

    fn parse_block_comment(&mut self) -> Result<SyntaxNode, ParseError> {
        let start = self.position();
        let begin = self.offset;
        let Some(close) = self.src[begin + 2..].find("*/") else {
            return Err(ParseError::new("unterminated comment", start));
        };
        let end = begin + 2 + close + 2;
        let body = self.src[begin + 2..end - 2].to_string();
        self.advance_to(end);
        Ok(self.node(start, begin, Vec::new(), NodeData::Comment {
            style: CommentStyle::Block,
            body,
        }))
    }

    fn parse_line_comment(&mut self) -> SyntaxNode {
        let start = self.position();
        let begin = self.offset;
        let end = self.src[begin..]
            .find('\n')
            .map_or(self.src.len(), |i| begin + i);
        let body = self.src[begin + 2..end].trim_end_matches('\r').to_string();
        self.advance_to(begin + 2 + body.len());
        self.node(start, begin, Vec::new(), NodeData::Comment {
            style: CommentStyle::Line,
            body,
        })
    }

    fn parse_at_rule(&mut self) -> Result<SyntaxNode, ParseError> {
        let start = self.position();
        let begin = self.offset;
        self.bump();
        let name_len = self
            .rest()
            .find(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'))
            .unwrap_or(self.rest().len());
        let name = self.rest()[..name_len].to_string();
        self.advance_to(self.offset + name_len);

        match self.scan_terminator()? {
            Terminator::OpenBrace(brace) => {
                let (header, children) = self.parse_block(brace)?;
                let prelude = header.prelude.clone();
                Ok(self.node(start, begin, children, NodeData::AtRule {
                    name,
                    prelude,
                    header: Some(header),
                }))
            }
            terminator => {
                let end = match terminator {
                    Terminator::Semicolon(at) | Terminator::CloseBrace(at) => at,
                    _ => self.src.len(),
                };
                let prelude = self.src[self.offset..end].trim().to_string();
                if let Terminator::Semicolon(at) = terminator {
                    self.advance_to(at + 1);
                } else {
                    let trimmed = self.src[..end].trim_end().len();
                    self.advance_to(trimmed.max(self.offset));
                }
                Ok(self.node(start, begin, Vec::new(), NodeData::AtRule {
                    name,
                    prelude,
                    header: None,
                }))
            }
        }
    }

    fn parse_ruleset_or_declaration(&mut self) -> Result<SyntaxNode, ParseError> {
        let start = self.position();
        let begin = self.offset;
        match self.scan_terminator()? {
            Terminator::OpenBrace(brace) => {
                let (header, children) = self.parse_block(brace)?;
                Ok(self.node(start, begin, children, NodeData::Ruleset { header }))
            }
            terminator => self.parse_declaration(start, begin, terminator),
        }
    }

    /// Parses `prelude { children }` with the cursor at the start of the prelude.
    fn parse_block(&mut self, brace: usize) -> Result<(BlockHeader, Vec<SyntaxNode>), ParseError> {
        let raw = &self.src[self.offset..brace];
        let leading = raw.len() - raw.trim_start().len();
        let prelude = raw.trim().to_string();
        let before_brace = raw[raw.trim_end().len()..].to_string();
        let prelude_start = self.position().advance(&raw[..leading]);

        self.advance_to(brace);
        let open_brace = self.position();
        self.bump();

        let children = self.parse_statements(Some(open_brace))?;
        let close_brace = self.position();
        self.bump();

        let header = BlockHeader {
            prelude,
            prelude_start,
            before_brace,
            open_brace,
            close_brace,
            single_line: open_brace.line == close_brace.line,
        };
        Ok((header, children))
    }

    fn parse_declaration(
        &mut self,
        start: Position,
        begin: usize,
        terminator: Terminator,
    ) -> Result<SyntaxNode, ParseError> {
        let end = match terminator {
            Terminator::Semicolon(at) | Terminator::CloseBrace(at) => at,
            Terminator::OpenBrace(_) | Terminator::Eof => self.src.len(),
        };
        let raw = &self.src[begin..end];
        let Some(colon_idx) = find_top_level_colon(raw) else {
            return Err(ParseError::new("expected ':' in declaration", start));
        };
        // Without a `;`, a trailing comment would otherwise run into the value.
        let raw = match terminator {
            Terminator::Semicolon(_) => raw,
            _ => find_top_level_comment(&raw[colon_idx + 1..])
                .map_or(raw, |at| &raw[..colon_idx + 1 + at]),
        };

        let head = &raw[..colon_idx];
        let property = head.trim_end().to_string();
        let before_colon = head[property.len()..].to_string();
        let colon = start.advance(head);

        let tail = &raw[colon_idx + 1..];
        let value_offset = tail.len() - tail.trim_start().len();
        let after_colon = tail[..value_offset].to_string();
        let value = tail.trim().to_string();
        let value_start = colon.advance(":").advance(&after_colon);

        let semicolon = if let Terminator::Semicolon(at) = terminator {
            self.advance_to(at);
            let pos = self.position();
            self.bump();
            Some(pos)
        } else {
            self.advance_to(begin + colon_idx + 1 + value_offset + value.len());
            None
        };

        Ok(self.node(start, begin, Vec::new(), NodeData::Declaration {
            property,
            before_colon,
            colon,
            after_colon,
            value,
            value_start,
            semicolon,
        }))
    }

    /// Finds the first top-level `{`, `;` or `}` from the cursor.
    fn scan_terminator(&self) -> Result<Terminator, ParseError> {
        let bytes = self.src.as_bytes();
        let mut i = self.offset;
        let mut depth = 0usize;
        while i < bytes.len() {
            match bytes[i] {
                quote @ (b'"' | b'\'') => i = self.skip_string(i, quote)?,
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    let Some(close) = self.src[i + 2..].find("*/") else {
                        let at = self.position().advance(&self.src[self.offset..i]);
                        return Err(ParseError::new("unterminated comment", at));
                    };
                    i += 2 + close + 2;
                }
                b'/' if bytes.get(i + 1) == Some(&b'/')
                    && depth == 0
                    && (i == 0 || bytes[i - 1].is_ascii_whitespace()) =>
                {
                    i = self.src[i..].find('\n').map_or(bytes.len(), |n| i + n);
                }
                b'#' if bytes.get(i + 1) == Some(&b'{') => i = skip_interpolation(bytes, i),
                b'(' | b'[' => {
                    depth += 1;
                    i += 1;
                }
                b')' | b']' => {
                    depth = depth.saturating_sub(1);
                    i += 1;
                }
                b'{' if depth == 0 => return Ok(Terminator::OpenBrace(i)),
                b';' if depth == 0 => return Ok(Terminator::Semicolon(i)),
                b'}' if depth == 0 => return Ok(Terminator::CloseBrace(i)),
                _ => i += 1,
            }
        }
        Ok(Terminator::Eof)
    }

    /// Returns the offset just past the string starting at `start`.
    fn skip_string(&self, start: usize, quote: u8) -> Result<usize, ParseError> {
        let bytes = self.src.as_bytes();
        let mut i = start + 1;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' => i += 2,
                b if b == quote => return Ok(i + 1),
                _ => i += 1,
            }
        }
        let at = self.position().advance(&self.src[self.offset..start]);
        Err(ParseError::new("unterminated string", at))
    }

    fn node(
        &self,
        start: Position,
        begin: usize,
        children: Vec<SyntaxNode>,
        data: NodeData,
    ) -> SyntaxNode {
        SyntaxNode {
            span: Span::new(start, self.position()),
            text: self.src[begin..self.offset].to_string(),
            children,
            data,
        }
    }
}

/// Returns the offset just past a `#{ ... }` interpolation starting at `start`.
fn skip_interpolation(bytes: &[u8], start: usize) -> usize {
    let mut depth = 0usize;
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    bytes.len()
}

/// Finds the first `:` outside strings, parentheses and interpolation.
fn find_top_level_colon(raw: &str) -> Option<usize> {
    let bytes = raw.as_bytes();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == b'\\' {
                i += 1;
            } else if b == q {
                quote = None;
            }
        } else {
            match b {
                b'"' | b'\'' => quote = Some(b),
                b'#' if bytes.get(i + 1) == Some(&b'{') => {
                    i = skip_interpolation(bytes, i);
                    continue;
                }
                b'(' | b'[' => depth += 1,
                b')' | b']' => depth = depth.saturating_sub(1),
                b':' if depth == 0 => return Some(i),
                _ => {}
            }
        }
        i += 1;
    }
    None
}

/// Finds the first `//` or `/*` comment outside strings, parentheses and
/// interpolation. A `//` counts only at the start or after whitespace.
fn find_top_level_comment(raw: &str) -> Option<usize> {
    let bytes = raw.as_bytes();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == b'\\' {
                i += 1;
            } else if b == q {
                quote = None;
            }
        } else {
            match b {
                b'"' | b'\'' => quote = Some(b),
                b'#' if bytes.get(i + 1) == Some(&b'{') => {
                    i = skip_interpolation(bytes, i);
                    continue;
                }
                b'(' | b'[' => depth += 1,
                b')' | b']' => depth = depth.saturating_sub(1),
                b'/' if depth == 0 && bytes.get(i + 1) == Some(&b'*') => return Some(i),
                b'/' if depth == 0
                    && bytes.get(i + 1) == Some(&b'/')
                    && (i == 0 || bytes[i - 1].is_ascii_whitespace()) =>
                {
                    return Some(i);
                }
                _ => {}
            }
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::NodeKind;

    fn kinds(node: &SyntaxNode) -> Vec<NodeKind> {
        node.children.iter().map(SyntaxNode::kind).collect()
    }

    #[test]
    fn parses_ruleset_with_declarations() {
        let tree = parse(".btn {\n  color: #FFF;\n  width: 10px;\n}\n").unwrap();
        assert_eq!(kinds(&tree), vec![NodeKind::Ruleset]);

        let ruleset = &tree.children[0];
        let header = ruleset.block_header().unwrap();
        assert_eq!(header.prelude, ".btn");
        assert_eq!(header.before_brace, " ");
        assert_eq!(header.open_brace, Position::new(1, 6));
        assert_eq!(header.close_brace, Position::new(4, 1));
        assert!(!header.single_line);
        assert_eq!(ruleset.span.end, Position::new(4, 2));
        assert_eq!(ruleset.text, ".btn {\n  color: #FFF;\n  width: 10px;\n}");

        let NodeData::Declaration {
            property,
            colon,
            value,
            value_start,
            semicolon,
            ..
        } = &ruleset.children[0].data
        else {
            panic!("expected declaration");
        };
        assert_eq!(property, "color");
        assert_eq!(*colon, Position::new(2, 8));
        assert_eq!(value, "#FFF");
        assert_eq!(*value_start, Position::new(2, 10));
        assert_eq!(*semicolon, Some(Position::new(2, 14)));
    }

    #[test]
    fn last_declaration_may_omit_semicolon() {
        let tree = parse(".a { color: red }").unwrap();
        let ruleset = &tree.children[0];
        assert!(ruleset.is_single_line());
        let decl = &ruleset.children[0];
        assert!(matches!(
            decl.data,
            NodeData::Declaration { semicolon: None, .. }
        ));
        assert_eq!(decl.text, "color: red");
    }

    #[test]
    fn trailing_comment_ends_unterminated_declaration() {
        let tree = parse(".a {\n  color: red // was #fff\n}\n").unwrap();
        let ruleset = &tree.children[0];
        assert_eq!(
            kinds(ruleset),
            vec![NodeKind::Declaration, NodeKind::Comment]
        );
        let decl = &ruleset.children[0];
        let NodeData::Declaration { value, .. } = &decl.data else {
            panic!("expected declaration");
        };
        assert_eq!(value, "red");
        assert_eq!(decl.span.end, Position::new(2, 13));

        let tree = parse(".a { background: url(//cdn.example.com/x.png) }").unwrap();
        let NodeData::Declaration { value, .. } = &tree.children[0].children[0].data else {
            panic!("expected declaration");
        };
        assert_eq!(value, "url(//cdn.example.com/x.png)");
    }

    #[test]
    fn keeps_raw_whitespace_around_colon_and_brace() {
        let tree = parse(".a{color :red;}").unwrap();
        let header = tree.children[0].block_header().unwrap();
        assert_eq!(header.before_brace, "");
        let NodeData::Declaration {
            before_colon,
            after_colon,
            ..
        } = &tree.children[0].children[0].data
        else {
            panic!("expected declaration");
        };
        assert_eq!(before_colon, " ");
        assert_eq!(after_colon, "");
    }

    #[test]
    fn parses_nested_scss_and_at_rules() {
        let source = r#"@import "base";
$gutter: 10px;

.nav {
  // links
  a:hover {
    color: red;
  }

  @media (min-width: 40em) {
    float: left;
  }

  @include clearfix;
}
"#;
        let tree = parse(source).unwrap();
        assert_eq!(
            kinds(&tree),
            vec![NodeKind::AtRule, NodeKind::Declaration, NodeKind::Ruleset]
        );
        let nav = &tree.children[2];
        assert_eq!(
            kinds(nav),
            vec![
                NodeKind::Comment,
                NodeKind::Ruleset,
                NodeKind::AtRule,
                NodeKind::AtRule
            ]
        );
        let NodeData::AtRule { name, prelude, header } = &nav.children[2].data else {
            panic!("expected at-rule");
        };
        assert_eq!(name, "media");
        assert_eq!(prelude, "(min-width: 40em)");
        assert!(header.is_some());
        assert!(matches!(
            &nav.children[3].data,
            NodeData::AtRule { name, header: None, .. } if name == "include"
        ));
    }

    #[test]
    fn semicolons_inside_parentheses_do_not_end_declarations() {
        let tree = parse(".a { background: url(data:image/png;base64,AAA); }").unwrap();
        let NodeData::Declaration { value, .. } = &tree.children[0].children[0].data else {
            panic!("expected declaration");
        };
        assert_eq!(value, "url(data:image/png;base64,AAA)");
    }

    #[test]
    fn interpolation_is_not_a_block() {
        let tree = parse(".icon-#{$name} { width: #{$size}px; }").unwrap();
        assert_eq!(kinds(&tree), vec![NodeKind::Ruleset]);
        assert_eq!(
            tree.children[0].block_header().unwrap().prelude,
            ".icon-#{$name}"
        );
    }

    #[test]
    fn comments_are_nodes() {
        let tree = parse("/* a */\n.a {\n  /* b */\n  color: red;\n}\n").unwrap();
        assert_eq!(kinds(&tree), vec![NodeKind::Comment, NodeKind::Ruleset]);
        assert_eq!(tree.children[0].span.end, Position::new(1, 8));
        assert_eq!(
            kinds(&tree.children[1]),
            vec![NodeKind::Comment, NodeKind::Declaration]
        );
    }

    #[test]
    fn reports_unclosed_block() {
        let err = parse(".a {\n  color: red;\n").unwrap_err();
        assert_eq!(err.message, "unclosed block");
        assert_eq!(err.position, Position::new(1, 4));
    }

    #[test]
    fn reports_stray_close_brace() {
        let err = parse(".a {}\n}").unwrap_err();
        assert_eq!(err.message, "unexpected '}'");
        assert_eq!(err.position, Position::new(2, 1));
    }

    #[test]
    fn reports_unterminated_comment() {
        let err = parse(".a {}\n/* open").unwrap_err();
        assert_eq!(err.message, "unterminated comment");
        assert_eq!(err.position, Position::new(2, 1));
    }

    #[test]
    fn reports_missing_colon() {
        let err = parse(".a { color red; }").unwrap_err();
        assert_eq!(err.message, "expected ':' in declaration");
    }
}
