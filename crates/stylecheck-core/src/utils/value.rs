//! Tokenizer for property values, selectors and at-rule preludes.
//!
//! Rules that look inside text (hex colors, quotes, units, commas) share this
//! tokenizer so that string contents and interpolation are never mistaken for
//! code.

use crate::syntax::Position;

/// Kind of a value token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Quoted string, including its quotes.
    String {
        /// `"` or `'`.
        quote: char,
    },
    /// `#` followed by name characters, e.g. a hex color or an id selector.
    Hash,
    /// Number with an optional unit, e.g. `10px`, `.5`, `-2em`, `50%`.
    Number,
    /// Identifier or SCSS variable.
    Ident,
    /// Identifier immediately followed by `(`; the token includes the `(`.
    Function,
    /// `(` not preceded by an identifier.
    OpenParen,
    /// `)`.
    CloseParen,
    /// `,`.
    Comma,
    /// Run of whitespace.
    Whitespace,
    /// SCSS `#{...}` interpolation.
    Interpolation,
    /// Any other single character.
    Delim,
}

/// A token with its byte offset into the tokenized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token kind.
    pub kind: TokenKind,
    /// Token text.
    pub text: &'a str,
    /// Byte offset of the token in the tokenized text.
    pub offset: usize,
}

impl<'a> Token<'a> {
    /// Position of this token, given where the tokenized text starts.
    #[must_use]
    pub fn position(&self, source: &str, start: Position) -> Position {
        start.advance(&source[..self.offset])
    }

    /// For numbers, splits into `(numeric part, unit)`.
    #[must_use]
    pub fn number_parts(&self) -> Option<(&'a str, &'a str)> {
        if self.kind != TokenKind::Number {
            return None;
        }
        let split = self
            .text
            .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+')))
            .unwrap_or(self.text.len());
        Some(self.text.split_at(split))
    }

    /// For hash tokens of 3, 4, 6 or 8 hex digits, the digits without `#`.
    #[must_use]
    pub fn hex_color(&self) -> Option<&'a str> {
        if self.kind != TokenKind::Hash {
            return None;
        }
        let digits = &self.text[1..];
        (matches!(digits.len(), 3 | 4 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit()))
            .then_some(digits)
    }

    /// For functions, the function name without `(`.
    #[must_use]
    pub fn function_name(&self) -> Option<&'a str> {
        (self.kind == TokenKind::Function).then(|| &self.text[..self.text.len() - 1])
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$' || !c.is_ascii()
}

/// Splits `text` into tokens. Never fails; unterminated strings run to the end.
#[must_use]
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);

        let kind = match c {
            '"' | '\'' => {
                let mut escaped = false;
                for (_, n) in chars.by_ref() {
                    if escaped {
                        escaped = false;
                    } else if n == '\\' {
                        escaped = true;
                    } else if n == c {
                        break;
                    }
                }
                TokenKind::String { quote: c }
            }
            '#' if next == Some('{') => {
                let mut depth = 0usize;
                for (_, n) in chars.by_ref() {
                    match n {
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                }
                TokenKind::Interpolation
            }
            '#' if next.is_some_and(is_name_char) => {
                while chars.next_if(|&(_, n)| is_name_char(n)).is_some() {}
                TokenKind::Hash
            }
            c if c.is_ascii_digit() || starts_number(c, next, &text[start..]) => {
                consume_number(&mut chars);
                TokenKind::Number
            }
            '-' if next.is_some_and(|n| is_name_start(n) || n == '-') => {
                consume_ident(&mut chars)
            }
            c if is_name_start(c) => consume_ident(&mut chars),
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            ',' => TokenKind::Comma,
            c if c.is_whitespace() => {
                while chars.next_if(|&(_, n)| n.is_whitespace()).is_some() {}
                TokenKind::Whitespace
            }
            _ => TokenKind::Delim,
        };

        let end = chars.peek().map_or(text.len(), |&(i, _)| i);
        tokens.push(Token {
            kind,
            text: &text[start..end],
            offset: start,
        });
    }

    tokens
}

/// `.5`, `-1`, `+.5` start numbers; a lone `.` or `-` does not.
fn starts_number(c: char, next: Option<char>, rest: &str) -> bool {
    match c {
        '.' => next.is_some_and(|n| n.is_ascii_digit()),
        '-' | '+' => {
            let mut it = rest.chars().skip(1);
            match it.next() {
                Some(d) if d.is_ascii_digit() => true,
                Some('.') => it.next().is_some_and(|d| d.is_ascii_digit()),
                _ => false,
            }
        }
        _ => false,
    }
}

fn consume_number(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>) {
    while chars
        .next_if(|&(_, n)| n.is_ascii_digit() || n == '.')
        .is_some()
    {}
    if chars.next_if(|&(_, n)| n == '%').is_some() {
        return;
    }
    while chars.next_if(|&(_, n)| n.is_alphabetic()).is_some() {}
}

fn consume_ident(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>) -> TokenKind {
    while chars.next_if(|&(_, n)| is_name_char(n)).is_some() {}
    if chars.next_if(|&(_, n)| n == '(').is_some() {
        TokenKind::Function
    } else {
        TokenKind::Ident
    }
}
