//! Token kinds and spans produced by the tokenizer

use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Classification attached to a lexed span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Spaces and tabs
    Whitespace,
    /// Quoted string literal, including its quotes
    String,
    /// Reserved or unsupported characters, and the fallback for unmatched input
    Invalid,
    /// Integer or floating point literal
    Number,
    /// Identifier that is not a declared keyword
    Identifier,
    /// Declared keyword (logical operators, field names, literals)
    Keyword,
    /// Declared operator
    Operator,
    /// Bracket that takes part in bracket matching
    Bracket,
    /// Separator punctuation
    Delimiter,
    /// Symbol run that is not a declared operator; rendered without style
    Unstyled,
}

impl TokenKind {
    /// Token name used by Monarch-style editor hosts
    pub fn monarch_name(&self) -> &'static str {
        match self {
            TokenKind::Whitespace => "white",
            TokenKind::String => "string",
            TokenKind::Invalid => "invalid",
            TokenKind::Number => "number",
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::Operator => "operator",
            TokenKind::Bracket => "@brackets",
            TokenKind::Delimiter => "delimiter",
            TokenKind::Unstyled => "",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::String => "string",
            TokenKind::Invalid => "invalid",
            TokenKind::Number => "number",
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::Operator => "operator",
            TokenKind::Bracket => "bracket",
            TokenKind::Delimiter => "delimiter",
            TokenKind::Unstyled => "unstyled",
        };
        f.write_str(name)
    }
}

/// Token with position information
///
/// The span is a byte range into the line the token was produced from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }

    /// Slice of `line` covered by this token
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        &line[self.span.clone()]
    }

    pub fn len(&self) -> usize {
        self.span.end - self.span.start
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }
}
