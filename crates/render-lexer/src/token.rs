//! Token types produced by the lexer.

use smol_str::SmolStr;
use source_map::Span;
use std::fmt;

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// An opening tag, `<name>`.
    TagStart,
    /// A closing tag, `</name>`.
    TagEnd,
    /// A literal text run.
    Text,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TagStart => "TagStart",
            Self::TagEnd => "TagEnd",
            Self::Text => "Text",
        }
    }
}

/// A single lexical unit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    /// Tag name for `TagStart`/`TagEnd`, the literal text for `Text`.
    pub name: SmolStr,
    /// Source span, including the angle brackets for tags.
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, name: impl Into<SmolStr>, span: Span) -> Self {
        Self {
            kind,
            name: name.into(),
            span,
        }
    }

    pub fn tag_start(name: impl Into<SmolStr>, span: Span) -> Self {
        Self::new(TokenKind::TagStart, name, span)
    }

    pub fn tag_end(name: impl Into<SmolStr>, span: Span) -> Self {
        Self::new(TokenKind::TagEnd, name, span)
    }

    pub fn text(content: impl Into<SmolStr>, span: Span) -> Self {
        Self::new(TokenKind::Text, content, span)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Text => write!(f, "{}({:?})", self.kind.as_str(), self.name.as_str()),
            TokenKind::TagStart | TokenKind::TagEnd => {
                write!(f, "{}({})", self.kind.as_str(), self.name)
            }
        }
    }
}
