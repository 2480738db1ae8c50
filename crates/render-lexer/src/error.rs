//! Error types for lexing.

use crate::lexer::LexerState;
use source_map::Span;

/// Largest source, in bytes, whose offsets fit in a [`Span`].
pub const MAX_SOURCE_LEN: usize = u32::MAX as usize;

/// Result type for lexing operations.
pub type LexResult<T> = Result<T, LexError>;

/// An error that stopped the lexer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// The current state has no transition for this character.
    #[error("unexpected character {found:?} at offset {offset} in {state} state")]
    InvalidCharacter {
        state: LexerState,
        found: char,
        offset: usize,
    },
    /// Input ended between `<` and `>`.
    #[error("unterminated tag: input ended in {state} state")]
    UnterminatedTag { state: LexerState, span: Span },
    /// Input ended inside a text run that no tag follows.
    #[error("unterminated text: text must be followed by a tag")]
    UnterminatedText { span: Span },
    /// Offsets are stored as `u32`, so sources are capped at 4 GiB.
    #[error("source is {len} bytes, larger than the {max} byte limit", max = MAX_SOURCE_LEN)]
    SourceTooLarge { len: usize },
}

impl LexError {
    /// Get the error code as a string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCharacter { .. } => "invalid-character",
            Self::UnterminatedTag { .. } => "unterminated-tag",
            Self::UnterminatedText { .. } => "unterminated-text",
            Self::SourceTooLarge { .. } => "source-too-large",
        }
    }

    /// The source range the error points at.
    pub fn span(&self) -> Span {
        match self {
            Self::InvalidCharacter { found, offset, .. } => Span::at(*offset, found.len_utf8()),
            Self::UnterminatedTag { span, .. } | Self::UnterminatedText { span } => *span,
            Self::SourceTooLarge { .. } => Span::default(),
        }
    }

    /// A short hint for the user, if one applies.
    pub fn help(&self) -> Option<&'static str> {
        match self {
            Self::InvalidCharacter { state, .. } => Some(match state {
                LexerState::Initial => "content must start with `<` or a letter",
                LexerState::TagOpen => "`<` must be followed by a tag name or `/`",
                LexerState::TagName | LexerState::TagCloseName => {
                    "tag names may only contain ASCII letters"
                }
                LexerState::Text => "text runs cannot contain this character",
            }),
            Self::UnterminatedTag { .. } => Some("close the tag with `>`"),
            Self::UnterminatedText { .. } => Some("wrap the text in an element"),
            Self::SourceTooLarge { .. } => Some("split the template into smaller files"),
        }
    }
}
