//! Error type covering every compilation stage.

use render_lexer::LexError;
use render_template::{ParseError, TransformError};
use source_map::Span;

/// Result type for compilation.
pub type CompileResult<T> = Result<T, CompileError>;

/// An error from any stage. Compilation stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Transform(#[from] TransformError),
}

impl CompileError {
    /// Get the error code as a string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Lex(e) => e.code(),
            Self::Parse(e) => e.code(),
            Self::Transform(e) => e.code(),
        }
    }

    /// The stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Lex(_) => "lex",
            Self::Parse(_) => "parse",
            Self::Transform(_) => "transform",
        }
    }

    /// Location of the problem in the template source, if known.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Lex(e) => Some(e.span()),
            Self::Parse(e) => Some(e.span()),
            Self::Transform(e) => e.span(),
        }
    }

    pub fn help(&self) -> Option<String> {
        match self {
            Self::Lex(e) => e.help().map(str::to_string),
            Self::Parse(e) => e.help(),
            Self::Transform(TransformError::EmptyTemplate) => {
                Some("add at least one element to the template".to_string())
            }
            Self::Transform(_) => None,
        }
    }
}
