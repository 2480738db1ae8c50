//! Error types for template parsing and transformation.

use crate::ast::NodeKind;
use smol_str::SmolStr;
use source_map::Span;

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for transform operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// An error that occurred while building the template AST.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A closing tag does not close the innermost open element.
    #[error("{}", mismatched_message(.expected.as_deref(), .found))]
    MismatchedClosingTag {
        /// Tag of the innermost open element, `None` if no element is open.
        expected: Option<SmolStr>,
        found: SmolStr,
        span: Span,
    },
    /// Tokens ran out while an element was still open.
    #[error("unexpected end of input: <{unclosed}> is never closed")]
    UnexpectedEndOfInput { unclosed: SmolStr, span: Span },
}

fn mismatched_message(expected: Option<&str>, found: &str) -> String {
    match expected {
        Some(expected) => format!("mismatched closing tag: expected </{expected}>, found </{found}>"),
        None => format!("unexpected closing tag </{found}>: no element is open"),
    }
}

impl ParseError {
    /// Get the error code as a string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MismatchedClosingTag { .. } => "mismatched-closing-tag",
            Self::UnexpectedEndOfInput { .. } => "unexpected-end-of-input",
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::MismatchedClosingTag { span, .. } | Self::UnexpectedEndOfInput { span, .. } => {
                *span
            }
        }
    }

    pub fn help(&self) -> Option<String> {
        match self {
            Self::MismatchedClosingTag {
                expected: Some(expected),
                ..
            } => Some(format!("close <{expected}> before closing its parent")),
            Self::MismatchedClosingTag { expected: None, .. } => {
                Some("remove the stray closing tag".to_string())
            }
            Self::UnexpectedEndOfInput { unclosed, .. } => {
                Some(format!("add </{unclosed}> at the end of the element"))
            }
        }
    }
}

/// An error raised by a node transform.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    /// The template has no node to return from the render function.
    #[error("empty template: there is nothing to render")]
    EmptyTemplate,
    /// A parent was composed before one of its children produced code.
    #[error("{kind} node has no generated code")]
    MissingGeneratedCode { kind: NodeKind, span: Span },
    /// Generated code was assigned to a node twice.
    #[error("{kind} node already has generated code")]
    AlreadyGenerated { kind: NodeKind, span: Span },
    /// A transform tried to replace or remove the root node.
    #[error("the root node cannot be replaced or removed")]
    DetachedRoot,
}

impl TransformError {
    /// Get the error code as a string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTemplate => "empty-template",
            Self::MissingGeneratedCode { .. } => "missing-generated-code",
            Self::AlreadyGenerated { .. } => "already-generated",
            Self::DetachedRoot => "detached-root",
        }
    }

    /// The offending node's span, if the error is tied to one.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::MissingGeneratedCode { span, .. } | Self::AlreadyGenerated { span, .. } => {
                Some(*span)
            }
            Self::EmptyTemplate | Self::DetachedRoot => None,
        }
    }
}
