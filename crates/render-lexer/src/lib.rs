//! Lexer for the render template markup.
//!
//! The markup is deliberately tiny: nested elements whose tag names are ASCII
//! letters, and literal text runs between tags. The lexer walks the input one
//! character at a time through an explicit state machine and produces the flat
//! token stream consumed by `render-template`.

pub mod error;
pub mod lexer;
pub mod token;

pub use error::{LexError, LexResult, MAX_SOURCE_LEN};
pub use lexer::{tokenize, Lexer, LexerState};
pub use token::{Token, TokenKind};
