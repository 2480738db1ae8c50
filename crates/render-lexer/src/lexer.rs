//! Finite-state lexer for template markup.
//!
//! Each step looks at exactly one character. A transition either consumes the
//! character or leaves it in place so that the next state re-dispatches on it;
//! there is no backtracking.

use crate::error::{LexError, LexResult, MAX_SOURCE_LEN};
use crate::token::{Token, TokenKind};
use source_map::Span;
use std::fmt;

/// Tokenize template markup into an ordered token sequence.
pub fn tokenize(source: &str) -> LexResult<Vec<Token>> {
    Lexer::new(source).tokenize()
}

/// States of the lexer's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexerState {
    /// Between tokens.
    Initial,
    /// Just consumed `<`.
    TagOpen,
    /// Collecting the name of an opening tag.
    TagName,
    /// Collecting the name of a closing tag, after `</`.
    TagCloseName,
    /// Collecting a text run.
    Text,
}

impl LexerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::TagOpen => "tag-open",
            Self::TagName => "tag-name",
            Self::TagCloseName => "tag-close-name",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for LexerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag names are ASCII letters only.
#[inline]
fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Offsets past [`MAX_SOURCE_LEN`] would not fit in a [`Span`].
fn check_source_len(len: usize) -> LexResult<()> {
    if len > MAX_SOURCE_LEN {
        return Err(LexError::SourceTooLarge { len });
    }
    Ok(())
}

/// A lexer over a single template source.
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    state: LexerState,
    /// Characters collected for the token under construction.
    pending: String,
    /// Offset of the first byte of the token under construction.
    token_start: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            state: LexerState::Initial,
            pending: String::new(),
            token_start: 0,
            tokens: Vec::new(),
        }
    }

    /// Current state of the machine.
    pub fn state(&self) -> LexerState {
        self.state
    }

    /// Run the machine to the end of input.
    pub fn tokenize(mut self) -> LexResult<Vec<Token>> {
        check_source_len(self.source.len())?;
        while let Some(c) = self.peek() {
            self.step(c)?;
        }
        self.finish()
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
    }

    fn transition(&mut self, next: LexerState) {
        tracing::trace!(from = %self.state, to = %next, offset = self.pos, "lexer transition");
        self.state = next;
    }

    fn invalid(&self, found: char) -> LexError {
        LexError::InvalidCharacter {
            state: self.state,
            found,
            offset: self.pos,
        }
    }

    /// Push a token spanning from `token_start` to the current position.
    fn emit(&mut self, kind: TokenKind) {
        let name = std::mem::take(&mut self.pending);
        let span = Span::new(self.token_start as u32, self.pos as u32);
        self.tokens.push(Token::new(kind, name, span));
    }

    /// Apply one transition for the lookahead character `c`.
    fn step(&mut self, c: char) -> LexResult<()> {
        match self.state {
            LexerState::Initial => {
                if c == '<' {
                    self.token_start = self.pos;
                    self.bump(c);
                    self.transition(LexerState::TagOpen);
                } else if is_tag_char(c) {
                    // Re-dispatched in Text, which collects it.
                    self.token_start = self.pos;
                    self.transition(LexerState::Text);
                } else {
                    return Err(self.invalid(c));
                }
            }
            LexerState::TagOpen => {
                if is_tag_char(c) {
                    self.transition(LexerState::TagName);
                } else if c == '/' {
                    self.bump(c);
                    self.transition(LexerState::TagCloseName);
                } else {
                    return Err(self.invalid(c));
                }
            }
            LexerState::TagName => {
                if is_tag_char(c) {
                    self.pending.push(c);
                    self.bump(c);
                } else if c == '>' {
                    self.bump(c);
                    self.emit(TokenKind::TagStart);
                    self.transition(LexerState::Initial);
                } else {
                    return Err(self.invalid(c));
                }
            }
            LexerState::TagCloseName => {
                if is_tag_char(c) {
                    self.pending.push(c);
                    self.bump(c);
                } else if c == '>' && !self.pending.is_empty() {
                    self.bump(c);
                    self.emit(TokenKind::TagEnd);
                    self.transition(LexerState::Initial);
                } else {
                    return Err(self.invalid(c));
                }
            }
            LexerState::Text => {
                if c == '<' {
                    self.emit(TokenKind::Text);
                    self.token_start = self.pos;
                    self.bump(c);
                    self.transition(LexerState::TagOpen);
                } else {
                    self.pending.push(c);
                    self.bump(c);
                }
            }
        }
        Ok(())
    }

    /// Check that input ended on a token boundary.
    fn finish(self) -> LexResult<Vec<Token>> {
        let span = Span::new(self.token_start as u32, self.source.len() as u32);
        match self.state {
            LexerState::Initial => {
                tracing::debug!(tokens = self.tokens.len(), "tokenized template");
                Ok(self.tokens)
            }
            LexerState::Text => Err(LexError::UnterminatedText { span }),
            state @ (LexerState::TagOpen | LexerState::TagName | LexerState::TagCloseName) => {
                Err(LexError::UnterminatedTag { state, span })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds_and_names(source: &str) -> Vec<(TokenKind, String)> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.name.to_string()))
            .collect()
    }

    #[test]
    fn test_tokenize_nested_elements() {
        assert_eq!(
            kinds_and_names("<div><p>Vue</p></div>"),
            vec![
                (TokenKind::TagStart, "div".to_string()),
                (TokenKind::TagStart, "p".to_string()),
                (TokenKind::Text, "Vue".to_string()),
                (TokenKind::TagEnd, "p".to_string()),
                (TokenKind::TagEnd, "div".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_token_spans() {
        let tokens = tokenize("<div>Hi</div>").unwrap();
        let spans: Vec<_> = tokens.iter().map(|t| t.span).collect();
        assert_eq!(spans, vec![Span::new(0, 5), Span::new(5, 7), Span::new(7, 13)]);
    }

    #[test]
    fn test_tokenize_text_keeps_inner_whitespace() {
        let tokens = tokenize("<p>Hello, world!</p>").unwrap();
        assert_eq!(tokens[1], Token::text("Hello, world!", Span::new(3, 16)));
    }

    #[test]
    fn test_tokenize_display() {
        let rendered: Vec<String> = tokenize("<div><p>Vue</p></div>")
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        insta::assert_snapshot!(rendered.join("\n"), @r#"
        TagStart(div)
        TagStart(p)
        Text("Vue")
        TagEnd(p)
        TagEnd(div)
        "#);
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert_eq!(tokenize("").unwrap(), Vec::new());
    }

    #[test]
    fn test_tokenize_rejects_digit_in_tag_name() {
        let err = tokenize("<h1>Title</h1>").unwrap_err();
        assert_eq!(
            err,
            LexError::InvalidCharacter {
                state: LexerState::TagName,
                found: '1',
                offset: 2,
            }
        );
        assert_eq!(err.code(), "invalid-character");
        assert_eq!(err.span(), Span::new(2, 3));
    }

    #[test]
    fn test_tokenize_rejects_whitespace_after_open_bracket() {
        let err = tokenize("< div>").unwrap_err();
        assert!(matches!(
            err,
            LexError::InvalidCharacter {
                state: LexerState::TagOpen,
                found: ' ',
                offset: 1,
            }
        ));
    }

    #[test]
    fn test_tokenize_rejects_leading_whitespace() {
        let err = tokenize(" <div></div>").unwrap_err();
        assert!(matches!(
            err,
            LexError::InvalidCharacter {
                state: LexerState::Initial,
                ..
            }
        ));
    }

    #[test]
    fn test_tokenize_rejects_empty_closing_tag() {
        let err = tokenize("<div></>").unwrap_err();
        assert_eq!(
            err,
            LexError::InvalidCharacter {
                state: LexerState::TagCloseName,
                found: '>',
                offset: 7,
            }
        );
    }

    #[test]
    fn test_tokenize_unterminated_tag() {
        let err = tokenize("<div><p").unwrap_err();
        assert_eq!(
            err,
            LexError::UnterminatedTag {
                state: LexerState::TagName,
                span: Span::new(5, 7),
            }
        );
        assert_eq!(
            tokenize("<div></div").unwrap_err().code(),
            "unterminated-tag"
        );
        assert!(matches!(
            tokenize("<").unwrap_err(),
            LexError::UnterminatedTag {
                state: LexerState::TagOpen,
                ..
            }
        ));
    }

    #[test]
    fn test_tokenize_unterminated_text() {
        let err = tokenize("<div></div>tail").unwrap_err();
        assert_eq!(err, LexError::UnterminatedText { span: Span::new(11, 15) });
        assert_eq!(err.code(), "unterminated-text");
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_source_length_limit() {
        assert_eq!(check_source_len(MAX_SOURCE_LEN), Ok(()));
        let err = check_source_len(MAX_SOURCE_LEN + 1).unwrap_err();
        assert_eq!(err, LexError::SourceTooLarge { len: MAX_SOURCE_LEN + 1 });
        assert_eq!(err.code(), "source-too-large");
    }

    #[test]
    fn test_lexer_starts_in_initial_state() {
        assert_eq!(Lexer::new("<div>").state(), LexerState::Initial);
    }
}
