//! Stack-based parser from tokens to the template AST.

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use render_lexer::{Token, TokenKind};
use source_map::Span;

/// Parse a token stream into a template AST rooted at [`TemplateNode::Root`].
pub fn parse(tokens: Vec<Token>) -> ParseResult<TemplateNode> {
    let end = tokens.last().map_or(0, |t| t.span.end);
    let mut parser = TemplateParser::new(Span::new(0, end));
    for token in tokens {
        parser.push_token(token)?;
    }
    parser.finish()
}

/// An element whose closing tag has not been seen yet.
struct OpenElement {
    node: ElementNode,
    /// Span of the opening tag.
    open_span: Span,
}

/// Parser for template tokens.
struct TemplateParser {
    root: RootNode,
    /// Open elements, innermost last. `root` sits implicitly below them.
    stack: Vec<OpenElement>,
}

impl TemplateParser {
    fn new(span: Span) -> Self {
        Self {
            root: RootNode {
                span,
                ..Default::default()
            },
            stack: Vec::new(),
        }
    }

    /// Children of the node on top of the stack.
    fn current_children(&mut self) -> &mut Vec<TemplateNode> {
        match self.stack.last_mut() {
            Some(open) => &mut open.node.children,
            None => &mut self.root.children,
        }
    }

    fn push_token(&mut self, token: Token) -> ParseResult<()> {
        match token.kind {
            TokenKind::TagStart => {
                self.stack.push(OpenElement {
                    node: ElementNode {
                        tag: token.name,
                        children: Vec::new(),
                        generated: None,
                        span: token.span,
                    },
                    open_span: token.span,
                });
            }
            TokenKind::Text => {
                let text = TemplateNode::text(token.name.as_str(), token.span);
                self.current_children().push(text);
            }
            TokenKind::TagEnd => {
                let expected = self.stack.last().map(|open| open.node.tag.clone());
                if expected.as_deref() != Some(token.name.as_str()) {
                    return Err(ParseError::MismatchedClosingTag {
                        expected,
                        found: token.name,
                        span: token.span,
                    });
                }
                if let Some(mut open) = self.stack.pop() {
                    open.node.span = open.open_span.merge(token.span);
                    self.current_children().push(TemplateNode::Element(open.node));
                }
            }
        }
        Ok(())
    }

    fn finish(mut self) -> ParseResult<TemplateNode> {
        if let Some(open) = self.stack.pop() {
            return Err(ParseError::UnexpectedEndOfInput {
                unclosed: open.node.tag,
                span: open.open_span,
            });
        }
        let root = TemplateNode::Root(self.root);
        tracing::debug!(nodes = root.node_count(), "parsed template");
        Ok(root)
    }
}
