//! AST types for templates.

use crate::error::{TransformError, TransformResult};
use render_codegen::CodeNode;
use smol_str::SmolStr;
use source_map::Span;
use std::fmt;

/// A node in the template AST.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum TemplateNode {
    /// The root of a parsed template. Exactly one per compilation.
    Root(RootNode),
    /// An element.
    Element(ElementNode),
    /// A text run.
    Text(TextNode),
}

/// The root of a parsed template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RootNode {
    pub children: Vec<TemplateNode>,
    /// The render function, once the root transform has run.
    pub generated: Option<CodeNode>,
    /// Span of the entire template.
    pub span: Span,
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementNode {
    /// The tag name.
    pub tag: SmolStr,
    /// Child nodes, in source order.
    pub children: Vec<TemplateNode>,
    pub generated: Option<CodeNode>,
    /// From the `<` of the opening tag to the `>` of the closing tag.
    pub span: Span,
}

/// A text node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextNode {
    pub content: String,
    pub generated: Option<CodeNode>,
    pub span: Span,
}

/// Kind of a template node, without its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    Element,
    Text,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Root => "Root",
            Self::Element => "Element",
            Self::Text => "Text",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TemplateNode {
    /// Create an element node with the given children.
    pub fn element(tag: impl Into<SmolStr>, children: Vec<TemplateNode>, span: Span) -> Self {
        Self::Element(ElementNode {
            tag: tag.into(),
            children,
            generated: None,
            span,
        })
    }

    /// Create a text node.
    pub fn text(content: impl Into<String>, span: Span) -> Self {
        Self::Text(TextNode {
            content: content.into(),
            generated: None,
            span,
        })
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Root(_) => NodeKind::Root,
            Self::Element(_) => NodeKind::Element,
            Self::Text(_) => NodeKind::Text,
        }
    }

    /// Get the span of this node.
    pub fn span(&self) -> Span {
        match self {
            Self::Root(n) => n.span,
            Self::Element(n) => n.span,
            Self::Text(n) => n.span,
        }
    }

    /// Child nodes, or `None` for leaves.
    pub fn children(&self) -> Option<&[TemplateNode]> {
        match self {
            Self::Root(n) => Some(&n.children),
            Self::Element(n) => Some(&n.children),
            Self::Text(_) => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<TemplateNode>> {
        match self {
            Self::Root(n) => Some(&mut n.children),
            Self::Element(n) => Some(&mut n.children),
            Self::Text(_) => None,
        }
    }

    /// The code attached by the transforms, if any.
    pub fn generated(&self) -> Option<&CodeNode> {
        match self {
            Self::Root(n) => n.generated.as_ref(),
            Self::Element(n) => n.generated.as_ref(),
            Self::Text(n) => n.generated.as_ref(),
        }
    }

    /// Attach generated code. A node's code can only be set once.
    pub fn set_generated(&mut self, code: CodeNode) -> TransformResult<()> {
        let kind = self.kind();
        let span = self.span();
        let slot = match self {
            Self::Root(n) => &mut n.generated,
            Self::Element(n) => &mut n.generated,
            Self::Text(n) => &mut n.generated,
        };
        if slot.is_some() {
            return Err(TransformError::AlreadyGenerated { kind, span });
        }
        *slot = Some(code);
        Ok(())
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .map_or(0, |children| children.iter().map(TemplateNode::node_count).sum())
    }
}
