//! AST for the generated render-function source.
//!
//! Nodes are built once by the template transforms and never mutated
//! afterwards; the generator only reads them.

use smol_str::SmolStr;

/// A node of the generated-code AST.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum CodeNode {
    /// A double-quoted string literal.
    StringLiteral(StringLiteral),
    /// A bare identifier.
    Identifier(Identifier),
    /// `[a, b, ...]`
    ArrayExpression(ArrayExpression),
    /// `callee(a, b, ...)`
    CallExpression(CallExpression),
    /// `return value`
    ReturnStatement(ReturnStatement),
    /// `function name(params) { body }`
    FunctionDecl(FunctionDecl),
}

impl CodeNode {
    pub fn string(value: impl Into<String>) -> Self {
        Self::StringLiteral(StringLiteral {
            value: value.into(),
        })
    }

    pub fn identifier(name: impl Into<SmolStr>) -> Self {
        Self::Identifier(Identifier::new(name))
    }

    pub fn array(elements: Vec<CodeNode>) -> Self {
        Self::ArrayExpression(ArrayExpression { elements })
    }

    pub fn call(callee: Identifier, arguments: Vec<CodeNode>) -> Self {
        Self::CallExpression(CallExpression { callee, arguments })
    }

    pub fn return_statement(value: CodeNode) -> Self {
        Self::ReturnStatement(ReturnStatement {
            value: Box::new(value),
        })
    }

    pub fn function(name: Identifier, params: Vec<Identifier>, body: Vec<CodeNode>) -> Self {
        Self::FunctionDecl(FunctionDecl { name, params, body })
    }

    /// Short name of the node kind, for logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StringLiteral(_) => "StringLiteral",
            Self::Identifier(_) => "Identifier",
            Self::ArrayExpression(_) => "ArrayExpression",
            Self::CallExpression(_) => "CallExpression",
            Self::ReturnStatement(_) => "ReturnStatement",
            Self::FunctionDecl(_) => "FunctionDecl",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StringLiteral {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Identifier {
    pub name: SmolStr,
}

impl Identifier {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrayExpression {
    pub elements: Vec<CodeNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallExpression {
    pub callee: Identifier,
    pub arguments: Vec<CodeNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReturnStatement {
    pub value: Box<CodeNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionDecl {
    pub name: Identifier,
    pub params: Vec<Identifier>,
    pub body: Vec<CodeNode>,
}
