//! Template front end for render-compiler.
//!
//! This crate turns the lexer's tokens into a template AST and runs the
//! transform pass that annotates every node with the render-function code it
//! stands for. The annotated root is what `render-codegen` serializes.

pub mod ast;
pub mod context;
pub mod dump;
pub mod error;
pub mod parser;
pub mod transforms;

pub use ast::*;
pub use context::{default_node_transforms, ExitAction, NodeTransform, TransformContext, TransformOptions};
pub use dump::dump;
pub use error::{ParseError, ParseResult, TransformError, TransformResult};
pub use parser::parse;
pub use transforms::{transform, transform_element, transform_root, transform_text};
