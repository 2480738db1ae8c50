//! Render-function code generation.
//!
//! This crate defines the target-code AST that template transforms attach to
//! template nodes, and serializes it into formatted source text.

pub mod ast;
pub mod context;

pub use ast::*;
pub use context::CodegenContext;

/// Options for code generation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodegenOptions {
    /// Spaces emitted per indentation level.
    pub indent_width: usize,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}

/// Generate source text for a code node with default options.
pub fn generate(node: &CodeNode) -> String {
    generate_with_options(node, &CodegenOptions::default())
}

/// Generate source text for a code node.
pub fn generate_with_options(node: &CodeNode, options: &CodegenOptions) -> String {
    let mut ctx = CodegenContext::new(options);
    gen_node(node, &mut ctx);
    let code = ctx.finish();
    tracing::debug!(kind = node.kind(), len = code.len(), "generated code");
    code
}

/// Dispatch on the node kind.
pub fn gen_node(node: &CodeNode, ctx: &mut CodegenContext) {
    match node {
        CodeNode::StringLiteral(lit) => gen_string_literal(lit, ctx),
        CodeNode::Identifier(ident) => gen_identifier(ident, ctx),
        CodeNode::ArrayExpression(array) => gen_array_expression(array, ctx),
        CodeNode::CallExpression(call) => gen_call_expression(call, ctx),
        CodeNode::ReturnStatement(ret) => gen_return_statement(ret, ctx),
        CodeNode::FunctionDecl(func) => gen_function_decl(func, ctx),
    }
}

fn gen_string_literal(lit: &StringLiteral, ctx: &mut CodegenContext) {
    ctx.push("\"");
    ctx.push(&lit.value);
    ctx.push("\"");
}

fn gen_identifier(ident: &Identifier, ctx: &mut CodegenContext) {
    ctx.push(&ident.name);
}

/// Write `nodes` separated by `, `.
fn gen_node_list(nodes: &[CodeNode], ctx: &mut CodegenContext) {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            ctx.push(", ");
        }
        gen_node(node, ctx);
    }
}

fn gen_array_expression(array: &ArrayExpression, ctx: &mut CodegenContext) {
    ctx.push("[");
    gen_node_list(&array.elements, ctx);
    ctx.push("]");
}

fn gen_call_expression(call: &CallExpression, ctx: &mut CodegenContext) {
    gen_identifier(&call.callee, ctx);
    ctx.push("(");
    gen_node_list(&call.arguments, ctx);
    ctx.push(")");
}

fn gen_return_statement(ret: &ReturnStatement, ctx: &mut CodegenContext) {
    ctx.push("return ");
    gen_node(&ret.value, ctx);
}

fn gen_function_decl(func: &FunctionDecl, ctx: &mut CodegenContext) {
    ctx.push("function ");
    gen_identifier(&func.name, ctx);
    ctx.push("(");
    for (i, param) in func.params.iter().enumerate() {
        if i > 0 {
            ctx.push(", ");
        }
        gen_identifier(param, ctx);
    }
    ctx.push(") {");
    ctx.indent();
    for (i, statement) in func.body.iter().enumerate() {
        if i > 0 {
            ctx.newline();
        }
        gen_node(statement, ctx);
    }
    ctx.deindent();
    ctx.push("}");
}
