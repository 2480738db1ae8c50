//! Markup template to render-function compiler.
//!
//! Runs the four stages end to end: [`render_lexer::tokenize`],
//! [`render_template::parse`], [`render_template::transform`] and
//! [`render_codegen::generate_with_options`].
//!
//! ```ignore
//! let code = render_compiler::compile_default("<div><p>Vue</p></div>")?;
//! assert_eq!(code, "function render() {\n  return h(\"div\", h(\"p\", \"Vue\"))\n}");
//! ```

pub mod error;

use render_codegen::{CodeNode, CodegenOptions};
use render_template::{NodeKind, RootNode, TemplateNode, TransformError, TransformOptions};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

pub use error::{CompileError, CompileResult};

/// Options for a compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerOptions {
    /// Name of the generated function.
    pub function_name: SmolStr,
    /// Name of the node-creation helper.
    pub helper: SmolStr,
    /// Spaces per indentation level in the output.
    pub indent_width: usize,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        let transform = TransformOptions::default();
        Self {
            function_name: transform.function_name,
            helper: transform.helper,
            indent_width: CodegenOptions::default().indent_width,
        }
    }
}

impl CompilerOptions {
    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            function_name: self.function_name.clone(),
            helper: self.helper.clone(),
            ..Default::default()
        }
    }

    pub fn codegen_options(&self) -> CodegenOptions {
        CodegenOptions {
            indent_width: self.indent_width,
        }
    }
}

/// Lex, parse and transform `source`, returning the annotated template AST.
pub fn compile_ast(source: &str, options: &CompilerOptions) -> CompileResult<TemplateNode> {
    let tokens = render_lexer::tokenize(source)?;
    let mut root = render_template::parse(tokens)?;
    render_template::transform(&mut root, &options.transform_options())?;
    Ok(root)
}

/// Compile `source` to the render function's code AST.
pub fn compile_code(source: &str, options: &CompilerOptions) -> CompileResult<CodeNode> {
    let root = compile_ast(source, options)?;
    let span = root.span();
    match root {
        TemplateNode::Root(RootNode {
            generated: Some(code),
            ..
        }) => Ok(code),
        _ => Err(TransformError::MissingGeneratedCode {
            kind: NodeKind::Root,
            span,
        }
        .into()),
    }
}

/// Compile `source` to render-function source text.
pub fn compile(source: &str, options: &CompilerOptions) -> CompileResult<String> {
    let code = compile_code(source, options)?;
    Ok(render_codegen::generate_with_options(
        &code,
        &options.codegen_options(),
    ))
}

/// Compile with the default options.
pub fn compile_default(source: &str) -> CompileResult<String> {
    compile(source, &CompilerOptions::default())
}
