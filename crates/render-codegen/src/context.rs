//! Output buffer used while generating code.

use crate::CodegenOptions;

/// Append-only code buffer with an indentation counter.
#[derive(Debug, Clone)]
pub struct CodegenContext {
    code: String,
    indent_level: usize,
    indent_width: usize,
}

impl CodegenContext {
    /// Create a new code generation context.
    pub fn new(options: &CodegenOptions) -> Self {
        Self {
            code: String::new(),
            indent_level: 0,
            indent_width: options.indent_width,
        }
    }

    /// Append raw text.
    pub fn push(&mut self, code: &str) {
        self.code.push_str(code);
    }

    /// Start a new line at the current indentation.
    pub fn newline(&mut self) {
        self.code.push('\n');
        for _ in 0..self.indent_level * self.indent_width {
            self.code.push(' ');
        }
    }

    /// Increase the indentation, then start a new line.
    pub fn indent(&mut self) {
        self.indent_level += 1;
        self.newline();
    }

    /// Decrease the indentation, then start a new line.
    pub fn deindent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
        self.newline();
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// Consume the context and return the generated code.
    pub fn finish(self) -> String {
        self.code
    }
}
