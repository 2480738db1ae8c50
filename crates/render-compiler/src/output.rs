//! Output formatting for compiled templates and errors.

use crate::cli::OutputFormat;
use crate::orchestrator::{EmitError, RunResult};
use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode, SourceSpan};
use source_map::{LineCol, LineIndex};
use std::fmt;

/// A compile error rendered against its template source.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct TemplateDiagnostic {
    message: String,
    code: &'static str,
    source_code: NamedSource<String>,
    span: Option<SourceSpan>,
    label: String,
    help: Option<String>,
}

impl TemplateDiagnostic {
    pub fn new(name: &str, source: &str, err: &EmitError) -> Self {
        let (code, span, label, help) = match err {
            EmitError::Compile(err) => (
                err.code(),
                err.span().map(|span| SourceSpan::from(span.to_range())),
                format!("{} error", err.stage()),
                err.help(),
            ),
            EmitError::Serialize(_) => ("serialize", None, String::new(), None),
        };
        Self {
            message: err.to_string(),
            code,
            source_code: NamedSource::new(name, source.to_string()),
            span,
            label,
            help,
        }
    }
}

impl Diagnostic for TemplateDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|help| Box::new(help) as Box<dyn fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.source_code)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(self.label.clone()),
            span,
        ))))
    }
}

/// Formatter for compiler output.
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print the output for one template to stdout.
    pub fn print_output(&self, name: &str, output: &str, show_header: bool) {
        if show_header {
            println!("==> {} <==", name);
        }
        println!("{}", output.trim_end_matches('\n'));
    }

    /// Print an error for one template.
    pub fn print_error(&self, name: &str, source: &str, err: &EmitError) {
        match self.format {
            OutputFormat::Human => {
                let report = miette::Report::new(TemplateDiagnostic::new(name, source, err));
                eprintln!("{:?}", report);
            }
            OutputFormat::Json => println!("{}", error_json(name, source, err)),
            OutputFormat::Machine => println!("{}", error_machine(name, source, err)),
        }
    }

    /// Print the summary when more than one template was compiled.
    pub fn print_summary(&self, result: &RunResult) {
        if self.format != OutputFormat::Human || result.file_count < 2 {
            return;
        }
        eprintln!();
        if result.error_count == 0 {
            eprintln!("\x1b[32m✓\x1b[0m Compiled {} templates", result.file_count);
        } else {
            eprintln!(
                "\x1b[31m✗\x1b[0m {} of {} templates failed",
                result.error_count, result.file_count
            );
        }
    }
}

/// 1-indexed line and column of the error, `(1, 1)` when it has no span.
fn position(source: &str, err: &EmitError) -> (u32, u32) {
    let start = match err {
        EmitError::Compile(err) => err.span().map(|span| span.start),
        EmitError::Serialize(_) => None,
    };
    start
        .map(|offset| LineIndex::new(source).line_col(offset))
        .unwrap_or(LineCol::new(0, 0))
        .to_display()
}

fn code(err: &EmitError) -> &'static str {
    match err {
        EmitError::Compile(err) => err.code(),
        EmitError::Serialize(_) => "serialize",
    }
}

fn error_json(name: &str, source: &str, err: &EmitError) -> serde_json::Value {
    let (line, column) = position(source, err);
    let span = match err {
        EmitError::Compile(err) => err.span(),
        EmitError::Serialize(_) => None,
    };
    serde_json::json!({
        "file": name,
        "code": code(err),
        "message": err.to_string(),
        "line": line,
        "column": column,
        "span": span.map(|span| serde_json::json!({ "start": span.start, "end": span.end })),
    })
}

fn error_machine(name: &str, source: &str, err: &EmitError) -> String {
    let (line, column) = position(source, err);
    format!(
        "{}:{}:{}:{}:{}",
        name,
        line,
        column,
        code(err),
        err.to_string().replace(':', "\\:")
    )
}
