//! Orchestrator for compiling a batch of templates.

use crate::cli::{Args, EmitKind};
use crate::config::Config;
use crate::output::OutputFormatter;
use miette::{IntoDiagnostic, Result, WrapErr};
use rayon::prelude::*;
use render_compiler::{compile, compile_ast, compile_code, CompileError};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Result of a run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunResult {
    /// Number of templates compiled.
    pub file_count: usize,
    /// Number of templates that failed.
    pub error_count: usize,
}

/// A template to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    /// Name shown in output headers and diagnostics.
    pub fn name(&self) -> String {
        match self {
            Self::Stdin => "<stdin>".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// Why a single template produced no output.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Orchestrator for running render-compiler.
pub struct Orchestrator {
    config: Config,
    args: Args,
    formatter: OutputFormatter,
}

impl Orchestrator {
    /// Create a new orchestrator.
    pub fn new(args: Args) -> Result<Self> {
        let config = Config::load(&args)?;
        let formatter = OutputFormatter::new(args.output);
        Ok(Self {
            config,
            args,
            formatter,
        })
    }

    /// Compile every input and print the results.
    pub fn run(&self) -> Result<RunResult> {
        let inputs = self.collect_inputs()?;
        tracing::debug!(count = inputs.len(), "collected templates");

        let sources = inputs
            .into_iter()
            .map(|input| read_input(&input).map(|source| (input, source)))
            .collect::<Result<Vec<_>>>()?;

        let outcomes: Vec<_> = sources
            .into_par_iter()
            .map(|(input, source)| {
                let outcome = self.emit(&source);
                (input, source, outcome)
            })
            .collect();

        let show_headers = outcomes.len() > 1;
        let mut result = RunResult {
            file_count: outcomes.len(),
            error_count: 0,
        };
        for (input, source, outcome) in &outcomes {
            match outcome {
                Ok(output) => self
                    .formatter
                    .print_output(&input.name(), output, show_headers),
                Err(err) => {
                    result.error_count += 1;
                    self.formatter.print_error(&input.name(), source, err);
                }
            }
        }

        self.formatter.print_summary(&result);
        Ok(result)
    }

    /// Produce the requested output for one template.
    pub fn emit(&self, source: &str) -> std::result::Result<String, EmitError> {
        let options = &self.config.options;
        let output = match self.args.emit {
            EmitKind::Render => compile(source, options)?,
            EmitKind::Ast => render_template::dump(&compile_ast(source, options)?),
            EmitKind::AstJson => serde_json::to_string_pretty(&compile_ast(source, options)?)?,
            EmitKind::CodeJson => serde_json::to_string_pretty(&compile_code(source, options)?)?,
            EmitKind::Tokens => render_lexer::tokenize(source)
                .map_err(CompileError::from)?
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n"),
        };
        Ok(output)
    }

    /// Resolve CLI paths into templates, walking directories.
    pub fn collect_inputs(&self) -> Result<Vec<Input>> {
        if self.args.paths.is_empty() {
            return Ok(vec![Input::Stdin]);
        }

        let mut inputs = Vec::new();
        for path in &self.args.paths {
            if path.as_os_str() == "-" {
                inputs.push(Input::Stdin);
            } else if path.is_dir() {
                inputs.extend(self.find_templates(path)?.into_iter().map(Input::File));
            } else {
                inputs.push(Input::File(path.clone()));
            }
        }
        Ok(inputs)
    }

    /// Find all template files below `dir`, sorted by path.
    fn find_templates(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in walkdir::WalkDir::new(dir).follow_links(true) {
            let entry = entry
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to walk {}", dir.display()))?;
            let path = entry.path();
            if entry.file_type().is_file() && self.config.should_process(path) {
                files.push(path.to_path_buf());
            }
        }
        files.sort();
        Ok(files)
    }
}

fn read_input(input: &Input) -> Result<String> {
    let mut source = match input {
        Input::Stdin => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .into_diagnostic()
                .wrap_err("Failed to read stdin")?;
            source
        }
        Input::File(path) => std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?,
    };
    strip_final_newline(&mut source);
    Ok(source)
}

/// Drop one trailing `\n` or `\r\n` left by editors and `echo`.
fn strip_final_newline(source: &mut String) {
    if source.ends_with('\n') {
        source.pop();
        if source.ends_with('\r') {
            source.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    fn orchestrator(argv: &[&str]) -> Orchestrator {
        let args =
            Args::try_parse_from(std::iter::once("render-compiler").chain(argv.iter().copied()))
                .unwrap();
        Orchestrator::new(args).unwrap()
    }

    #[test]
    fn test_collect_inputs_walks_directories() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("pages/vendor")).unwrap();
        std::fs::write(root.join("pages/b.html"), "<p>b</p>").unwrap();
        std::fs::write(root.join("pages/a.html"), "<p>a</p>").unwrap();
        std::fs::write(root.join("pages/notes.txt"), "skip").unwrap();
        std::fs::write(root.join("pages/vendor/c.html"), "<p>c</p>").unwrap();

        let orchestrator = orchestrator(&[root.to_str().unwrap(), "--ignore", "**/vendor/**"]);
        let inputs = orchestrator.collect_inputs().unwrap();
        assert_eq!(
            inputs,
            vec![
                Input::File(root.join("pages/a.html")),
                Input::File(root.join("pages/b.html")),
            ]
        );
    }

    #[test]
    fn test_collect_inputs_stdin() {
        assert_eq!(orchestrator(&[]).collect_inputs().unwrap(), vec![Input::Stdin]);
        assert_eq!(
            orchestrator(&["-"]).collect_inputs().unwrap(),
            vec![Input::Stdin]
        );
    }

    #[test]
    fn test_run_counts_failures() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ok.html"), "<p>Vue</p>").unwrap();
        std::fs::write(dir.path().join("bad.html"), "<p>Vue</span>").unwrap();

        let result = orchestrator(&[dir.path().to_str().unwrap(), "--output", "machine"])
            .run()
            .unwrap();
        assert_eq!(
            result,
            RunResult {
                file_count: 2,
                error_count: 1,
            }
        );
    }

    #[test]
    fn test_run_accepts_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("unix.html"), "<p>Vue</p>\n").unwrap();
        std::fs::write(dir.path().join("dos.html"), "<p>Vue</p>\r\n").unwrap();

        let result = orchestrator(&[dir.path().to_str().unwrap(), "--output", "machine"])
            .run()
            .unwrap();
        assert_eq!(
            result,
            RunResult {
                file_count: 2,
                error_count: 0,
            }
        );
    }

    #[test]
    fn test_read_input_strips_one_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("two.html");
        std::fs::write(&path, "<p>Vue</p>\n\n").unwrap();
        assert_eq!(read_input(&Input::File(path)).unwrap(), "<p>Vue</p>\n");
    }

    #[test]
    fn test_emit_kinds() {
        let source = "<div><p>Vue</p></div>";
        assert_eq!(
            orchestrator(&["--emit", "tokens"]).emit(source).unwrap(),
            "TagStart(div)\nTagStart(p)\nText(\"Vue\")\nTagEnd(p)\nTagEnd(div)"
        );
        assert_eq!(
            orchestrator(&["--emit", "ast"]).emit(source).unwrap(),
            "Root\n--Element: div\n----Element: p\n------Text: Vue\n"
        );
        assert_eq!(
            orchestrator(&["--function-name", "view"]).emit(source).unwrap(),
            "function view() {\n  return h(\"div\", h(\"p\", \"Vue\"))\n}"
        );

        let code: serde_json::Value =
            serde_json::from_str(&orchestrator(&["--emit", "code-json"]).emit(source).unwrap())
                .unwrap();
        assert_eq!(code["type"], "FunctionDecl");
        assert_eq!(code["name"]["name"], "render");
    }

    #[test]
    fn test_emit_ast_json_includes_generated_code() {
        let json = orchestrator(&["--emit", "ast-json"]).emit("<p>Vue</p>").unwrap();
        let ast: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(ast["type"], "Root");
        assert_eq!(ast["children"][0]["tag"], "p");
        assert_eq!(ast["children"][0]["generated"]["type"], "CallExpression");
        assert_eq!(ast["children"][0]["children"][0]["generated"]["value"], "Vue");
    }

    #[test]
    fn test_emit_reports_compile_errors() {
        let err = orchestrator(&[]).emit("<div>").unwrap_err();
        assert!(matches!(
            err,
            EmitError::Compile(CompileError::Parse(_))
        ));
    }
}
