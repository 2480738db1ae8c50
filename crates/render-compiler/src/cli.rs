//! Command-line argument parsing.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Compile markup templates into render functions
#[derive(Parser, Debug, Clone)]
#[command(name = "render-compiler")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Template files or directories. Reads stdin when empty or `-`
    pub paths: Vec<PathBuf>,

    /// What to print for each template
    #[arg(long, value_enum, default_value = "render")]
    pub emit: EmitKind,

    /// Error output format
    #[arg(long, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Path to a JSON file with compiler options
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Name of the generated function
    #[arg(long)]
    pub function_name: Option<String>,

    /// Name of the node-creation helper
    #[arg(long)]
    pub helper: Option<String>,

    /// Spaces per indentation level
    #[arg(long)]
    pub indent_width: Option<usize>,

    /// Ignore patterns (glob) applied to files found in directories
    #[arg(long)]
    pub ignore: Vec<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Output produced for each template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum EmitKind {
    /// Render function source
    #[default]
    Render,
    /// Indented template AST dump
    Ast,
    /// Annotated template AST as JSON
    AstJson,
    /// Token stream, one token per line
    Tokens,
    /// Render function code AST as JSON
    CodeJson,
}

/// Output format for errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Annotated source snippets
    #[default]
    Human,
    /// One JSON object per error
    Json,
    /// `file:line:col:code:message`
    Machine,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_defaults() {
        let args = Args::try_parse_from(["render-compiler"]).unwrap();
        assert_eq!(args.emit, EmitKind::Render);
        assert_eq!(args.output, OutputFormat::Human);
        assert_eq!(args.verbose, 0);
        assert!(args.paths.is_empty());
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "render-compiler",
            "--emit",
            "ast-json",
            "--output",
            "machine",
            "--helper",
            "createVNode",
            "-vv",
            "app.html",
        ])
        .unwrap();
        assert_eq!(args.emit, EmitKind::AstJson);
        assert_eq!(args.output, OutputFormat::Machine);
        assert_eq!(args.helper.as_deref(), Some("createVNode"));
        assert_eq!(args.verbose, 2);
        assert_eq!(args.paths, vec![PathBuf::from("app.html")]);
    }
}
