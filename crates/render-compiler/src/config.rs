//! Configuration loading and management.

use crate::cli::Args;
use globset::{Glob, GlobSet, GlobSetBuilder};
use miette::{IntoDiagnostic, Result, WrapErr};
use render_compiler::CompilerOptions;
use std::path::Path;

/// Configuration for one CLI run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Options passed to every compilation.
    pub options: CompilerOptions,
    /// File extensions picked up when walking directories.
    pub extensions: Vec<String>,
    /// Paths matching these globs are skipped when walking directories.
    pub ignore: GlobSet,
}

impl Config {
    /// Load configuration: defaults, then the config file, then CLI flags.
    pub fn load(args: &Args) -> Result<Self> {
        let mut options = match &args.config {
            Some(path) => load_options(path)?,
            None => CompilerOptions::default(),
        };
        if let Some(name) = &args.function_name {
            options.function_name = name.into();
        }
        if let Some(helper) = &args.helper {
            options.helper = helper.into();
        }
        if let Some(width) = args.indent_width {
            options.indent_width = width;
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in &args.ignore {
            builder.add(
                Glob::new(pattern)
                    .into_diagnostic()
                    .wrap_err_with(|| format!("Invalid ignore pattern {pattern:?}"))?,
            );
        }
        let ignore = builder.build().into_diagnostic()?;

        tracing::debug!(?options, "loaded configuration");

        Ok(Self {
            options,
            extensions: vec!["html".to_string()],
            ignore,
        })
    }

    /// Check if a file found while walking a directory should be compiled.
    pub fn should_process(&self, path: &Path) -> bool {
        let matches_extension = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext));
        matches_extension && !self.ignore.is_match(path)
    }
}

/// Read compiler options from a JSON file.
fn load_options(path: &Path) -> Result<CompilerOptions> {
    let content = std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .into_diagnostic()
        .wrap_err_with(|| format!("Invalid config file {}", path.display()))
}
