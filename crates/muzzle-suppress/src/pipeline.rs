use std::path::{Path, PathBuf};

use rayon::prelude::*;

use muzzle_compile::lint::registry::UNKNOWN_RULE_SET;
use muzzle_compile::options::CompilerOptions;
use muzzle_compile::program::compile;
use muzzle_core::config::MuzzleConfig;
use muzzle_core::host::{FileHost, HostError};
use muzzle_core::types::Severity;
use muzzle_syntax::formatter;

use crate::suppressor::{suppress_all_warnings, DEFAULT_MESSAGE};

/// Errors that abort a suppression run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("no entry point provided")]
    EntryPointMissing,

    #[error("entry point {} does not exist", .0.display())]
    EntryNotFound(PathBuf),

    #[error("at least one rule set must be provided (use --rule-set or muzzle.json)")]
    NoRuleSets,

    #[error("{0}. Check your linter configuration.")]
    UnknownRuleSet(String),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("failed to format {path}: {message}")]
    Format { path: PathBuf, message: String },
}

/// What to compile and how to annotate it.
#[derive(Debug, Clone, Default)]
pub struct SuppressOptions {
    pub entry_point: PathBuf,
    pub rule_sets: Vec<String>,
    pub message: Option<String>,
}

/// Counters reported after a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub warnings_seen: usize,
    pub suppressions: usize,
    pub files_formatted: usize,
}

/// Compile, annotate, format.
///
/// Rule sets from `muzzle.json` next to the entry point are appended to the
/// ones given here; an explicit message wins over the configured one. An
/// unknown rule set aborts the run before any file is modified.
pub fn run(host: &dyn FileHost, options: &SuppressOptions) -> Result<RunSummary, PipelineError> {
    if options.entry_point.as_os_str().is_empty() {
        return Err(PipelineError::EntryPointMissing);
    }
    if !host.exists(&options.entry_point) {
        return Err(PipelineError::EntryNotFound(options.entry_point.clone()));
    }

    let dir = options.entry_point.parent().unwrap_or(Path::new(""));
    let config = MuzzleConfig::load(host, dir);

    let mut rule_sets = options.rule_sets.clone();
    for name in config.rule_sets {
        if !rule_sets.contains(&name) {
            rule_sets.push(name);
        }
    }
    if rule_sets.is_empty() {
        return Err(PipelineError::NoRuleSets);
    }

    let program = compile(host, &options.entry_point, &CompilerOptions { rule_sets });

    if let Some(unknown) = program
        .diagnostics
        .iter()
        .find(|d| d.code == UNKNOWN_RULE_SET)
    {
        return Err(PipelineError::UnknownRuleSet(unknown.message.clone()));
    }

    let warnings_seen = program
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();

    let message = options
        .message
        .as_deref()
        .or(config.message.as_deref())
        .unwrap_or(DEFAULT_MESSAGE);
    let suppressions = suppress_all_warnings(&program, host, message)?;

    // Reformat every project file the compile touched, in parallel. The
    // synthetic prelude never reaches the host.
    let project_files: Vec<&Path> = program.project_files().map(|f| f.path.as_path()).collect();
    let files_formatted = project_files
        .par_iter()
        .map(|path| format_file(host, path))
        .collect::<Result<Vec<bool>, PipelineError>>()?
        .into_iter()
        .filter(|written| *written)
        .count();

    Ok(RunSummary {
        warnings_seen,
        suppressions,
        files_formatted,
    })
}

/// Format one file in place; returns whether it was rewritten.
fn format_file(host: &dyn FileHost, path: &Path) -> Result<bool, PipelineError> {
    let text = host.read_file(path)?;
    let formatted = formatter::format_source(&text).map_err(|e| PipelineError::Format {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    if formatted == text {
        return Ok(false);
    }
    host.write_file(path, &formatted)?;
    Ok(true)
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
