use std::collections::HashSet;

use muzzle_compile::codefix::create_suppress_fix;
use muzzle_compile::program::Program;
use muzzle_core::edit::{self, CodeFix};
use muzzle_core::host::{FileHost, HostError};
use muzzle_core::types::{Diagnostic, Severity};

use crate::resolver::find_suppress_target;

/// Annotation message used when neither the command line nor the config file
/// provides one.
pub const DEFAULT_MESSAGE: &str = "Warnings auto-suppressed by muzzle.";

/// Insert a `#suppress` annotation for every warning in the program.
///
/// Warnings are grouped by code and resolved location; each group gets one
/// annotation, built from the group's first diagnostic. All edits are applied
/// in a single batch so each touched file is read and written once. Returns
/// the number of annotations inserted.
pub fn suppress_all_warnings(
    program: &Program,
    host: &dyn FileHost,
    message: &str,
) -> Result<usize, HostError> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut fixes: Vec<CodeFix> = Vec::new();
    for diagnostic in &program.diagnostics {
        if diagnostic.severity != Severity::Warning {
            continue;
        }
        if !seen.insert(grouping_key(program, diagnostic)) {
            continue;
        }
        if let Some(fix) =
            create_suppress_fix(program, diagnostic.target, &diagnostic.code, message)
        {
            fixes.push(fix);
        }
    }
    edit::apply_code_fixes(host, &fixes)?;
    Ok(fixes.len())
}

/// Two warnings collapse into one annotation when they share a code and
/// resolve to the same attachment location.
fn grouping_key(program: &Program, diagnostic: &Diagnostic) -> String {
    match find_suppress_target(&program.arena, diagnostic.target) {
        Some(span) => format!(
            "{}-{}-{}-{}",
            diagnostic.code,
            program.sources.path(span.file).display(),
            span.pos,
            span.end
        ),
        None => format!("no-target-{}", diagnostic.code),
    }
}
