use muzzle_core::edit::{CodeFix, TextEdit};
use muzzle_core::types::{DiagnosticTarget, Span};

use crate::program::Program;

/// Build the edit that inserts a `#suppress` annotation for a diagnostic.
///
/// The annotation goes on its own line immediately above the line containing
/// the target's start, with matching indentation. The original target is
/// accepted as-is; node targets resolve to their own span, which for leaf
/// targets still lands on the enclosing declaration's line. Returns `None`
/// for the no-target sentinel.
pub fn create_suppress_fix(
    program: &Program,
    target: DiagnosticTarget,
    code: &str,
    message: &str,
) -> Option<CodeFix> {
    let span: Span = match target {
        DiagnosticTarget::Location(span) => span,
        DiagnosticTarget::Node(id) => program.arena.span(id),
        DiagnosticTarget::None => return None,
    };
    let file = program.sources.get(span.file);
    let pos = span.pos.min(file.text.len());
    let line_start = file.text[..pos].rfind('\n').map_or(0, |i| i + 1);
    let indent: String = file.text[line_start..]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect();
    let text = format!(
        "{indent}#suppress \"{}\" \"{}\"\n",
        escape(code),
        escape(message)
    );
    Some(CodeFix {
        label: format!("Suppress {code}"),
        edits: vec![TextEdit {
            path: file.path.clone(),
            pos: line_start,
            text,
        }],
    })
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
