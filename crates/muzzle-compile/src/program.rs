use std::collections::{HashSet, VecDeque};
use std::path::{Component, Path, PathBuf};

use muzzle_core::host::FileHost;
use muzzle_core::source::{SourceFile, SourceMap};
use muzzle_core::types::{Diagnostic, DiagnosticTarget, FileId, NodeId, Severity};
use muzzle_syntax::ast::{NodeArena, NodeData};
use muzzle_syntax::parser;

use crate::checker;
use crate::lint;
use crate::options::CompilerOptions;

/// Synthetic path of the embedded prelude.
pub const PRELUDE_PATH: &str = "muzzle:lib/prelude.mzl";

const PRELUDE_SOURCE: &str = "\
scalar string;
scalar boolean;
scalar bytes;
scalar int32;
scalar int64;
scalar float32;
scalar float64;
scalar utcDateTime;
";

/// A completed compilation: the shared node arena, all loaded sources, the
/// script root per file, and every diagnostic produced.
#[derive(Debug)]
pub struct Program {
    pub arena: NodeArena,
    pub sources: SourceMap,
    pub diagnostics: Vec<Diagnostic>,
    pub roots: Vec<(FileId, NodeId)>,
}

impl Program {
    /// Project source files, excluding the synthetic prelude.
    pub fn project_files(&self) -> impl Iterator<Item = &SourceFile> {
        self.sources.files().filter(|f| !f.synthetic)
    }

    pub fn has_error_code(&self, code: &str) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.code == code && d.severity == Severity::Error)
    }
}

/// Compile the entry file and everything it transitively imports.
///
/// Compilation itself never fails; unreadable files, parse errors, and lint
/// findings all land in `Program::diagnostics`.
pub fn compile(host: &dyn FileHost, entry: &Path, options: &CompilerOptions) -> Program {
    let mut arena = NodeArena::new();
    let mut sources = SourceMap::new();
    let mut diagnostics = Vec::new();
    let mut roots = Vec::new();

    // Embedded prelude first so built-in scalar names resolve everywhere.
    let prelude = sources.insert(PathBuf::from(PRELUDE_PATH), PRELUDE_SOURCE.to_string(), true);
    let result = parser::parse_file(&mut arena, prelude, PRELUDE_SOURCE);
    debug_assert!(result.diagnostics.is_empty());
    roots.push((prelude, result.root));

    let mut queue: VecDeque<(PathBuf, DiagnosticTarget)> = VecDeque::new();
    queue.push_back((normalize_path(entry), DiagnosticTarget::None));
    let mut visited: HashSet<PathBuf> = HashSet::new();

    while let Some((path, origin)) = queue.pop_front() {
        if !visited.insert(path.clone()) {
            continue; // import cycles and diamonds load once
        }
        let text = match host.read_file(&path) {
            Ok(text) => text,
            Err(e) => {
                diagnostics.push(Diagnostic::error("import-not-found", e.to_string(), origin));
                continue;
            }
        };
        let file = sources.insert(path.clone(), text, false);
        let result = parser::parse_file(&mut arena, file, sources.text(file));
        diagnostics.extend(result.diagnostics);
        roots.push((file, result.root));

        let NodeData::Script { statements } = &arena.node(result.root).data else {
            continue;
        };
        for &stmt in statements {
            let NodeData::Import { path: spec } = &arena.node(stmt).data else {
                continue;
            };
            let target = DiagnosticTarget::Node(stmt);
            if !(spec.starts_with("./") || spec.starts_with("../")) {
                diagnostics.push(Diagnostic::error(
                    "import-not-found",
                    format!("import \"{spec}\" is not a relative path"),
                    target,
                ));
                continue;
            }
            let base = path.parent().unwrap_or(Path::new(""));
            queue.push_back((normalize_path(&base.join(spec)), target));
        }
    }

    checker::check(&arena, &roots, &mut diagnostics);

    let (rules, ruleset_diagnostics) = lint::registry::resolve_rule_sets(&options.rule_sets);
    diagnostics.extend(ruleset_diagnostics);
    let ctx = lint::LintContext {
        arena: &arena,
        sources: &sources,
        roots: &roots,
    };
    diagnostics.extend(lint::run(&ctx, &rules));

    Program {
        arena,
        sources,
        diagnostics,
        roots,
    }
}

/// Lexical path normalization: resolves `.` and `..` without touching the
/// file system, so two spellings of the same import load once.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}

#[cfg(test)]
#[path = "program_tests.rs"]
mod tests;
