//! Lint rules and the rule-set registry.
//!
//! Rules are plain functions over a [`LintContext`]; [`run`] executes them and
//! drops findings already covered by a `#suppress` directive on the target
//! node or one of its ancestors.

pub mod docs;
pub mod naming;
pub mod registry;

use muzzle_core::source::SourceMap;
use muzzle_core::types::{Diagnostic, DiagnosticTarget, FileId, NodeId};
use muzzle_syntax::ast::NodeArena;

/// Everything a rule needs to inspect the compiled program.
pub struct LintContext<'a> {
    pub arena: &'a NodeArena,
    pub sources: &'a SourceMap,
    pub roots: &'a [(FileId, NodeId)],
}

impl LintContext<'_> {
    /// Script roots of project files; rules skip the synthetic prelude.
    pub fn project_roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.roots
            .iter()
            .filter(|&&(file, _)| !self.sources.get(file).synthetic)
            .map(|&(_, root)| root)
    }

    /// Whether a node lives in a project file (not the prelude).
    pub fn in_project_file(&self, node: NodeId) -> bool {
        !self.sources.get(self.arena.span(node).file).synthetic
    }
}

/// A named lint rule.
pub struct Rule {
    pub name: &'static str,
    pub check: fn(&LintContext) -> Vec<Diagnostic>,
}

/// Run the given rules over the program.
pub fn run(ctx: &LintContext, rules: &[Rule]) -> Vec<Diagnostic> {
    rules
        .iter()
        .flat_map(|rule| (rule.check)(ctx))
        .filter(|d| !is_suppressed(ctx.arena, d))
        .collect()
}

fn is_suppressed(arena: &NodeArena, diagnostic: &Diagnostic) -> bool {
    match diagnostic.target {
        DiagnosticTarget::Node(id) => arena.has_suppress_directive(id, &diagnostic.code),
        _ => false,
    }
}
