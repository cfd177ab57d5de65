use std::collections::HashMap;

use muzzle_core::types::{Diagnostic, DiagnosticTarget, FileId, NodeId};
use muzzle_syntax::ast::{NodeArena, NodeData};

/// Post-parse checks, independent of the configured rule sets:
/// duplicate top-level declarations and unresolved type references.
/// Both are errors; errors are never suppressed.
pub fn check(arena: &NodeArena, roots: &[(FileId, NodeId)], diagnostics: &mut Vec<Diagnostic>) {
    let mut declared: HashMap<String, NodeId> = HashMap::new();

    for &(_, root) in roots {
        let NodeData::Script { statements } = &arena.node(root).data else {
            continue;
        };
        for &stmt in statements {
            let Some(name_id) = declared_name(arena, stmt) else {
                continue;
            };
            let name = arena.ident_text(name_id).to_string();
            if declared.contains_key(&name) {
                diagnostics.push(Diagnostic::error(
                    "duplicate-declaration",
                    format!("duplicate declaration of `{name}`"),
                    DiagnosticTarget::Node(name_id),
                ));
            } else {
                declared.insert(name, stmt);
            }
        }
    }

    for (_, node) in arena.iter() {
        let NodeData::TypeReference { path } = &node.data else {
            continue;
        };
        let Some(&head) = path.first() else {
            continue;
        };
        let name = arena.ident_text(head);
        if !declared.contains_key(name) {
            diagnostics.push(Diagnostic::error(
                "unknown-identifier",
                format!("unknown identifier `{name}`"),
                DiagnosticTarget::Node(head),
            ));
        }
    }
}

fn declared_name(arena: &NodeArena, stmt: NodeId) -> Option<NodeId> {
    match &arena.node(stmt).data {
        NodeData::Model { name, .. }
        | NodeData::Operation { name, .. }
        | NodeData::Alias { name, .. }
        | NodeData::Enum { name, .. }
        | NodeData::Scalar { name } => Some(*name),
        _ => None,
    }
}
