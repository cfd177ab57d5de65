use muzzle_core::types::{DiagnosticTarget, Span};
use muzzle_syntax::ast::{NodeArena, SyntaxKind};

/// Resolve a diagnostic target to the location a suppression annotation
/// belongs to.
///
/// Location targets pass through unchanged. Node targets walk parent links
/// upward past expression-level nodes until a declaration-level node is
/// reached; a parentless node along the way is its own attachment point.
/// The no-target sentinel resolves to nothing.
pub fn find_suppress_target(arena: &NodeArena, target: DiagnosticTarget) -> Option<Span> {
    match target {
        DiagnosticTarget::Location(span) => Some(span),
        DiagnosticTarget::Node(id) => {
            let mut current = id;
            while is_expression_level(arena.kind(current)) {
                match arena.parent(current) {
                    Some(parent) => current = parent,
                    None => break,
                }
            }
            Some(arena.span(current))
        }
        DiagnosticTarget::None => None,
    }
}

/// Kinds that cannot carry a `#suppress` directive of their own; the
/// annotation attaches to the enclosing declaration instead.
fn is_expression_level(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Identifier
            | SyntaxKind::TypeReference
            | SyntaxKind::UnionExpression
            | SyntaxKind::ModelExpression
    )
}
