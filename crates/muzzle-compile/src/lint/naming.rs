use muzzle_core::types::{Diagnostic, DiagnosticTarget};
use muzzle_syntax::ast::NodeData;

use super::{LintContext, Rule};

pub const MODEL_NAME_PASCAL_CASE: &str = "model-name-pascal-case";
pub const PROPERTY_NAME_CAMEL_CASE: &str = "property-name-camel-case";

pub(crate) fn rules() -> Vec<Rule> {
    vec![
        Rule {
            name: MODEL_NAME_PASCAL_CASE,
            check: check_model_names,
        },
        Rule {
            name: PROPERTY_NAME_CAMEL_CASE,
            check: check_property_names,
        },
    ]
}

/// `model-name-pascal-case`: model and enum names start uppercase and carry
/// no underscores. Targets the name identifier; the suppression resolver
/// walks up to the declaration.
fn check_model_names(ctx: &LintContext) -> Vec<Diagnostic> {
    let mut findings = Vec::new();
    for root in ctx.project_roots() {
        let NodeData::Script { statements } = &ctx.arena.node(root).data else {
            continue;
        };
        for &stmt in statements {
            let name_id = match &ctx.arena.node(stmt).data {
                NodeData::Model { name, .. } | NodeData::Enum { name, .. } => *name,
                _ => continue,
            };
            let name = ctx.arena.ident_text(name_id);
            if !is_pascal_case(name) {
                findings.push(Diagnostic::warning(
                    MODEL_NAME_PASCAL_CASE,
                    format!("`{name}` should be PascalCase"),
                    DiagnosticTarget::Node(name_id),
                ));
            }
        }
    }
    findings
}

/// `property-name-camel-case`: property and parameter names start lowercase
/// and carry no underscores.
fn check_property_names(ctx: &LintContext) -> Vec<Diagnostic> {
    let mut findings = Vec::new();
    for (id, node) in ctx.arena.iter() {
        let NodeData::ModelProperty { name, .. } = &node.data else {
            continue;
        };
        if !ctx.in_project_file(id) {
            continue;
        }
        let name_id = *name;
        let name = ctx.arena.ident_text(name_id);
        if !is_camel_case(name) {
            findings.push(Diagnostic::warning(
                PROPERTY_NAME_CAMEL_CASE,
                format!("`{name}` should be camelCase"),
                DiagnosticTarget::Node(name_id),
            ));
        }
    }
    findings
}

fn is_pascal_case(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase()) && !name.contains('_')
}

fn is_camel_case(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_lowercase()) && !name.contains('_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_predicates() {
        assert!(is_pascal_case("UserProfile"));
        assert!(!is_pascal_case("userProfile"));
        assert!(!is_pascal_case("User_Profile"));
        assert!(is_camel_case("createdAt"));
        assert!(!is_camel_case("CreatedAt"));
        assert!(!is_camel_case("created_at"));
    }
}
