use muzzle_core::types::{Diagnostic, DiagnosticTarget};
use muzzle_syntax::ast::NodeData;

use super::{LintContext, Rule};

pub const MISSING_DOC: &str = "missing-doc";

pub(crate) fn rules() -> Vec<Rule> {
    vec![Rule {
        name: MISSING_DOC,
        check: check_missing_doc,
    }]
}

/// `missing-doc`: models, their properties, operations, and enums must carry
/// a doc comment. Properties of inline model expressions are exempt — a doc
/// comment has nowhere to attach inside an inline type.
fn check_missing_doc(ctx: &LintContext) -> Vec<Diagnostic> {
    let mut findings = Vec::new();
    for root in ctx.project_roots() {
        let NodeData::Script { statements } = &ctx.arena.node(root).data else {
            continue;
        };
        for &stmt in statements {
            match &ctx.arena.node(stmt).data {
                NodeData::Model { name, properties } => {
                    if ctx.arena.node(stmt).docs.is_none() {
                        findings.push(Diagnostic::warning(
                            MISSING_DOC,
                            format!(
                                "model `{}` is missing a doc comment",
                                ctx.arena.ident_text(*name)
                            ),
                            DiagnosticTarget::Node(stmt),
                        ));
                    }
                    for &prop in properties {
                        if ctx.arena.node(prop).docs.is_some() {
                            continue;
                        }
                        let NodeData::ModelProperty { name, .. } = &ctx.arena.node(prop).data
                        else {
                            continue;
                        };
                        findings.push(Diagnostic::warning(
                            MISSING_DOC,
                            format!(
                                "property `{}` is missing a doc comment",
                                ctx.arena.ident_text(*name)
                            ),
                            DiagnosticTarget::Node(prop),
                        ));
                    }
                }
                NodeData::Operation { name, .. } => {
                    if ctx.arena.node(stmt).docs.is_none() {
                        findings.push(Diagnostic::warning(
                            MISSING_DOC,
                            format!(
                                "operation `{}` is missing a doc comment",
                                ctx.arena.ident_text(*name)
                            ),
                            DiagnosticTarget::Node(stmt),
                        ));
                    }
                }
                NodeData::Enum { name, .. } => {
                    if ctx.arena.node(stmt).docs.is_none() {
                        findings.push(Diagnostic::warning(
                            MISSING_DOC,
                            format!(
                                "enum `{}` is missing a doc comment",
                                ctx.arena.ident_text(*name)
                            ),
                            DiagnosticTarget::Node(stmt),
                        ));
                    }
                }
                _ => {}
            }
        }
    }
    findings
}
