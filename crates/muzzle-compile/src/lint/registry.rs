use muzzle_core::types::{Diagnostic, DiagnosticTarget};

use super::{docs, naming, Rule};

/// Error code emitted when a configured rule set does not exist.
pub const UNKNOWN_RULE_SET: &str = "unknown-rule-set";

fn rule_set(name: &str) -> Option<Vec<Rule>> {
    match name {
        "core/docs" => Some(docs::rules()),
        "core/naming" => Some(naming::rules()),
        "core/recommended" => {
            let mut rules = docs::rules();
            rules.extend(naming::rules());
            Some(rules)
        }
        _ => None,
    }
}

/// Resolve rule-set names to rules, deduplicated by rule name.
/// Unknown names become [`UNKNOWN_RULE_SET`] error diagnostics.
pub fn resolve_rule_sets(names: &[String]) -> (Vec<Rule>, Vec<Diagnostic>) {
    let mut rules: Vec<Rule> = Vec::new();
    let mut diagnostics = Vec::new();
    for name in names {
        match rule_set(name) {
            Some(set) => {
                for rule in set {
                    if !rules.iter().any(|r| r.name == rule.name) {
                        rules.push(rule);
                    }
                }
            }
            None => diagnostics.push(Diagnostic::error(
                UNKNOWN_RULE_SET,
                format!("unknown rule set `{name}`"),
                DiagnosticTarget::None,
            )),
        }
    }
    (rules, diagnostics)
}
