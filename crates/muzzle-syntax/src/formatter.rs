use muzzle_core::types::{FileId, NodeId, Severity};

use crate::ast::{Directive, NodeArena, NodeData};
use crate::parser;

/// Errors raised when a file cannot be formatted.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("source has syntax errors: {0}")]
    Syntax(String),
}

const INDENT: &str = "  ";

/// Reprint a source file in canonical layout.
///
/// The output re-parses to the same tree, so formatting already-formatted
/// text is a no-op.
pub fn format_source(text: &str) -> Result<String, FormatError> {
    let mut arena = NodeArena::new();
    let result = parser::parse_file(&mut arena, FileId(0), text);
    if let Some(error) = result
        .diagnostics
        .iter()
        .find(|d| d.severity == Severity::Error)
    {
        return Err(FormatError::Syntax(error.message.clone()));
    }
    let mut printer = Printer {
        arena: &arena,
        out: String::new(),
    };
    printer.script(result.root);
    Ok(printer.out)
}

struct Printer<'a> {
    arena: &'a NodeArena,
    out: String,
}

impl<'a> Printer<'a> {
    fn script(&mut self, root: NodeId) {
        let NodeData::Script { statements } = &self.arena.node(root).data else {
            return;
        };
        for (i, &stmt) in statements.iter().enumerate() {
            if i > 0 {
                self.out.push('\n');
            }
            self.statement(stmt, 0);
        }
        let trailing = self.arena.node(root).trailing_comments.clone();
        if !trailing.is_empty() {
            if !statements.is_empty() {
                self.out.push('\n');
            }
            self.trailing_comments(&trailing, 0);
        }
    }

    fn statement(&mut self, id: NodeId, depth: usize) {
        self.decorations(id, depth);
        let indent = INDENT.repeat(depth);
        match &self.arena.node(id).data {
            NodeData::Import { path } => {
                self.out
                    .push_str(&format!("{indent}import \"{}\";\n", escape(path)));
            }
            NodeData::Model { name, properties } => {
                let name = self.arena.ident_text(*name);
                let trailing = self.arena.node(id).trailing_comments.clone();
                if properties.is_empty() && trailing.is_empty() {
                    self.out.push_str(&format!("{indent}model {name} {{}}\n"));
                } else {
                    self.out.push_str(&format!("{indent}model {name} {{\n"));
                    for &prop in properties {
                        self.property_line(prop, depth + 1);
                    }
                    self.trailing_comments(&trailing, depth + 1);
                    self.out.push_str(&format!("{indent}}}\n"));
                }
            }
            NodeData::Operation {
                name,
                params,
                return_type,
            } => {
                let name = self.arena.ident_text(*name);
                let params = params
                    .iter()
                    .map(|&p| self.property_inline(p))
                    .collect::<Vec<_>>()
                    .join(", ");
                let ret = self.type_expression(*return_type);
                self.out
                    .push_str(&format!("{indent}op {name}({params}): {ret};\n"));
            }
            NodeData::Alias { name, value } => {
                let name = self.arena.ident_text(*name);
                let value = self.type_expression(*value);
                self.out
                    .push_str(&format!("{indent}alias {name} = {value};\n"));
            }
            NodeData::Enum { name, members } => {
                let name = self.arena.ident_text(*name);
                let trailing = self.arena.node(id).trailing_comments.clone();
                if members.is_empty() && trailing.is_empty() {
                    self.out.push_str(&format!("{indent}enum {name} {{}}\n"));
                } else {
                    self.out.push_str(&format!("{indent}enum {name} {{\n"));
                    for &member in members {
                        self.decorations(member, depth + 1);
                        let NodeData::EnumMember { name } = &self.arena.node(member).data else {
                            continue;
                        };
                        let member_indent = INDENT.repeat(depth + 1);
                        self.out.push_str(&format!(
                            "{member_indent}{},\n",
                            self.arena.ident_text(*name)
                        ));
                    }
                    self.trailing_comments(&trailing, depth + 1);
                    self.out.push_str(&format!("{indent}}}\n"));
                }
            }
            NodeData::Scalar { name } => {
                let name = self.arena.ident_text(*name);
                self.out.push_str(&format!("{indent}scalar {name};\n"));
            }
            _ => {}
        }
    }

    /// A model-body property on its own line, with decorations.
    fn property_line(&mut self, id: NodeId, depth: usize) {
        self.decorations(id, depth);
        let indent = INDENT.repeat(depth);
        let rendered = self.property_inline(id);
        self.out.push_str(&format!("{indent}{rendered};\n"));
    }

    /// A property without terminator, for inline contexts.
    fn property_inline(&self, id: NodeId) -> String {
        let NodeData::ModelProperty { name, ty, optional } = &self.arena.node(id).data else {
            return String::new();
        };
        let marker = if *optional { "?" } else { "" };
        format!(
            "{}{marker}: {}",
            self.arena.ident_text(*name),
            self.type_expression(*ty)
        )
    }

    fn type_expression(&self, id: NodeId) -> String {
        match &self.arena.node(id).data {
            NodeData::TypeReference { path } => path
                .iter()
                .map(|&seg| self.arena.ident_text(seg).to_string())
                .collect::<Vec<_>>()
                .join("."),
            NodeData::UnionExpression { variants } => variants
                .iter()
                .map(|&v| self.type_expression(v))
                .collect::<Vec<_>>()
                .join(" | "),
            NodeData::ModelExpression { properties } => {
                if properties.is_empty() {
                    "{}".to_string()
                } else {
                    let inner = properties
                        .iter()
                        .map(|&p| self.property_inline(p))
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("{{ {inner} }}")
                }
            }
            NodeData::Identifier { name } => name.clone(),
            _ => String::new(),
        }
    }

    fn trailing_comments(&mut self, comments: &[String], depth: usize) {
        let indent = INDENT.repeat(depth);
        for comment in comments {
            self.out.push_str(&format!("{indent}// {comment}\n"));
        }
    }

    fn decorations(&mut self, id: NodeId, depth: usize) {
        let indent = INDENT.repeat(depth);
        let node = self.arena.node(id);
        for comment in node.leading_comments.clone() {
            self.out.push_str(&format!("{indent}// {comment}\n"));
        }
        if let Some(docs) = node.docs.clone() {
            self.doc_comment(&docs, depth);
        }
        for directive in node.directives.clone() {
            self.directive(&directive, depth);
        }
    }

    fn doc_comment(&mut self, docs: &str, depth: usize) {
        let indent = INDENT.repeat(depth);
        if docs.contains('\n') {
            self.out.push_str(&format!("{indent}/**\n"));
            for line in docs.lines() {
                if line.is_empty() {
                    self.out.push_str(&format!("{indent} *\n"));
                } else {
                    self.out.push_str(&format!("{indent} * {line}\n"));
                }
            }
            self.out.push_str(&format!("{indent} */\n"));
        } else {
            self.out.push_str(&format!("{indent}/** {docs} */\n"));
        }
    }

    fn directive(&mut self, directive: &Directive, depth: usize) {
        let indent = INDENT.repeat(depth);
        let args = directive
            .args
            .iter()
            .map(|a| format!(" \"{}\"", escape(a)))
            .collect::<String>();
        self.out
            .push_str(&format!("{indent}#{}{args}\n", directive.name));
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
#[path = "formatter_tests.rs"]
mod tests;
