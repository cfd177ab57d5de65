use muzzle_core::types::{Diagnostic, DiagnosticTarget, FileId, NodeId, Span};

use crate::ast::{Directive, NodeArena, NodeData};
use crate::lexer;
use crate::token::{Token, TokenKind};

/// Outcome of parsing one file: the script root plus lex/parse diagnostics.
#[derive(Debug)]
pub struct ParseResult {
    pub root: NodeId,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse one source file into the shared arena.
///
/// Parsing never fails: malformed regions become error diagnostics and the
/// parser resynchronizes at the next statement or member boundary. Parent
/// links are populated here and never change afterwards.
pub fn parse_file(arena: &mut NodeArena, file: FileId, text: &str) -> ParseResult {
    let (tokens, diagnostics) = lexer::lex(text, file);
    let mut parser = Parser {
        arena,
        file,
        tokens,
        pos: 0,
        diagnostics,
        text_len: text.len(),
    };
    let root = parser.script();
    ParseResult {
        root,
        diagnostics: parser.diagnostics,
    }
}

/// Doc comment, directives, and line comments collected ahead of a
/// declaration, property, or enum member.
#[derive(Default)]
struct Decorations {
    comments: Vec<String>,
    docs: Option<String>,
    directives: Vec<Directive>,
}

/// How a property is terminated: `;` inside model bodies, `,`/`;` (optional)
/// inside inline model expressions and parameter lists.
#[derive(Clone, Copy, PartialEq)]
enum PropertyContext {
    Block,
    Inline,
}

struct Parser<'a> {
    arena: &'a mut NodeArena,
    file: FileId,
    tokens: Vec<Token>,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
    text_len: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn at_keyword(&self, kw: &str) -> bool {
        self.at(TokenKind::Identifier) && self.peek().text == kw
    }

    fn bump(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn prev_end(&self) -> usize {
        self.tokens[self.pos.saturating_sub(1)].span.end
    }

    fn error_here(&mut self, code: &str, message: String) {
        let span = self.peek().span;
        self.diagnostics
            .push(Diagnostic::error(code, message, DiagnosticTarget::Location(span)));
    }

    fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            self.error_here(
                "token-expected",
                format!(
                    "expected {}, found {}",
                    kind.describe(),
                    self.peek().kind.describe()
                ),
            );
            None
        }
    }

    // -- Statements --

    fn script(&mut self) -> NodeId {
        let mut statements = Vec::new();
        let mut trailing = Vec::new();
        while !self.at(TokenKind::Eof) {
            let deco = self.decorations();
            if self.at(TokenKind::Eof) {
                // no declaration follows; keep the comments on the root
                trailing = deco.comments;
                break;
            }
            if let Some(stmt) = self.statement() {
                self.attach(stmt, deco);
                statements.push(stmt);
            }
        }
        let root = self.arena.alloc(
            NodeData::Script {
                statements: statements.clone(),
            },
            Span::new(self.file, 0, self.text_len),
        );
        self.arena.adopt(root, &statements);
        self.arena.node_mut(root).trailing_comments = trailing;
        root
    }

    fn statement(&mut self) -> Option<NodeId> {
        if self.at_keyword("import") {
            self.import_statement()
        } else if self.at_keyword("model") {
            self.model_statement()
        } else if self.at_keyword("op") {
            self.operation_statement()
        } else if self.at_keyword("alias") {
            self.alias_statement()
        } else if self.at_keyword("enum") {
            self.enum_statement()
        } else if self.at_keyword("scalar") {
            self.scalar_statement()
        } else {
            self.error_here(
                "statement-expected",
                format!("expected a declaration, found {}", self.peek().kind.describe()),
            );
            self.recover_statement();
            None
        }
    }

    fn import_statement(&mut self) -> Option<NodeId> {
        let kw = self.bump();
        let path = self.expect(TokenKind::StringLiteral)?;
        self.expect(TokenKind::Semicolon);
        let span = Span::new(self.file, kw.span.pos, self.prev_end());
        Some(self.arena.alloc(NodeData::Import { path: path.text }, span))
    }

    fn model_statement(&mut self) -> Option<NodeId> {
        let kw = self.bump();
        let name = self.identifier()?;
        self.expect(TokenKind::LBrace)?;
        let (properties, trailing) = self.property_block();
        self.expect(TokenKind::RBrace);
        let span = Span::new(self.file, kw.span.pos, self.prev_end());
        let model = self.arena.alloc(
            NodeData::Model {
                name,
                properties: properties.clone(),
            },
            span,
        );
        self.arena.adopt(model, &[name]);
        self.arena.adopt(model, &properties);
        self.arena.node_mut(model).trailing_comments = trailing;
        Some(model)
    }

    /// Properties up to the closing brace, with decorations attached.
    /// Comments left over before the brace come back separately.
    fn property_block(&mut self) -> (Vec<NodeId>, Vec<String>) {
        let mut properties = Vec::new();
        loop {
            let deco = self.decorations();
            if self.at(TokenKind::RBrace) || self.at(TokenKind::Eof) {
                return (properties, deco.comments);
            }
            match self.property(PropertyContext::Block) {
                Some(prop) => {
                    self.attach(prop, deco);
                    properties.push(prop);
                }
                None => self.recover_member(),
            }
        }
    }

    fn property(&mut self, ctx: PropertyContext) -> Option<NodeId> {
        let name = self.identifier()?;
        let optional = self.eat(TokenKind::Question);
        self.expect(TokenKind::Colon)?;
        let ty = self.type_expression()?;
        match ctx {
            PropertyContext::Block => {
                self.expect(TokenKind::Semicolon);
            }
            PropertyContext::Inline => {
                let _ = self.eat(TokenKind::Comma) || self.eat(TokenKind::Semicolon);
            }
        }
        let span = Span::new(self.file, self.arena.span(name).pos, self.prev_end());
        let prop = self
            .arena
            .alloc(NodeData::ModelProperty { name, ty, optional }, span);
        self.arena.adopt(prop, &[name, ty]);
        Some(prop)
    }

    fn operation_statement(&mut self) -> Option<NodeId> {
        let kw = self.bump();
        let name = self.identifier()?;
        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        while !self.at(TokenKind::RParen) && !self.at(TokenKind::Eof) {
            match self.property(PropertyContext::Inline) {
                Some(param) => params.push(param),
                None => {
                    self.recover_member();
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen);
        self.expect(TokenKind::Colon)?;
        let return_type = self.type_expression()?;
        self.expect(TokenKind::Semicolon);
        let span = Span::new(self.file, kw.span.pos, self.prev_end());
        let op = self.arena.alloc(
            NodeData::Operation {
                name,
                params: params.clone(),
                return_type,
            },
            span,
        );
        self.arena.adopt(op, &[name, return_type]);
        self.arena.adopt(op, &params);
        Some(op)
    }

    fn alias_statement(&mut self) -> Option<NodeId> {
        let kw = self.bump();
        let name = self.identifier()?;
        self.expect(TokenKind::Equals)?;
        let value = self.type_expression()?;
        self.expect(TokenKind::Semicolon);
        let span = Span::new(self.file, kw.span.pos, self.prev_end());
        let alias = self.arena.alloc(NodeData::Alias { name, value }, span);
        self.arena.adopt(alias, &[name, value]);
        Some(alias)
    }

    fn enum_statement(&mut self) -> Option<NodeId> {
        let kw = self.bump();
        let name = self.identifier()?;
        self.expect(TokenKind::LBrace)?;
        let mut members = Vec::new();
        let mut trailing = Vec::new();
        loop {
            let deco = self.decorations();
            if self.at(TokenKind::RBrace) || self.at(TokenKind::Eof) {
                trailing = deco.comments;
                break;
            }
            let Some(member_name) = self.identifier() else {
                self.recover_member();
                continue;
            };
            self.eat(TokenKind::Comma);
            let span = self.arena.span(member_name);
            let member = self.arena.alloc(NodeData::EnumMember { name: member_name }, span);
            self.arena.adopt(member, &[member_name]);
            self.attach(member, deco);
            members.push(member);
        }
        self.expect(TokenKind::RBrace);
        let span = Span::new(self.file, kw.span.pos, self.prev_end());
        let enum_node = self.arena.alloc(
            NodeData::Enum {
                name,
                members: members.clone(),
            },
            span,
        );
        self.arena.adopt(enum_node, &[name]);
        self.arena.adopt(enum_node, &members);
        self.arena.node_mut(enum_node).trailing_comments = trailing;
        Some(enum_node)
    }

    fn scalar_statement(&mut self) -> Option<NodeId> {
        let kw = self.bump();
        let name = self.identifier()?;
        self.expect(TokenKind::Semicolon);
        let span = Span::new(self.file, kw.span.pos, self.prev_end());
        let scalar = self.arena.alloc(NodeData::Scalar { name }, span);
        self.arena.adopt(scalar, &[name]);
        Some(scalar)
    }

    // -- Type expressions --

    fn type_expression(&mut self) -> Option<NodeId> {
        let first = self.primary_type()?;
        if !self.at(TokenKind::Pipe) {
            return Some(first);
        }
        let mut variants = vec![first];
        while self.eat(TokenKind::Pipe) {
            variants.push(self.primary_type()?);
        }
        let span = Span::new(
            self.file,
            self.arena.span(first).pos,
            self.arena.span(*variants.last().unwrap()).end,
        );
        let union = self.arena.alloc(
            NodeData::UnionExpression {
                variants: variants.clone(),
            },
            span,
        );
        self.arena.adopt(union, &variants);
        Some(union)
    }

    fn primary_type(&mut self) -> Option<NodeId> {
        if self.at(TokenKind::LBrace) {
            let lbrace = self.bump();
            let mut properties = Vec::new();
            loop {
                let deco = self.decorations();
                if self.at(TokenKind::RBrace) || self.at(TokenKind::Eof) {
                    break;
                }
                match self.property(PropertyContext::Inline) {
                    Some(prop) => {
                        self.attach(prop, deco);
                        properties.push(prop);
                    }
                    None => {
                        self.recover_member();
                        break;
                    }
                }
            }
            self.expect(TokenKind::RBrace);
            let span = Span::new(self.file, lbrace.span.pos, self.prev_end());
            let expr = self.arena.alloc(
                NodeData::ModelExpression {
                    properties: properties.clone(),
                },
                span,
            );
            self.arena.adopt(expr, &properties);
            return Some(expr);
        }

        if self.at(TokenKind::Identifier) {
            let first = self.identifier()?;
            let mut path = vec![first];
            while self.eat(TokenKind::Dot) {
                path.push(self.identifier()?);
            }
            let span = Span::new(
                self.file,
                self.arena.span(first).pos,
                self.arena.span(*path.last().unwrap()).end,
            );
            let reference = self
                .arena
                .alloc(NodeData::TypeReference { path: path.clone() }, span);
            self.arena.adopt(reference, &path);
            return Some(reference);
        }

        self.error_here(
            "token-expected",
            format!(
                "expected a type expression, found {}",
                self.peek().kind.describe()
            ),
        );
        None
    }

    fn identifier(&mut self) -> Option<NodeId> {
        let token = self.expect(TokenKind::Identifier)?;
        Some(
            self.arena
                .alloc(NodeData::Identifier { name: token.text }, token.span),
        )
    }

    // -- Decorations --

    fn decorations(&mut self) -> Decorations {
        let mut deco = Decorations::default();
        loop {
            match self.peek().kind {
                TokenKind::LineComment => deco.comments.push(self.bump().text),
                TokenKind::DocComment => deco.docs = Some(self.bump().text),
                TokenKind::Hash => {
                    if let Some(directive) = self.directive() {
                        deco.directives.push(directive);
                    }
                }
                _ => return deco,
            }
        }
    }

    fn directive(&mut self) -> Option<Directive> {
        let hash = self.bump();
        let name = self.expect(TokenKind::Identifier)?;
        let mut args = Vec::new();
        while self.at(TokenKind::StringLiteral) {
            args.push(self.bump().text);
        }
        let span = Span::new(self.file, hash.span.pos, self.prev_end());
        if name.text != "suppress" {
            self.diagnostics.push(Diagnostic::error(
                "unknown-directive",
                format!("unknown directive `#{}`", name.text),
                DiagnosticTarget::Location(span),
            ));
            return None;
        }
        if args.is_empty() {
            self.diagnostics.push(Diagnostic::error(
                "invalid-directive",
                "#suppress requires a diagnostic code".to_string(),
                DiagnosticTarget::Location(span),
            ));
            return None;
        }
        Some(Directive {
            name: name.text,
            args,
            span,
        })
    }

    fn attach(&mut self, id: NodeId, deco: Decorations) {
        let node = self.arena.node_mut(id);
        node.leading_comments = deco.comments;
        node.docs = deco.docs;
        node.directives = deco.directives;
    }

    // -- Recovery --

    /// Skip to just past the next `;` or `}` at the top level.
    fn recover_statement(&mut self) {
        loop {
            let token = self.bump();
            if matches!(
                token.kind,
                TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
            ) {
                break;
            }
        }
    }

    /// Skip to the next member boundary without consuming the closing brace.
    fn recover_member(&mut self) {
        loop {
            if self.at(TokenKind::RBrace) || self.at(TokenKind::Eof) {
                break;
            }
            let token = self.bump();
            if matches!(token.kind, TokenKind::Semicolon | TokenKind::Comma) {
                break;
            }
        }
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
