use muzzle_core::types::{NodeId, Span};

/// Syntactic categories of arena nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Script,
    ImportStatement,
    ModelStatement,
    ModelProperty,
    OperationStatement,
    AliasStatement,
    EnumStatement,
    EnumMember,
    ScalarStatement,
    Identifier,
    TypeReference,
    UnionExpression,
    ModelExpression,
}

impl SyntaxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyntaxKind::Script => "script",
            SyntaxKind::ImportStatement => "import",
            SyntaxKind::ModelStatement => "model",
            SyntaxKind::ModelProperty => "model property",
            SyntaxKind::OperationStatement => "operation",
            SyntaxKind::AliasStatement => "alias",
            SyntaxKind::EnumStatement => "enum",
            SyntaxKind::EnumMember => "enum member",
            SyntaxKind::ScalarStatement => "scalar",
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::TypeReference => "type reference",
            SyntaxKind::UnionExpression => "union expression",
            SyntaxKind::ModelExpression => "model expression",
        }
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `#name "arg" ...` directive attached to a declaration.
#[derive(Debug, Clone)]
pub struct Directive {
    pub name: String,
    pub args: Vec<String>,
    pub span: Span,
}

impl Directive {
    /// Whether this directive suppresses diagnostics with the given code.
    pub fn suppresses(&self, code: &str) -> bool {
        self.name == "suppress" && self.args.first().is_some_and(|c| c == code)
    }
}

/// Payload of a syntax node. Child references are arena indices.
#[derive(Debug, Clone)]
pub enum NodeData {
    Script { statements: Vec<NodeId> },
    Import { path: String },
    Model { name: NodeId, properties: Vec<NodeId> },
    ModelProperty { name: NodeId, ty: NodeId, optional: bool },
    Operation { name: NodeId, params: Vec<NodeId>, return_type: NodeId },
    Alias { name: NodeId, value: NodeId },
    Enum { name: NodeId, members: Vec<NodeId> },
    EnumMember { name: NodeId },
    Scalar { name: NodeId },
    Identifier { name: String },
    TypeReference { path: Vec<NodeId> },
    UnionExpression { variants: Vec<NodeId> },
    ModelExpression { properties: Vec<NodeId> },
}

impl NodeData {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeData::Script { .. } => SyntaxKind::Script,
            NodeData::Import { .. } => SyntaxKind::ImportStatement,
            NodeData::Model { .. } => SyntaxKind::ModelStatement,
            NodeData::ModelProperty { .. } => SyntaxKind::ModelProperty,
            NodeData::Operation { .. } => SyntaxKind::OperationStatement,
            NodeData::Alias { .. } => SyntaxKind::AliasStatement,
            NodeData::Enum { .. } => SyntaxKind::EnumStatement,
            NodeData::EnumMember { .. } => SyntaxKind::EnumMember,
            NodeData::Scalar { .. } => SyntaxKind::ScalarStatement,
            NodeData::Identifier { .. } => SyntaxKind::Identifier,
            NodeData::TypeReference { .. } => SyntaxKind::TypeReference,
            NodeData::UnionExpression { .. } => SyntaxKind::UnionExpression,
            NodeData::ModelExpression { .. } => SyntaxKind::ModelExpression,
        }
    }
}

/// A node in the flat syntax arena.
///
/// `parent` is an ownership-free back-reference populated once at parse time;
/// roots carry `None`, which guarantees upward walks terminate.
#[derive(Debug, Clone)]
pub struct Node {
    pub data: NodeData,
    pub span: Span,
    pub parent: Option<NodeId>,
    pub docs: Option<String>,
    pub directives: Vec<Directive>,
    pub leading_comments: Vec<String>,
    /// Comments after the last member (or statement, on the script root),
    /// kept so the formatter can reprint them.
    pub trailing_comments: Vec<String>,
}

/// Flat storage for all syntax nodes of a compilation.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, data: NodeData, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            data,
            span,
            parent: None,
            docs: None,
            directives: Vec::new(),
            leading_comments: Vec::new(),
            trailing_comments: Vec::new(),
        });
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    pub fn kind(&self, id: NodeId) -> SyntaxKind {
        self.node(id).data.kind()
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.node(id).span
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    /// Record `parent` as the parent of each child.
    pub fn adopt(&mut self, parent: NodeId, children: &[NodeId]) {
        for &child in children {
            self.node_mut(child).parent = Some(parent);
        }
    }

    /// Name of an identifier node; empty for any other kind.
    pub fn ident_text(&self, id: NodeId) -> &str {
        match &self.node(id).data {
            NodeData::Identifier { name } => name,
            _ => "",
        }
    }

    /// Whether `id` or any of its ancestors carries a `#suppress` directive
    /// for the given code.
    pub fn has_suppress_directive(&self, id: NodeId, code: &str) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if self.node(node).directives.iter().any(|d| d.suppresses(code)) {
                return true;
            }
            current = self.parent(node);
        }
        false
    }
}
