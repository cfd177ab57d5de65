use serde::{Deserialize, Serialize};

/// Identifies a source file loaded into a compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileId(pub u32);

/// Index of a syntax node within the compilation's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Half-open byte range `[pos, end)` within a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub file: FileId,
    pub pos: usize,
    pub end: usize,
}

impl Span {
    pub fn new(file: FileId, pos: usize, end: usize) -> Self {
        Self { file, pos, end }
    }
}

/// A concrete position a suppression annotation can be derived from.
pub type SourceLocation = Span;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Hint,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Hint => "hint",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a diagnostic points.
///
/// Modeled as an explicit tagged union rather than optional fields: a target
/// is either already a concrete location, a syntax-tree node to be resolved
/// against the arena, or the whole-program sentinel with no attachable
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticTarget {
    /// Already a concrete file + byte range.
    Location(Span),
    /// A syntax-tree node; resolved through parent links as needed.
    Node(NodeId),
    /// No attachable position (program-scope diagnostics).
    None,
}

impl DiagnosticTarget {
    pub fn is_none(&self) -> bool {
        matches!(self, DiagnosticTarget::None)
    }
}

/// A compiler- or linter-emitted finding.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub code: String,
    pub severity: Severity,
    pub message: String,
    pub target: DiagnosticTarget,
}

impl Diagnostic {
    pub fn new(
        code: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        target: DiagnosticTarget,
    ) -> Self {
        Self {
            code: code.into(),
            severity,
            message: message.into(),
            target,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>, target: DiagnosticTarget) -> Self {
        Self::new(code, Severity::Error, message, target)
    }

    pub fn warning(code: impl Into<String>, message: impl Into<String>, target: DiagnosticTarget) -> Self {
        Self::new(code, Severity::Warning, message, target)
    }
}
