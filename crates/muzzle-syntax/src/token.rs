use muzzle_core::types::Span;

/// Kinds of tokens produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    StringLiteral,
    DocComment,
    LineComment,
    Hash,
    LBrace,
    RBrace,
    LParen,
    RParen,
    Colon,
    Semicolon,
    Comma,
    Pipe,
    Question,
    Equals,
    Dot,
    Eof,
}

impl TokenKind {
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::StringLiteral => "string literal",
            TokenKind::DocComment => "doc comment",
            TokenKind::LineComment => "comment",
            TokenKind::Hash => "`#`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::Colon => "`:`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Comma => "`,`",
            TokenKind::Pipe => "`|`",
            TokenKind::Question => "`?`",
            TokenKind::Equals => "`=`",
            TokenKind::Dot => "`.`",
            TokenKind::Eof => "end of file",
        }
    }
}

/// A lexed token. `text` holds the cooked value: the identifier name, the
/// unescaped string contents, or the cleaned comment body.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub text: String,
}
