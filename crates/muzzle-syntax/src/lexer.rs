use muzzle_core::types::{Diagnostic, DiagnosticTarget, FileId, Span};

use crate::token::{Token, TokenKind};

/// Tokenize a source file. Lexing never fails; malformed input becomes
/// error diagnostics and the lexer resynchronizes.
pub fn lex(text: &str, file: FileId) -> (Vec<Token>, Vec<Diagnostic>) {
    Lexer {
        text,
        file,
        pos: 0,
        tokens: Vec::new(),
        diagnostics: Vec::new(),
    }
    .run()
}

struct Lexer<'a> {
    text: &'a str,
    file: FileId,
    pos: usize,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Lexer<'a> {
    fn run(mut self) -> (Vec<Token>, Vec<Diagnostic>) {
        while self.pos < self.text.len() {
            let rest = &self.text[self.pos..];
            let ch = rest.chars().next().unwrap();

            if ch.is_whitespace() {
                self.pos += ch.len_utf8();
            } else if rest.starts_with("/**") {
                self.doc_comment();
            } else if rest.starts_with("/*") {
                self.block_comment();
            } else if rest.starts_with("//") {
                self.line_comment();
            } else if ch == '"' {
                self.string_literal();
            } else if ch.is_ascii_alphabetic() || ch == '_' {
                self.identifier();
            } else {
                self.punctuation(ch);
            }
        }
        let end = Span::new(self.file, self.text.len(), self.text.len());
        self.tokens.push(Token {
            kind: TokenKind::Eof,
            span: end,
            text: String::new(),
        });
        (self.tokens, self.diagnostics)
    }

    fn push(&mut self, kind: TokenKind, start: usize, text: String) {
        self.tokens.push(Token {
            kind,
            span: Span::new(self.file, start, self.pos),
            text,
        });
    }

    fn error(&mut self, code: &str, message: String, start: usize) {
        self.diagnostics.push(Diagnostic::error(
            code,
            message,
            DiagnosticTarget::Location(Span::new(self.file, start, self.pos)),
        ));
    }

    fn doc_comment(&mut self) {
        let start = self.pos;
        match self.text[self.pos + 3..].find("*/") {
            Some(rel) => {
                let inner = &self.text[self.pos + 3..self.pos + 3 + rel];
                self.pos += 3 + rel + 2;
                self.push(TokenKind::DocComment, start, cook_doc(inner));
            }
            None => {
                self.pos = self.text.len();
                self.error(
                    "unterminated-comment",
                    "doc comment is never closed".to_string(),
                    start,
                );
            }
        }
    }

    fn block_comment(&mut self) {
        let start = self.pos;
        match self.text[self.pos + 2..].find("*/") {
            Some(rel) => self.pos += 2 + rel + 2,
            None => {
                self.pos = self.text.len();
                self.error(
                    "unterminated-comment",
                    "block comment is never closed".to_string(),
                    start,
                );
            }
        }
    }

    fn line_comment(&mut self) {
        let start = self.pos;
        let rest = &self.text[self.pos + 2..];
        let len = rest.find('\n').unwrap_or(rest.len());
        let body = rest[..len].trim().to_string();
        self.pos += 2 + len;
        self.push(TokenKind::LineComment, start, body);
    }

    fn string_literal(&mut self) {
        let start = self.pos;
        self.pos += 1; // opening quote
        let mut value = String::new();
        loop {
            let Some(ch) = self.text[self.pos..].chars().next() else {
                self.error(
                    "unterminated-string",
                    "string literal is never closed".to_string(),
                    start,
                );
                return;
            };
            match ch {
                '"' => {
                    self.pos += 1;
                    self.push(TokenKind::StringLiteral, start, value);
                    return;
                }
                '\n' => {
                    self.error(
                        "unterminated-string",
                        "string literal is never closed".to_string(),
                        start,
                    );
                    self.push(TokenKind::StringLiteral, start, value);
                    return;
                }
                '\\' => {
                    self.pos += 1;
                    let esc = self.text[self.pos..].chars().next();
                    match esc {
                        Some('n') => value.push('\n'),
                        Some('t') => value.push('\t'),
                        Some(c) => value.push(c),
                        None => continue, // EOF, reported on next loop
                    }
                    self.pos += esc.map_or(0, char::len_utf8);
                }
                _ => {
                    value.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        }
    }

    fn identifier(&mut self) {
        let start = self.pos;
        let rest = &self.text[self.pos..];
        let len = rest
            .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
            .unwrap_or(rest.len());
        self.pos += len;
        self.push(TokenKind::Identifier, start, rest[..len].to_string());
    }

    fn punctuation(&mut self, ch: char) {
        let start = self.pos;
        let kind = match ch {
            '#' => Some(TokenKind::Hash),
            '{' => Some(TokenKind::LBrace),
            '}' => Some(TokenKind::RBrace),
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            ':' => Some(TokenKind::Colon),
            ';' => Some(TokenKind::Semicolon),
            ',' => Some(TokenKind::Comma),
            '|' => Some(TokenKind::Pipe),
            '?' => Some(TokenKind::Question),
            '=' => Some(TokenKind::Equals),
            '.' => Some(TokenKind::Dot),
            _ => None,
        };
        self.pos += ch.len_utf8();
        match kind {
            Some(kind) => self.push(kind, start, ch.to_string()),
            None => self.error(
                "invalid-character",
                format!("unexpected character `{ch}`"),
                start,
            ),
        }
    }
}

/// Normalize a doc comment body: strip the decorative `*` gutter and
/// surrounding blank lines.
fn cook_doc(inner: &str) -> String {
    let mut lines: Vec<&str> = inner
        .lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix('*').map_or(line, str::trim_start)
        })
        .collect();
    while lines.first().is_some_and(|l| l.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        let (tokens, diagnostics) = lex(text, FileId(0));
        assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_model_tokens() {
        assert_eq!(
            kinds("model Foo { message: string; }"),
            vec![
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::LBrace,
                TokenKind::Identifier,
                TokenKind::Colon,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_unescaping() {
        let (tokens, _) = lex(r#""say \"hi\"\n""#, FileId(0));
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].text, "say \"hi\"\n");
    }

    #[test]
    fn test_doc_comment_single_line() {
        let (tokens, _) = lex("/** The thing. */ model", FileId(0));
        assert_eq!(tokens[0].kind, TokenKind::DocComment);
        assert_eq!(tokens[0].text, "The thing.");
    }

    #[test]
    fn test_doc_comment_gutter_stripped() {
        let (tokens, _) = lex("/**\n * Line one.\n * Line two.\n */", FileId(0));
        assert_eq!(tokens[0].text, "Line one.\nLine two.");
    }

    #[test]
    fn test_block_comment_skipped() {
        assert_eq!(kinds("/* ignore */ ;"), vec![TokenKind::Semicolon, TokenKind::Eof]);
    }

    #[test]
    fn test_line_comment_token() {
        let (tokens, _) = lex("// keep me\n;", FileId(0));
        assert_eq!(tokens[0].kind, TokenKind::LineComment);
        assert_eq!(tokens[0].text, "keep me");
    }

    #[test]
    fn test_directive_tokens() {
        assert_eq!(
            kinds("#suppress \"missing-doc\" \"later\""),
            vec![
                TokenKind::Hash,
                TokenKind::Identifier,
                TokenKind::StringLiteral,
                TokenKind::StringLiteral,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_string_diagnostic() {
        let (_, diagnostics) = lex("\"oops\nmodel", FileId(0));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "unterminated-string");
    }

    #[test]
    fn test_invalid_character_diagnostic() {
        let (_, diagnostics) = lex("model @ Foo", FileId(0));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "invalid-character");
    }

    #[test]
    fn test_spans_cover_lexemes() {
        let (tokens, _) = lex("model Foo", FileId(0));
        assert_eq!((tokens[0].span.pos, tokens[0].span.end), (0, 5));
        assert_eq!((tokens[1].span.pos, tokens[1].span.end), (6, 9));
    }
}
