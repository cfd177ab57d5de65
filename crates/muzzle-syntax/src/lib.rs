//! Schema language front end for muzzle.
//!
//! - [`lexer`] / [`token`] — tokenization with doc-comment and directive support
//! - [`ast`] — flat node arena with parent back-links populated at parse time
//! - [`parser`] — recursive-descent parser with error recovery
//! - [`formatter`] — canonical pretty-printer (idempotent by construction)

pub mod ast;
pub mod formatter;
pub mod lexer;
pub mod parser;
pub mod token;
