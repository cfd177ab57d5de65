//! Compiler driver for muzzle schemas.
//!
//! [`program::compile`] loads the embedded prelude, the entry file, and its
//! relative imports into one [`program::Program`], then runs the checker and
//! the configured lint rule sets. [`codefix::create_suppress_fix`] builds the
//! edit that inserts a `#suppress` annotation for a diagnostic.

pub mod checker;
pub mod codefix;
pub mod lint;
pub mod options;
pub mod program;
