//! Core types shared across all muzzle crates:
//! - [`types`] — file/node identifiers, spans, diagnostics, and the
//!   three-variant [`DiagnosticTarget`](types::DiagnosticTarget) union
//! - [`source`] — loaded source files and offset-to-line mapping
//! - [`host`] — the [`FileHost`](host::FileHost) trait with OS-backed and
//!   in-memory implementations
//! - [`edit`] — text edits and batched code-fix application
//! - [`config`] — optional `muzzle.json` project configuration

pub mod config;
pub mod edit;
pub mod host;
pub mod source;
pub mod types;
