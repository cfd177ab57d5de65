//! Warning suppression for compiled schema programs.
//!
//! [`pipeline::run`] is the whole tool in one call: compile the entry file
//! with the configured lint rule sets, insert a `#suppress` annotation for
//! every remaining warning, then reformat the touched files.

pub mod pipeline;
pub mod resolver;
pub mod suppressor;
