use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::host::{FileHost, HostError};

/// A single text insertion into a source file.
#[derive(Debug, Clone)]
pub struct TextEdit {
    pub path: PathBuf,
    pub pos: usize,
    pub text: String,
}

/// A named group of edits produced for one diagnostic.
#[derive(Debug, Clone)]
pub struct CodeFix {
    pub label: String,
    pub edits: Vec<TextEdit>,
}

/// Apply a batch of code fixes through the host.
///
/// Edits are grouped per file and applied back-to-front within each file so
/// earlier offsets stay valid; each touched file is written exactly once.
/// Returns the number of files written.
pub fn apply_code_fixes(host: &dyn FileHost, fixes: &[CodeFix]) -> Result<usize, HostError> {
    let mut by_file: BTreeMap<&PathBuf, Vec<&TextEdit>> = BTreeMap::new();
    for fix in fixes {
        for edit in &fix.edits {
            by_file.entry(&edit.path).or_default().push(edit);
        }
    }

    let written = by_file.len();
    for (path, mut edits) in by_file {
        let mut text = host.read_file(path)?;
        edits.sort_by(|a, b| b.pos.cmp(&a.pos));
        for edit in edits {
            let pos = edit.pos.min(text.len());
            text.insert_str(pos, &edit.text);
        }
        host.write_file(path, &text)?;
    }
    Ok(written)
}
