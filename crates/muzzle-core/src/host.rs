use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Errors raised by file host operations.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// File-system seam used by the compiler, suppressor, and formatter.
///
/// `Send + Sync` so the formatting phase can fan out across files.
pub trait FileHost: Send + Sync {
    fn read_file(&self, path: &Path) -> Result<String, HostError>;
    fn write_file(&self, path: &Path, text: &str) -> Result<(), HostError>;
    fn exists(&self, path: &Path) -> bool;
}

/// Host backed by the real file system.
#[derive(Debug, Default)]
pub struct OsHost;

impl FileHost for OsHost {
    fn read_file(&self, path: &Path) -> Result<String, HostError> {
        std::fs::read_to_string(path).map_err(|source| HostError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_file(&self, path: &Path, text: &str) -> Result<(), HostError> {
        std::fs::write(path, text).map_err(|source| HostError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// In-memory host for tests.
#[derive(Debug, Default)]
pub struct MemoryHost {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file into the host.
    pub fn seed(&self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.files.lock().unwrap().insert(path.into(), text.into());
    }

    /// Current content of a file, if present.
    pub fn snapshot(&self, path: &Path) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }
}

impl FileHost for MemoryHost {
    fn read_file(&self, path: &Path) -> Result<String, HostError> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| HostError::Read {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            })
    }

    fn write_file(&self, path: &Path, text: &str) -> Result<(), HostError> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), text.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}
