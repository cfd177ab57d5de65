//! Configuration file loading for muzzle.
//!
//! Reads an optional `muzzle.json` next to the entry file and provides typed
//! access to the settings. Falls back to defaults when the file is missing or
//! invalid; configuration is never a reason for a run to fail.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::host::FileHost;

/// Optional per-project configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MuzzleConfig {
    /// Rule sets enabled in addition to those passed on the command line.
    #[serde(default)]
    pub rule_sets: Vec<String>,
    /// Default suppression message; a `-m` flag overrides it.
    #[serde(default)]
    pub message: Option<String>,
}

impl MuzzleConfig {
    /// Load `muzzle.json` from the given directory through the host.
    /// Returns defaults if the file doesn't exist or can't be parsed.
    pub fn load(host: &dyn FileHost, dir: &Path) -> Self {
        let config_path = dir.join("muzzle.json");
        let content = match host.read_file(&config_path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!(
                    "muzzle: warning: failed to parse {}: {}, using defaults",
                    config_path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}
