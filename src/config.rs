//! Configuration file loading.

use crate::error::Result;
use crate::shell::ShellConfig;
use crate::store::StoreConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Combined configuration for the `txkv` binary.
///
/// Loaded from JSON; every field is optional and falls back to its default.
///
/// ```json
/// { "store": { "log_capacity": 64 }, "shell": { "prompt": "txkv> " } }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub shell: ShellConfig,
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
