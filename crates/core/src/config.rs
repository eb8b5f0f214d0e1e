//! Traversal bounds
//!
//! Values come from defaults, an optional TOML file, and finally explicit
//! command-line overrides, in that order of precedence (lowest first).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Default number of expansion rounds
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Default fan-out per author (`0` keeps every coauthor)
pub const DEFAULT_MAX_BREADTH: usize = 0;

/// Depth and breadth limits for one traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TraversalConfig {
    /// Number of expansion rounds; `0` returns only the root
    pub max_depth: usize,
    /// Coauthors kept per expanded author; `0` means unlimited
    pub max_breadth: usize,
}

impl TraversalConfig {
    pub fn new(max_depth: usize, max_breadth: usize) -> Self {
        Self {
            max_depth,
            max_breadth,
        }
    }

    /// Fan-out limit, or `None` when unlimited
    pub fn breadth_limit(&self) -> Option<usize> {
        match self.max_breadth {
            0 => None,
            n => Some(n),
        }
    }

    /// Parse a config from TOML text
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a config from a TOML file
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH, DEFAULT_MAX_BREADTH)
    }
}
