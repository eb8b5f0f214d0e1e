//! Error types for directory lookups and configuration loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by a [`Directory`](crate::directory::Directory)
///
/// During root resolution every variant is fatal. While expanding coauthors a
/// failed call aborts the traversal as well; only a single unparsable coauthor
/// entry degrades to an unresolved identity instead of an error.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// No author matched the searched name.
    #[error("no author found for '{name}'")]
    NotFound { name: String },

    /// The directory response could not be interpreted.
    #[error("parse error: {0}")]
    Parse(String),

    /// The backing source could not be read.
    #[error("failed to read directory source {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while loading a [`TraversalConfig`](crate::config::TraversalConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(String),
}
