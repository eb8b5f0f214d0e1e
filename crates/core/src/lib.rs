//! CiteGraph Core Library
//!
//! This library discovers a bounded coauthor network around a named author
//! and exports it as a graph for rendering. Directory access goes through the
//! [`directory::Directory`] trait, so the traversal runs unchanged against a
//! live service, a recorded snapshot, or a test double.

pub mod author;
pub mod config;
pub mod directory;
pub mod error;
pub mod graph;
pub mod traversal;

// Re-export commonly used types
pub use author::{Author, AuthorId, AuthorSet};
pub use config::TraversalConfig;
pub use directory::{Directory, ReplayDirectory};
pub use error::{ConfigError, DirectoryError};
pub use graph::{to_graph, Graph, GraphDescription, Node};
pub use traversal::{build_network, Network, TraversalState};
