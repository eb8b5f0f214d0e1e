//! Directory lookup interface
//!
//! The traversal engine never talks to a concrete author directory. It only
//! needs two operations, captured by the [`Directory`] trait:
//!
//! - [`Directory::resolve_identity`] turns a display name into one identity
//! - [`Directory::list_coauthors`] lists the coauthors of an identity
//!
//! Implementations decide how the data is obtained. [`ReplayDirectory`] serves
//! a recorded JSON snapshot and is what the CLI and the tests use.
//!
//! # Profile URLs
//!
//! Profile links carry the author's identity in their `user=` query
//! parameter, e.g. `/citations?user=iRMEfoAAAAAJ&hl=en`.
//! [`author_id_from_url`] extracts it.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::DirectoryError;

pub mod replay;

pub use replay::ReplayDirectory;

/// `user=<id>` query parameter of a profile URL
static USER_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]user=([^&#]+)").unwrap());

/// Outcome of resolving a display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityMatch {
    /// Identity of the chosen candidate (the first one found)
    pub id: String,
    /// Number of candidates the search produced
    pub candidates: usize,
}

impl IdentityMatch {
    /// Whether the search matched more than one author
    pub fn is_ambiguous(&self) -> bool {
        self.candidates > 1
    }
}

/// A coauthor as listed by the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoauthorEntry {
    pub name: String,
    /// `None` when the identity could not be parsed from the listing
    pub id: Option<String>,
    pub url: Option<String>,
}

/// Source of author identities and coauthor listings
pub trait Directory {
    /// Resolve a display name to a single identity
    ///
    /// When several authors match, the first is chosen and
    /// [`IdentityMatch::candidates`] reports how many there were.
    ///
    /// # Errors
    /// - [`DirectoryError::NotFound`] if nothing matches
    /// - [`DirectoryError::Parse`] if the response cannot be interpreted
    fn resolve_identity(&self, name: &str) -> Result<IdentityMatch, DirectoryError>;

    /// List the coauthors of `id` in the directory's native order
    ///
    /// Returns at most `limit` entries, or all of them when `limit` is `0`.
    /// Entries whose identity cannot be parsed come back with `id: None`.
    fn list_coauthors(&self, id: &str, limit: usize) -> Result<Vec<CoauthorEntry>, DirectoryError>;
}

/// Extract an author identity from a profile URL
///
/// Returns `None` if the URL has no non-empty `user=` parameter.
///
/// # Example
/// ```
/// use citegraph_core::directory::author_id_from_url;
///
/// assert_eq!(
///     author_id_from_url("/citations?user=iRMEfoAAAAAJ&hl=en").as_deref(),
///     Some("iRMEfoAAAAAJ")
/// );
/// assert_eq!(author_id_from_url("/citations?hl=en"), None);
/// ```
pub fn author_id_from_url(url: &str) -> Option<String> {
    USER_PARAM_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
