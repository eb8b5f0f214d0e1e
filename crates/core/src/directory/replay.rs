//! Directory backed by a recorded JSON snapshot
//!
//! A snapshot lists author profiles together with the coauthor links each
//! profile page showed when it was recorded:
//!
//! ```json
//! {
//!   "profiles": [
//!     {
//!       "name": "Tim Niemueller",
//!       "url": "/citations?user=iRMEfoAAAAAJ&hl=en",
//!       "coauthors": [
//!         { "name": "Gerhard Lakemeyer", "url": "/citations?user=Q8eI0LAAAAAJ&hl=en" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Identities come from an explicit `id` field when present and are otherwise
//! parsed from `url`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::{author_id_from_url, CoauthorEntry, Directory, IdentityMatch};
use crate::error::DirectoryError;

/// A recorded snapshot of the directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

/// One author profile page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Coauthor links in the order the page listed them
    #[serde(default)]
    pub coauthors: Vec<ProfileLink>,
}

/// A coauthor link on a profile page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileLink {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Profile {
    /// Profile with an explicit identity and no coauthors
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: Some(id.into()),
            url: None,
            coauthors: Vec::new(),
        }
    }

    /// Append a coauthor link with an explicit identity
    pub fn with_coauthor(mut self, name: impl Into<String>, id: impl Into<String>) -> Self {
        self.coauthors.push(ProfileLink {
            name: name.into(),
            id: Some(id.into()),
            url: None,
        });
        self
    }

    /// Append a coauthor link known only by its URL
    pub fn with_coauthor_url(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.coauthors.push(ProfileLink {
            name: name.into(),
            id: None,
            url: Some(url.into()),
        });
        self
    }

    fn identity(&self) -> Option<String> {
        resolve_link_id(self.id.as_deref(), self.url.as_deref())
    }
}

impl ProfileLink {
    fn to_entry(&self) -> CoauthorEntry {
        CoauthorEntry {
            name: self.name.clone(),
            id: resolve_link_id(self.id.as_deref(), self.url.as_deref()),
            url: self.url.clone(),
        }
    }
}

/// Explicit id first, then the `user=` parameter of the URL
fn resolve_link_id(id: Option<&str>, url: Option<&str>) -> Option<String> {
    match id {
        Some(id) if !id.is_empty() => Some(id.to_string()),
        _ => url.and_then(author_id_from_url),
    }
}

/// [`Directory`] serving a [`Snapshot`]
///
/// Name search is a case-insensitive substring match over profile names in
/// snapshot order. Listing an identity with no recorded profile yields no
/// coauthors.
#[derive(Debug, Clone, Default)]
pub struct ReplayDirectory {
    profiles: Vec<Profile>,
    /// Maps identities to positions in `profiles`
    by_id: HashMap<String, usize>,
}

impl ReplayDirectory {
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self::from_profiles(snapshot.profiles)
    }

    /// Build a directory from profiles; the first profile with a given id wins
    pub fn from_profiles(profiles: Vec<Profile>) -> Self {
        let mut by_id = HashMap::new();
        for (i, profile) in profiles.iter().enumerate() {
            match profile.identity() {
                Some(id) => {
                    if by_id.contains_key(&id) {
                        tracing::debug!(%id, name = %profile.name, "duplicate profile ignored");
                    } else {
                        by_id.insert(id, i);
                    }
                }
                None => {
                    tracing::debug!(name = %profile.name, "profile without identity");
                }
            }
        }
        Self { profiles, by_id }
    }

    /// Parse a snapshot from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, DirectoryError> {
        let snapshot: Snapshot =
            serde_json::from_str(json).map_err(|e| DirectoryError::Parse(e.to_string()))?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Load a snapshot from a JSON file
    pub fn from_path(path: &Path) -> Result<Self, DirectoryError> {
        let content = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Number of recorded profiles
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Directory for ReplayDirectory {
    fn resolve_identity(&self, name: &str) -> Result<IdentityMatch, DirectoryError> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return Err(DirectoryError::NotFound {
                name: name.to_string(),
            });
        }

        let mut matches = self
            .profiles
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle));

        let first = matches.next().ok_or_else(|| DirectoryError::NotFound {
            name: name.to_string(),
        })?;
        let candidates = 1 + matches.count();

        let id = first.identity().ok_or_else(|| {
            DirectoryError::Parse(format!(
                "could not get author id for '{}' from url {:?}",
                first.name, first.url
            ))
        })?;

        Ok(IdentityMatch { id, candidates })
    }

    fn list_coauthors(&self, id: &str, limit: usize) -> Result<Vec<CoauthorEntry>, DirectoryError> {
        let Some(&index) = self.by_id.get(id) else {
            tracing::debug!(%id, "no recorded profile");
            return Ok(Vec::new());
        };

        let links = self.profiles[index].coauthors.iter();
        let entries: Vec<CoauthorEntry> = match limit {
            0 => links.map(ProfileLink::to_entry).collect(),
            n => links.take(n).map(ProfileLink::to_entry).collect(),
        };
        Ok(entries)
    }
}
