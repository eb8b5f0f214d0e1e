//! Author entities and their identity contract
//!
//! An [`Author`] is identified solely by its [`AuthorId`]. Display names are
//! not unique and take no part in equality or hashing, so two profiles with the
//! same name but different ids stay distinct, and the same id reached under
//! two spellings collapses into one node.
//!
//! Authors are stored in an [`AuthorSet`], an insertion-ordered arena indexed
//! by id. Coauthor links are kept as ids and resolved through the arena, which
//! lets several parents point at the same node without cloning it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;

/// Stable identity of an author as reported by the directory
///
/// A coauthor whose identity could not be parsed is `Unresolved`. Each
/// unresolved author gets its own ordinal so unrelated lookup failures never
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AuthorId {
    /// Identifier handed out by the directory
    Resolved(String),
    /// Placeholder for an identity that could not be parsed
    Unresolved(u32),
}

impl AuthorId {
    /// Directory identifier, if this author was resolved
    pub fn as_resolved(&self) -> Option<&str> {
        match self {
            AuthorId::Resolved(id) => Some(id),
            AuthorId::Unresolved(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, AuthorId::Resolved(_))
    }
}

impl From<&str> for AuthorId {
    fn from(id: &str) -> Self {
        AuthorId::Resolved(id.to_string())
    }
}

impl From<String> for AuthorId {
    fn from(id: String) -> Self {
        AuthorId::Resolved(id)
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthorId::Resolved(id) => f.write_str(id),
            AuthorId::Unresolved(n) => write!(f, "unresolved#{}", n),
        }
    }
}

/// One individual in the collaboration network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    /// Display name (not unique)
    pub name: String,
    /// Identity used for equality and hashing
    pub id: AuthorId,
    /// Profile URL, when the directory reported one
    pub url: Option<String>,
    /// Direct collaborators discovered for this author
    coauthors: BTreeSet<AuthorId>,
}

impl Author {
    /// Create an author with no coauthors
    pub fn new(name: impl Into<String>, id: impl Into<AuthorId>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            url: None,
            coauthors: BTreeSet::new(),
        }
    }

    /// Attach a profile URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Record `other` as a coauthor of this author
    ///
    /// Idempotent: adding the same identity again has no effect. Returns
    /// `true` if the link was new.
    pub fn add_coauthor(&mut self, other: &Author) -> bool {
        self.coauthors.insert(other.id.clone())
    }

    /// Identities of this author's direct coauthors
    pub fn coauthors(&self) -> impl Iterator<Item = &AuthorId> {
        self.coauthors.iter()
    }

    pub fn coauthor_count(&self) -> usize {
        self.coauthors.len()
    }

    pub fn has_coauthor(&self, id: &AuthorId) -> bool {
        self.coauthors.contains(id)
    }
}

impl PartialEq for Author {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Author {}

impl Hash for Author {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Identity-deduplicated collection of authors in discovery order
#[derive(Debug, Clone, Default)]
pub struct AuthorSet {
    authors: Vec<Author>,
    /// Maps ids to positions in `authors` for O(1) lookups
    index: HashMap<AuthorId, usize>,
}

impl AuthorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an author unless its identity is already present
    ///
    /// The first occurrence wins; a later author with the same id is dropped
    /// and `false` is returned.
    pub fn insert(&mut self, author: Author) -> bool {
        if self.index.contains_key(&author.id) {
            return false;
        }
        self.index.insert(author.id.clone(), self.authors.len());
        self.authors.push(author);
        true
    }

    pub fn contains(&self, id: &AuthorId) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &AuthorId) -> Option<&Author> {
        self.index.get(id).map(|&i| &self.authors[i])
    }

    pub fn get_mut(&mut self, id: &AuthorId) -> Option<&mut Author> {
        match self.index.get(id) {
            Some(&i) => self.authors.get_mut(i),
            None => None,
        }
    }

    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }

    /// Iterate authors in discovery order
    pub fn iter(&self) -> impl Iterator<Item = &Author> {
        self.authors.iter()
    }

    /// Iterate identities in discovery order
    pub fn ids(&self) -> impl Iterator<Item = &AuthorId> {
        self.authors.iter().map(|a| &a.id)
    }
}

impl Index<&AuthorId> for AuthorSet {
    type Output = Author;

    /// Panics if `id` is not in the set
    fn index(&self, id: &AuthorId) -> &Author {
        &self.authors[self.index[id]]
    }
}

impl<'a> IntoIterator for &'a AuthorSet {
    type Item = &'a Author;
    type IntoIter = std::slice::Iter<'a, Author>;

    fn into_iter(self) -> Self::IntoIter {
        self.authors.iter()
    }
}
