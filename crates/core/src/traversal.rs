//! Bounded breadth-first expansion of the coauthor relation
//!
//! Starting from a root author, each round asks the [`Directory`] for the
//! coauthors of every author on the frontier, links them to their parent and
//! queues the ones not seen before for the next round.
//!
//! # Bounds
//!
//! - At most `max_depth` rounds run; the traversal also stops as soon as a
//!   round discovers nothing new, so cyclic relations terminate.
//! - At most `max_breadth` coauthors are kept per expanded author, in the
//!   directory's order (`0` keeps all of them).
//!
//! # Identity
//!
//! Authors are deduplicated by [`AuthorId`]. An author reached again through a
//! different parent is linked to that parent but never expanded twice.
//! Coauthors whose identity could not be parsed get a fresh
//! [`AuthorId::Unresolved`] placeholder: they appear as leaves and are never
//! looked up.

use crate::author::{Author, AuthorId, AuthorSet};
use crate::config::TraversalConfig;
use crate::directory::{CoauthorEntry, Directory};
use crate::error::DirectoryError;

/// Result of a traversal
#[derive(Debug, Clone)]
pub struct Network {
    root: AuthorId,
    authors: AuthorSet,
    /// Number of expansion rounds that actually ran
    pub rounds: usize,
    /// Whether the root name matched more than one author
    pub ambiguous_root: bool,
}

impl Network {
    /// The root author; its coauthors are the direct collaborators
    pub fn root(&self) -> &Author {
        &self.authors[&self.root]
    }

    pub fn root_id(&self) -> &AuthorId {
        &self.root
    }

    /// Every author visited, in discovery order (root first)
    pub fn authors(&self) -> &AuthorSet {
        &self.authors
    }

    pub fn is_root(&self, author: &Author) -> bool {
        author.id == self.root
    }

    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }
}

/// Traversal progress between rounds
///
/// Each round consumes the state and returns the next one, so round
/// boundaries are explicit and the sets are never shared.
#[derive(Debug, Clone)]
pub struct TraversalState {
    visited: AuthorSet,
    /// Authors discovered in the last round, not yet expanded
    frontier: Vec<AuthorId>,
    /// Rounds completed so far
    depth: usize,
    next_placeholder: u32,
}

impl TraversalState {
    /// Start a traversal at `root`
    pub fn new(root: Author) -> Self {
        let frontier = vec![root.id.clone()];
        let mut visited = AuthorSet::new();
        visited.insert(root);
        Self {
            visited,
            frontier,
            depth: 0,
            next_placeholder: 0,
        }
    }

    pub fn visited(&self) -> &AuthorSet {
        &self.visited
    }

    pub fn frontier(&self) -> &[AuthorId] {
        &self.frontier
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// No authors left to expand
    pub fn is_exhausted(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Expand every frontier author once
    ///
    /// Returns the state after the round; its frontier holds exactly the
    /// authors first seen during this round.
    ///
    /// # Errors
    /// Any failed [`Directory::list_coauthors`] call aborts the round.
    pub fn expand_round<D: Directory + ?Sized>(
        mut self,
        directory: &D,
        max_breadth: usize,
    ) -> Result<Self, DirectoryError> {
        let frontier = std::mem::take(&mut self.frontier);
        let mut next_frontier = Vec::new();

        for parent_id in &frontier {
            let Some(lookup_id) = parent_id.as_resolved() else {
                tracing::debug!(id = %parent_id, "skipping unresolved author");
                continue;
            };

            let mut entries = directory.list_coauthors(lookup_id, max_breadth)?;
            if max_breadth > 0 && entries.len() > max_breadth {
                tracing::debug!(
                    id = %parent_id,
                    returned = entries.len(),
                    kept = max_breadth,
                    "truncating coauthor list"
                );
                entries.truncate(max_breadth);
            }

            for entry in entries {
                let coauthor = self.author_from_entry(entry);
                if let Some(parent) = self.visited.get_mut(parent_id) {
                    parent.add_coauthor(&coauthor);
                }

                let id = coauthor.id.clone();
                if self.visited.insert(coauthor) {
                    next_frontier.push(id);
                }
            }
        }

        self.depth += 1;
        tracing::debug!(
            round = self.depth,
            expanded = frontier.len(),
            discovered = next_frontier.len(),
            visited = self.visited.len(),
            "round complete"
        );
        self.frontier = next_frontier;
        Ok(self)
    }

    fn author_from_entry(&mut self, entry: CoauthorEntry) -> Author {
        let id = match entry.id {
            Some(id) => AuthorId::Resolved(id),
            None => {
                let placeholder = AuthorId::Unresolved(self.next_placeholder);
                self.next_placeholder += 1;
                tracing::warn!(
                    name = %entry.name,
                    url = ?entry.url,
                    "could not get author id, keeping as unresolved"
                );
                placeholder
            }
        };

        let author = Author::new(entry.name, id);
        match entry.url {
            Some(url) => author.with_url(url),
            None => author,
        }
    }
}

/// Build the coauthor network around `root_name`
///
/// # Errors
/// Root resolution errors are returned unchanged, as is the first failed
/// coauthor lookup. No partial network is returned in either case.
///
/// # Example
/// ```
/// use citegraph_core::directory::replay::{Profile, ReplayDirectory};
/// use citegraph_core::{build_network, TraversalConfig};
///
/// let directory = ReplayDirectory::from_profiles(vec![
///     Profile::new("Ada", "A1").with_coauthor("Charles", "C1"),
/// ]);
///
/// let network = build_network(&directory, "Ada", &TraversalConfig::new(1, 0)).unwrap();
/// assert_eq!(network.len(), 2);
/// assert_eq!(network.root().coauthor_count(), 1);
/// ```
pub fn build_network<D: Directory + ?Sized>(
    directory: &D,
    root_name: &str,
    config: &TraversalConfig,
) -> Result<Network, DirectoryError> {
    let _span = tracing::info_span!("build_network", root = %root_name).entered();

    let found = directory.resolve_identity(root_name)?;
    let ambiguous_root = found.is_ambiguous();
    if ambiguous_root {
        tracing::warn!(
            name = %root_name,
            candidates = found.candidates,
            id = %found.id,
            "more than one author found, using the first"
        );
    }

    let root = Author::new(root_name, found.id);
    let root_id = root.id.clone();
    let mut state = TraversalState::new(root);

    while state.depth() < config.max_depth && !state.is_exhausted() {
        state = state.expand_round(directory, config.max_breadth)?;
    }

    tracing::info!(
        authors = state.visited().len(),
        rounds = state.depth(),
        "network built"
    );

    Ok(Network {
        root: root_id,
        rounds: state.depth,
        authors: state.visited,
        ambiguous_root,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::replay::{Profile, ReplayDirectory};
    use crate::directory::IdentityMatch;
    use std::cell::RefCell;

    /// A → {B, C}, B → {A}
    fn cycle_directory() -> ReplayDirectory {
        ReplayDirectory::from_profiles(vec![
            Profile::new("A", "A1")
                .with_coauthor("B", "B1")
                .with_coauthor("C", "C1"),
            Profile::new("B", "B1").with_coauthor("A", "A1"),
            Profile::new("C", "C1"),
        ])
    }

    fn ids(network: &Network) -> Vec<String> {
        network.authors().ids().map(|id| id.to_string()).collect()
    }

    /// Directory that ignores the limit and records every lookup
    struct RecordingDirectory {
        inner: ReplayDirectory,
        lookups: RefCell<Vec<String>>,
    }

    impl Directory for RecordingDirectory {
        fn resolve_identity(&self, name: &str) -> Result<IdentityMatch, DirectoryError> {
            self.inner.resolve_identity(name)
        }

        fn list_coauthors(
            &self,
            id: &str,
            _limit: usize,
        ) -> Result<Vec<CoauthorEntry>, DirectoryError> {
            self.lookups.borrow_mut().push(id.to_string());
            self.inner.list_coauthors(id, 0)
        }
    }

    /// Directory whose coauthor listing always fails
    struct BrokenListing;

    impl Directory for BrokenListing {
        fn resolve_identity(&self, _name: &str) -> Result<IdentityMatch, DirectoryError> {
            Ok(IdentityMatch {
                id: "A1".to_string(),
                candidates: 1,
            })
        }

        fn list_coauthors(
            &self,
            _id: &str,
            _limit: usize,
        ) -> Result<Vec<CoauthorEntry>, DirectoryError> {
            Err(DirectoryError::Parse("garbled page".to_string()))
        }
    }

    #[test]
    fn test_depth_zero_returns_only_root() {
        let network = build_network(&cycle_directory(), "A", &TraversalConfig::new(0, 0)).unwrap();

        assert_eq!(network.len(), 1);
        assert_eq!(network.root().id, AuthorId::from("A1"));
        assert_eq!(network.root().coauthor_count(), 0);
        assert_eq!(network.rounds, 0);
    }

    #[test]
    fn test_cycle_back_to_root() {
        let network = build_network(&cycle_directory(), "A", &TraversalConfig::new(2, 0)).unwrap();

        assert_eq!(ids(&network), vec!["A1", "B1", "C1"]);

        // Round 2 links B back to A without adding a node
        let b = &network.authors()[&AuthorId::from("B1")];
        assert!(b.has_coauthor(&AuthorId::from("A1")));
        assert_eq!(network.rounds, 2);
    }

    #[test]
    fn test_stops_when_frontier_empty() {
        let network =
            build_network(&cycle_directory(), "A", &TraversalConfig::new(50, 0)).unwrap();

        // Round 3 has an empty frontier and never runs
        assert_eq!(network.rounds, 2);
        assert_eq!(network.len(), 3);
    }

    #[test]
    fn test_breadth_truncates_in_native_order() {
        let directory = ReplayDirectory::from_profiles(vec![Profile::new("A", "A1")
            .with_coauthor("X", "X1")
            .with_coauthor("Y", "Y1")
            .with_coauthor("Z", "Z1")]);

        let network = build_network(&directory, "A", &TraversalConfig::new(1, 1)).unwrap();

        assert_eq!(ids(&network), vec!["A1", "X1"]);
        assert_eq!(network.root().coauthor_count(), 1);
    }

    #[test]
    fn test_breadth_enforced_when_directory_ignores_limit() {
        let directory = RecordingDirectory {
            inner: ReplayDirectory::from_profiles(vec![Profile::new("A", "A1")
                .with_coauthor("X", "X1")
                .with_coauthor("Y", "Y1")
                .with_coauthor("Z", "Z1")]),
            lookups: RefCell::new(Vec::new()),
        };

        let network = build_network(&directory, "A", &TraversalConfig::new(1, 2)).unwrap();

        assert_eq!(ids(&network), vec!["A1", "X1", "Y1"]);
    }

    #[test]
    fn test_shared_coauthor_expanded_once() {
        // A → {B, C}, B → {D}, C → {D}
        let directory = RecordingDirectory {
            inner: ReplayDirectory::from_profiles(vec![
                Profile::new("A", "A1")
                    .with_coauthor("B", "B1")
                    .with_coauthor("C", "C1"),
                Profile::new("B", "B1").with_coauthor("D", "D1"),
                Profile::new("C", "C1").with_coauthor("D", "D1"),
                Profile::new("D", "D1"),
            ]),
            lookups: RefCell::new(Vec::new()),
        };

        let network = build_network(&directory, "A", &TraversalConfig::new(5, 0)).unwrap();

        assert_eq!(network.len(), 4);
        let d = AuthorId::from("D1");
        assert!(network.authors()[&AuthorId::from("B1")].has_coauthor(&d));
        assert!(network.authors()[&AuthorId::from("C1")].has_coauthor(&d));

        let lookups = directory.lookups.borrow();
        assert_eq!(lookups.iter().filter(|id| id.as_str() == "D1").count(), 1);
        assert_eq!(lookups.len(), 4);
    }

    #[test]
    fn test_unresolved_coauthors_kept_and_distinct() {
        let directory = ReplayDirectory::from_profiles(vec![Profile::new("A", "A1")
            .with_coauthor_url("Broken One", "/citations?hl=en")
            .with_coauthor_url("Broken Two", "/citations?hl=de")]);

        let network = build_network(&directory, "A", &TraversalConfig::new(3, 0)).unwrap();

        assert_eq!(network.len(), 3);
        let unresolved: Vec<_> = network
            .authors()
            .iter()
            .filter(|a| !a.id.is_resolved())
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(unresolved, vec!["Broken One", "Broken Two"]);
        assert_eq!(network.root().coauthor_count(), 2);
    }

    #[test]
    fn test_unresolved_authors_not_looked_up() {
        let directory = RecordingDirectory {
            inner: ReplayDirectory::from_profiles(vec![
                Profile::new("A", "A1").with_coauthor_url("Broken", "/citations?hl=en")
            ]),
            lookups: RefCell::new(Vec::new()),
        };

        build_network(&directory, "A", &TraversalConfig::new(3, 0)).unwrap();

        assert_eq!(*directory.lookups.borrow(), vec!["A1".to_string()]);
    }

    #[test]
    fn test_root_not_found_propagates() {
        let err = build_network(&cycle_directory(), "Nobody", &TraversalConfig::default())
            .unwrap_err();

        assert!(matches!(err, DirectoryError::NotFound { .. }));
    }

    #[test]
    fn test_failed_listing_aborts() {
        let err = build_network(&BrokenListing, "A", &TraversalConfig::new(2, 0)).unwrap_err();

        assert!(matches!(err, DirectoryError::Parse(_)));
    }

    #[test]
    fn test_ambiguous_root_flagged() {
        let directory = ReplayDirectory::from_profiles(vec![
            Profile::new("Jane Doe", "J1"),
            Profile::new("Jane Doerr", "J2"),
        ]);

        let network = build_network(&directory, "Jane Doe", &TraversalConfig::new(1, 0)).unwrap();

        assert!(network.ambiguous_root);
        assert_eq!(network.root().id, AuthorId::from("J1"));
    }

    #[test]
    fn test_expand_round_frontier_is_new_authors_only() {
        let directory = cycle_directory();
        let state = TraversalState::new(Author::new("A", "A1"));

        let state = state.expand_round(&directory, 0).unwrap();
        assert_eq!(state.depth(), 1);
        assert_eq!(
            state.frontier(),
            &[AuthorId::from("B1"), AuthorId::from("C1")]
        );

        let state = state.expand_round(&directory, 0).unwrap();
        assert!(state.is_exhausted());
        assert!(state.frontier().iter().all(|id| state.visited().contains(id)));
    }
}
