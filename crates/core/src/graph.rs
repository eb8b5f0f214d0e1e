//! Graph export of a coauthor network
//!
//! [`to_graph`] turns a [`Network`] into a renderer-neutral directed graph:
//! one node per visited author and one edge per coauthor link. Rendering
//! (layout, file formats) is left to the caller, which can either walk the
//! underlying `petgraph::StableGraph` or serialize [`Graph::describe`].

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::author::AuthorId;
use crate::traversal::Network;

/// A node in the coauthor graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Author identity as text
    pub id: String,
    /// Display name of the author
    pub label: String,
    /// Whether this is the author the traversal started from
    pub is_root: bool,
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// An edge from an author to one of their coauthors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Edge;

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("coauthor")
    }
}

/// Serializable node/edge listing of a [`Graph`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDescription {
    pub nodes: Vec<Node>,
    pub edges: Vec<EdgeDescription>,
}

/// Edge endpoints by node id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDescription {
    pub source: String,
    pub target: String,
}

/// The coauthor graph
pub struct Graph {
    /// The underlying stable graph (private to enforce encapsulation)
    inner: StableGraph<Node, Edge>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self {
            inner: StableGraph::new(),
        }
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, node: Node) -> NodeIndex {
        self.inner.add_node(node)
    }

    /// Add a coauthor edge between two nodes
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) -> petgraph::stable_graph::EdgeIndex {
        self.inner.add_edge(from, to, Edge)
    }

    /// Get a node by index
    pub fn node_weight(&self, index: NodeIndex) -> Option<&Node> {
        self.inner.node_weight(index)
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Get the number of edges in the graph
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Iterate over all nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.inner.node_weights()
    }

    /// Iterate over `(source, target)` node pairs of every edge
    pub fn edge_endpoints(&self) -> impl Iterator<Item = (&Node, &Node)> + '_ {
        self.inner
            .edge_references()
            .map(|e| (&self.inner[e.source()], &self.inner[e.target()]))
    }

    /// The root node, if the graph has one
    pub fn root(&self) -> Option<&Node> {
        self.nodes().find(|n| n.is_root)
    }

    /// Find a node by its author id
    ///
    /// **Note**: This performs a linear scan over all nodes and has O(N) complexity.
    pub fn find_node_by_id(&self, id: &str) -> Option<NodeIndex> {
        self.inner
            .node_indices()
            .find(|&idx| self.inner[idx].id == id)
    }

    /// Borrow the underlying petgraph structure, e.g. for DOT output
    pub fn as_stable_graph(&self) -> &StableGraph<Node, Edge> {
        &self.inner
    }

    /// Flatten the graph into a serializable description
    pub fn describe(&self) -> GraphDescription {
        GraphDescription {
            nodes: self.nodes().cloned().collect(),
            edges: self
                .edge_endpoints()
                .map(|(source, target)| EdgeDescription {
                    source: source.id.clone(),
                    target: target.id.clone(),
                })
                .collect(),
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a traversal result into a coauthor graph
///
/// Nodes follow the network's discovery order, so the root is always the
/// first node. Edge count equals the sum of coauthor counts over all authors.
pub fn to_graph(network: &Network) -> Graph {
    let mut graph = Graph::new();
    let mut index_map: HashMap<&AuthorId, NodeIndex> = HashMap::new();

    for author in network.authors() {
        let idx = graph.add_node(Node {
            id: author.id.to_string(),
            label: author.name.clone(),
            is_root: network.is_root(author),
        });
        index_map.insert(&author.id, idx);
    }

    for author in network.authors() {
        let from = index_map[&author.id];
        for coauthor in author.coauthors() {
            match index_map.get(coauthor) {
                Some(&to) => {
                    graph.add_edge(from, to);
                }
                None => {
                    tracing::debug!(from = %author.id, to = %coauthor, "coauthor not in network");
                }
            }
        }
    }

    graph
}
