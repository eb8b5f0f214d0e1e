//! Graph renderers
//!
//! Turns an exported coauthor graph into text: Graphviz DOT for drawing, or
//! JSON for other tools.

use anyhow::Context;
use clap::ValueEnum;
use citegraph_core::Graph;
use petgraph::dot::{Config, Dot};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Graphviz DOT
    Dot,
    /// Node and edge listing as JSON
    Json,
}

/// Render a graph in the requested format
pub fn render(graph: &Graph, format: Format) -> anyhow::Result<String> {
    match format {
        Format::Dot => Ok(render_dot(graph)),
        Format::Json => {
            serde_json::to_string_pretty(&graph.describe()).context("failed to serialize graph")
        }
    }
}

/// DOT output; the root author is drawn as a double octagon
fn render_dot(graph: &Graph) -> String {
    let dot = Dot::with_attr_getters(
        graph.as_stable_graph(),
        &[Config::EdgeNoLabel],
        &|_, _| String::new(),
        &|_, (_, node)| {
            if node.is_root {
                "shape = doubleoctagon ".to_string()
            } else {
                String::new()
            }
        },
    );
    format!("{}", dot)
}
