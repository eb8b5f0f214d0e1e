use anyhow::Context;
use clap::Parser;
use citegraph_core::{build_network, to_graph, ReplayDirectory, TraversalConfig};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod render;

use render::Format;

/// CiteGraph - Graphs of an author's coauthor network
#[derive(Debug, Parser)]
#[command(name = "citegraph")]
#[command(version)] // Auto-pull version from Cargo.toml
#[command(about = "Generate graphs showing an author's coauthors", long_about = None)]
struct Cli {
    /// Name of the author to start from
    name: String,

    /// Recorded directory snapshot (JSON)
    #[arg(short, long)]
    directory: PathBuf,

    /// TOML file with `max_depth` / `max_breadth`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of expansion rounds [default: 5]
    #[arg(long)]
    depth: Option<usize>,

    /// Coauthors kept per author, 0 keeps all [default: 0]
    #[arg(long)]
    breadth: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Dot)]
    format: Format,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    /// Defaults, then the config file, then explicit flags
    fn traversal_config(&self) -> anyhow::Result<TraversalConfig> {
        let mut config = match &self.config {
            Some(path) => TraversalConfig::from_path(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => TraversalConfig::default(),
        };
        if let Some(depth) = self.depth {
            config.max_depth = depth;
        }
        if let Some(breadth) = self.breadth {
            config.max_breadth = breadth;
        }
        Ok(config)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("citegraph=info,citegraph_core=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = cli.traversal_config()?;
    tracing::debug!(?config, "traversal limits");

    let directory = ReplayDirectory::from_path(&cli.directory).with_context(|| {
        format!("failed to load directory snapshot {}", cli.directory.display())
    })?;

    let network = build_network(&directory, &cli.name, &config)
        .with_context(|| format!("could not build coauthor network for '{}'", cli.name))?;
    let graph = to_graph(&network);
    let rendered = render::render(&graph, cli.format)?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(
                path = %path.display(),
                nodes = graph.node_count(),
                edges = graph.edge_count(),
                "graph written"
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", rendered.trim_end())?;
        }
    }

    Ok(())
}
