use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;

use atlasgraph::{
    canonicalize, missing_reciprocals, traverse, Catalog, Config, Direction, Edge, EdgeWeight,
    GraphStore, Link, NodeRecord, TypeFilter,
};

#[derive(Parser, Debug)]
#[command(name = "atlasgraph")]
#[command(about = "Query the relationship graph: rebuild, adjacency, traversal, reciprocal audit")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rebuild the store from a JSON export of nodes and edges
    Rebuild {
        /// Path to the export file ({"nodes": [...], "edges": [...]})
        input: PathBuf,
    },
    /// List edges incident to a node
    Adjacency {
        /// Node link, e.g. person/abraham
        link: String,
        /// out, in, or both
        #[arg(short, long, default_value = "both")]
        direction: String,
        /// Comma-separated relationship types (all when omitted)
        #[arg(short, long, value_delimiter = ',')]
        types: Vec<String>,
    },
    /// Traverse from a focal node and print the canonicalized edge list
    Traverse {
        /// Focal node link, e.g. person/abraham
        link: String,
        /// out, in, or both
        #[arg(short, long, default_value = "both")]
        direction: String,
        /// Comma-separated relationship types (all when omitted)
        #[arg(short, long, value_delimiter = ',')]
        types: Vec<String>,
        /// Maximum expansion depth (unbounded when omitted)
        #[arg(short, long)]
        max_depth: Option<usize>,
        /// Display-name language (config default when omitted)
        #[arg(short, long)]
        lang: Option<String>,
    },
    /// Report edges whose defined reciprocal was never authored
    Audit,
}

/// Shape of the loader's JSON export.
#[derive(Debug, Deserialize)]
struct GraphExport {
    #[serde(default)]
    nodes: Vec<NodeRecord>,
    #[serde(default)]
    edges: Vec<Edge>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info")).init();

    let args = Args::parse();
    let config = Config::load()?;

    let store = GraphStore::new(config.db_path());
    store.migrate(Path::new("migrations"))?;

    // Fatal at startup if the reciprocal tables were ever inconsistent.
    let catalog = Catalog::builtin();

    match args.command {
        Command::Rebuild { input } => {
            let raw = fs::read_to_string(&input)
                .with_context(|| format!("Failed to read export file: {}", input.display()))?;
            let export: GraphExport =
                serde_json::from_str(&raw).context("Failed to parse graph export JSON")?;
            store.rebuild(&export.nodes, &export.edges)?;
            println!(
                "Rebuilt store with {} node rows and {} edges",
                export.nodes.len(),
                export.edges.len()
            );
        }
        Command::Adjacency {
            link,
            direction,
            types,
        } => {
            let link: Link = link.parse()?;
            let direction: Direction = direction.parse()?;
            let filter = TypeFilter::from_names(&types)?;
            for edge in store.adjacency(&link, direction, &filter)? {
                println!("{}", edge);
            }
        }
        Command::Traverse {
            link,
            direction,
            types,
            max_depth,
            lang,
        } => {
            let link: Link = link.parse()?;
            let direction: Direction = direction.parse()?;
            let filter = TypeFilter::from_names(&types)?;
            let lang = lang.as_deref().unwrap_or(config.default_lang());

            let edges = traverse(&store, &link, direction, &filter, max_depth)?;
            log::info!("Node {} has {} edges for graph", link, edges.len());

            for (edge, style) in canonicalize(&edges, &catalog) {
                let source = display_or_link(&store, &edge.source, lang)?;
                let target = display_or_link(&store, &edge.target, lang)?;
                let arrow = if style.bidirectional { "<->" } else { "-->" };
                let weight = match style.weight {
                    EdgeWeight::Default => "",
                    EdgeWeight::Thin => ", thin",
                    EdgeWeight::Thick => ", thick",
                };
                println!("{} {} {} [{}{}]", source, arrow, target, edge.edge_type, weight);
            }
        }
        Command::Audit => {
            let missing = missing_reciprocals(&store, &catalog)?;
            if missing.is_empty() {
                println!("No missing reciprocals");
            } else {
                for (edge, expected) in &missing {
                    println!(
                        "{}  (missing: {} {} {})",
                        edge, edge.target, expected, edge.source
                    );
                }
                println!("{} missing reciprocal edges", missing.len());
            }
        }
    }

    Ok(())
}

/// Display name in `lang`, falling back to the raw link identity.
fn display_or_link(store: &GraphStore, link: &Link, lang: &str) -> Result<String> {
    Ok(store
        .display_name(link, lang)?
        .unwrap_or_else(|| link.to_string()))
}
