//! Lens Graph CLI
//!
//! Loads a snapshot directory, builds the lens graph once and runs a single
//! query, printing a JSON response envelope on stdout. Logs go to stderr
//! (`RUST_LOG` overrides the default `warn` filter).

mod command;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use command::{CommandAction, CommandHandler, CommandRequest, CommandResponse};
use lens_graph::{DirectorySnapshot, GraphBuilder, GraphConfig};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;

/// Explore relationships between analytical lenses
#[derive(Parser)]
#[command(name = "lens-graph")]
#[command(version, about)]
struct Cli {
    /// Directory holding the catalog, relationship and frame documents
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print single-line JSON
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one lens
    Lens { lens: String },
    /// Node and edge counts per relationship kind
    Stats,
    /// Strongest routes from one lens to another
    Path {
        from: String,
        to: String,
        #[arg(long)]
        max_length: Option<usize>,
    },
    /// Route from a lens toward a theme mentioned in definitions or tags
    Journey { start: String, target: String },
    /// Best connecting routes among several lenses
    Synthesis {
        #[arg(required = true, num_args = 2..)]
        lenses: Vec<String>,
    },
    /// Stepwise learning progression between two lenses
    Progression {
        start: String,
        target: String,
        #[arg(long)]
        max_steps: Option<usize>,
    },
    /// Lenses sitting between members of a set
    Bridges {
        #[arg(required = true, num_args = 2..)]
        lenses: Vec<String>,
    },
    /// Lenses in contrast or paradox with a lens
    Contrasts { lens: String },
    /// Thesis / antithesis / synthesis triples
    Triads {
        lens: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Nearby lenses grouped by relationship kind
    Neighborhood {
        lens: String,
        #[arg(long)]
        radius: Option<usize>,
    },
    /// Communities of tightly related lenses
    Clusters,
    /// Most central lenses
    Central {
        /// betweenness, eigenvector, pagerank or degree
        #[arg(long, default_value = "betweenness")]
        measure: String,
    },
    /// Widen a retrieval result set using the graph
    Enhance {
        /// JSON file with an array of results (`[{"id": ...}, ...]`)
        #[arg(long, conflicts_with = "ids")]
        results: Option<PathBuf>,
        /// Lens ids, used when no results file is given
        ids: Vec<String>,
    },
    /// Lenses to explore next, given the current set
    Recommend {
        #[arg(required = true)]
        lenses: Vec<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Run a raw JSON request (`{"action": ..., "payload": {...}}`)
    Command { json: String },
}

impl Commands {
    fn into_request(self) -> Result<CommandRequest> {
        let (action, payload) = match self {
            Self::Lens { lens } => (CommandAction::Lens, json!({ "lens": lens })),
            Self::Stats => (CommandAction::Stats, json!({})),
            Self::Path {
                from,
                to,
                max_length,
            } => (
                CommandAction::Path,
                json!({ "from": from, "to": to, "max_length": max_length }),
            ),
            Self::Journey { start, target } => (
                CommandAction::Journey,
                json!({ "start": start, "target": target }),
            ),
            Self::Synthesis { lenses } => (CommandAction::Synthesis, json!({ "lenses": lenses })),
            Self::Progression {
                start,
                target,
                max_steps,
            } => (
                CommandAction::Progression,
                json!({ "start": start, "target": target, "max_steps": max_steps }),
            ),
            Self::Bridges { lenses } => (CommandAction::Bridges, json!({ "lenses": lenses })),
            Self::Contrasts { lens } => (CommandAction::Contrasts, json!({ "lens": lens })),
            Self::Triads { lens, limit } => {
                (CommandAction::Triads, json!({ "lens": lens, "limit": limit }))
            }
            Self::Neighborhood { lens, radius } => (
                CommandAction::Neighborhood,
                json!({ "lens": lens, "radius": radius }),
            ),
            Self::Clusters => (CommandAction::Clusters, json!({})),
            Self::Central { measure } => (CommandAction::Central, json!({ "measure": measure })),
            Self::Enhance { results, ids } => {
                let results = match results {
                    Some(path) => {
                        let raw = std::fs::read_to_string(&path)
                            .with_context(|| format!("Failed to read {}", path.display()))?;
                        serde_json::from_str::<Value>(&raw)
                            .with_context(|| format!("Invalid JSON in {}", path.display()))?
                    }
                    None => Value::Array(ids.into_iter().map(|id| json!({ "id": id })).collect()),
                };
                (CommandAction::Enhance, json!({ "results": results }))
            }
            Self::Recommend { lenses, limit } => (
                CommandAction::Recommend,
                json!({ "lenses": lenses, "limit": limit }),
            ),
            Self::Command { json } => {
                return serde_json::from_str(&json).context("Invalid command request");
            }
        };
        Ok(CommandRequest { action, payload })
    }
}

fn load_config(cli: &Cli) -> Result<GraphConfig> {
    let mut config = match &cli.config {
        Some(path) => GraphConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GraphConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.snapshot.data_dir.clone_from(dir);
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<CommandResponse> {
    let config = load_config(&cli)?;
    let snapshot = DirectorySnapshot::new(&config.snapshot);
    let data_dir = config.snapshot.data_dir.clone();
    let graph = GraphBuilder::new(config)
        .build(&snapshot)
        .with_context(|| format!("Failed to load lens graph from {}", data_dir.display()))?;

    let request = cli.command.into_request()?;
    Ok(CommandHandler::new(Arc::new(graph)).respond(request))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let compact = cli.compact;

    let response = run(cli).unwrap_or_else(|e| {
        log::error!("{e:#}");
        CommandResponse::error(format!("{e:#}"))
    });

    let rendered = if compact {
        serde_json::to_string(&response)
    } else {
        serde_json::to_string_pretty(&response)
    };
    match rendered {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Failed to render response: {e}");
            std::process::exit(1);
        }
    }

    if response.is_error() {
        std::process::exit(1);
    }
}
