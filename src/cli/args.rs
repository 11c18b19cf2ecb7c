// src/cli/args.rs
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::taxonomy::VertexId;

#[derive(Parser)]
#[command(name = "taxon", version, about = "Inspect is-a taxonomies stored as id;parent;... files")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Configuration file (defaults to ./taxon.toml)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print vertex, edge, root, leaf and depth statistics
    Stats {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List the ancestors of a vertex, nearest first
    Ancestors {
        file: PathBuf,
        id: VertexId,
        /// Include the vertex itself
        #[arg(long)]
        include_self: bool,
    },
    /// Lowest common subsumer of two vertices
    Lcs {
        file: PathBuf,
        a: VertexId,
        b: VertexId,
        /// Rank candidates by longest depth instead of shortest
        #[arg(long)]
        longest: bool,
    },
    /// Most informative common ancestor, using intrinsic IC
    Mica {
        file: PathBuf,
        a: VertexId,
        b: VertexId,
    },
    /// Shortest path length between two vertices
    Distance {
        file: PathBuf,
        a: VertexId,
        b: VertexId,
        /// Weight each edge by the IC difference of its endpoints
        #[arg(long)]
        weighted: bool,
    },
    /// Write vertex and edge attribute tables
    Export {
        file: PathBuf,
        #[arg(long, value_name = "OUT")]
        vertices: PathBuf,
        #[arg(long, value_name = "OUT")]
        edges: Option<PathBuf>,
    },
}
