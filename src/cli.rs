use crate::discovery::DiscoveryMode;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "resource-discovery")]
#[command(about = "Intent-aware discovery of Java learning resources", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (default: <config dir>/resource-discovery/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Resource catalog (JSON); overrides the configured catalog
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the MCP server on stdio (default)
    Serve,
    /// Answer one query and print the ranked result
    Query {
        /// Free-text query; empty for general recommendations
        #[arg(default_value = "")]
        query: String,
        /// Skip classification and force a mode
        #[arg(short, long)]
        mode: Option<ModeArg>,
        /// Rank resources of one concept instead of classifying the query
        #[arg(long, conflicts_with = "category")]
        concept: Option<String>,
        /// Recommend resources of one category instead of classifying the query
        #[arg(long)]
        category: Option<String>,
        /// Easiest difficulty for --concept
        #[arg(long, requires = "concept")]
        min_difficulty: Option<String>,
        /// Hardest difficulty for --concept
        #[arg(long, requires = "concept")]
        max_difficulty: Option<String>,
        /// Maximum number of results (0 uses the configured default)
        #[arg(short = 'n', long, default_value = "0")]
        limit: usize,
        /// Show how each score was assembled
        #[arg(long)]
        explain: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Specific,
    Vague,
    Exploratory,
}

impl From<ModeArg> for DiscoveryMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Specific => Self::Specific,
            ModeArg::Vague => Self::Vague,
            ModeArg::Exploratory => Self::Exploratory,
        }
    }
}
