//! CLI parser and config overrides.

use clap::{Parser, Subcommand};
use supply_core::AppConfig;

#[derive(Parser)]
#[command(name = "supply")]
#[command(about = "Supply-chain graph assistant: ingest, ask, chat", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Node CSV (overrides NODES_CSV).
    #[arg(long, global = true)]
    pub nodes_csv: Option<String>,

    /// Relationship CSV (overrides RELATIONSHIPS_CSV).
    #[arg(long, global = true)]
    pub relationships_csv: Option<String>,

    /// Reasoning steps per question (overrides AGENT_MAX_ITERATIONS).
    #[arg(long, global = true)]
    pub max_iterations: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Load both CSVs, ensure the vector index and embed supplier descriptions.
    Ingest,
    /// Answer one question and exit.
    Ask {
        question: String,
        /// Use the graph as it is.
        #[arg(long)]
        skip_ingest: bool,
    },
    /// Interactive session; `/history` shows the conversation, `/quit` exits.
    Chat {
        #[arg(long)]
        skip_ingest: bool,
    },
}

impl Cli {
    /// Applies flag overrides on top of the env config.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(path) = &self.nodes_csv {
            config.nodes_csv = path.clone();
        }
        if let Some(path) = &self.relationships_csv {
            config.relationships_csv = path.clone();
        }
        if let Some(n) = self.max_iterations {
            config.max_iterations = n;
        }
    }
}
