//! Error types for the assistant.
//!
//! [`SupplyError`] is the top-level error; [`ToolError`] covers tool calls the model got wrong.
//! The agent loop reports `ToolError`s back to the model and aborts the turn on everything else.

use thiserror::Error;

/// Top-level error (graph store, model service, embeddings, tools, ingestion, config, IO).
#[derive(Error, Debug)]
pub enum SupplyError {
    #[error("Graph store error: {0}")]
    Graph(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Ingest error: {0}")]
    Ingest(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SupplyError {
    /// Wraps a graph-store failure, keeping the whole context chain.
    pub fn graph(e: anyhow::Error) -> Self {
        SupplyError::Graph(format!("{:#}", e))
    }

    pub fn llm(e: anyhow::Error) -> Self {
        SupplyError::Llm(format!("{:#}", e))
    }

    pub fn embedding(e: anyhow::Error) -> Self {
        SupplyError::Embedding(format!("{:#}", e))
    }
}

/// A tool call the model made that cannot be executed as requested.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },
}

/// Result type for assistant operations; uses [`SupplyError`].
pub type Result<T> = std::result::Result<T, SupplyError>;
