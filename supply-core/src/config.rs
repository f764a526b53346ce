//! Application config: graph + LLM + embedding settings plus the assistant's own knobs.

use std::env;

use embedding::EnvEmbeddingConfig;
use graph_store::GraphConfig;
use llm_client::EnvLlmConfig;

use crate::error::{Result, SupplyError};

/// Default bound on reasoning steps per query.
pub const DEFAULT_MAX_ITERATIONS: usize = 10;
/// Default name of the vector index over `Supplier.embedding`.
pub const DEFAULT_VECTOR_INDEX: &str = "supply_chain";

/// Everything the assistant needs, loaded from env.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub graph: GraphConfig,
    pub llm: EnvLlmConfig,
    pub embedding: EnvEmbeddingConfig,
    /// NODES_CSV
    pub nodes_csv: String,
    /// RELATIONSHIPS_CSV
    pub relationships_csv: String,
    /// VECTOR_INDEX_NAME
    pub vector_index: String,
    /// AGENT_MAX_ITERATIONS
    pub max_iterations: usize,
    /// LOG_FILE; stdout only when unset
    pub log_file: Option<String>,
}

impl AppConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self> {
        let graph = GraphConfig::from_env().map_err(config_error)?;
        let llm = EnvLlmConfig::from_env().map_err(config_error)?;
        let embedding = EnvEmbeddingConfig::from_env().map_err(config_error)?;

        let max_iterations = match env::var("AGENT_MAX_ITERATIONS") {
            Ok(s) => s.parse().map_err(|_| {
                SupplyError::Config(format!("AGENT_MAX_ITERATIONS is not a number: {}", s))
            })?,
            Err(_) => DEFAULT_MAX_ITERATIONS,
        };

        Ok(Self {
            graph,
            llm,
            embedding,
            nodes_csv: env::var("NODES_CSV").unwrap_or_else(|_| "nodes.csv".to_string()),
            relationships_csv: env::var("RELATIONSHIPS_CSV")
                .unwrap_or_else(|_| "relationships.csv".to_string()),
            vector_index: env::var("VECTOR_INDEX_NAME")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_VECTOR_INDEX.to_string()),
            max_iterations,
            log_file: env::var("LOG_FILE").ok().filter(|s| !s.trim().is_empty()),
        })
    }

    /// Checks required credentials and bounds.
    pub fn validate(&self) -> Result<()> {
        if self.llm.openai_api_key.trim().is_empty() {
            return Err(SupplyError::Config("OPENAI_API_KEY must not be empty".into()));
        }
        self.graph.validate().map_err(config_error)?;
        self.embedding.validate().map_err(config_error)?;
        if self.max_iterations == 0 {
            return Err(SupplyError::Config(
                "AGENT_MAX_ITERATIONS must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn config_error(e: anyhow::Error) -> SupplyError {
    SupplyError::Config(format!("{:#}", e))
}
