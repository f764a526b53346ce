//! The assistant: one context object holding the graph, embedding and model clients.

use std::sync::Arc;

use async_trait::async_trait;
use embedding::EmbeddingService;
use graph_store::{GraphStore, Neo4jStore};
use llm_client::{LlmClient, OpenAILlmClient};
use openai_embedding::OpenAIEmbedding;
use supply_core::{AppConfig, Result, SupplyError};
use supply_tools::ToolContext;
use tracing::{error, info};

use crate::agent_loop::{AgentLoop, AgentOutcome};

/// Shown to the user when a query fails for any reason.
pub const APOLOGY: &str = "Could not process the request, please try later....";

/// Anything that turns a question into displayable text.
#[async_trait]
pub trait Answerer: Send + Sync {
    async fn answer(&self, question: &str) -> String;
}

pub struct SupplyChainAssistant {
    agent: AgentLoop,
}

impl SupplyChainAssistant {
    pub fn new(agent: AgentLoop) -> Self {
        Self { agent }
    }

    /// Opens the Neo4j connection and builds the OpenAI clients from `config`.
    pub async fn connect(config: &AppConfig) -> Result<Self> {
        let store: Arc<dyn GraphStore> = Arc::new(
            Neo4jStore::connect(&config.graph)
                .await
                .map_err(SupplyError::graph)?,
        );
        let openai_embedding = OpenAIEmbedding::from_config(&config.embedding);
        info!(
            model = %openai_embedding.model(),
            dimensions = ?openai_embedding.dimensions(),
            "embedding service configured"
        );
        let embedding: Arc<dyn EmbeddingService> = Arc::new(openai_embedding);
        let llm: Arc<dyn LlmClient> = Arc::new(OpenAILlmClient::from_config(&config.llm));

        info!(
            uri = %config.graph.uri,
            vector_index = %config.vector_index,
            max_iterations = config.max_iterations,
            "assistant connected"
        );

        let tools = ToolContext::new(store, embedding, config.vector_index.clone());
        Ok(Self::new(AgentLoop::new(llm, tools, config.max_iterations)))
    }

    pub fn tools(&self) -> &ToolContext {
        self.agent.tools()
    }

    /// Runs the agent and returns the full outcome or the typed error.
    pub async fn query(&self, question: &str) -> Result<AgentOutcome> {
        self.agent.run(question).await
    }
}

#[async_trait]
impl Answerer for SupplyChainAssistant {
    /// The final answer, or [`APOLOGY`] after logging the error.
    async fn answer(&self, question: &str) -> String {
        match self.query(question).await {
            Ok(outcome) => outcome.answer,
            Err(e) => {
                error!(error = %e, "query failed");
                APOLOGY.to_string()
            }
        }
    }
}
