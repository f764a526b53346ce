//! Embedding configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
/// Output size of `text-embedding-3-small`; the vector index is created with this many dimensions.
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1536;

/// Embedding service configuration interface.
pub trait EmbeddingConfig: Send + Sync {
    fn openai_api_key(&self) -> &str;
    /// Optional base URL for an OpenAI-compatible embedding endpoint (OPENAI_BASE_URL).
    fn openai_base_url(&self) -> Option<&str>;
    fn model(&self) -> &str;
    fn dimensions(&self) -> usize;
}

/// Embedding config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvEmbeddingConfig {
    pub openai_api_key: String,
    pub openai_base_url: Option<String>,
    pub embedding_model: String,
    pub embedding_dimensions: usize,
}

impl EmbeddingConfig for EnvEmbeddingConfig {
    fn openai_api_key(&self) -> &str {
        &self.openai_api_key
    }
    fn openai_base_url(&self) -> Option<&str> {
        self.openai_base_url.as_deref().filter(|s| !s.is_empty())
    }
    fn model(&self) -> &str {
        &self.embedding_model
    }
    fn dimensions(&self) -> usize {
        self.embedding_dimensions
    }
}

impl EnvEmbeddingConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        let openai_base_url = env::var("OPENAI_BASE_URL").ok().filter(|s| !s.trim().is_empty());
        let embedding_model =
            env::var("EMBEDDING_MODEL").unwrap_or_else(|_| DEFAULT_EMBEDDING_MODEL.to_string());
        let embedding_dimensions = match env::var("EMBEDDING_DIMENSIONS") {
            Ok(s) => s
                .parse()
                .with_context(|| format!("EMBEDDING_DIMENSIONS is not a positive integer: {}", s))?,
            Err(_) => DEFAULT_EMBEDDING_DIMENSIONS,
        };
        Ok(Self {
            openai_api_key,
            openai_base_url,
            embedding_model,
            embedding_dimensions,
        })
    }

    /// Validate config: an API key is required and dimensions must be non-zero.
    pub fn validate(&self) -> Result<()> {
        if self.openai_api_key.trim().is_empty() {
            anyhow::bail!("OPENAI_API_KEY is required for embeddings");
        }
        if self.embedding_dimensions == 0 {
            anyhow::bail!("EMBEDDING_DIMENSIONS must be greater than zero");
        }
        Ok(())
    }
}
