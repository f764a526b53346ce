//! # OpenAI Embedding Service
//!
//! Implementation of [`EmbeddingService`] over OpenAI's embedding API (default model
//! `text-embedding-3-small`, 1536 dimensions). Supplier descriptions are embedded with it at
//! ingestion time, and user descriptions at query time, so both sides must use the same model.
//!
//! ```rust,no_run
//! use embedding::EmbeddingService;
//! use openai_embedding::OpenAIEmbedding;
//!
//! async fn example() -> Result<(), anyhow::Error> {
//!     let service = OpenAIEmbedding::with_api_key("sk-...".to_string());
//!     let vector = service.embed("stainless steel sheets").await?;
//!     println!("dimension: {}", vector.len());
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use async_openai::{types::CreateEmbeddingRequestArgs, Client};
use async_trait::async_trait;
use embedding::{EmbeddingConfig, EmbeddingService, DEFAULT_EMBEDDING_MODEL};
use tracing::{debug, info, instrument, warn};

/// Timeout for a single embed request (connect + request + response).
const EMBED_TIMEOUT: Duration = Duration::from_secs(30);
/// Batch requests carry larger payloads.
const EMBED_BATCH_TIMEOUT: Duration = Duration::from_secs(60);
const LOG_PREVIEW_CHARS: usize = 200;

/// OpenAI embedding service. Holds the async-openai client, model name and, when set, the
/// vector size requested from the API and enforced on every response.
#[derive(Debug, Clone)]
pub struct OpenAIEmbedding {
    client: Client<async_openai::config::OpenAIConfig>,
    model: String,
    dimensions: Option<usize>,
}

impl OpenAIEmbedding {
    /// Creates a service for `model`. An empty `api_key` falls back to OPENAI_API_KEY.
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_base_url(api_key, model, None)
    }

    /// Same as [`new`](Self::new), sending requests to `base_url` when given.
    pub fn new_with_base_url(api_key: String, model: String, base_url: Option<&str>) -> Self {
        let api_key = if api_key.is_empty() {
            std::env::var("OPENAI_API_KEY").unwrap_or_default()
        } else {
            api_key
        };

        let mut openai_config = async_openai::config::OpenAIConfig::new().with_api_key(api_key);
        if let Some(url) = base_url.filter(|s| !s.is_empty()) {
            openai_config = openai_config.with_api_base(url);
        }

        Self {
            client: Client::with_config(openai_config),
            model,
            dimensions: None,
        }
    }

    /// Requests vectors of `dimensions` length and rejects responses of any other length.
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Creates a service with the default model.
    pub fn with_api_key(api_key: String) -> Self {
        Self::new(api_key, DEFAULT_EMBEDDING_MODEL.to_string())
    }

    /// Builds a service from any [`EmbeddingConfig`], including its vector size.
    pub fn from_config(config: &dyn EmbeddingConfig) -> Self {
        Self::new_with_base_url(
            config.openai_api_key().to_string(),
            config.model().to_string(),
            config.openai_base_url(),
        )
        .with_dimensions(config.dimensions())
    }

    /// Returns the embedding model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }

    async fn request(
        &self,
        inputs: Vec<String>,
        timeout: Duration,
    ) -> Result<Vec<Vec<f32>>, anyhow::Error> {
        let mut args = CreateEmbeddingRequestArgs::default();
        args.model(self.model.clone()).input(inputs);
        if let Some(dimensions) = self.dimensions {
            args.dimensions(u32::try_from(dimensions)?);
        }
        let request = args.build()?;

        let embeddings = self.client.embeddings();
        let response = match tokio::time::timeout(timeout, embeddings.create(request)).await {
            Ok(Ok(r)) => r,
            Ok(Err(e)) => {
                warn!(error = %e, "OpenAI embed request failed");
                return Err(e.into());
            }
            Err(_) => {
                warn!(timeout_secs = timeout.as_secs(), "OpenAI embed request timed out");
                return Err(anyhow::anyhow!(
                    "OpenAI embed request timed out after {} seconds",
                    timeout.as_secs()
                ));
            }
        };
        debug!(items = response.data.len(), "OpenAI embed response received");

        let vectors: Vec<Vec<f32>> = response.data.into_iter().map(|item| item.embedding).collect();
        check_dimensions(self.dimensions, &vectors)?;
        Ok(vectors)
    }
}

/// Fails when any vector differs from the expected length.
fn check_dimensions(expected: Option<usize>, vectors: &[Vec<f32>]) -> Result<(), anyhow::Error> {
    let Some(expected) = expected else {
        return Ok(());
    };
    match vectors.iter().find(|v| v.len() != expected) {
        Some(v) => {
            warn!(expected, got = v.len(), "OpenAI embedding dimension mismatch");
            Err(anyhow::anyhow!(
                "Expected {}-dimensional embeddings, got {}",
                expected,
                v.len()
            ))
        }
        None => Ok(()),
    }
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(LOG_PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[async_trait]
impl EmbeddingService for OpenAIEmbedding {
    #[instrument(skip(self, text), fields(model = %self.model, text_len = text.len()))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
        info!(text_preview = %preview(text), "step: embedding OpenAI embed request");

        let embedding = self
            .request(vec![text.to_string()], EMBED_TIMEOUT)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("No embedding in response"))?;

        info!(dimension = embedding.len(), "step: embedding OpenAI embed done");
        Ok(embedding)
    }

    #[instrument(skip(self, texts), fields(model = %self.model, batch_size = texts.len()))]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, anyhow::Error> {
        if texts.is_empty() {
            debug!("OpenAI embed_batch empty input, skipping");
            return Ok(vec![]);
        }

        let embeddings = self.request(texts.to_vec(), EMBED_BATCH_TIMEOUT).await?;

        if embeddings.len() != texts.len() {
            warn!(
                expected = texts.len(),
                got = embeddings.len(),
                "OpenAI embed_batch response count mismatch"
            );
            return Err(anyhow::anyhow!(
                "Expected {} embeddings, got {}",
                texts.len(),
                embeddings.len()
            ));
        }

        info!(
            count = embeddings.len(),
            dimension = embeddings.first().map(|v| v.len()).unwrap_or(0),
            "step: embedding OpenAI embed_batch done"
        );
        Ok(embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_mismatch_is_an_error() {
        let vectors = vec![vec![0.0; 4], vec![0.0; 3]];
        assert!(check_dimensions(Some(4), &vectors).is_err());
        assert!(check_dimensions(Some(4), &vectors[..1]).is_ok());
        assert!(check_dimensions(None, &vectors).is_ok());
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let long = "é".repeat(LOG_PREVIEW_CHARS + 10);
        let p = preview(&long);
        assert!(p.ends_with("..."));
        assert_eq!(p.chars().count(), LOG_PREVIEW_CHARS + 3);
        assert_eq!(preview("steel"), "steel");
    }
}
