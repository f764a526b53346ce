//! Drives a full ingestion run against a [`GraphStore`].

use std::path::Path;
use std::sync::Arc;

use embedding::EmbeddingService;
use graph_store::{CypherStatement, GraphStore};
use supply_core::{Result, SupplyError};
use tracing::{debug, info, instrument};

use crate::records::{read_nodes, read_relationships, NodeLabel};
use crate::statements;

/// Descriptions embedded per embedding request.
pub const EMBED_BATCH_SIZE: usize = 64;

/// What one run wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub constraints: usize,
    pub nodes: usize,
    pub relationships: usize,
    /// Suppliers that received an embedding in this run.
    pub embedded: usize,
}

pub struct Ingestor {
    store: Arc<dyn GraphStore>,
    embedding: Arc<dyn EmbeddingService>,
}

impl Ingestor {
    pub fn new(store: Arc<dyn GraphStore>, embedding: Arc<dyn EmbeddingService>) -> Self {
        Self { store, embedding }
    }

    /// Constraints, nodes, relationships, then the vector index and missing embeddings.
    #[instrument(skip(self, nodes_csv, relationships_csv))]
    pub async fn run(
        &self,
        nodes_csv: impl AsRef<Path>,
        relationships_csv: impl AsRef<Path>,
        index_name: &str,
        dimensions: usize,
    ) -> Result<IngestReport> {
        let mut report = self.load_csv(nodes_csv, relationships_csv).await?;
        self.ensure_vector_index(index_name, dimensions).await?;
        report.embedded = self.embed_supplier_descriptions().await?;
        info!(?report, "ingestion finished");
        Ok(report)
    }

    /// Loads both files. Both are parsed before anything is written.
    pub async fn load_csv(
        &self,
        nodes_csv: impl AsRef<Path>,
        relationships_csv: impl AsRef<Path>,
    ) -> Result<IngestReport> {
        let nodes = read_nodes(nodes_csv.as_ref())?;
        let relationships = read_relationships(relationships_csv.as_ref())?;
        info!(
            nodes = nodes.len(),
            relationships = relationships.len(),
            "read ingestion files"
        );

        let mut report = IngestReport::default();
        for label in NodeLabel::CONSTRAINED {
            self.write(&statements::unique_id_constraint(label)).await?;
            report.constraints += 1;
        }
        for node in &nodes {
            self.write(&statements::node_upsert(node)?).await?;
            report.nodes += 1;
        }
        for rel in &relationships {
            self.write(&statements::relationship_upsert(rel)?).await?;
            report.relationships += 1;
        }
        Ok(report)
    }

    pub async fn ensure_vector_index(&self, index_name: &str, dimensions: usize) -> Result<()> {
        if dimensions == 0 {
            return Err(SupplyError::Ingest(
                "vector index dimensions must be positive".into(),
            ));
        }
        self.write(&statements::vector_index(index_name, dimensions))
            .await?;
        info!(index_name, dimensions, "vector index ensured");
        Ok(())
    }

    /// Embeds descriptions of suppliers that have none yet. Returns how many were updated.
    pub async fn embed_supplier_descriptions(&self) -> Result<usize> {
        let rows = self
            .store
            .query(&statements::suppliers_missing_embedding())
            .await
            .map_err(SupplyError::graph)?;

        let pending: Vec<(String, String)> = rows
            .iter()
            .filter_map(|row| {
                let id = row.get("id")?.as_str()?;
                let description = row.get("description")?.as_str()?;
                Some((id.to_string(), description.to_string()))
            })
            .collect();
        if pending.is_empty() {
            debug!("all supplier descriptions already embedded");
            return Ok(0);
        }

        let mut updated = 0;
        for batch in pending.chunks(EMBED_BATCH_SIZE) {
            let texts: Vec<String> = batch.iter().map(|(_, d)| d.clone()).collect();
            let vectors = self
                .embedding
                .embed_batch(&texts)
                .await
                .map_err(SupplyError::embedding)?;
            if vectors.len() != batch.len() {
                return Err(SupplyError::Embedding(format!(
                    "expected {} embeddings, got {}",
                    batch.len(),
                    vectors.len()
                )));
            }
            for ((id, _), vector) in batch.iter().zip(vectors) {
                self.write(&statements::set_supplier_embedding(id, vector))
                    .await?;
                updated += 1;
            }
            info!(updated, total = pending.len(), "embedded supplier descriptions");
        }
        Ok(updated)
    }

    async fn write(&self, statement: &CypherStatement) -> Result<()> {
        debug!(statement = %statement.text(), params = %statement.params_for_log(), "write");
        self.store.run(statement).await.map_err(SupplyError::graph)
    }
}
