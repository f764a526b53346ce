//! # supply-ingest
//!
//! One-shot load of the node and relationship CSVs into the graph, plus the vector index and
//! description embeddings the similarity search relies on. Every write is a `MERGE` or an
//! `IF NOT EXISTS`, so running it again over the same files changes nothing.

mod ingestor;
mod records;
pub mod statements;

pub use ingestor::{IngestReport, Ingestor, EMBED_BATCH_SIZE};
pub use records::{read_nodes, read_relationships, NodeLabel, NodeRecord, RelationshipRecord};
