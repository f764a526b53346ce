//! # Graph store
//!
//! Read/write access to the property graph behind a small trait so that query builders can be
//! exercised without a database.
//!
//! - [`CypherStatement`]: query text, bound parameters and the columns it returns.
//! - [`GraphStore`]: executes statements; [`Neo4jStore`] is the Bolt implementation.
//! - [`GraphConfig`]: connection settings loaded from the environment.
//!
//! Every value that originates from user input travels as a parameter; only labels,
//! relationship types and index names from controlled sources are ever spliced into text.

mod config;
mod neo4j;
mod statement;

use async_trait::async_trait;

pub use config::GraphConfig;
pub use neo4j::Neo4jStore;
pub use statement::{quote_identifier, CypherStatement, ParamValue};

/// One result row: column name → JSON value (`null` for missing properties).
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Executes Cypher statements against a graph database.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Runs a statement and collects the declared columns of every row.
    async fn query(&self, statement: &CypherStatement) -> anyhow::Result<Vec<Record>>;

    /// Runs a statement whose result is not needed (schema changes, upserts).
    async fn run(&self, statement: &CypherStatement) -> anyhow::Result<()>;
}
