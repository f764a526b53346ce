//! Neo4j implementation of [`GraphStore`] over `neo4rs`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use neo4rs::{BoltType, ConfigBuilder, Graph, Query};
use tracing::debug;

use crate::{CypherStatement, GraphConfig, GraphStore, ParamValue, Record};

/// Client for the supply-chain graph. Cheap to clone; the pool is shared.
#[derive(Clone)]
pub struct Neo4jStore {
    graph: Graph,
}

impl Neo4jStore {
    /// Opens the connection pool and pings the server.
    ///
    /// `Graph::connect` only builds the pool; the `RETURN 1` forces a real Bolt handshake so an
    /// unreachable server fails here instead of on the first user query.
    pub async fn connect(config: &GraphConfig) -> Result<Self> {
        let mut builder = ConfigBuilder::default()
            .uri(config.uri.as_str())
            .user(config.user.as_str())
            .password(config.password.as_str())
            .max_connections(config.max_connections);
        if let Some(db) = config.database.as_deref() {
            builder = builder.db(db);
        }
        let neo4j_config = builder.build().context("Failed to build Neo4j config")?;

        let graph = Graph::connect(neo4j_config)
            .await
            .context("Failed to create Neo4j connection pool")?;

        graph
            .run(Query::new("RETURN 1".to_string()))
            .await
            .context("Neo4j is not responding to queries")?;

        Ok(Self { graph })
    }
}

fn to_bolt(value: &ParamValue) -> BoltType {
    match value {
        ParamValue::Int(v) => BoltType::from(*v),
        ParamValue::Text(v) => BoltType::from(v.clone()),
        ParamValue::Vector(v) => {
            BoltType::from(v.iter().map(|x| f64::from(*x)).collect::<Vec<f64>>())
        }
    }
}

fn to_query(statement: &CypherStatement) -> Query {
    statement
        .params()
        .iter()
        .fold(Query::new(statement.text().to_string()), |q, (name, value)| {
            q.param(name, to_bolt(value))
        })
}

#[async_trait]
impl GraphStore for Neo4jStore {
    async fn query(&self, statement: &CypherStatement) -> Result<Vec<Record>> {
        let mut stream = self
            .graph
            .execute(to_query(statement))
            .await
            .context("Neo4j query failed")?;

        let mut records = Vec::new();
        while let Some(row) = stream.next().await.context("Neo4j row fetch failed")? {
            let mut record = Record::new();
            for column in statement.columns() {
                let value: serde_json::Value = row
                    .get(column)
                    .with_context(|| format!("Failed to read column '{}'", column))?;
                record.insert(column.clone(), value);
            }
            records.push(record);
        }
        debug!(rows = records.len(), "Neo4j query returned");
        Ok(records)
    }

    async fn run(&self, statement: &CypherStatement) -> Result<()> {
        self.graph
            .run(to_query(statement))
            .await
            .context("Neo4j statement execution failed")
    }
}
