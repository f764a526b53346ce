//! Neo4j connection settings.

use anyhow::{Context, Result};
use std::env;

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    /// Database name; server default when `None`.
    pub database: Option<String>,
    pub max_connections: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: String::new(),
            database: None,
            max_connections: 4,
        }
    }
}

impl GraphConfig {
    /// Load from NEO4J_URI, NEO4J_USERNAME, NEO4J_PASSWORD, NEO4J_DATABASE, NEO4J_MAX_CONNECTIONS.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let uri = env::var("NEO4J_URI").unwrap_or(defaults.uri);
        let user = env::var("NEO4J_USERNAME").unwrap_or(defaults.user);
        let password = env::var("NEO4J_PASSWORD").unwrap_or_default();
        let database = env::var("NEO4J_DATABASE").ok().filter(|s| !s.trim().is_empty());
        let max_connections = match env::var("NEO4J_MAX_CONNECTIONS") {
            Ok(s) => s
                .parse()
                .with_context(|| format!("NEO4J_MAX_CONNECTIONS is not a number: {}", s))?,
            Err(_) => defaults.max_connections,
        };
        Ok(Self {
            uri,
            user,
            password,
            database,
            max_connections,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.password.is_empty() {
            anyhow::bail!("NEO4J_PASSWORD is required");
        }
        if self.max_connections == 0 {
            anyhow::bail!("NEO4J_MAX_CONNECTIONS must be at least 1");
        }
        Ok(())
    }
}
