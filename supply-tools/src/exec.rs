//! Logged execution of read queries.

use graph_store::{CypherStatement, GraphStore, Record};
use supply_core::{Result, SupplyError};
use tracing::info;

/// Runs `statement`, logging it before execution and the raw rows after.
pub(crate) async fn run_logged(
    store: &dyn GraphStore,
    statement: &CypherStatement,
) -> Result<Vec<Record>> {
    info!(statement = %statement.text(), "STATEMENT");
    info!(params = %statement.params_for_log(), "PARAMS");

    let rows = store.query(statement).await.map_err(SupplyError::graph)?;

    let response = serde_json::Value::Array(
        rows.iter()
            .cloned()
            .map(serde_json::Value::Object)
            .collect(),
    );
    info!(rows = rows.len(), response = %response, "RESPONSE");
    Ok(rows)
}
