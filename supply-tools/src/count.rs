//! `supplier-count`: how many suppliers match, optionally grouped by an attribute.

use graph_store::{CypherStatement, GraphStore, Record};
use supply_core::Result;

use crate::args::SupplierCountInput;
use crate::exec::run_logged;
use crate::filter::CapacityBounds;

/// Builds the count query for `input`.
///
/// Without a grouping key the query returns a single `supplier_count` row; with one it returns
/// one row per distinct value of that attribute.
pub fn build_count_query(input: &SupplierCountInput) -> CypherStatement {
    let bounds = CapacityBounds::new(input.min_supply_amount, input.max_supply_amount);

    let mut text = String::from("MATCH (t:Supplier) ");
    text.push_str(&bounds.where_clause());

    let columns: Vec<&str> = match input.grouping_key {
        Some(key) => {
            let key = key.as_str();
            text.push_str(&format!(
                "RETURN t.{key} AS {key}, count(t) AS supplier_count"
            ));
            vec![key, "supplier_count"]
        }
        None => {
            text.push_str("RETURN count(t) AS supplier_count");
            vec!["supplier_count"]
        }
    };

    bounds.bind(CypherStatement::new(text)).returning(columns)
}

/// Builds and runs the count query, returning the raw rows.
pub async fn run_supplier_count_query(
    store: &dyn GraphStore,
    input: &SupplierCountInput,
) -> Result<Vec<Record>> {
    let statement = build_count_query(input);
    run_logged(store, &statement).await
}
