//! `supplier-list`: find suppliers by description similarity or list them by capacity.
//!
//! A non-blank description with no capacity bounds goes through the vector index and returns
//! the `k` closest documents. Otherwise a filtered listing is built; when a description is
//! present there too, its embedding orders the rows by cosine similarity.

use embedding::EmbeddingService;
use graph_store::{CypherStatement, GraphStore, Record};
use serde::Serialize;
use supply_core::{Result, SupplyError};

use crate::args::{SortKey, SupplierListInput};
use crate::exec::run_logged;
use crate::filter::CapacityBounds;

/// Similarity searches return this many documents unless the caller asks otherwise.
pub const DEFAULT_K: usize = 4;

/// Largest `k` a similarity search accepts.
pub const MAX_K: usize = 1000;

/// Row cap of the filtered listing.
pub const FILTERED_LIMIT: i64 = 100;

/// What [`run_supplier_list_query`] will do for a given input.
#[derive(Debug, Clone, PartialEq)]
pub enum ListPlan {
    /// Vector index search on the description.
    Similarity { description: String, k: usize },
    /// Filtered listing. `embed_description` is set when the statement still needs
    /// `$embedding` bound to the description's vector.
    Filtered {
        statement: CypherStatement,
        embed_description: Option<String>,
    },
}

/// One similarity search hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarDocument {
    pub page_content: String,
    pub metadata: Record,
    pub score: f64,
}

impl SimilarDocument {
    fn from_record(record: &Record) -> Self {
        Self {
            page_content: record
                .get("text")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            metadata: record
                .get("metadata")
                .and_then(|v| v.as_object())
                .cloned()
                .unwrap_or_default(),
            score: record.get("score").and_then(|v| v.as_f64()).unwrap_or(0.0),
        }
    }
}

/// Result of `supplier-list`. Serializes as a bare JSON array of either shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ListOutcome {
    Documents(Vec<SimilarDocument>),
    Rows(Vec<Record>),
}

impl ListOutcome {
    pub fn len(&self) -> usize {
        match self {
            ListOutcome::Documents(docs) => docs.len(),
            ListOutcome::Rows(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decides between the similarity path and the filtered listing.
pub fn plan_list_query(input: &SupplierListInput) -> ListPlan {
    let description = input.description();

    if let (Some(description), false) = (description, input.has_capacity_bounds()) {
        return ListPlan::Similarity {
            description: description.to_string(),
            k: input.k(),
        };
    }

    let bounds = CapacityBounds::new(input.min_supply_amount, input.max_supply_amount);

    let order_by = match (description, input.sort_key()) {
        (Some(_), _) => "vector.similarity.cosine(t.embedding, $embedding) DESC",
        (None, SortKey::SupplyCapacity) => "t.supply_capacity DESC",
    };

    let text = format!(
        "MATCH (t:Supplier) {where_clause}\
         RETURN t.name AS name, t.location AS location, t.description AS description, \
         t.supply_capacity AS supply_capacity \
         ORDER BY {order_by} LIMIT toInteger($limit)",
        where_clause = bounds.where_clause(),
    );

    let statement = bounds
        .bind(CypherStatement::new(text))
        .with_param("limit", FILTERED_LIMIT)
        .returning(["name", "location", "description", "supply_capacity"]);

    ListPlan::Filtered {
        statement,
        embed_description: description.map(str::to_string),
    }
}

/// Nearest-neighbour query against the named vector index.
pub fn build_similarity_query(index_name: &str, embedding: Vec<f32>, k: usize) -> CypherStatement {
    CypherStatement::new(
        "CALL db.index.vector.queryNodes($index_name, $k, $embedding) YIELD node, score \
         RETURN node.description AS text, score, \
         node {.name, .location, .supply_capacity} AS metadata",
    )
    .with_param("index_name", index_name)
    .with_param("k", i64::try_from(k).unwrap_or(i64::MAX))
    .with_param("embedding", embedding)
    .returning(["text", "score", "metadata"])
}

/// Plans, embeds when needed, and runs the listing.
pub async fn run_supplier_list_query(
    store: &dyn GraphStore,
    embedding: &dyn EmbeddingService,
    index_name: &str,
    input: &SupplierListInput,
) -> Result<ListOutcome> {
    match plan_list_query(input) {
        ListPlan::Similarity { description, k } => {
            let vector = embedding
                .embed(&description)
                .await
                .map_err(SupplyError::embedding)?;
            let statement = build_similarity_query(index_name, vector, k);
            let rows = run_logged(store, &statement).await?;
            Ok(ListOutcome::Documents(
                rows.iter().map(SimilarDocument::from_record).collect(),
            ))
        }
        ListPlan::Filtered {
            mut statement,
            embed_description,
        } => {
            if let Some(description) = embed_description {
                let vector = embedding
                    .embed(&description)
                    .await
                    .map_err(SupplyError::embedding)?;
                statement = statement.with_param("embedding", vector);
            }
            Ok(ListOutcome::Rows(run_logged(store, &statement).await?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_store::ParamValue;

    fn filtered(plan: ListPlan) -> (CypherStatement, Option<String>) {
        match plan {
            ListPlan::Filtered {
                statement,
                embed_description,
            } => (statement, embed_description),
            other => panic!("expected filtered plan, got {:?}", other),
        }
    }

    #[test]
    fn description_only_uses_similarity_with_k() {
        let plan = plan_list_query(&SupplierListInput {
            description: Some("organic cotton".into()),
            k: Some(7),
            ..Default::default()
        });
        assert_eq!(
            plan,
            ListPlan::Similarity {
                description: "organic cotton".into(),
                k: 7
            }
        );
    }

    #[test]
    fn bounds_alone_sort_by_capacity() {
        let (stmt, embed) = filtered(plan_list_query(&SupplierListInput {
            min_supply_amount: Some(500),
            ..Default::default()
        }));
        assert!(embed.is_none());
        assert!(stmt.text().contains("WHERE t.supply_capacity >= $min_supply_amount "));
        assert!(stmt.text().contains("ORDER BY t.supply_capacity DESC"));
        assert!(stmt.text().ends_with("LIMIT toInteger($limit)"));
        assert_eq!(stmt.param("limit"), Some(&ParamValue::Int(100)));
        assert!(stmt.param("embedding").is_none());
    }

    #[test]
    fn description_with_bounds_orders_by_cosine() {
        let (stmt, embed) = filtered(plan_list_query(&SupplierListInput {
            description: Some("steel".into()),
            max_supply_amount: Some(10),
            ..Default::default()
        }));
        assert_eq!(embed.as_deref(), Some("steel"));
        assert!(stmt
            .text()
            .contains("ORDER BY vector.similarity.cosine(t.embedding, $embedding) DESC"));
    }

    #[test]
    fn empty_input_lists_everything_by_capacity() {
        let (stmt, _) = filtered(plan_list_query(&SupplierListInput::default()));
        assert!(stmt.text().starts_with("MATCH (t:Supplier) RETURN t.name AS name"));
        assert_eq!(
            stmt.columns(),
            ["name", "location", "description", "supply_capacity"]
        );
    }

    #[test]
    fn similarity_query_binds_index_and_k() {
        let stmt = build_similarity_query("supply_chain", vec![0.5, 0.25], 3);
        assert_eq!(
            stmt.param("index_name"),
            Some(&ParamValue::Text("supply_chain".into()))
        );
        assert_eq!(stmt.param("k"), Some(&ParamValue::Int(3)));
        assert_eq!(stmt.columns(), ["text", "score", "metadata"]);
    }

    #[test]
    fn similarity_k_never_wraps_negative() {
        let stmt = build_similarity_query("supply_chain", vec![], usize::MAX);
        assert_eq!(stmt.param("k"), Some(&ParamValue::Int(i64::MAX)));
    }

    #[test]
    fn documents_tolerate_missing_fields() {
        let record = serde_json::json!({ "text": null, "score": 0.9 });
        let doc = SimilarDocument::from_record(record.as_object().unwrap());
        assert_eq!(doc.page_content, "");
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.score, 0.9);
    }
}
