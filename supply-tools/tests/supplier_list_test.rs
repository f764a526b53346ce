mod common;

use common::{FakeEmbedding, RecordingStore};
use graph_store::ParamValue;
use serde_json::json;
use supply_tools::{run_supplier_list_query, ListOutcome, SupplierListInput};

/// **Test: Description without bounds goes through the vector index**
#[tokio::test]
async fn test_similarity_path() {
    let store = RecordingStore::with_responses(vec![json!([{
        "text": "Organic cotton grower",
        "score": 0.93,
        "metadata": { "name": "CottonCo", "location": "Izmir", "supply_capacity": 800 }
    }])]);
    let embedding = FakeEmbedding::default();

    let input = SupplierListInput {
        description: Some("cotton".into()),
        ..Default::default()
    };
    let outcome = run_supplier_list_query(&store, &embedding, "supply_chain", &input)
        .await
        .unwrap();

    let ListOutcome::Documents(docs) = outcome else {
        panic!("expected documents");
    };
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].page_content, "Organic cotton grower");
    assert_eq!(docs[0].metadata["name"], "CottonCo");

    assert_eq!(embedding.embedded(), vec!["cotton".to_string()]);
    let statement = &store.recorded()[0];
    assert!(statement.text().starts_with("CALL db.index.vector.queryNodes"));
    assert_eq!(statement.param("k"), Some(&ParamValue::Int(4)));
    assert_eq!(
        statement.param("embedding"),
        Some(&ParamValue::Vector(FakeEmbedding::VECTOR.to_vec()))
    );
}

/// **Test: Bounds without description never touch the embedder**
#[tokio::test]
async fn test_filtered_path_without_description() {
    let store = RecordingStore::with_responses(vec![json!([
        { "name": "A", "location": "X", "description": "a", "supply_capacity": 900 }
    ])]);
    let embedding = FakeEmbedding::default();

    let input = SupplierListInput {
        min_supply_amount: Some(500),
        max_supply_amount: Some(1000),
        ..Default::default()
    };
    let outcome = run_supplier_list_query(&store, &embedding, "supply_chain", &input)
        .await
        .unwrap();

    assert!(matches!(outcome, ListOutcome::Rows(ref rows) if rows.len() == 1));
    assert!(embedding.embedded().is_empty());
    let statement = &store.recorded()[0];
    assert!(statement.text().contains("ORDER BY t.supply_capacity DESC"));
    assert_eq!(statement.param("limit"), Some(&ParamValue::Int(100)));
}

/// **Test: Description plus bounds embeds once and binds the vector**
#[tokio::test]
async fn test_filtered_path_with_description() {
    let store = RecordingStore::default();
    let embedding = FakeEmbedding::default();

    let input = SupplierListInput {
        description: Some("  electronics ".into()),
        min_supply_amount: Some(0),
        ..Default::default()
    };
    run_supplier_list_query(&store, &embedding, "supply_chain", &input)
        .await
        .unwrap();

    assert_eq!(embedding.embedded(), vec!["electronics".to_string()]);
    let statement = &store.recorded()[0];
    assert!(statement
        .text()
        .contains("vector.similarity.cosine(t.embedding, $embedding) DESC"));
    assert!(statement.param("embedding").is_some());
    assert_eq!(statement.param("min_supply_amount"), Some(&ParamValue::Int(0)));
}

/// **Test: Both outcome shapes serialize as plain arrays**
#[tokio::test]
async fn test_outcome_serializes_untagged() {
    let store = RecordingStore::with_responses(vec![json!([{ "name": "A" }])]);
    let embedding = FakeEmbedding::default();

    let outcome = run_supplier_list_query(&store, &embedding, "idx", &SupplierListInput::default())
        .await
        .unwrap();

    assert_eq!(serde_json::to_value(&outcome).unwrap(), json!([{ "name": "A" }]));
}
