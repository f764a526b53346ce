mod common;

use common::RecordingStore;
use serde_json::json;
use supply_tools::{run_supplier_count_query, GroupingKey, SupplierCountInput};

/// **Test: Count query returns the store rows unchanged**
#[tokio::test]
async fn test_count_returns_rows() {
    let store = RecordingStore::with_responses(vec![json!([{ "supplier_count": 12 }])]);

    let rows = run_supplier_count_query(&store, &SupplierCountInput::default())
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["supplier_count"], 12);
    assert_eq!(store.recorded().len(), 1);
}

/// **Test: Grouped count runs one statement with the grouping column**
#[tokio::test]
async fn test_grouped_count_statement() {
    let store = RecordingStore::with_responses(vec![json!([
        { "location": "Berlin", "supplier_count": 2 },
        { "location": "Lyon", "supplier_count": 1 }
    ])]);

    let input = SupplierCountInput {
        min_supply_amount: Some(100),
        max_supply_amount: None,
        grouping_key: Some(GroupingKey::Location),
    };
    let rows = run_supplier_count_query(&store, &input).await.unwrap();

    assert_eq!(rows.len(), 2);
    let statement = &store.recorded()[0];
    assert!(statement
        .text()
        .ends_with("RETURN t.location AS location, count(t) AS supplier_count"));
    assert_eq!(statement.params().len(), 1);
}

/// **Test: No bounds means no WHERE clause for every grouping choice**
#[tokio::test]
async fn test_no_bounds_no_where() {
    for grouping_key in [None, Some(GroupingKey::SupplyCapacity), Some(GroupingKey::Location)] {
        let store = RecordingStore::default();
        let input = SupplierCountInput {
            grouping_key,
            ..Default::default()
        };
        run_supplier_count_query(&store, &input).await.unwrap();

        let statement = &store.recorded()[0];
        assert!(!statement.text().contains("WHERE"));
        assert!(statement.params().is_empty());
    }
}
