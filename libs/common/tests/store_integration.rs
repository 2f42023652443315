//! Integration tests for the storage primitives
//!
//! These tests verify that the in-memory tables and indexes behave like the
//! abstract storage layer the services are built on.

use common::store::{Index, Table};

/// Test that verifies a table and an index can perform the basic operations
/// the repositories rely on
#[tokio::test]
async fn test_store_integration() -> Result<(), Box<dyn std::error::Error>> {
    // Append-ordered table with atomic id assignment under one write guard
    let table: Table<(i64, String)> = Table::new();

    {
        let mut rows = table.write().await;
        let next_id = rows.iter().map(|(id, _)| *id).max().unwrap_or(0) + 1;
        rows.push((next_id, "first".to_string()));
    }

    let rows = table.snapshot().await;
    assert_eq!(rows.len(), 1, "Table append failed");
    assert_eq!(rows[0].0, 1, "First id must be seeded at 1");

    // Keyed index with SET/GET/DELETE semantics
    let index: Index<String, String> = Index::new();

    let test_key = "integration_test_key";
    let test_value = "integration_test_value";

    index.insert(test_key.to_string(), test_value.to_string()).await;

    let retrieved_value = index.get(test_key).await;
    assert_eq!(
        retrieved_value,
        Some(test_value.to_string()),
        "Index insert/get test failed"
    );

    // Removal is idempotent: the second call reports nothing was removed
    assert!(index.remove(test_key).await, "Index remove failed");
    assert!(!index.remove(test_key).await, "Index remove must be a no-op");

    let retrieved_value = index.get(test_key).await;
    assert_eq!(retrieved_value, None, "Index delete operation failed");

    Ok(())
}
