//! Integration tests for the infrastructure components
//!
//! These tests need a reachable MongoDB (`MONGODB_URI`) and are ignored by
//! default. Run them with `cargo test -p common -- --ignored`.

use common::{
    database::{DatabaseConfig, health_check, init_client, with_timeout},
    error::DatabaseError,
};
use mongodb::{
    IndexModel,
    bson::{Document, doc},
    options::IndexOptions,
};

/// Test that verifies MongoDB is reachable and answers basic operations
#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_infrastructure_integration() -> Result<(), Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env()?;
    let client = init_client(&config).await?;
    let database = client.database(&config.database_name);

    assert!(health_check(&database).await?, "Database health check failed");

    let collection = database.collection::<Document>("integration_test");
    collection.drop().await?;

    collection
        .create_index(
            IndexModel::builder()
                .keys(doc! { "key": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
        )
        .await?;

    with_timeout(
        config.operation_timeout,
        collection.insert_one(doc! { "key": "integration" }),
    )
    .await?;

    // A second insert with the same key must be rejected by the unique index
    let duplicate = with_timeout(
        config.operation_timeout,
        collection.insert_one(doc! { "key": "integration" }),
    )
    .await;
    assert!(
        matches!(duplicate, Err(DatabaseError::Duplicate(_))),
        "Unique index violation was not reported as a duplicate"
    );

    collection.drop().await?;
    Ok(())
}
