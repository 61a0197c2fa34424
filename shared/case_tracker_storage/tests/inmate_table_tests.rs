use std::sync::Arc;
use std::time::Duration;

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType,
    ScalarAttributeType,
};
use aws_sdk_dynamodb::Client as DynamoDbClient;
use case_tracker_storage::inmate::{InmateStorage, InmateStorageError};
use case_tracker_storage::item_store::{DynamoItemStore, ItemStore};
use case_tracker_storage::key::RecordKind;
use case_tracker_storage::mapping::{CaseTrackerAttribute, Record};
use case_tracker_storage::metrics::RecordingMetrics;
use case_tracker_storage::model::{Gender, Inmate, InmateConfirm};
use chrono::Utc;
use pretty_assertions::assert_eq;
use tokio::time::sleep;
use uuid::Uuid;

/// Test configuration for LocalStack
const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";
const TEST_REGION: &str = "us-east-1";

/// Test context that automatically cleans up the table on drop
struct TestContext {
    storage: InmateStorage,
    item_store: Arc<DynamoItemStore>,
    metrics: Arc<RecordingMetrics>,
    table_name: String,
    dynamodb_client: Arc<DynamoDbClient>,
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let client = self.dynamodb_client.clone();
        let table = self.table_name.clone();

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                let _ = client.delete_table().table_name(&table).send().await;
            });
        }
    }
}

fn key_element(attribute: CaseTrackerAttribute, key_type: KeyType) -> KeySchemaElement {
    KeySchemaElement::builder()
        .attribute_name(attribute.to_string())
        .key_type(key_type)
        .build()
        .expect("Failed to build key schema")
}

fn string_definition(attribute: CaseTrackerAttribute) -> AttributeDefinition {
    AttributeDefinition::builder()
        .attribute_name(attribute.to_string())
        .attribute_type(ScalarAttributeType::S)
        .build()
        .expect("Failed to build attribute definition")
}

/// Creates a test setup with a unique table
async fn setup_test() -> TestContext {
    let table_name = format!("test-case-tracker-{}", Uuid::new_v4());

    let credentials = Credentials::from_keys("test", "test", None);
    let config = aws_config::defaults(BehaviorVersion::latest())
        .endpoint_url(LOCALSTACK_ENDPOINT)
        .region(Region::new(TEST_REGION))
        .credentials_provider(credentials)
        .load()
        .await;

    let dynamodb_client = Arc::new(DynamoDbClient::new(&config));

    dynamodb_client
        .create_table()
        .table_name(&table_name)
        .billing_mode(BillingMode::PayPerRequest)
        .key_schema(key_element(CaseTrackerAttribute::PartitionKey, KeyType::Hash))
        .key_schema(key_element(CaseTrackerAttribute::SortKey, KeyType::Range))
        .attribute_definitions(string_definition(CaseTrackerAttribute::PartitionKey))
        .attribute_definitions(string_definition(CaseTrackerAttribute::SortKey))
        .send()
        .await
        .expect("Failed to create test table");

    // Wait for table to be ready
    sleep(Duration::from_millis(100)).await;

    let item_store = Arc::new(DynamoItemStore::new(
        dynamodb_client.clone(),
        table_name.clone(),
    ));
    let metrics = Arc::new(RecordingMetrics::new());
    let storage = InmateStorage::new(item_store.clone(), metrics.clone());

    TestContext {
        storage,
        item_store,
        metrics,
        table_name,
        dynamodb_client,
    }
}

#[tokio::test]
#[ignore = "requires LocalStack on localhost:4566"]
async fn test_put_and_list_inmates() {
    let ctx = setup_test().await;
    let first = Inmate::new("1", "Doe", Gender::Female);
    let second = Inmate::new("i#2", "Roe", Gender::Male);

    ctx.storage.put_inmate(&first).await.expect("Failed to put inmate");
    ctx.storage.put_inmate(&second).await.expect("Failed to put inmate");

    let mut inmates = ctx.storage.list_inmates().await.expect("Failed to list inmates");
    inmates.sort_by(|a, b| a.id.cmp(&b.id));

    assert_eq!(inmates, vec![first, second]);
    assert_eq!(ctx.metrics.write_capacity().len(), 2);
}

#[tokio::test]
#[ignore = "requires LocalStack on localhost:4566"]
async fn test_put_inmate_replaces_existing() {
    let ctx = setup_test().await;

    ctx.storage
        .put_inmate(&Inmate::new("5", "Doe", Gender::Female))
        .await
        .expect("Failed to put inmate");
    ctx.storage
        .put_inmate(&Inmate::new("5", "Smith", Gender::Female))
        .await
        .expect("Failed to put inmate");

    let inmates = ctx.storage.list_inmates().await.expect("Failed to list inmates");
    assert_eq!(inmates, vec![Inmate::new("5", "Smith", Gender::Female)]);
}

#[tokio::test]
#[ignore = "requires LocalStack on localhost:4566"]
async fn test_stored_inmate_item_layout() {
    let ctx = setup_test().await;

    ctx.storage
        .put_inmate(&Inmate::new("9", "Brown", Gender::Male))
        .await
        .expect("Failed to put inmate");

    let items = ctx.item_store.scan().await.expect("Failed to scan");
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0].get("partition_key"),
        Some(&AttributeValue::S("i#9".to_string()))
    );
    assert_eq!(
        items[0].get("sort_key"),
        Some(&AttributeValue::S("i#9".to_string()))
    );
    assert_eq!(
        items[0].get("inmate_gender"),
        Some(&AttributeValue::N("1".to_string()))
    );
}

#[tokio::test]
#[ignore = "requires LocalStack on localhost:4566"]
async fn test_record_and_list_attempts() {
    let ctx = setup_test().await;

    ctx.storage
        .put_inmate(&Inmate::new("7", "Smith", Gender::Male))
        .await
        .expect("Failed to put inmate");
    let recorded = ctx
        .storage
        .record_attempt("i#7", "no-answer", 3)
        .await
        .expect("Failed to record attempt");
    ctx.storage
        .record_attempt("i#8", "busy", 1)
        .await
        .expect("Failed to record attempt");

    let attempts = ctx
        .storage
        .list_attempts("i#7")
        .await
        .expect("Failed to list attempts");

    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].id, recorded.id);
    assert_eq!(attempts[0].reason, "no-answer");
    assert_eq!(attempts[0].attempts, 3);
}

#[tokio::test]
#[ignore = "requires LocalStack on localhost:4566"]
async fn test_list_attempts_skips_confirmations() {
    let ctx = setup_test().await;

    let confirm = InmateConfirm {
        inmate_id: "i#7".to_string(),
        id: RecordKind::InmateConfirm.build_key(&Uuid::new_v4().to_string()),
        creation: Utc::now(),
    };
    let item = Record::from(confirm).to_item().expect("Failed to encode");
    ctx.item_store.put_item(item).await.expect("Failed to put item");

    let attempts = ctx
        .storage
        .list_attempts("7")
        .await
        .expect("Failed to list attempts");
    assert!(attempts.is_empty());

    let inmates = ctx.storage.list_inmates().await.expect("Failed to list inmates");
    assert!(inmates.is_empty());
}

#[tokio::test]
#[ignore = "requires LocalStack on localhost:4566"]
async fn test_missing_table_reports_scan_failure() {
    let ctx = setup_test().await;
    let storage = InmateStorage::new(
        Arc::new(DynamoItemStore::new(
            ctx.dynamodb_client.clone(),
            format!("missing-{}", Uuid::new_v4()),
        )),
        ctx.metrics.clone(),
    );

    let err = storage.list_inmates().await.unwrap_err();
    assert!(matches!(err, InmateStorageError::ScanFailed(_)));

    let err = storage
        .put_inmate(&Inmate::new("1", "Doe", Gender::Female))
        .await
        .unwrap_err();
    assert!(matches!(err, InmateStorageError::WriteFailed(_)));
    assert_eq!(ctx.metrics.write_errors(), vec![RecordKind::Inmate]);
}
