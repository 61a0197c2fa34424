use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_dynamodb::{
    types::{AttributeValue, ReturnConsumedCapacity, ReturnValue},
    Client as DynamoDbClient,
};

use super::{Item, ItemStore, ItemStoreResult, PutOutcome};
use crate::mapping::CaseTrackerAttribute;

/// `DynamoDB` backed table
pub struct DynamoItemStore {
    dynamodb_client: Arc<DynamoDbClient>,
    table_name: String,
}

impl DynamoItemStore {
    /// Creates a new table handle
    ///
    /// # Arguments
    ///
    /// * `dynamodb_client` - Pre-configured `DynamoDB` client
    /// * `table_name` - Name of the shared case tracker table
    #[must_use]
    pub const fn new(dynamodb_client: Arc<DynamoDbClient>, table_name: String) -> Self {
        Self {
            dynamodb_client,
            table_name,
        }
    }
}

#[async_trait]
impl ItemStore for DynamoItemStore {
    async fn scan(&self) -> ItemStoreResult<Vec<Item>> {
        let response = self
            .dynamodb_client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await?;

        if response.last_evaluated_key().is_some() {
            tracing::warn!(
                table = %self.table_name,
                "Scan returned a partial result, later pages are not fetched"
            );
        }

        Ok(response.items.unwrap_or_default())
    }

    async fn query(
        &self,
        partition_key: &str,
        sort_key_prefix: &str,
    ) -> ItemStoreResult<Vec<Item>> {
        let response = self
            .dynamodb_client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("#pk = :pk AND begins_with(#sk, :sk_prefix)")
            .expression_attribute_names("#pk", CaseTrackerAttribute::PartitionKey.to_string())
            .expression_attribute_names("#sk", CaseTrackerAttribute::SortKey.to_string())
            .expression_attribute_values(":pk", AttributeValue::S(partition_key.to_string()))
            .expression_attribute_values(
                ":sk_prefix",
                AttributeValue::S(sort_key_prefix.to_string()),
            )
            .send()
            .await?;

        if response.last_evaluated_key().is_some() {
            tracing::warn!(
                table = %self.table_name,
                partition_key,
                "Query returned a partial result, later pages are not fetched"
            );
        }

        Ok(response.items.unwrap_or_default())
    }

    async fn put_item(&self, item: Item) -> ItemStoreResult<PutOutcome> {
        // No condition expression: last writer wins.
        let response = self
            .dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .return_consumed_capacity(ReturnConsumedCapacity::Total)
            .return_values(ReturnValue::AllOld)
            .send()
            .await?;

        Ok(PutOutcome {
            consumed_capacity: response
                .consumed_capacity()
                .and_then(|capacity| capacity.capacity_units()),
            replaced_existing: response
                .attributes()
                .is_some_and(|attributes| !attributes.is_empty()),
        })
    }
}
