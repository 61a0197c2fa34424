//! Key-value table access
//!
//! [`ItemStore`] is the narrow surface the service needs from the table: a full
//! scan, a partition query and a conditionless put. [`DynamoItemStore`] backs it
//! with `DynamoDB`; the in-memory store behind the `test-utils` feature backs it
//! in tests.

mod dynamodb;
mod error;
#[cfg(any(test, feature = "test-utils"))]
mod memory;

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;

pub use dynamodb::DynamoItemStore;
pub use error::{ItemStoreError, ItemStoreResult};
#[cfg(any(test, feature = "test-utils"))]
pub use memory::InMemoryItemStore;

/// A storage item: attribute name to typed value
pub type Item = HashMap<String, AttributeValue>;

/// Result of a successful put
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PutOutcome {
    /// Write capacity units consumed, when the store reports them
    pub consumed_capacity: Option<f64>,
    /// Whether an item with the same key was overwritten
    pub replaced_existing: bool,
}

/// Table operations used by the service
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Returns every item in the table
    ///
    /// A single request is issued; results beyond the first page are not fetched.
    ///
    /// # Errors
    ///
    /// Returns `ItemStoreError` if the scan fails
    async fn scan(&self) -> ItemStoreResult<Vec<Item>>;

    /// Returns the items of one partition whose sort key starts with `sort_key_prefix`
    ///
    /// # Errors
    ///
    /// Returns `ItemStoreError` if the query fails
    async fn query(&self, partition_key: &str, sort_key_prefix: &str)
        -> ItemStoreResult<Vec<Item>>;

    /// Writes `item`, replacing any item with the same key
    ///
    /// # Errors
    ///
    /// Returns `ItemStoreError` if the put fails
    async fn put_item(&self, item: Item) -> ItemStoreResult<PutOutcome>;
}
