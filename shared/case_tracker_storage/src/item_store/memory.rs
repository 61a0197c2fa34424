use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use aws_sdk_dynamodb::error::SdkError;

use super::{Item, ItemStore, ItemStoreError, ItemStoreResult, PutOutcome};
use crate::mapping::CaseTrackerAttribute;

/// Write capacity reported for every successful put
pub const IN_MEMORY_WRITE_CAPACITY: f64 = 1.0;

/// In-memory table for tests
///
/// Items are keyed by `(partition_key, sort_key)`. Every trait call is counted,
/// and reads or writes can be made to fail on demand.
#[derive(Default)]
pub struct InMemoryItemStore {
    items: Mutex<BTreeMap<(String, String), Item>>,
    scan_calls: AtomicUsize,
    query_calls: AtomicUsize,
    put_calls: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryItemStore {
    /// Creates an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an item directly, bypassing call counting and failure injection
    ///
    /// Items without string key attributes are stored under empty keys.
    pub fn seed(&self, item: Item) {
        self.lock().insert(Self::key_of(&item).unwrap_or_default(), item);
    }

    /// Number of stored items
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the table holds no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of `scan` calls so far
    #[must_use]
    pub fn scan_calls(&self) -> usize {
        self.scan_calls.load(Ordering::SeqCst)
    }

    /// Number of `query` calls so far
    #[must_use]
    pub fn query_calls(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    /// Number of `put_item` calls so far
    #[must_use]
    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    /// Makes every following `scan` and `query` fail
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every following `put_item` fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<(String, String), Item>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn key_of(item: &Item) -> Option<(String, String)> {
        let string_attribute = |attribute: CaseTrackerAttribute| {
            item.get(attribute.to_string().as_str())
                .and_then(|value| value.as_s().ok())
                .cloned()
        };

        Some((
            string_attribute(CaseTrackerAttribute::PartitionKey)?,
            string_attribute(CaseTrackerAttribute::SortKey)?,
        ))
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn scan(&self) -> ItemStoreResult<Vec<Item>> {
        self.scan_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ItemStoreError::DynamoDbScanError(SdkError::construction_failure(
                "injected scan failure",
            )));
        }

        Ok(self.lock().values().cloned().collect())
    }

    async fn query(
        &self,
        partition_key: &str,
        sort_key_prefix: &str,
    ) -> ItemStoreResult<Vec<Item>> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ItemStoreError::DynamoDbQueryError(SdkError::construction_failure(
                "injected query failure",
            )));
        }

        Ok(self
            .lock()
            .iter()
            .filter(|((pk, sk), _)| pk == partition_key && sk.starts_with(sort_key_prefix))
            .map(|(_, item)| item.clone())
            .collect())
    }

    async fn put_item(&self, item: Item) -> ItemStoreResult<PutOutcome> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ItemStoreError::DynamoDbPutError(SdkError::construction_failure(
                "injected put failure",
            )));
        }

        let Some(key) = Self::key_of(&item) else {
            return Err(ItemStoreError::DynamoDbPutError(SdkError::construction_failure(
                "item is missing its key attributes",
            )));
        };

        let previous = self.lock().insert(key, item);

        Ok(PutOutcome {
            consumed_capacity: Some(IN_MEMORY_WRITE_CAPACITY),
            replaced_existing: previous.is_some(),
        })
    }
}
