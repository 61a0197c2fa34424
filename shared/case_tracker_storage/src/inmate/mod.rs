//! Inmate records and their attempt history
//!
//! [`InmateStorage`] is the only component allowed to call the table. It maps
//! records through [`crate::mapping`], turns store and mapping failures into
//! [`InmateStorageError`] and reports metrics through [`InmateMetrics`].

mod error;

use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;

pub use error::{InmateStorageError, InmateStorageResult};

use crate::item_store::{ItemStore, PutOutcome};
use crate::key::RecordKind;
use crate::mapping::{from_items, Record};
use crate::metrics::InmateMetrics;
use crate::model::{inmate_key, Inmate, InmateAttempt};

/// Service for inmate and attempt records in the shared table
pub struct InmateStorage {
    item_store: Arc<dyn ItemStore>,
    metrics: Arc<dyn InmateMetrics>,
}

impl InmateStorage {
    /// Creates a new storage service
    ///
    /// # Arguments
    ///
    /// * `item_store` - Shared table handle
    /// * `metrics` - Sink for request counts, write capacity and write errors
    #[must_use]
    pub fn new(item_store: Arc<dyn ItemStore>, metrics: Arc<dyn InmateMetrics>) -> Self {
        Self {
            item_store,
            metrics,
        }
    }

    /// Lists every inmate in the table
    ///
    /// Issues one unpaginated scan; items of other kinds are skipped.
    ///
    /// # Errors
    ///
    /// Returns `ScanFailed` if the scan fails, or `DecodeFailed` if any inmate
    /// item cannot be decoded
    #[instrument(skip(self))]
    pub async fn list_inmates(&self) -> InmateStorageResult<Vec<Inmate>> {
        self.metrics.record_request("list_inmates");

        let items = self.item_store.scan().await.map_err(|err| {
            tracing::error!(error = %err, "Failed to scan table");
            InmateStorageError::ScanFailed(err)
        })?;

        from_items(items).map_err(|err| {
            tracing::error!(error = %err, "Failed to unmarshal inmates");
            InmateStorageError::DecodeFailed(err)
        })
    }

    /// Writes an inmate, replacing any inmate with the same id
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a blank id, `EncodeFailed` if the record
    /// cannot be encoded, or `WriteFailed` if the put fails
    #[instrument(skip(self, inmate), fields(inmate_id = %inmate.id))]
    pub async fn put_inmate(&self, inmate: &Inmate) -> InmateStorageResult<()> {
        self.metrics.record_request("put_inmate");

        if inmate.id.trim().is_empty() {
            return Err(InmateStorageError::InvalidArgument(
                "inmate id cannot be empty",
            ));
        }

        self.put_record(Record::from(inmate.clone())).await?;
        tracing::info!("Successfully added inmate");

        Ok(())
    }

    /// Records a contact attempt against an inmate
    ///
    /// `inmate_id` may be raw or namespaced. The inmate is not required to exist,
    /// but the raw part must not be blank.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a blank id, `EncodeFailed` if the record
    /// cannot be encoded, or `WriteFailed` if the put fails
    #[instrument(skip(self, reason))]
    pub async fn record_attempt(
        &self,
        inmate_id: &str,
        reason: &str,
        attempts: i8,
    ) -> InmateStorageResult<InmateAttempt> {
        self.metrics.record_request("record_attempt");

        if is_blank_inmate_id(inmate_id) {
            return Err(InmateStorageError::InvalidArgument(
                "inmate id cannot be empty",
            ));
        }

        let attempt = InmateAttempt {
            inmate_id: inmate_key(inmate_id),
            id: RecordKind::InmateAttempt.build_key(&uuid::Uuid::new_v4().to_string()),
            creation: Utc::now(),
            reason: reason.to_string(),
            attempts,
        };

        self.put_record(Record::from(attempt.clone())).await?;
        tracing::info!(attempt_id = %attempt.id, "Successfully recorded attempt");

        Ok(attempt)
    }

    /// Lists the attempts recorded against an inmate, oldest first
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a blank id without calling the store,
    /// `QueryFailed` if the query fails, or `DecodeFailed` if any attempt
    /// item cannot be decoded
    #[instrument(skip(self))]
    pub async fn list_attempts(&self, inmate_id: &str) -> InmateStorageResult<Vec<InmateAttempt>> {
        self.metrics.record_request("list_attempts");

        if is_blank_inmate_id(inmate_id) {
            return Err(InmateStorageError::InvalidArgument(
                "inmate id cannot be empty",
            ));
        }

        let partition_key = inmate_key(inmate_id);
        let items = self
            .item_store
            .query(&partition_key, RecordKind::InmateAttempt.prefix())
            .await
            .map_err(|err| {
                tracing::error!(error = %err, partition_key = %partition_key, "Failed to query attempts");
                InmateStorageError::QueryFailed(err)
            })?;

        let mut attempts: Vec<InmateAttempt> = from_items(items).map_err(|err| {
            tracing::error!(error = %err, partition_key = %partition_key, "Failed to unmarshal attempts");
            InmateStorageError::DecodeFailed(err)
        })?;
        attempts.sort_by_key(|attempt| attempt.creation);

        Ok(attempts)
    }

    async fn put_record(&self, record: Record) -> InmateStorageResult<PutOutcome> {
        let kind = record.kind();

        let item = record.to_item().map_err(|err| {
            tracing::error!(record_kind = %kind, error = %err, record = ?record, "Failed to marshal record");
            InmateStorageError::EncodeFailed(err)
        })?;

        match self.item_store.put_item(item.clone()).await {
            Ok(outcome) => {
                if let Some(units) = outcome.consumed_capacity {
                    tracing::info!(record_kind = %kind, write_capacity = units, "Consumed write capacity");
                    self.metrics.record_write_capacity(kind, units);
                }
                if outcome.replaced_existing {
                    tracing::debug!(record_kind = %kind, "Replaced existing item");
                }
                Ok(outcome)
            }
            Err(err) => {
                self.metrics.record_write_error(kind);
                tracing::error!(record_kind = %kind, error = %err, item = ?item, "Failed to put item");
                Err(InmateStorageError::WriteFailed(err))
            }
        }
    }
}

/// True when the raw part of a raw or namespaced inmate id is blank
fn is_blank_inmate_id(inmate_id: &str) -> bool {
    RecordKind::Inmate
        .strip_key(inmate_id)
        .unwrap_or(inmate_id)
        .trim()
        .is_empty()
}
