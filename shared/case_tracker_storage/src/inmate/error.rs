//! Error types for inmate storage operations

use thiserror::Error;

use crate::item_store::ItemStoreError;
use crate::mapping::MappingError;

/// Result type alias for inmate storage operations
pub type InmateStorageResult<T> = Result<T, InmateStorageError>;

/// Errors returned by [`super::InmateStorage`]
///
/// Store and mapping failures are wrapped so callers never handle SDK errors directly.
#[derive(Debug, Error)]
pub enum InmateStorageError {
    /// Caller input rejected before any store call
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Record could not be encoded into a storage item
    #[error("Failed to encode record: {0}")]
    EncodeFailed(#[source] MappingError),

    /// Stored items could not be decoded
    #[error("Failed to decode stored items: {0}")]
    DecodeFailed(#[source] MappingError),

    /// Full-table scan failed
    #[error("Failed to scan table: {0}")]
    ScanFailed(#[source] ItemStoreError),

    /// Partition query failed
    #[error("Failed to query table: {0}")]
    QueryFailed(#[source] ItemStoreError),

    /// Put failed
    #[error("Failed to write item: {0}")]
    WriteFailed(#[source] ItemStoreError),
}
