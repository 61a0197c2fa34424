//! Error types for table operations

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::{put_item::PutItemError, query::QueryError, scan::ScanError};
use thiserror::Error;

/// Result type alias for table operations
pub type ItemStoreResult<T> = Result<T, ItemStoreError>;

/// Errors returned by the table client
#[derive(Debug, Error)]
pub enum ItemStoreError {
    /// Failed to scan the table
    #[error("Failed to scan DynamoDB table: {0}")]
    DynamoDbScanError(#[from] SdkError<ScanError>),

    /// Failed to query the table
    #[error("Failed to query DynamoDB table: {0}")]
    DynamoDbQueryError(#[from] SdkError<QueryError>),

    /// Failed to put an item
    #[error("Failed to put item into DynamoDB: {0}")]
    DynamoDbPutError(#[from] SdkError<PutItemError>),
}
