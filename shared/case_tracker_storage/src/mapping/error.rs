//! Error types for record <-> item conversion

use thiserror::Error;

use super::CaseTrackerAttribute;
use crate::key::RecordKind;
use crate::model::InvalidEnumValue;

/// Result type alias for mapping operations
pub type MappingResult<T> = Result<T, MappingError>;

/// Failure to convert between a domain record and a storage item
///
/// Decode errors carry the index of the offending item within the batch.
#[derive(Debug, Error)]
pub enum MappingError {
    /// Record could not be encoded into an item
    #[error("Failed to marshal {kind} record: {source}")]
    Marshal {
        /// Kind of the record being encoded
        kind: RecordKind,
        /// Underlying serializer error
        source: serde_dynamo::Error,
    },

    /// A required attribute is absent or not of the expected type
    #[error("Item {index}: attribute `{attribute}` is missing or not a string")]
    MissingAttribute {
        /// Position of the item in the batch
        index: usize,
        /// The attribute that could not be read
        attribute: CaseTrackerAttribute,
    },

    /// A key does not carry the prefix of any known record kind
    #[error("Item {index}: key `{key}` does not belong to a known record kind")]
    UnknownKey {
        /// Position of the item in the batch
        index: usize,
        /// The offending key value
        key: String,
    },

    /// Item attributes could not be decoded into the record
    #[error("Item {index}: failed to unmarshal {kind} record: {source}")]
    Unmarshal {
        /// Position of the item in the batch
        index: usize,
        /// Kind the item was classified as
        kind: RecordKind,
        /// Underlying deserializer error
        source: serde_dynamo::Error,
    },

    /// Stored gender code is not a valid gender
    #[error("Item {index}: {source}")]
    InvalidGender {
        /// Position of the item in the batch
        index: usize,
        /// Rejected gender value
        source: InvalidEnumValue,
    },
}
