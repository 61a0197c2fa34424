//! Conversion between domain records and storage items
//!
//! Every kind is encoded through [`Record`], and decoding classifies an item by
//! the prefix of its sort key before handing it to the matching kind. Attribute
//! names are fixed by [`CaseTrackerAttribute`] and do not follow the Rust field
//! names of the domain structs.

mod error;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use strum::Display;

pub use error::{MappingError, MappingResult};

use crate::item_store::Item;
use crate::key::RecordKind;
use crate::model::{Gender, Inmate, InmateAttempt, InmateConfirm};

/// Attribute names of the case tracker table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum CaseTrackerAttribute {
    /// Partition key, a namespaced inmate id for every kind
    PartitionKey,
    /// Sort key, whose prefix identifies the record kind
    SortKey,
    /// Inmate last name
    InmateLastName,
    /// Inmate gender code
    InmateGender,
    /// RFC 3339 creation timestamp of history records
    CreationDateAndTime,
    /// Attempt reason
    Reason,
    /// Attempt counter
    Attempts,
}

/// A record of any kind stored in the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// Inmate identity
    Inmate(Inmate),
    /// Contact attempt
    Attempt(InmateAttempt),
    /// Confirmation
    Confirm(InmateConfirm),
}

impl Record {
    /// Kind of this record
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::Inmate(_) => RecordKind::Inmate,
            Self::Attempt(_) => RecordKind::InmateAttempt,
            Self::Confirm(_) => RecordKind::InmateConfirm,
        }
    }

    /// Encodes the record into a storage item
    ///
    /// # Errors
    ///
    /// Returns `MappingError::Marshal` if serialization fails
    pub fn to_item(&self) -> MappingResult<Item> {
        match self {
            Self::Inmate(inmate) => inmate.to_item(),
            Self::Attempt(attempt) => attempt.to_item(),
            Self::Confirm(confirm) => confirm.to_item(),
        }
    }

    /// Decodes an item of any kind
    ///
    /// # Errors
    ///
    /// Returns `MappingError` if the item cannot be classified or decoded
    pub fn from_item(index: usize, item: Item) -> MappingResult<Self> {
        match record_kind(index, &item)? {
            RecordKind::Inmate => Inmate::from_item(index, item).map(Self::Inmate),
            RecordKind::InmateAttempt => InmateAttempt::from_item(index, item).map(Self::Attempt),
            RecordKind::InmateConfirm => InmateConfirm::from_item(index, item).map(Self::Confirm),
        }
    }
}

impl From<Inmate> for Record {
    fn from(inmate: Inmate) -> Self {
        Self::Inmate(inmate)
    }
}

impl From<InmateAttempt> for Record {
    fn from(attempt: InmateAttempt) -> Self {
        Self::Attempt(attempt)
    }
}

impl From<InmateConfirm> for Record {
    fn from(confirm: InmateConfirm) -> Self {
        Self::Confirm(confirm)
    }
}

/// A domain record with a fixed kind and a storage encoding
pub trait StoredRecord: Sized {
    /// Kind of every value of this type
    const KIND: RecordKind;

    /// Encodes the record into a storage item
    ///
    /// # Errors
    ///
    /// Returns `MappingError::Marshal` if serialization fails
    fn to_item(&self) -> MappingResult<Item>;

    /// Decodes an item already classified as `Self::KIND`
    ///
    /// # Errors
    ///
    /// Returns `MappingError` if an attribute is missing, mistyped or invalid
    fn from_item(index: usize, item: Item) -> MappingResult<Self>;
}

/// Classifies an item by the prefix of its sort key
///
/// # Errors
///
/// Returns `MappingError` if the sort key is missing or has no known prefix
pub fn record_kind(index: usize, item: &Item) -> MappingResult<RecordKind> {
    let sort_key = string_attribute(index, item, CaseTrackerAttribute::SortKey)?;

    RecordKind::parse_key(sort_key)
        .map(|(kind, _)| kind)
        .ok_or_else(|| MappingError::UnknownKey {
            index,
            key: sort_key.to_string(),
        })
}

/// Decodes every item of kind `R`, skipping items of the other kinds
///
/// Either the whole batch decodes or the first failure is returned.
///
/// # Errors
///
/// Returns `MappingError` for the first item that cannot be classified or decoded
pub fn from_items<R: StoredRecord>(items: Vec<Item>) -> MappingResult<Vec<R>> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match record_kind(index, &item) {
            Ok(kind) if kind == R::KIND => Some(R::from_item(index, item)),
            Ok(_) => None,
            Err(err) => Some(Err(err)),
        })
        .collect()
}

fn string_attribute(
    index: usize,
    item: &Item,
    attribute: CaseTrackerAttribute,
) -> MappingResult<&str> {
    item.get(attribute.to_string().as_str())
        .and_then(|value| value.as_s().ok())
        .map(String::as_str)
        .ok_or(MappingError::MissingAttribute { index, attribute })
}

fn encode<T: Serialize>(kind: RecordKind, row: &T) -> MappingResult<Item> {
    serde_dynamo::to_item(row).map_err(|source| MappingError::Marshal { kind, source })
}

fn decode<T: DeserializeOwned>(
    index: usize,
    kind: RecordKind,
    item: Item,
) -> MappingResult<T> {
    serde_dynamo::from_item(item).map_err(|source| MappingError::Unmarshal {
        index,
        kind,
        source,
    })
}

// Field names below must match `CaseTrackerAttribute`.

#[derive(Serialize, Deserialize)]
struct InmateItem {
    partition_key: String,
    sort_key: String,
    inmate_last_name: String,
    inmate_gender: u8,
}

#[derive(Serialize, Deserialize)]
struct AttemptItem {
    partition_key: String,
    sort_key: String,
    creation_date_and_time: DateTime<Utc>,
    reason: String,
    attempts: i8,
}

#[derive(Serialize, Deserialize)]
struct ConfirmItem {
    partition_key: String,
    sort_key: String,
    creation_date_and_time: DateTime<Utc>,
}

impl StoredRecord for Inmate {
    const KIND: RecordKind = RecordKind::Inmate;

    fn to_item(&self) -> MappingResult<Item> {
        let key = self.key();
        encode(
            Self::KIND,
            &InmateItem {
                partition_key: key.clone(),
                sort_key: key,
                inmate_last_name: self.last_name.clone(),
                inmate_gender: self.gender.code(),
            },
        )
    }

    fn from_item(index: usize, item: Item) -> MappingResult<Self> {
        let row: InmateItem = decode(index, Self::KIND, item)?;

        let id = match Self::KIND.strip_key(&row.partition_key) {
            Some(id) => id.to_string(),
            None => {
                return Err(MappingError::UnknownKey {
                    index,
                    key: row.partition_key.clone(),
                })
            }
        };

        let gender = Gender::try_from(row.inmate_gender)
            .map_err(|source| MappingError::InvalidGender { index, source })?;

        Ok(Self {
            id,
            last_name: row.inmate_last_name,
            gender,
        })
    }
}

impl StoredRecord for InmateAttempt {
    const KIND: RecordKind = RecordKind::InmateAttempt;

    fn to_item(&self) -> MappingResult<Item> {
        encode(
            Self::KIND,
            &AttemptItem {
                partition_key: self.inmate_id.clone(),
                sort_key: self.id.clone(),
                creation_date_and_time: self.creation,
                reason: self.reason.clone(),
                attempts: self.attempts,
            },
        )
    }

    fn from_item(index: usize, item: Item) -> MappingResult<Self> {
        let row: AttemptItem = decode(index, Self::KIND, item)?;

        Ok(Self {
            inmate_id: row.partition_key,
            id: row.sort_key,
            creation: row.creation_date_and_time,
            reason: row.reason,
            attempts: row.attempts,
        })
    }
}

impl StoredRecord for InmateConfirm {
    const KIND: RecordKind = RecordKind::InmateConfirm;

    fn to_item(&self) -> MappingResult<Item> {
        encode(
            Self::KIND,
            &ConfirmItem {
                partition_key: self.inmate_id.clone(),
                sort_key: self.id.clone(),
                creation_date_and_time: self.creation,
            },
        )
    }

    fn from_item(index: usize, item: Item) -> MappingResult<Self> {
        let row: ConfirmItem = decode(index, Self::KIND, item)?;

        Ok(Self {
            inmate_id: row.partition_key,
            id: row.sort_key,
            creation: row.creation_date_and_time,
        })
    }
}
