//! Domain records stored in the case tracker table

mod gender;

use chrono::{DateTime, Utc};

pub use gender::{parse_gender, Gender, InvalidEnumValue};

use crate::key::RecordKind;

/// An inmate record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inmate {
    /// Raw identifier, without the namespace prefix
    pub id: String,
    /// Last name
    pub last_name: String,
    /// Gender
    pub gender: Gender,
}

impl Inmate {
    /// Creates an inmate, accepting either a raw or an already namespaced id
    ///
    /// `"42"` and `"i#42"` both produce the raw id `"42"`.
    #[must_use]
    pub fn new(id: &str, last_name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: RecordKind::Inmate.strip_key(id).unwrap_or(id).to_string(),
            last_name: last_name.into(),
            gender,
        }
    }

    /// Namespaced identifier, used as the partition key and in every external representation
    #[must_use]
    pub fn key(&self) -> String {
        RecordKind::Inmate.build_key(&self.id)
    }
}

/// Namespaced inmate key for an external identifier
///
/// Identifiers that already carry the inmate prefix are returned unchanged.
#[must_use]
pub fn inmate_key(inmate_id: &str) -> String {
    match RecordKind::Inmate.strip_key(inmate_id) {
        Some(_) => inmate_id.to_string(),
        None => RecordKind::Inmate.build_key(inmate_id),
    }
}

/// One recorded contact attempt against an inmate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InmateAttempt {
    /// Namespaced id of the inmate (partition key)
    pub inmate_id: String,
    /// Namespaced attempt id (sort key)
    pub id: String,
    /// When the attempt was recorded
    pub creation: DateTime<Utc>,
    /// Free text reason
    pub reason: String,
    /// Attempt counter
    pub attempts: i8,
}

/// A confirmation event against an inmate
///
/// Mapped like the other kinds so scans can classify these items, but nothing
/// writes or reads confirmations yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InmateConfirm {
    /// Namespaced id of the inmate (partition key)
    pub inmate_id: String,
    /// Namespaced confirmation id (sort key)
    pub id: String,
    /// When the confirmation was recorded
    pub creation: DateTime<Utc>,
}
