//! Namespaced keys for the record kinds sharing the case tracker table
//!
//! Each kind owns a fixed prefix. No prefix is a prefix of another, so a key
//! always identifies exactly one `(kind, raw id)` pair.

use strum::{Display, EnumIter, IntoEnumIterator};

/// Marker prefixed to every inmate identifier
pub const INMATE_ID_PREFIX: &str = "i#";

/// Record kinds stored in the shared table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum RecordKind {
    /// Inmate identity record
    Inmate,
    /// Confirmation event
    InmateConfirm,
    /// Contact attempt event
    InmateAttempt,
}

impl RecordKind {
    /// Fixed key prefix of this kind
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Inmate => INMATE_ID_PREFIX,
            Self::InmateConfirm => "ic#",
            Self::InmateAttempt => "ia#",
        }
    }

    /// Builds the namespaced key for a raw identifier
    #[must_use]
    pub fn build_key(self, raw_id: &str) -> String {
        format!("{}{raw_id}", self.prefix())
    }

    /// Raw identifier of `key` if it belongs to this kind
    #[must_use]
    pub fn strip_key(self, key: &str) -> Option<&str> {
        key.strip_prefix(self.prefix())
    }

    /// Splits a namespaced key into its kind and raw identifier
    #[must_use]
    pub fn parse_key(key: &str) -> Option<(Self, &str)> {
        Self::iter().find_map(|kind| kind.strip_key(key).map(|raw| (kind, raw)))
    }
}
