//! Record type

use serde::Deserialize;
use serde::Serialize;

/// Identifier of a record, unique within the remote dataset.
pub type RecordId = u64;

/// A single entry of the remote listing.
///
/// Only `id` matters for selection; the remaining fields are carried for
/// display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub place_of_origin: Option<String>,
    #[serde(default)]
    pub artist_display: Option<String>,
    #[serde(default)]
    pub inscriptions: Option<String>,
    #[serde(default)]
    pub date_start: Option<i64>,
    #[serde(default)]
    pub date_end: Option<i64>,
}

impl Record {
    /// Creates a record with only an id set.
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            title: None,
            place_of_origin: None,
            artist_display: None,
            inscriptions: None,
            date_start: None,
            date_end: None,
        }
    }
}
