//! Page type for the paginated listing.

use super::Record;
use super::RecordId;

/// Number of records per page of the remote listing.
pub const PAGE_SIZE: usize = 12;

/// One page of the remote listing.
///
/// Pages are numbered from 1. Every page except the last holds exactly
/// the listing's page size; the last one may be shorter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    number: u32,
    records: Vec<Record>,
    total_records: usize,
}

impl Page {
    /// Creates a page.
    pub fn new(number: u32, records: Vec<Record>, total_records: usize) -> Self {
        Self {
            number,
            records,
            total_records,
        }
    }

    /// Returns the 1-based page number.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Returns the records on this page, in listing order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consumes the page and returns the records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Returns the ids on this page, in listing order.
    pub fn ids(&self) -> Vec<RecordId> {
        self.records.iter().map(|r| r.id).collect()
    }

    /// Total number of records in the whole dataset, as reported by the remote.
    pub fn total_records(&self) -> usize {
        self.total_records
    }

    /// Returns `true` if this page has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records on this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
