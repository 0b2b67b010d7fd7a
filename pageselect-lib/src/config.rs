//! Selection configuration

use crate::error::RangeError;
use crate::model::PAGE_SIZE;

/// Settings shared by the selection store, range selector and listing view.
///
/// # Example
///
/// ```
/// use pageselect_lib::SelectionConfig;
///
/// let config = SelectionConfig::default()
///     .with_page_size(20)
///     .with_storage_key("picked");
/// assert_eq!(config.page_size, 20);
/// ```
#[derive(Debug, Clone)]
pub struct SelectionConfig {
    /// Records per page of the remote listing.
    ///
    /// Default: 12
    pub page_size: usize,

    /// Largest count accepted by "select first N".
    ///
    /// Default: 999
    pub max_range: u32,

    /// Key the selection snapshot is stored under.
    ///
    /// Default: `"selectedRows"`
    pub storage_key: String,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            max_range: 999,
            storage_key: "selectedRows".to_string(),
        }
    }
}

impl SelectionConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size. Zero is treated as one.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Sets the largest accepted range count.
    pub fn with_max_range(mut self, max_range: u32) -> Self {
        self.max_range = max_range;
        self
    }

    /// Sets the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Checks a user-entered "select first N" count against `1..=max_range`.
    pub fn validate_range(&self, n: u32) -> Result<u32, RangeError> {
        if n == 0 || n > self.max_range {
            return Err(RangeError::OutOfRange {
                requested: n,
                max: self.max_range,
            });
        }
        Ok(n)
    }
}
