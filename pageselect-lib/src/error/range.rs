//! Range selection error types

use super::FetchError;

/// Errors returned by [`RangeSelector::select_first_n`](crate::RangeSelector::select_first_n).
///
/// Whenever one of these is returned the selection set is unchanged.
#[derive(Debug, thiserror::Error)]
pub enum RangeError {
    /// Fetching page `page` failed.
    #[error("failed to fetch page {page}: {source}")]
    Fetch {
        page: u32,
        #[source]
        source: FetchError,
    },

    /// The owning context was torn down before the selection was committed.
    #[error("range selection cancelled")]
    Cancelled,

    /// The requested count is outside the accepted range.
    #[error("number should be between 1 and {max}, got {requested}")]
    OutOfRange { requested: u32, max: u32 },
}
