//! Page fetch capability

use async_trait::async_trait;

use crate::error::FetchError;
use crate::model::Page;

/// Fetches one page of the remote listing by its 1-based number.
///
/// Implementations own transport concerns such as retries; callers only see
/// a page or a [`FetchError`].
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<Page, FetchError>;
}
