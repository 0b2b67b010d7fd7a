//! "Select first N" across pages.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::SelectionStore;
use crate::error::RangeError;
use crate::fetch::PageFetcher;
use crate::model::Record;
use crate::model::RecordId;

/// Result of a committed range selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeOutcome {
    /// Ids that were selected, in listing order.
    pub selected: Vec<RecordId>,
    /// Number of extra pages fetched to resolve them.
    pub pages_fetched: usize,
    /// `true` if the dataset ran out before `n` ids were found.
    pub exhausted: bool,
}

/// Selects the first N records counted from the first record of the page on
/// screen, fetching following pages when N is larger than that page.
///
/// Clones share the store and the cancellation token. Once the token is
/// cancelled, in-flight and future calls return [`RangeError::Cancelled`]
/// without touching the selection.
#[derive(Clone)]
pub struct RangeSelector {
    store: Arc<SelectionStore>,
    cancel: CancellationToken,
}

impl RangeSelector {
    /// Creates a selector committing into `store`.
    pub fn new(store: Arc<SelectionStore>) -> Self {
        Self::with_cancellation(store, CancellationToken::new())
    }

    /// Creates a selector bound to an existing cancellation token.
    pub fn with_cancellation(store: Arc<SelectionStore>, cancel: CancellationToken) -> Self {
        Self { store, cancel }
    }

    pub fn store(&self) -> &Arc<SelectionStore> {
        &self.store
    }

    /// Returns the token that marks the owning context as torn down.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Cancels every in-flight and future range selection of this selector.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Selects the first `n` records starting at `current_page_data`.
    ///
    /// When `n` fits in the current page no fetch is made. Otherwise pages
    /// `current_page + 1 ..= current_page + ceil(n / page_size) - 1` are
    /// fetched one after another, stopping early once the dataset runs out.
    /// The resolved ids are committed with a single
    /// [`set_selected_many`](SelectionStore::set_selected_many) call.
    ///
    /// On a fetch failure or cancellation nothing is selected.
    pub async fn select_first_n(
        &self,
        n: usize,
        current_page_data: &[Record],
        current_page: u32,
        page_size: usize,
        fetcher: &dyn PageFetcher,
    ) -> Result<RangeOutcome, RangeError> {
        if self.cancel.is_cancelled() {
            return Err(RangeError::Cancelled);
        }
        if n == 0 {
            return Ok(RangeOutcome::default());
        }

        let page_size = page_size.max(1);
        let mut buffer: Vec<RecordId> = current_page_data.iter().map(|r| r.id).collect();
        let mut pages_fetched = 0;

        if n > buffer.len() {
            let pages_needed = n.div_ceil(page_size);
            let first_index = (current_page.max(1) as usize - 1).saturating_mul(page_size);

            for offset in 1..pages_needed {
                if buffer.len() >= n {
                    break;
                }
                let Some(number) = u32::try_from(offset)
                    .ok()
                    .and_then(|offset| current_page.checked_add(offset))
                else {
                    break;
                };

                log::debug!("range selection fetching page {}", number);
                let page = tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => return Err(RangeError::Cancelled),
                    result = fetcher.fetch_page(number) => {
                        result.map_err(|source| RangeError::Fetch { page: number, source })?
                    }
                };
                pages_fetched += 1;

                let total = page.total_records();
                let short = page.len() < page_size;
                buffer.extend(page.records().iter().map(|r| r.id));

                // A zero total means the remote did not report one.
                if short || (total > 0 && first_index + buffer.len() >= total) {
                    break;
                }
            }
        }

        // Checked again after the last await.
        if self.cancel.is_cancelled() {
            return Err(RangeError::Cancelled);
        }

        let exhausted = buffer.len() < n;
        buffer.truncate(n);
        self.store.set_selected_many(buffer.iter().copied(), true).await;

        log::info!(
            "range selection committed {} of {} requested ids ({} pages fetched)",
            buffer.len(),
            n,
            pages_fetched
        );

        Ok(RangeOutcome {
            selected: buffer,
            pages_fetched,
            exhausted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::model::Page;
    use crate::storage::MemoryStorage;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Serves `total` records with ids `1..=total`.
    struct Dataset {
        total: u64,
        page_size: u64,
        calls: Mutex<Vec<u32>>,
    }

    impl Dataset {
        fn new(total: u64) -> Self {
            Self {
                total,
                page_size: 12,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn page(&self, number: u32) -> Page {
            let start = (number as u64 - 1) * self.page_size + 1;
            let end = (start + self.page_size - 1).min(self.total);
            let records = (start..=end).map(Record::new).collect();
            Page::new(number, records, self.total as usize)
        }

        fn calls(&self) -> Vec<u32> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for Dataset {
        async fn fetch_page(&self, page: u32) -> Result<Page, FetchError> {
            self.calls.lock().unwrap().push(page);
            Ok(self.page(page))
        }
    }

    /// Never resolves.
    struct Hanging;

    #[async_trait]
    impl PageFetcher for Hanging {
        async fn fetch_page(&self, _page: u32) -> Result<Page, FetchError> {
            std::future::pending().await
        }
    }

    async fn selector() -> RangeSelector {
        let store = SelectionStore::open(Arc::new(MemoryStorage::new()), "k").await;
        RangeSelector::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_zero_is_a_no_op() {
        let selector = selector().await;
        let data = Dataset::new(100);
        let outcome = selector
            .select_first_n(0, data.page(1).records(), 1, 12, &data)
            .await
            .unwrap();
        assert!(outcome.selected.is_empty());
        assert!(data.calls().is_empty());
        assert!(selector.store().is_empty());
    }

    #[tokio::test]
    async fn test_counts_from_current_page() {
        let selector = selector().await;
        let data = Dataset::new(100);
        let outcome = selector
            .select_first_n(14, data.page(3).records(), 3, 12, &data)
            .await
            .unwrap();

        assert_eq!(data.calls(), vec![4]);
        assert_eq!(outcome.selected, (25..=38).collect::<Vec<_>>());
        assert!(!selector.store().is_selected(1));
    }

    #[tokio::test]
    async fn test_stops_when_dataset_runs_out() {
        let selector = selector().await;
        let data = Dataset::new(30);
        let outcome = selector
            .select_first_n(60, data.page(1).records(), 1, 12, &data)
            .await
            .unwrap();

        // Page 3 holds 6 records and is the last one.
        assert_eq!(data.calls(), vec![2, 3]);
        assert_eq!(outcome.selected.len(), 30);
        assert!(outcome.exhausted);
        assert_eq!(selector.store().len(), 30);
    }

    #[tokio::test]
    async fn test_short_current_page_selects_what_is_there() {
        let selector = selector().await;
        let data = Dataset::new(30);
        let outcome = selector
            .select_first_n(10, data.page(3).records(), 3, 12, &data)
            .await
            .unwrap();

        assert!(data.calls().is_empty());
        assert_eq!(outcome.selected, (25..=30).collect::<Vec<_>>());
        assert!(outcome.exhausted);
    }

    #[tokio::test]
    async fn test_huge_page_size_does_not_overflow() {
        let selector = selector().await;
        let data = Dataset::new(100);
        let outcome = selector
            .select_first_n(5, &[], 3, usize::MAX, &data)
            .await
            .unwrap();

        assert!(data.calls().is_empty());
        assert!(outcome.selected.is_empty());
        assert!(outcome.exhausted);
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let selector = selector().await;
        let data = Dataset::new(100);
        selector.cancel();

        let result = selector
            .select_first_n(3, data.page(1).records(), 1, 12, &data)
            .await;
        assert!(matches!(result, Err(RangeError::Cancelled)));
        assert!(selector.store().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_discards_in_flight_fetch() {
        let selector = selector().await;
        let current: Vec<Record> = (1..=12).map(Record::new).collect();

        let task = {
            let selector = selector.clone();
            async move {
                selector
                    .select_first_n(20, &current, 1, 12, &Hanging)
                    .await
            }
        };
        let cancel = async {
            tokio::task::yield_now().await;
            selector.cancel();
        };

        let (result, ()) = tokio::join!(task, cancel);
        assert!(matches!(result, Err(RangeError::Cancelled)));
        assert!(selector.store().is_empty());
    }
}
