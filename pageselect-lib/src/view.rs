//! Listing view state: the page on screen and the select-all checkbox.

use std::sync::Arc;

use crate::config::SelectionConfig;
use crate::error::FetchError;
use crate::error::RangeError;
use crate::fetch::PageFetcher;
use crate::model::PaginationState;
use crate::model::Record;
use crate::model::RecordId;
use crate::selection::RangeOutcome;
use crate::selection::RangeSelector;
use crate::selection::SelectionStore;

/// State of the "select all on this page" checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectAllState {
    #[default]
    Unchecked,
    Checked,
}

impl SelectAllState {
    pub fn is_checked(self) -> bool {
        self == Self::Checked
    }
}

impl From<bool> for SelectAllState {
    fn from(checked: bool) -> Self {
        if checked { Self::Checked } else { Self::Unchecked }
    }
}

/// What a UI layer drives: the current page, pagination, per-row selection
/// and the select-all checkbox.
///
/// Changing page resets the select-all checkbox to unchecked but leaves the
/// selection itself alone. Dropping the view cancels any range selection
/// still running on a clone of its selector.
pub struct ListingView {
    config: SelectionConfig,
    store: Arc<SelectionStore>,
    selector: RangeSelector,
    pagination: PaginationState,
    records: Vec<Record>,
    select_all: SelectAllState,
}

impl ListingView {
    /// Creates a view with no page loaded yet.
    pub fn new(store: Arc<SelectionStore>, config: SelectionConfig) -> Self {
        let selector = RangeSelector::new(store.clone());
        let pagination = PaginationState::new(config.page_size);
        Self {
            config,
            store,
            selector,
            pagination,
            records: Vec::new(),
            select_all: SelectAllState::Unchecked,
        }
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<SelectionStore> {
        &self.store
    }

    pub fn selector(&self) -> &RangeSelector {
        &self.selector
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    /// Records of the page on screen.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn select_all_state(&self) -> SelectAllState {
        self.select_all
    }

    /// Fetches and shows `page`.
    ///
    /// On failure the previously shown page stays in place.
    pub async fn load_page(
        &mut self,
        page: u32,
        fetcher: &dyn PageFetcher,
    ) -> Result<(), FetchError> {
        let page = page.max(1);
        let fetched = fetcher.fetch_page(page).await?;

        self.pagination.set_current_page(page);
        self.pagination.set_total_records(fetched.total_records());
        self.records = fetched.into_records();
        self.select_all = SelectAllState::Unchecked;

        log::debug!(
            "showing page {} of {} ({} records)",
            page,
            self.pagination.page_count(),
            self.records.len()
        );
        Ok(())
    }

    /// Returns `true` if the row with `id` is selected.
    pub fn is_row_selected(&self, id: RecordId) -> bool {
        self.store.is_selected(id)
    }

    /// Rows of the current page paired with their selected state.
    pub fn rows(&self) -> impl Iterator<Item = (&Record, bool)> + '_ {
        self.records
            .iter()
            .map(|record| (record, self.store.is_selected(record.id)))
    }

    /// Handles a single row checkbox.
    pub async fn toggle_row(&self, id: RecordId, checked: bool) {
        self.store.set_selected(id, checked).await;
    }

    /// Handles the select-all checkbox: (de)selects every row on the current
    /// page with one persistence write.
    pub async fn toggle_select_all(&mut self, checked: bool) {
        let ids: Vec<RecordId> = self.records.iter().map(|r| r.id).collect();
        self.store.set_selected_many(ids, checked).await;
        self.select_all = checked.into();
    }

    /// Handles a "select first N" submission.
    ///
    /// `n` is checked against the configured range before anything happens.
    pub async fn select_first(
        &self,
        n: u32,
        fetcher: &dyn PageFetcher,
    ) -> Result<RangeOutcome, RangeError> {
        let n = self.config.validate_range(n)?;
        self.selector
            .select_first_n(
                n as usize,
                &self.records,
                self.pagination.current_page(),
                self.config.page_size,
                fetcher,
            )
            .await
    }
}

impl Drop for ListingView {
    fn drop(&mut self) {
        self.selector.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Page;
    use crate::storage::MemoryStorage;
    use async_trait::async_trait;

    struct TwoPages;

    #[async_trait]
    impl PageFetcher for TwoPages {
        async fn fetch_page(&self, page: u32) -> Result<Page, FetchError> {
            match page {
                1 => Ok(Page::new(1, (1..=12).map(Record::new).collect(), 20)),
                2 => Ok(Page::new(2, (13..=20).map(Record::new).collect(), 20)),
                _ => Err(FetchError::http(404, "no such page")),
            }
        }
    }

    async fn view() -> ListingView {
        let store = SelectionStore::open(Arc::new(MemoryStorage::new()), "k").await;
        ListingView::new(Arc::new(store), SelectionConfig::default())
    }

    #[tokio::test]
    async fn test_page_change_resets_select_all_only() {
        let mut view = view().await;
        view.load_page(1, &TwoPages).await.unwrap();
        view.toggle_select_all(true).await;
        assert!(view.select_all_state().is_checked());

        view.load_page(2, &TwoPages).await.unwrap();
        assert_eq!(view.select_all_state(), SelectAllState::Unchecked);
        assert_eq!(view.store().len(), 12);
        assert!(view.rows().all(|(_, selected)| !selected));
    }

    #[tokio::test]
    async fn test_failed_load_keeps_current_page() {
        let mut view = view().await;
        view.load_page(2, &TwoPages).await.unwrap();
        assert!(view.load_page(3, &TwoPages).await.is_err());
        assert_eq!(view.pagination().current_page(), 2);
        assert_eq!(view.records().len(), 8);
    }

    #[tokio::test]
    async fn test_select_first_rejects_out_of_range() {
        let mut view = view().await;
        view.load_page(1, &TwoPages).await.unwrap();

        assert!(matches!(
            view.select_first(0, &TwoPages).await,
            Err(RangeError::OutOfRange { .. })
        ));
        assert!(matches!(
            view.select_first(1000, &TwoPages).await,
            Err(RangeError::OutOfRange { .. })
        ));
        assert!(view.store().is_empty());
    }

    #[tokio::test]
    async fn test_select_first_spans_pages() {
        let mut view = view().await;
        view.load_page(1, &TwoPages).await.unwrap();

        let outcome = view.select_first(15, &TwoPages).await.unwrap();
        assert_eq!(outcome.selected, (1..=15).collect::<Vec<_>>());
        assert_eq!(outcome.pages_fetched, 1);
        assert!(!outcome.exhausted);
        assert!(view.is_row_selected(15));
        assert!(!view.is_row_selected(16));
    }

    #[tokio::test]
    async fn test_dropping_view_cancels_selector_clones() {
        let view = view().await;
        let selector = view.selector().clone();
        drop(view);
        assert!(selector.cancellation_token().is_cancelled());
    }
}
