//! Pagination state

/// Which page is on screen and how large the dataset is.
///
/// `total_records` comes from the remote listing; `current_page` is local
/// state and always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    current_page: u32,
    total_records: usize,
    page_size: usize,
}

impl PaginationState {
    /// Creates pagination state on page 1 with an unknown (zero) total.
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            total_records: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_records(&self) -> usize {
        self.total_records
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Moves to `page`, clamped to 1.
    pub fn set_current_page(&mut self, page: u32) {
        self.current_page = page.max(1);
    }

    pub fn set_total_records(&mut self, total: usize) {
        self.total_records = total;
    }

    /// Number of pages needed to show every record.
    pub fn page_count(&self) -> usize {
        self.total_records.div_ceil(self.page_size)
    }

    /// Zero-based index, in the whole dataset, of the first record on the current page.
    pub fn first_index(&self) -> usize {
        (self.current_page as usize - 1).saturating_mul(self.page_size)
    }

    /// Returns `true` if a page after the current one exists.
    pub fn has_next(&self) -> bool {
        (self.current_page as usize) < self.page_count()
    }

    /// Returns `true` if the current page is not the first.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_rounds_up() {
        let mut state = PaginationState::new(12);
        assert_eq!(state.page_count(), 0);
        state.set_total_records(24);
        assert_eq!(state.page_count(), 2);
        state.set_total_records(25);
        assert_eq!(state.page_count(), 3);
    }

    #[test]
    fn test_first_index_and_navigation() {
        let mut state = PaginationState::new(12);
        state.set_total_records(30);
        assert_eq!(state.first_index(), 0);
        assert!(!state.has_previous());

        state.set_current_page(3);
        assert_eq!(state.first_index(), 24);
        assert!(state.has_previous());
        assert!(!state.has_next());
    }

    #[test]
    fn test_first_index_saturates() {
        let mut state = PaginationState::new(usize::MAX);
        state.set_current_page(3);
        assert_eq!(state.first_index(), usize::MAX);
    }

    #[test]
    fn test_current_page_never_zero() {
        let mut state = PaginationState::new(12);
        state.set_current_page(0);
        assert_eq!(state.current_page(), 1);
    }
}
