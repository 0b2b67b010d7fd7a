//! Cross-page record selection
//!
//! Tracks which records of a paginated remote listing are selected, including
//! selections that span pages never loaded at the same time.

pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod model;
pub mod selection;
pub mod storage;
pub mod view;

pub use config::SelectionConfig;
pub use fetch::PageFetcher;
pub use selection::RangeSelector;
pub use selection::SelectionSet;
pub use selection::SelectionStore;
pub use view::ListingView;
