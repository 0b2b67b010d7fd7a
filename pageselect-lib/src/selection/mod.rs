//! Cross-page selection engine

mod range;
mod set;
mod store;

pub use range::RangeOutcome;
pub use range::RangeSelector;
pub use set::SelectionSet;
pub use store::SelectionStore;
