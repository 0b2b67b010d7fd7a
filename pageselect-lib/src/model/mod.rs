//! Data model types

mod page;
mod pagination;
mod record;

pub use page::*;
pub use pagination::*;
pub use record::*;
