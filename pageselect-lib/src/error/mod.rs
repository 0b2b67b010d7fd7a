//! Error types

mod fetch;
mod range;
mod storage;

pub use fetch::*;
pub use range::*;
pub use storage::*;
