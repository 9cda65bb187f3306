//! Search orchestration module
//!
//! Splits a request for N users into sequential backend pages and joins
//! the pages back into one ordered result set.

mod executor;
mod models;

pub use executor::{PagePlan, PageSpec, PaginatedSearcher};
pub use models::*;
