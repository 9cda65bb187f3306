//! gh-user-search: find GitHub users by followers, repositories and language
//!
//! A single request for N users is split into as many backend pages as the
//! search API needs, fetched in order, and joined back into one ranked list.

pub mod config;
pub mod error;
pub mod network;
pub mod query;
pub mod search;
pub mod transport;

pub use config::Settings;
pub use error::{SearchError, TransportError};
pub use query::{Query, SearchCriteria};
pub use search::{PagePlan, PaginatedSearcher, ResultItem, ResultSet};
pub use transport::{GitHubTransport, SearchTransport};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of users returned when none is requested
pub const DEFAULT_NUM_RESULTS: u32 = 100;
