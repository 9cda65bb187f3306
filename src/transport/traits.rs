//! Transport trait and types

use crate::config::MAX_PAGE_SIZE;
use crate::error::TransportError;
use crate::query::Query;
use async_trait::async_trait;

/// A backend user record exactly as returned by the search API
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// Fetches single pages of search results from a backend
///
/// Implementations return at most `per_page` records in backend relevance
/// order. Pages are 1-indexed.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// Short backend name, e.g. `github`; prefixed to log lines
    fn name(&self) -> &str;

    /// Fetch one page of raw records for `query`
    async fn fetch_page(
        &self,
        query: &Query,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RawRecord>, TransportError>;
}

#[async_trait]
impl<T: SearchTransport + ?Sized> SearchTransport for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn fetch_page(
        &self,
        query: &Query,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RawRecord>, TransportError> {
        (**self).fetch_page(query, page, per_page).await
    }
}

/// Reject page coordinates the search API would not accept
pub fn check_page_bounds(page: u32, per_page: u32) -> Result<(), TransportError> {
    if page == 0 {
        return Err(TransportError::InvalidRequest(
            "page index starts at 1".to_string(),
        ));
    }
    if per_page == 0 || per_page > MAX_PAGE_SIZE {
        return Err(TransportError::InvalidRequest(format!(
            "per_page must be between 1 and {}, got {}",
            MAX_PAGE_SIZE, per_page
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::FakeTransport;
    use std::sync::Arc;

    #[test]
    fn test_shared_transport_keeps_name() {
        let fake = Arc::new(FakeTransport::with_users(1));
        assert_eq!(fake.name(), "fake");
        assert_eq!(SearchTransport::name(&fake), "fake");
    }

    #[test]
    fn test_page_bounds() {
        assert!(check_page_bounds(1, 1).is_ok());
        assert!(check_page_bounds(10, 100).is_ok());
        assert!(check_page_bounds(0, 10).is_err());
        assert!(check_page_bounds(1, 0).is_err());
        assert!(check_page_bounds(1, 101).is_err());
    }
}
