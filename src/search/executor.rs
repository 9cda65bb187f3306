//! Paginated search execution

use super::models::{project, ResultSet};
use crate::config::{SearchSettings, MAX_PAGE_SIZE};
use crate::error::Result;
use crate::query::{Query, SearchCriteria};
use crate::transport::SearchTransport;

/// GitHub search never serves more than this many results for one query
const PREALLOCATE_LIMIT: usize = 1000;

/// One page request within a [`PagePlan`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    /// 1-based page index
    pub index: u32,
    /// Page size sent to the backend
    pub per_page: u32,
    /// Items kept from this page, set only on the last page
    pub keep: Option<usize>,
}

/// How a request for `num_results` items splits into backend pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    num_results: u32,
    max_page_size: u32,
}

impl PagePlan {
    /// Plan `num_results` items with pages of at most `max_page_size`
    ///
    /// `max_page_size` is clamped to `1..=100`.
    pub fn new(num_results: u32, max_page_size: u32) -> Self {
        Self {
            num_results,
            max_page_size: max_page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn num_results(&self) -> u32 {
        self.num_results
    }

    pub fn max_page_size(&self) -> u32 {
        self.max_page_size
    }

    /// Number of pages to request: full pages plus one for any remainder
    pub fn page_count(&self) -> u32 {
        let full = self.num_results / self.max_page_size;
        let partial = u32::from(self.num_results % self.max_page_size != 0);
        full + partial
    }

    /// Size requested for every page
    pub fn page_size(&self) -> u32 {
        self.num_results.min(self.max_page_size)
    }

    /// Items kept from the last page; an exact multiple keeps a full page
    pub fn last_page_size(&self) -> u32 {
        if self.num_results == 0 {
            return 0;
        }
        match self.num_results % self.max_page_size {
            0 => self.max_page_size,
            remainder => remainder,
        }
    }

    /// Page requests in ascending index order
    pub fn pages(&self) -> impl Iterator<Item = PageSpec> {
        let page_count = self.page_count();
        let per_page = self.page_size();
        let last = self.last_page_size() as usize;

        (1..=page_count).map(move |index| PageSpec {
            index,
            per_page,
            keep: (index == page_count).then_some(last),
        })
    }
}

/// Collects a fixed number of results across sequential backend pages
pub struct PaginatedSearcher<T> {
    transport: T,
    max_page_size: u32,
}

impl<T: SearchTransport> PaginatedSearcher<T> {
    /// Create a searcher using the backend's largest page size
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            max_page_size: MAX_PAGE_SIZE,
        }
    }

    /// Create a searcher honouring the configured page size
    pub fn from_settings(transport: T, settings: &SearchSettings) -> Self {
        Self::new(transport).with_max_page_size(settings.max_page_size)
    }

    /// Set the largest page requested, clamped to `1..=100`
    pub fn with_max_page_size(mut self, size: u32) -> Self {
        self.max_page_size = size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn max_page_size(&self) -> u32 {
        self.max_page_size
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Page plan for `num_results` items
    pub fn plan(&self, num_results: u32) -> PagePlan {
        PagePlan::new(num_results, self.max_page_size)
    }

    /// Fetch `num_results` users matching `query`
    ///
    /// Pages are requested one at a time in ascending order and concatenated,
    /// so the result keeps the backend's relevance order. The last page is
    /// truncated to the remainder, and no page contributes more than
    /// `per_page` items. Any transport error aborts the search and no partial
    /// results are returned.
    pub async fn search(&self, query: &Query, num_results: u32) -> Result<ResultSet> {
        let plan = self.plan(num_results);
        let mut results =
            ResultSet::with_capacity((plan.num_results() as usize).min(PREALLOCATE_LIMIT));

        for page in plan.pages() {
            let records = self
                .transport
                .fetch_page(query, page.index, page.per_page)
                .await?;

            let mut items = records
                .into_iter()
                .map(project)
                .collect::<std::result::Result<Vec<_>, _>>()?;

            items.truncate(page.keep.unwrap_or(page.per_page as usize));

            results.append_page(items);
        }

        Ok(results)
    }

    /// Render `criteria` and run [`search`](Self::search)
    pub async fn search_criteria(
        &self,
        criteria: &SearchCriteria,
        num_results: u32,
    ) -> Result<ResultSet> {
        self.search(&Query::from_criteria(criteria), num_results).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SearchError, TransportError};
    use crate::transport::fake::{user_record, FakeTransport};
    use crate::transport::RawRecord;
    use async_trait::async_trait;
    use std::sync::Arc;

    /// Backend that ignores `per_page` and always answers with 150 records
    struct OversizedPages;

    #[async_trait]
    impl SearchTransport for OversizedPages {
        fn name(&self) -> &str {
            "oversized"
        }

        async fn fetch_page(
            &self,
            _query: &Query,
            page: u32,
            _per_page: u32,
        ) -> std::result::Result<Vec<RawRecord>, TransportError> {
            let first = (page as usize - 1) * 150 + 1;
            Ok((first..first + 150).map(user_record).collect())
        }
    }

    fn query() -> Query {
        Query::build(Some(1000), None, None).unwrap()
    }

    #[test]
    fn test_page_count() {
        let cases = [
            (1, 1),
            (10, 1),
            (99, 1),
            (100, 1),
            (101, 2),
            (150, 2),
            (200, 2),
            (201, 3),
        ];
        for (num_results, expected) in cases {
            assert_eq!(
                PagePlan::new(num_results, 100).page_count(),
                expected,
                "num_results = {}",
                num_results
            );
        }
    }

    #[test]
    fn test_last_page_size() {
        assert_eq!(PagePlan::new(250, 100).last_page_size(), 50);
        assert_eq!(PagePlan::new(200, 100).last_page_size(), 100);
        assert_eq!(PagePlan::new(42, 100).last_page_size(), 42);
        assert_eq!(PagePlan::new(0, 100).last_page_size(), 0);
    }

    #[test]
    fn test_page_size_is_capped() {
        assert_eq!(PagePlan::new(42, 100).page_size(), 42);
        assert_eq!(PagePlan::new(1000, 100).page_size(), 100);
        assert_eq!(PagePlan::new(1000, 0).max_page_size(), 1);
        assert_eq!(PagePlan::new(1000, 500).max_page_size(), 100);
    }

    #[test]
    fn test_pages_only_truncate_last() {
        let pages: Vec<_> = PagePlan::new(250, 100).pages().collect();
        assert_eq!(
            pages,
            vec![
                PageSpec { index: 1, per_page: 100, keep: None },
                PageSpec { index: 2, per_page: 100, keep: None },
                PageSpec { index: 3, per_page: 100, keep: Some(50) },
            ]
        );
        assert_eq!(PagePlan::new(0, 100).pages().count(), 0);
    }

    #[tokio::test]
    async fn test_search_250_truncates_last_page() {
        let searcher = PaginatedSearcher::new(FakeTransport::with_users(400));
        let results = searcher.search(&query(), 250).await.unwrap();

        assert_eq!(results.len(), 250);
        let sizes: Vec<_> = searcher
            .transport()
            .requests()
            .iter()
            .map(|r| (r.page, r.per_page))
            .collect();
        assert_eq!(sizes, vec![(1, 100), (2, 100), (3, 100)]);
        assert_eq!(results.as_slice()[249].username, "user250");
    }

    #[tokio::test]
    async fn test_exact_multiple_keeps_full_last_page() {
        let searcher = PaginatedSearcher::new(FakeTransport::with_users(300));
        let results = searcher.search(&query(), 200).await.unwrap();

        assert_eq!(results.len(), 200);
        assert_eq!(searcher.transport().requests().len(), 2);
    }

    #[tokio::test]
    async fn test_order_is_preserved_across_pages() {
        let searcher =
            PaginatedSearcher::new(FakeTransport::with_users(50)).with_max_page_size(7);
        let results = searcher.search(&query(), 23).await.unwrap();

        let expected: Vec<_> = (1..=23).map(|n| format!("user{}", n)).collect();
        let names: Vec<_> = results.into_iter().map(|i| i.username).collect();
        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn test_small_request_uses_small_page() {
        let searcher = PaginatedSearcher::new(FakeTransport::with_users(100));
        let results = searcher.search(&query(), 5).await.unwrap();

        assert_eq!(results.len(), 5);
        let requests = searcher.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].per_page, 5);
        assert_eq!(requests[0].query, "followers:>=1000");
    }

    #[tokio::test]
    async fn test_fewer_available_than_requested() {
        let searcher = PaginatedSearcher::new(FakeTransport::with_users(130));
        let results = searcher.search(&query(), 250).await.unwrap();

        assert_eq!(results.len(), 130);
        assert_eq!(searcher.transport().requests().len(), 3);
    }

    #[tokio::test]
    async fn test_zero_results_issues_no_requests() {
        let searcher = PaginatedSearcher::new(FakeTransport::with_users(10));
        let results = searcher.search(&query(), 0).await.unwrap();

        assert!(results.is_empty());
        assert!(searcher.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_error_on_second_page_discards_everything() {
        let searcher = PaginatedSearcher::new(FakeTransport::with_users(300).fail_on_page(2));
        let result = searcher.search(&query(), 250).await;

        assert!(matches!(
            result,
            Err(SearchError::Transport(TransportError::Status { status: 502, .. }))
        ));
        // page 3 is never requested
        assert_eq!(searcher.transport().requests().len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_record_fails_search() {
        let mut records: Vec<_> = (1..=3).map(user_record).collect();
        records[1].remove("login");
        let searcher = PaginatedSearcher::new(FakeTransport::new(records));

        let result = searcher.search(&query(), 3).await;
        assert!(matches!(
            result,
            Err(SearchError::Transport(TransportError::Malformed(_)))
        ));
    }

    #[tokio::test]
    async fn test_shared_transport_and_settings() {
        let fake = Arc::new(FakeTransport::with_users(30));
        let settings = SearchSettings {
            max_page_size: 10,
            ..Default::default()
        };
        let searcher = PaginatedSearcher::from_settings(fake.clone(), &settings);

        let criteria = SearchCriteria::builder().language("rust").build().unwrap();
        let results = searcher.search_criteria(&criteria, 25).await.unwrap();

        assert_eq!(results.len(), 25);
        let requests = fake.requests();
        assert_eq!(requests.len(), 3);
        assert!(requests.iter().all(|r| r.per_page == 10));
        assert_eq!(requests[0].query, "language:rust");
    }

    #[tokio::test]
    async fn test_oversized_pages_are_capped_at_per_page() {
        let searcher = PaginatedSearcher::new(OversizedPages).with_max_page_size(10);
        let results = searcher.search(&query(), 25).await.unwrap();

        assert_eq!(results.len(), 25);
        let names: Vec<_> = results.iter().map(|i| i.username.as_str()).collect();
        assert_eq!(names[0], "user1");
        assert_eq!(names[9], "user10");
        // second page starts at the backend's 151st record
        assert_eq!(names[10], "user151");
        assert_eq!(names[24], "user305");
    }
}
