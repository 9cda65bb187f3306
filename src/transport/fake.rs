//! Deterministic in-memory transport
//!
//! Serves pages out of a fixed list of records and remembers every request,
//! so callers can check exactly which pages were asked for.

use super::traits::*;
use crate::error::TransportError;
use crate::query::Query;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Mutex;

/// A page request seen by [`FakeTransport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub query: String,
    pub page: u32,
    pub per_page: u32,
}

/// In-memory backend with a fixed, ranked record list
#[derive(Debug, Default)]
pub struct FakeTransport {
    records: Vec<RawRecord>,
    fail_on_page: Option<u32>,
    requests: Mutex<Vec<PageRequest>>,
}

impl FakeTransport {
    /// Serve the given records, in order
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self {
            records,
            fail_on_page: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Serve `count` synthetic users named `user1`, `user2`, ...
    ///
    /// Each record carries the extra fields a real search hit has.
    pub fn with_users(count: usize) -> Self {
        let records = (1..=count).map(user_record).collect();
        Self::new(records)
    }

    /// Fail with a 502 status whenever `page` is requested
    pub fn fail_on_page(mut self, page: u32) -> Self {
        self.fail_on_page = Some(page);
        self
    }

    /// Requests received so far, in call order
    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SearchTransport for FakeTransport {
    fn name(&self) -> &str {
        "fake"
    }

    async fn fetch_page(
        &self,
        query: &Query,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RawRecord>, TransportError> {
        check_page_bounds(page, per_page)?;

        if let Ok(mut requests) = self.requests.lock() {
            requests.push(PageRequest {
                query: query.as_str().to_string(),
                page,
                per_page,
            });
        }

        if self.fail_on_page == Some(page) {
            return Err(TransportError::Status {
                status: 502,
                body: "Bad Gateway".to_string(),
            });
        }

        let start = ((page - 1) as usize).saturating_mul(per_page as usize);
        let end = start.saturating_add(per_page as usize).min(self.records.len());

        Ok(self
            .records
            .get(start..end)
            .map(|page| page.to_vec())
            .unwrap_or_default())
    }
}

/// A search hit shaped like GitHub's, for the `n`th ranked user
pub fn user_record(n: usize) -> RawRecord {
    let value = json!({
        "login": format!("user{}", n),
        "id": n,
        "node_id": format!("MDQ6VXNlcj{}", n),
        "avatar_url": format!("https://avatars.githubusercontent.com/u/{}?v=4", n),
        "url": format!("https://api.github.com/users/user{}", n),
        "html_url": format!("https://github.com/user{}", n),
        "type": "User",
        "site_admin": false,
        "score": 1.0,
    });

    match value {
        serde_json::Value::Object(map) => map,
        _ => RawRecord::new(),
    }
}
