//! GitHub user search transport
//!
//! Uses GitHub's official REST API (`/search/users`).

use super::traits::*;
use crate::config::{Settings, SearchSettings, SortField, SortOrder};
use crate::error::TransportError;
use crate::network::{HttpClient, HttpRequest, HttpResponse};
use crate::query::Query;
use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

/// Characters left unescaped in the query string so qualifiers such as
/// `followers:>=10+language:rust` reach the API intact
const UNESCAPED: [(&str, &str); 3] = [("%3A", ":"), ("%2B", "+"), ("%3D", "=")];

/// GitHub user search transport
pub struct GitHubTransport {
    client: HttpClient,
    endpoint: Url,
    accept: String,
    sort: Option<SortField>,
    order: Option<SortOrder>,
}

impl GitHubTransport {
    /// Create a transport from an HTTP client and search settings
    pub fn new(client: HttpClient, settings: &SearchSettings) -> Result<Self, TransportError> {
        // Keep any path prefix (GitHub Enterprise serves the API under /api/v3)
        let mut base = settings.api_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let endpoint = Url::parse(&base)?.join("search/users")?;

        Ok(Self {
            client,
            endpoint,
            accept: settings.accept.clone(),
            sort: settings.sort,
            order: settings.order,
        })
    }

    /// Create a transport and its HTTP client from full settings
    pub fn with_settings(settings: &Settings) -> Result<Self, TransportError> {
        let client = HttpClient::with_settings(&settings.outgoing)?;
        Self::new(client, &settings.search)
    }

    /// The `/search/users` URL this transport queries
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build the URL for one page of results
    pub fn page_url(&self, query: &Query, page: u32, per_page: u32) -> Url {
        let mut params = vec![
            ("q", query.as_str().to_string()),
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
            ("type", "user".to_string()),
        ];
        if let Some(sort) = self.sort {
            params.push(("sort", sort.as_str().to_string()));
            if let Some(order) = self.order {
                params.push(("order", order.as_str().to_string()));
            }
        }

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, encode_param(v)))
            .collect::<Vec<_>>()
            .join("&");

        let mut url = self.endpoint.clone();
        url.set_query(Some(&query_string));
        url
    }

    /// Extract the `items` array from a search response
    fn parse_page(response: &HttpResponse) -> Result<Vec<RawRecord>, TransportError> {
        if !response.is_success() {
            warn!(
                "GitHub search returned {} for {}",
                response.status, response.url
            );
            return Err(TransportError::Status {
                status: response.status,
                body: response.text.clone(),
            });
        }

        let mut json: serde_json::Value = response.json()?;

        if json
            .get("incomplete_results")
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
        {
            warn!("GitHub search timed out server-side; page may be incomplete");
        }
        if let Some(total) = json.get("total_count").and_then(|v| v.as_u64()) {
            debug!("GitHub search reports {} total matches", total);
        }

        let items = match json.get_mut("items").map(serde_json::Value::take) {
            Some(serde_json::Value::Array(items)) => items,
            Some(_) => {
                return Err(TransportError::Malformed(
                    "`items` is not an array".to_string(),
                ))
            }
            None => return Err(TransportError::Malformed("missing `items`".to_string())),
        };

        items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::Object(record) => Ok(record),
                other => Err(TransportError::Malformed(format!(
                    "expected an object in `items`, got {}",
                    other
                ))),
            })
            .collect()
    }
}

#[async_trait]
impl SearchTransport for GitHubTransport {
    fn name(&self) -> &str {
        "github"
    }

    async fn fetch_page(
        &self,
        query: &Query,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RawRecord>, TransportError> {
        check_page_bounds(page, per_page)?;

        let request = HttpRequest::get(self.page_url(query, page, per_page))
            .header("Accept", self.accept.as_str());

        let response = self.client.execute(request).await?;
        let records = Self::parse_page(&response)?;

        debug!(
            "{}: page {} ({} per page) returned {} records",
            self.name(),
            page,
            per_page,
            records.len()
        );

        Ok(records)
    }
}

/// Percent-encode a parameter value, keeping `:`, `+` and `=` literal
fn encode_param(value: &str) -> String {
    let mut encoded = urlencoding::encode(value).into_owned();
    for (escaped, literal) in UNESCAPED {
        encoded = encoded.replace(escaped, literal);
    }
    encoded
}
