//! HTTP client for making requests to the search API

use crate::config::OutgoingSettings;
use crate::error::TransportError;
use reqwest::{Client, Response};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// GET request to be made against the search API
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Fully encoded URL, query string included
    pub url: Url,
    /// Request headers
    pub headers: HashMap<String, String>,
}

impl HttpRequest {
    /// Create a GET request
    pub fn get(url: Url) -> Self {
        Self {
            url,
            headers: HashMap::new(),
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

/// HTTP response from the search API
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HashMap<String, String>,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl HttpResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, TransportError> {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client wrapper carrying the configured timeout and user agent
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, TransportError> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self, TransportError> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs_f64(settings.request_timeout))
            .gzip(true)
            .brotli(true);

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        // Proxy settings
        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            user_agent: settings.user_agent.clone(),
        })
    }

    /// Execute a request
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!("GET {}", request.url);

        let mut req_builder = self
            .client
            .get(request.url)
            .header("User-Agent", &self.user_agent);

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }

    /// Parse response into HttpResponse
    async fn parse_response(response: Response) -> Result<HttpResponse, TransportError> {
        let status = response.status().as_u16();
        let url = response.url().to_string();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.to_string(), v.to_string());
            }
        }

        let text = response.text().await?;

        Ok(HttpResponse {
            status,
            headers,
            text,
            url,
        })
    }
}
