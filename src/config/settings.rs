//! Settings structures for gh-user-search configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Largest page the GitHub search API will return
pub const MAX_PAGE_SIZE: u32 = 100;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub search: SearchSettings,
    pub outgoing: OutgoingSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (GH_USER_SEARCH_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Apply GH_USER_SEARCH_* overrides from `lookup`; unparsable values are ignored
    pub fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("GH_USER_SEARCH_API_URL") {
            self.search.api_url = val;
        }
        if let Some(val) = lookup("GH_USER_SEARCH_MAX_PAGE_SIZE") {
            if let Ok(size) = val.parse() {
                self.search.max_page_size = size;
            }
        }
        if let Some(val) = lookup("GH_USER_SEARCH_TIMEOUT") {
            if let Ok(timeout) = val.parse() {
                self.outgoing.request_timeout = timeout;
            }
        }
    }

    /// Reject values the search API or the HTTP client cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_PAGE_SIZE).contains(&self.search.max_page_size) {
            bail!(
                "search.max_page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE,
                self.search.max_page_size
            );
        }
        if self.search.api_url.trim().is_empty() {
            bail!("search.api_url must not be empty");
        }
        if !(self.outgoing.request_timeout > 0.0) {
            bail!(
                "outgoing.request_timeout must be positive, got {}",
                self.outgoing.request_timeout
            );
        }
        Ok(())
    }
}

/// Search endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Base URL of the GitHub REST API
    pub api_url: String,
    /// Largest page requested from the backend
    pub max_page_size: u32,
    /// Accept header sent with every search request
    pub accept: String,
    /// Sort field (none = best match)
    pub sort: Option<SortField>,
    /// Sort order, only meaningful together with `sort`
    pub order: Option<SortOrder>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            max_page_size: MAX_PAGE_SIZE,
            accept: "application/vnd.github.v3+json".to_string(),
            sort: None,
            order: None,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// User agent string
    pub user_agent: String,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 10.0,
            user_agent: format!("gh-user-search/{}", crate::VERSION),
            verify_ssl: true,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Sort field accepted by the user search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Followers,
    Repositories,
    Joined,
}

impl SortField {
    /// Get the string representation for API calls
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Followers => "followers",
            Self::Repositories => "repositories",
            Self::Joined => "joined",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Get the string representation for API calls
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
