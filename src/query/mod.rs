//! Query building module
//!
//! Turns user search criteria into the qualifier syntax understood by the
//! GitHub user search endpoint:
//! - Follower threshold: `followers:>=1000`
//! - Repository threshold: `repos:>=50`
//! - Language filter: `language:rust`
//!
//! Clauses are joined with `+` and always rendered in that order.

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Delimiter placed between qualifier clauses
pub const CLAUSE_DELIMITER: &str = "+";

/// Filter criteria for a user search
///
/// At least one field is always present; use [`SearchCriteria::builder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchCriteria {
    /// Minimum follower count
    min_followers: Option<u64>,
    /// Minimum number of public repositories
    min_repos: Option<u64>,
    /// Language used in the user's repositories
    language: Option<String>,
}

impl SearchCriteria {
    /// Start building criteria
    pub fn builder() -> SearchCriteriaBuilder {
        SearchCriteriaBuilder::default()
    }

    /// Build criteria from optional values, failing when all are absent
    pub fn new(
        min_followers: Option<u64>,
        min_repos: Option<u64>,
        language: Option<String>,
    ) -> Result<Self> {
        SearchCriteriaBuilder {
            min_followers,
            min_repos,
            language,
        }
        .build()
    }

    pub fn min_followers(&self) -> Option<u64> {
        self.min_followers
    }

    pub fn min_repos(&self) -> Option<u64> {
        self.min_repos
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

/// Builder for [`SearchCriteria`]
#[derive(Debug, Clone, Default)]
pub struct SearchCriteriaBuilder {
    min_followers: Option<u64>,
    min_repos: Option<u64>,
    language: Option<String>,
}

impl SearchCriteriaBuilder {
    /// Set the minimum follower count
    pub fn min_followers(mut self, count: u64) -> Self {
        self.min_followers = Some(count);
        self
    }

    /// Set the minimum repository count
    pub fn min_repos(mut self, count: u64) -> Self {
        self.min_repos = Some(count);
        self
    }

    /// Set the language filter
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Validate and produce the criteria
    pub fn build(self) -> Result<SearchCriteria> {
        // A blank language would render as `language:` and match nothing useful
        let language = self
            .language
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());

        if self.min_followers.is_none() && self.min_repos.is_none() && language.is_none() {
            return Err(SearchError::InvalidCriteria);
        }

        Ok(SearchCriteria {
            min_followers: self.min_followers,
            min_repos: self.min_repos,
            language,
        })
    }
}

/// Encoded backend query string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    /// Render the query for validated criteria
    pub fn from_criteria(criteria: &SearchCriteria) -> Self {
        let mut clauses = Vec::with_capacity(3);

        if let Some(followers) = criteria.min_followers {
            clauses.push(format!("followers:>={}", followers));
        }
        if let Some(repos) = criteria.min_repos {
            clauses.push(format!("repos:>={}", repos));
        }
        if let Some(ref language) = criteria.language {
            clauses.push(format!("language:{}", language));
        }

        Self(clauses.join(CLAUSE_DELIMITER))
    }

    /// Validate optional criteria and render them in one step
    pub fn build(
        min_followers: Option<u64>,
        min_repos: Option<u64>,
        language: Option<String>,
    ) -> Result<Self> {
        let criteria = SearchCriteria::new(min_followers, min_repos, language)?;
        Ok(Self::from_criteria(&criteria))
    }

    /// Get the query string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the individual qualifier clauses
    pub fn clauses(&self) -> impl Iterator<Item = &str> {
        self.0.split(CLAUSE_DELIMITER)
    }
}

impl From<&SearchCriteria> for Query {
    fn from(criteria: &SearchCriteria) -> Self {
        Self::from_criteria(criteria)
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
