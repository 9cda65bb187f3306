//! Search result data models

use crate::error::TransportError;
use crate::transport::RawRecord;
use serde::{Deserialize, Serialize};

/// A matched user, reduced to the fields callers need
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultItem {
    /// GitHub login
    pub username: String,
    /// Profile page URL
    pub profile_url: String,
}

impl ResultItem {
    pub fn new(username: impl Into<String>, profile_url: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            profile_url: profile_url.into(),
        }
    }
}

/// Copy `login` and `html_url` out of a backend record and drop the rest
pub fn project(record: RawRecord) -> Result<ResultItem, TransportError> {
    let field = |name: &str| {
        record
            .get(name)
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                TransportError::Malformed(format!("search result is missing `{}`", name))
            })
    };

    Ok(ResultItem {
        username: field("login")?,
        profile_url: field("html_url")?,
    })
}

/// Ordered search results, in backend relevance order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    items: Vec<ResultItem>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Append a page after everything already collected
    pub fn append_page(&mut self, page: Vec<ResultItem>) {
        self.items.extend(page);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultItem> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[ResultItem] {
        &self.items
    }
}

impl IntoIterator for ResultSet {
    type Item = ResultItem;
    type IntoIter = std::vec::IntoIter<ResultItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ResultItem;
    type IntoIter = std::slice::Iter<'a, ResultItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl From<Vec<ResultItem>> for ResultSet {
    fn from(items: Vec<ResultItem>) -> Self {
        Self { items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::fake::user_record;

    #[test]
    fn test_project_keeps_two_fields() {
        let item = project(user_record(7)).unwrap();
        assert_eq!(item, ResultItem::new("user7", "https://github.com/user7"));

        let json = serde_json::to_value(&item).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&"username".to_string()));
        assert!(keys.contains(&"profile_url".to_string()));
    }

    #[test]
    fn test_project_missing_field() {
        let mut record = user_record(1);
        record.remove("html_url");
        assert!(matches!(project(record), Err(TransportError::Malformed(_))));

        let mut record = user_record(1);
        record.insert("login".to_string(), serde_json::Value::Null);
        assert!(matches!(project(record), Err(TransportError::Malformed(_))));
    }

    #[test]
    fn test_result_set_appends_in_order() {
        let mut results = ResultSet::new();
        results.append_page(vec![ResultItem::new("a", "u/a"), ResultItem::new("b", "u/b")]);
        results.append_page(vec![ResultItem::new("c", "u/c")]);

        let names: Vec<_> = results.iter().map(|i| i.username.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_result_set_serializes_as_array() {
        let results = ResultSet::from(vec![ResultItem::new("a", "u/a")]);
        let json = serde_json::to_string(&results).unwrap();
        assert_eq!(json, r#"[{"username":"a","profile_url":"u/a"}]"#);
    }
}
