//! Query filters for listing and search endpoints.

use indexmap::IndexMap;

/// Query key used for the search term
pub const QUERY_KEY: &str = "q";

/// Ordered key/value filters appended to a request as a query string.
///
/// Insertion order is kept so generated URLs are stable. Inserting an
/// existing key replaces its value without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    filters: IndexMap<String, String>,
}

impl FilterSet {
    /// Create an empty filter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Filter by vendor name (`/packages/list.json?vendor=...`)
    pub fn vendor(vendor: impl Into<String>) -> Self {
        Self::new().with("vendor", vendor)
    }

    /// Filter by package type (`library`, `composer-plugin`, ...)
    pub fn package_type(package_type: impl Into<String>) -> Self {
        Self::new().with("type", package_type)
    }

    /// Insert or replace a filter, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.filters.insert(key.into(), value.into())
    }

    /// Copy of this set with the search term stored under `q`
    pub fn with_query(&self, query: &str) -> Self {
        self.clone().with(QUERY_KEY, query)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Iterate over filters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for FilterSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (key, value) in iter {
            set.insert(key, value);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_is_kept() {
        let filters = FilterSet::new().with("vendor", "clue").with("type", "library");
        let pairs: Vec<(&str, &str)> = filters.iter().collect();
        assert_eq!(pairs, vec![("vendor", "clue"), ("type", "library")]);
    }

    #[test]
    fn test_replacing_a_key_keeps_its_position() {
        let mut filters = FilterSet::vendor("a").with("type", "library");
        assert_eq!(filters.insert("vendor", "b"), Some("a".to_string()));

        let pairs: Vec<(&str, &str)> = filters.iter().collect();
        assert_eq!(pairs, vec![("vendor", "b"), ("type", "library")]);
    }

    #[test]
    fn test_with_query_does_not_touch_original() {
        let filters = FilterSet::package_type("library");
        let merged = filters.with_query("zenity");

        assert_eq!(filters.get(QUERY_KEY), None);
        assert_eq!(merged.get(QUERY_KEY), Some("zenity"));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_with_query_overrides_caller_q() {
        let filters: FilterSet = [("q", "old"), ("tags", "psr-7")].into_iter().collect();
        let merged = filters.with_query("new");

        assert_eq!(merged.get("q"), Some("new"));
        assert_eq!(merged.len(), 2);
    }
}
