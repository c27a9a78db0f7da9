//! Conversion of raw response bodies into typed results
//!
//! Every response goes through the same two steps: [`ResultFactory::parse`]
//! turns the body into a JSON object, then one of the `create_*` methods
//! maps that object onto the record type of the endpoint.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use packagist_core::error::PackagistError;
use packagist_core::types::{Package, SearchResult};

use crate::api::{PackageListResponse, PackageResponse, SearchPage};
use crate::RegistryResult;

/// Parsed top-level JSON object of a response
pub type JsonObject = Map<String, Value>;

/// Maps registry JSON onto typed records
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultFactory;

impl ResultFactory {
    pub fn new() -> Self {
        Self
    }

    /// Decode a response body. Anything but a JSON object is rejected.
    pub fn parse(&self, body: &str) -> RegistryResult<JsonObject> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| PackagistError::parse(format!("invalid JSON: {}", e)))?;

        match value {
            Value::Object(object) => Ok(object),
            other => Err(PackagistError::parse(format!(
                "expected a JSON object, found {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Single package record from a package detail response
    pub fn create_package(&self, data: JsonObject) -> RegistryResult<Package> {
        self.create::<PackageResponse>(data).map(|response| response.package)
    }

    /// Package names from a list response
    pub fn create_package_names(&self, data: JsonObject) -> RegistryResult<Vec<String>> {
        self.create::<PackageListResponse>(data)
            .map(|response| response.package_names)
    }

    /// One search page, including its pagination pointer
    pub fn create_search_page(&self, data: JsonObject) -> RegistryResult<SearchPage> {
        self.create(data)
    }

    /// Search results of a single page, dropping pagination info
    pub fn create_search_results(&self, data: JsonObject) -> RegistryResult<Vec<SearchResult>> {
        self.create_search_page(data).map(|page| page.results)
    }

    fn create<T: DeserializeOwned>(&self, data: JsonObject) -> RegistryResult<T> {
        serde_json::from_value(Value::Object(data))
            .map_err(|e| PackagistError::mapping(e.to_string()))
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packagist_core::ErrorKind;

    const SEARCH_PAGE: &str = r#"{
        "results": [
            {"name": "clue/zenity-react", "description": "Build graphical desktop (GUI) applications in PHP", "downloads": 57, "favers": 0},
            {"name": "clue/graph", "downloads": 10, "favers": 2}
        ],
        "total": 4,
        "next": "https://packagist.org/search.json?q=clue&page=2"
    }"#;

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = ResultFactory::new().parse("{not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_parse_rejects_non_object() {
        let factory = ResultFactory::new();
        for body in ["[]", "null", "42", "\"text\""] {
            let err = factory.parse(body).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Parse, "body {}", body);
        }
    }

    #[test]
    fn test_create_package() {
        let factory = ResultFactory::new();
        let data = factory
            .parse(r#"{"package":{"name":"clue/zenity-react","versions":{}}}"#)
            .unwrap();

        let package = factory.create_package(data).unwrap();
        assert_eq!(package.name, "clue/zenity-react");
        assert!(package.versions.is_empty());
    }

    #[test]
    fn test_create_package_with_empty_list_versions() {
        let factory = ResultFactory::new();
        let data = factory
            .parse(r#"{"package":{"name":"a/b","versions":[]}}"#)
            .unwrap();

        let package = factory.create_package(data).unwrap();
        assert_eq!(package.name, "a/b");
        assert!(package.versions.is_empty());
    }

    #[test]
    fn test_create_package_with_empty_list_requirements() {
        let factory = ResultFactory::new();
        let data = factory
            .parse(
                r#"{"package":{"name":"a/b","versions":{
                    "1.0.0":{"version":"1.0.0","require":[],"require-dev":[]}
                }}}"#,
            )
            .unwrap();

        let package = factory.create_package(data).unwrap();
        let version = package.version("1.0.0").unwrap();
        assert!(version.require.is_empty());
        assert!(version.require_dev.is_empty());
    }

    #[test]
    fn test_create_package_missing_name_is_mapping_error() {
        let factory = ResultFactory::new();
        let data = factory.parse(r#"{"package":{"versions":{}}}"#).unwrap();

        let err = factory.create_package(data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Mapping);
    }

    #[test]
    fn test_create_package_names() {
        let factory = ResultFactory::new();
        let data = factory.parse(r#"{"packageNames":["a/a","b/b"]}"#).unwrap();

        let names = factory.create_package_names(data).unwrap();
        assert_eq!(names, vec!["a/a".to_string(), "b/b".to_string()]);
    }

    #[test]
    fn test_create_search_page_keeps_order_and_next() {
        let factory = ResultFactory::new();
        let page = factory
            .create_search_page(factory.parse(SEARCH_PAGE).unwrap())
            .unwrap();

        assert_eq!(page.total, 4);
        assert!(!page.is_last());
        let names: Vec<&str> = page.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["clue/zenity-react", "clue/graph"]);
    }

    #[test]
    fn test_null_next_marks_last_page() {
        let factory = ResultFactory::new();
        let data = factory
            .parse(r#"{"results":[],"total":0,"next":null}"#)
            .unwrap();

        assert!(factory.create_search_page(data).unwrap().is_last());
    }

    #[test]
    fn test_create_search_results_requires_results() {
        let factory = ResultFactory::new();
        let data = factory.parse(r#"{"total":0}"#).unwrap();

        let err = factory.create_search_results(data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Mapping);
    }
}
