//! Packagist API response types
//!
//! Envelopes of the JSON documents served by the registry. The records
//! inside them live in `packagist_core::types`.

use serde::{Deserialize, Serialize};

use packagist_core::types::{Package, SearchResult};

/// Response of `/packages/{vendor}/{name}.json`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PackageResponse {
    /// Package details
    pub package: Package,
}

/// Response of `/packages/list.json`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PackageListResponse {
    /// Package names, in registry order
    #[serde(rename = "packageNames")]
    pub package_names: Vec<String>,
}

/// One page of `/search.json`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchPage {
    /// Matches on this page, in relevance order
    pub results: Vec<SearchResult>,
    /// Total number of matches across all pages
    #[serde(default)]
    pub total: u64,
    /// Location of the following page; absent on the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl SearchPage {
    /// Check if this is the final page of a search
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}
