//! Search listing types.

use serde::{Deserialize, Serialize};

/// One package entry of a search result page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchResult {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub favers: u64,
    /// Present only for abandoned packages, empty when no replacement exists
    #[serde(default)]
    pub abandoned: Option<super::Abandoned>,
}

impl SearchResult {
    /// Create a search entry with only its name set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            url: None,
            repository: None,
            downloads: 0,
            favers: 0,
            abandoned: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_result_from_registry_entry() {
        let result: SearchResult = serde_json::from_str(
            r#"{
                "name": "clue/zenity-react",
                "description": "Build graphical desktop (GUI) applications in PHP",
                "url": "https://packagist.org/packages/clue/zenity-react",
                "downloads": 57,
                "favers": 0,
                "repository": "https://github.com/clue/reactphp-zenity"
            }"#,
        )
        .unwrap();

        assert_eq!(result.name, "clue/zenity-react");
        assert_eq!(result.downloads, 57);
        assert_eq!(
            result.repository.as_deref(),
            Some("https://github.com/clue/reactphp-zenity")
        );
        assert_eq!(result.abandoned, None);
    }
}
