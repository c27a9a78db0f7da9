//! Package detail types.
//!
//! Defines the record returned by the package detail endpoint
//! (`/packages/{vendor}/{name}.json`).

use std::fmt;
use std::marker::PhantomData;

use indexmap::IndexMap;
use serde::de::{self, value::MapAccessDeserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Full package record from the registry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Package {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default, rename = "type")]
    pub package_type: Option<String>,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub maintainers: Vec<Maintainer>,
    /// Versions keyed by version string, in registry order
    #[serde(default, deserialize_with = "map_or_empty_list")]
    pub versions: IndexMap<String, PackageVersion>,
    #[serde(default)]
    pub downloads: Option<Downloads>,
    #[serde(default)]
    pub favers: Option<u64>,
    #[serde(default)]
    pub github_stars: Option<u64>,
    #[serde(default)]
    pub abandoned: Option<Abandoned>,
}

/// Package maintainer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Maintainer {
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Download counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Downloads {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub monthly: u64,
    #[serde(default)]
    pub daily: u64,
}

/// Abandonment marker: either a flag or the name of a replacement package
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Abandoned {
    Flag(bool),
    Replacement(String),
}

/// A single released (or branch) version of a package
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PackageVersion {
    pub version: String,
    #[serde(default)]
    pub version_normalized: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub license: Vec<String>,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub source: Option<SourceReference>,
    #[serde(default)]
    pub dist: Option<SourceReference>,
    #[serde(default, rename = "type")]
    pub package_type: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "map_or_empty_list")]
    pub require: IndexMap<String, String>,
    #[serde(default, rename = "require-dev", deserialize_with = "map_or_empty_list")]
    pub require_dev: IndexMap<String, String>,
}

/// Version author
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Source or dist location of a version
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceReference {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub shasum: Option<String>,
}

impl Package {
    /// Create a package record with only its name set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            time: None,
            package_type: None,
            repository: None,
            maintainers: Vec::new(),
            versions: IndexMap::new(),
            downloads: None,
            favers: None,
            github_stars: None,
            abandoned: None,
        }
    }

    /// Vendor part of the package name (`clue` for `clue/zenity-react`)
    pub fn vendor(&self) -> Option<&str> {
        self.name.split_once('/').map(|(vendor, _)| vendor)
    }

    /// Check if the package is marked abandoned
    pub fn is_abandoned(&self) -> bool {
        match &self.abandoned {
            Some(Abandoned::Flag(flag)) => *flag,
            Some(Abandoned::Replacement(_)) => true,
            None => false,
        }
    }

    /// Suggested replacement for an abandoned package, if any
    pub fn replacement(&self) -> Option<&str> {
        match &self.abandoned {
            Some(Abandoned::Replacement(name)) if !name.is_empty() => Some(name),
            _ => None,
        }
    }

    /// Look up a specific version
    pub fn version(&self, version: &str) -> Option<&PackageVersion> {
        self.versions.get(version)
    }
}

/// Accept a JSON object or an empty array for a keyed collection.
///
/// The registry encodes an empty map as `[]`.
fn map_or_empty_list<'de, D, V>(deserializer: D) -> Result<IndexMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct MapOrEmptyList<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for MapOrEmptyList<V> {
        type Value = IndexMap<String, V>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map or an empty list")
        }

        fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
            IndexMap::<String, V>::deserialize(MapAccessDeserializer::new(map))
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            match seq.next_element::<IgnoredAny>()? {
                None => Ok(IndexMap::new()),
                Some(_) => Err(de::Error::invalid_length(1, &self)),
            }
        }
    }

    deserializer.deserialize_any(MapOrEmptyList(PhantomData))
}
