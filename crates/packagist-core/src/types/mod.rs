//! Core data types for the Packagist client.
//!
//! - Package detail records
//! - Search listing entries
//! - Query filters

pub mod filter;
pub mod package;
pub mod search;

// Re-export all public types
pub use filter::{FilterSet, QUERY_KEY};
pub use package::{Abandoned, Author, Downloads, Maintainer, Package, PackageVersion, SourceReference};
pub use search::SearchResult;
