//! # packagist-core
//!
//! Core types and utilities shared across the Packagist crates.
//!
//! This crate provides:
//! - Package and search result records as returned by the registry
//! - FilterSet for query filters
//! - PackagistError enum for unified error handling
//! - URI template expansion used to build request URLs
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (Package, SearchResult, FilterSet)
//! - `error`: Error types and result aliases
//! - `utils`: URI template expansion

pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{ErrorKind, PackagistError, PackagistResult};
pub use types::{FilterSet, Package, PackageVersion, SearchResult};
