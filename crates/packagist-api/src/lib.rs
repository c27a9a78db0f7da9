//! Asynchronous client for the Packagist registry API
//!
//! This crate fetches package details, package name listings and paginated
//! search results from packagist.org (or a compatible mirror). Every
//! operation returns a cancellable future that settles with the complete,
//! typed result or a single error.

pub mod api;
pub mod client;
pub mod mapper;
pub mod pending;
pub mod search;
pub mod transport;

#[cfg(test)]
mod testing;

// Re-export main types
pub use api::{PackageListResponse, PackageResponse, SearchPage};
pub use client::{ClientConfig, PackagistClient, PACKAGIST_URL};
pub use mapper::ResultFactory;
pub use pending::{CancelHandle, Cancellable};
pub use search::{Pagination, SearchState};
pub use transport::{HttpTransport, Transport};

use packagist_core::error::PackagistError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, PackagistError>;
