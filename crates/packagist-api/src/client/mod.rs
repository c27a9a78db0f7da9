//! Registry client for the Packagist API

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use packagist_core::error::PackagistError;
use packagist_core::types::{FilterSet, Package, SearchResult};
use packagist_core::utils::template::{expand, Variables};

use crate::mapper::ResultFactory;
use crate::pending::Cancellable;
use crate::search::Pagination;
use crate::transport::{HttpTransport, Transport};
use crate::RegistryResult;

/// Public Packagist origin
pub const PACKAGIST_URL: &str = "https://packagist.org/";

const PACKAGE_TEMPLATE: &str = "/packages/{package}.json";
const LIST_TEMPLATE: &str = "/packages/list.json{?filters*}";
const SEARCH_TEMPLATE: &str = "/search.json{?filters*}";

/// Configuration for the HTTP side of the client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Registry origin all request paths are resolved against
    pub base_url: String,
    /// Per-request timeout enforced by the transport
    pub timeout: Duration,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: PACKAGIST_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("packagist-api/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Asynchronous Packagist client.
///
/// Cloning is cheap; clones share the transport. Each operation is
/// independent of every other one, so a single client can run any number
/// of concurrent requests.
#[derive(Clone)]
pub struct PackagistClient {
    /// Request executor
    transport: Arc<dyn Transport>,
    /// JSON to record mapping
    factory: ResultFactory,
    /// Registry origin
    base_url: Url,
}

impl std::fmt::Debug for PackagistClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackagistClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl PackagistClient {
    /// Create a client for packagist.org
    pub fn new() -> RegistryResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client backed by reqwest with custom configuration
    pub fn with_config(config: ClientConfig) -> RegistryResult<Self> {
        let transport = HttpTransport::new(config.timeout, &config.user_agent)?;
        Self::with_transport(Arc::new(transport), &config.base_url)
    }

    /// Create a client on top of any transport
    pub fn with_transport(transport: Arc<dyn Transport>, base_url: &str) -> RegistryResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| PackagistError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            transport,
            factory: ResultFactory::new(),
            base_url,
        })
    }

    /// Registry origin requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch details of a single package.
    ///
    /// The name is escaped as one path segment, so `clue/zenity-react`
    /// requests `/packages/clue%2Fzenity-react.json`.
    pub fn get(&self, package: &str) -> Cancellable<Package> {
        let client = self.clone();
        let package = package.to_string();

        Cancellable::from_future(async move {
            let path = expand(PACKAGE_TEMPLATE, &Variables::new().string("package", &package))?;
            let data = client.fetch(&path).await?;
            client.factory.create_package(data)
        })
    }

    /// List package names, optionally narrowed by filters such as `vendor`.
    ///
    /// The registry answers with the complete list in one response.
    pub fn all(&self, filters: &FilterSet) -> Cancellable<Vec<String>> {
        let client = self.clone();
        let filters = filters.clone();

        Cancellable::from_future(async move {
            let path = expand(LIST_TEMPLATE, &Variables::new().filters("filters", &filters))?;
            let data = client.fetch(&path).await?;
            client.factory.create_package_names(data)
        })
    }

    /// Search packages matching `query` and the given filters.
    ///
    /// Follows the registry's pagination until the last page and resolves
    /// with every match in relevance order. Pages are fetched one after
    /// another, so large result sets take a while. Nothing is returned
    /// unless every page succeeds.
    pub fn search(&self, query: &str, filters: &FilterSet) -> Cancellable<Vec<SearchResult>> {
        let client = self.clone();
        let filters = filters.with_query(query);

        Cancellable::new(move |mut signal| async move {
            let path = expand(SEARCH_TEMPLATE, &Variables::new().filters("filters", &filters))?;
            let start = client.resolve(&path)?;
            debug!(url = %start, "Starting search");

            Pagination::new(start, client.base_url.clone())
                .run(client.transport.as_ref(), &client.factory, &mut signal)
                .await
        })
    }

    /// Fetch the raw body of `url`, resolved against the base URL
    pub async fn request(&self, url: &str) -> RegistryResult<String> {
        let url = self.resolve(url)?;
        debug!(url = %url, "Requesting");
        self.transport.get(&url).await
    }

    async fn fetch(&self, path: &str) -> RegistryResult<Map<String, Value>> {
        let body = self.request(path).await?;
        self.factory.parse(&body)
    }

    fn resolve(&self, url: &str) -> RegistryResult<Url> {
        self.base_url.join(url).map_err(|e| PackagistError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}
