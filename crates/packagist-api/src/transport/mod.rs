//! HTTP transport used by the registry client
//!
//! The client only needs "GET this URL and give me the body". Keeping that
//! behind [`Transport`] lets tests script responses without a server and
//! lets callers plug in their own HTTP stack.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use tracing::debug;
use url::Url;

use packagist_core::error::PackagistError;

use crate::RegistryResult;

/// In-flight request of a transport. Dropping it aborts the request.
pub type PendingOperation<'a> = Pin<Box<dyn Future<Output = RegistryResult<String>> + Send + 'a>>;

/// Non-blocking GET executor
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `url` and return the raw response body.
    ///
    /// Non-2xx responses are reported as [`PackagistError::Status`].
    async fn get(&self, url: &Url) -> RegistryResult<String>;
}

/// reqwest backed transport with connection pooling
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport with the given timeout and user agent
    pub fn new(timeout: Duration, user_agent: &str) -> RegistryResult<Self> {
        let client = ClientBuilder::new()
            // Connection pooling configuration
            .pool_max_idle_per_host(8)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(timeout)
            .gzip(true)
            .user_agent(user_agent)
            .build()
            .map_err(|e| PackagistError::Transport {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(Box::new(e)),
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> RegistryResult<String> {
        debug!(url = %url, "GET");

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| PackagistError::transport(format!("Failed to fetch {}: {}", url, e), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PackagistError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| PackagistError::transport(format!("Failed to read response body: {}", e), e))
    }
}
