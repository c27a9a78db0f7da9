//! Paginated search aggregation
//!
//! Packagist splits search results into pages, each pointing at the next
//! one. [`Pagination`] follows those pointers one page at a time and owns
//! the results collected so far. The caller only ever sees the complete
//! list: a failure or cancellation on any page discards everything.
//!
//! ```text
//!  Fetching ──next──▶ Fetching
//!     │ no next ──▶ Done
//!     │ error   ──▶ Failed
//!     └ cancel  ──▶ Cancelled
//! ```

use tracing::{debug, info, warn};
use url::Url;

use packagist_core::error::PackagistError;
use packagist_core::types::SearchResult;

use crate::api::SearchPage;
use crate::mapper::ResultFactory;
use crate::pending::CancelSignal;
use crate::transport::{PendingOperation, Transport};
use crate::RegistryResult;

/// Progress of a paginated search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    /// A page at `url` is owed
    Fetching { url: Url },
    /// Last page seen, results are complete
    Done,
    /// A page failed to load or parse
    Failed,
    /// Cancelled while a page was outstanding
    Cancelled,
}

/// State machine driving one logical search
#[derive(Debug)]
pub struct Pagination {
    state: SearchState,
    base_url: Url,
    results: Vec<SearchResult>,
    pages: usize,
}

impl Pagination {
    /// Start a search at `start`; relative `next` pointers resolve against `base_url`
    pub fn new(start: Url, base_url: Url) -> Self {
        Self {
            state: SearchState::Fetching { url: start },
            base_url,
            results: Vec::new(),
            pages: 0,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// URL of the page owed next, if still fetching
    pub fn current_url(&self) -> Option<&Url> {
        match &self.state {
            SearchState::Fetching { url } => Some(url),
            _ => None,
        }
    }

    /// Number of pages applied so far
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Results collected so far
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Apply a successfully fetched page.
    ///
    /// Appends its results in server order and moves to the next page, or
    /// to `Done` when the page carries no `next` pointer. Pages arriving
    /// after the search settled are ignored.
    pub fn advance(&mut self, page: SearchPage) -> RegistryResult<()> {
        if !matches!(self.state, SearchState::Fetching { .. }) {
            return Ok(());
        }

        self.pages += 1;
        self.results.extend(page.results);

        match page.next {
            Some(next) => match self.base_url.join(&next) {
                Ok(url) => {
                    self.state = SearchState::Fetching { url };
                    Ok(())
                },
                Err(e) => {
                    self.fail();
                    Err(PackagistError::InvalidUrl {
                        url: next,
                        reason: e.to_string(),
                    })
                },
            },
            None => {
                self.state = SearchState::Done;
                Ok(())
            },
        }
    }

    /// Abort after a failed page, dropping partial results
    pub fn fail(&mut self) {
        self.state = SearchState::Failed;
        self.results.clear();
    }

    /// Abort on cancellation, dropping partial results
    pub fn cancel(&mut self) {
        self.state = SearchState::Cancelled;
        self.results.clear();
    }

    /// Fetch pages until the search settles.
    ///
    /// Exactly one page request is in flight at any time. Cancellation drops
    /// that request and no further page is requested.
    pub async fn run(
        mut self,
        transport: &dyn Transport,
        factory: &ResultFactory,
        signal: &mut CancelSignal,
    ) -> RegistryResult<Vec<SearchResult>> {
        while let SearchState::Fetching { url } = &self.state {
            let url = url.clone();
            let page_number = self.pages + 1;
            debug!(page = page_number, url = %url, "Fetching search page");

            let pending: PendingOperation<'_> = transport.get(&url);
            let outcome = tokio::select! {
                biased;
                _ = signal.cancelled() => {
                    warn!(page = page_number, "Search cancelled");
                    self.cancel();
                    return Err(PackagistError::Cancelled);
                },
                body = pending => body.and_then(|body| {
                    factory.create_search_page(factory.parse(&body)?)
                }),
            };

            if let Err(error) = outcome.and_then(|page| self.advance(page)) {
                warn!(page = page_number, url = %url, error = %error, "Search page failed");
                self.fail();
                return Err(error);
            }
        }

        info!(pages = self.pages, results = self.results.len(), "Search completed");
        Ok(self.results)
    }
}
