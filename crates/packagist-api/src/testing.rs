//! Scripted transport for exercising the client without a server

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use url::Url;

use packagist_core::error::PackagistError;

use crate::transport::Transport;
use crate::RegistryResult;

/// Canned reply for one request
pub(crate) enum Reply {
    Body(String),
    Fail(&'static str),
    /// Never settles; counts drops so tests can see the request was aborted
    Hang,
}

struct DropCounter(Arc<AtomicUsize>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Replays replies in order and records every requested URL
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<Url>>,
    aborted: Arc<AtomicUsize>,
}

impl ScriptedTransport {
    pub(crate) fn new(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            ..Self::default()
        })
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(Url::to_string)
            .collect()
    }

    /// Number of hanging requests that were dropped before settling
    pub(crate) fn aborted(&self) -> usize {
        self.aborted.load(Ordering::SeqCst)
    }

    pub(crate) async fn wait_for_requests(&self, count: usize) {
        while self.requests.lock().unwrap().len() < count {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &Url) -> RegistryResult<String> {
        self.requests.lock().unwrap().push(url.clone());
        let reply = self.replies.lock().unwrap().pop_front();

        match reply {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Fail(message)) => Err(PackagistError::Transport {
                message: message.to_string(),
                source: None,
            }),
            Some(Reply::Hang) => {
                let _guard = DropCounter(self.aborted.clone());
                std::future::pending::<RegistryResult<String>>().await
            },
            None => Err(PackagistError::Transport {
                message: format!("unexpected request to {}", url),
                source: None,
            }),
        }
    }
}

/// Search page body with one result per name
pub(crate) fn search_page(names: &[&str], total: usize, next: Option<&str>) -> Reply {
    let results: Vec<serde_json::Value> = names
        .iter()
        .map(|name| {
            serde_json::json!({
                "name": name,
                "description": format!("{} description", name),
                "url": format!("https://packagist.org/packages/{}", name),
                "downloads": 1,
                "favers": 0
            })
        })
        .collect();

    let mut body = serde_json::json!({ "results": results, "total": total });
    if let Some(next) = next {
        body["next"] = serde_json::Value::String(next.to_string());
    }
    Reply::Body(body.to_string())
}
