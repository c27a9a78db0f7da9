//! Cancellable operation futures
//!
//! Every public client operation returns a [`Cancellable`]. Awaiting it
//! drives the operation; [`Cancellable::cancel`] or a [`CancelHandle`]
//! obtained beforehand stops it at its next suspension point and settles it
//! with [`PackagistError::Cancelled`].

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::watch;

use packagist_core::error::PackagistError;

use crate::RegistryResult;

/// Cloneable trigger for cancelling one operation
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    /// Request cancellation. No-op once the operation has settled.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

/// Receiving side handed to the running operation
#[derive(Debug)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    /// Resolve once cancellation has been requested
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                // every handle is gone, nobody can cancel anymore
                std::future::pending::<()>().await;
            }
        }
    }

    /// Run `future` unless cancellation wins the race
    pub async fn guard<F, T>(&mut self, future: F) -> RegistryResult<T>
    where
        F: Future<Output = RegistryResult<T>>,
    {
        tokio::select! {
            biased;
            _ = self.cancelled() => Err(PackagistError::Cancelled),
            result = future => result,
        }
    }
}

/// Future of a cancellable registry operation
pub struct Cancellable<T> {
    inner: Pin<Box<dyn Future<Output = RegistryResult<T>> + Send>>,
    handle: CancelHandle,
}

impl<T> Cancellable<T> {
    /// Build an operation that observes its own cancellation signal
    pub fn new<F, Fut>(operation: F) -> Self
    where
        F: FnOnce(CancelSignal) -> Fut,
        Fut: Future<Output = RegistryResult<T>> + Send + 'static,
    {
        let (tx, rx) = watch::channel(false);
        Self {
            inner: Box::pin(operation(CancelSignal { rx })),
            handle: CancelHandle { tx: Arc::new(tx) },
        }
    }

    /// Make a plain future cancellable at its suspension points
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = RegistryResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        Self::new(|mut signal| async move { signal.guard(future).await })
    }

    /// Handle that can cancel this operation from elsewhere
    pub fn cancel_handle(&self) -> CancelHandle {
        self.handle.clone()
    }

    /// Cancel this operation
    pub fn cancel(&self) {
        self.handle.cancel();
    }
}

impl<T> Future for Cancellable<T> {
    type Output = RegistryResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.as_mut().poll(cx)
    }
}

impl<T> fmt::Debug for Cancellable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cancellable")
            .field("cancelled", &self.handle.is_cancelled())
            .finish_non_exhaustive()
    }
}
