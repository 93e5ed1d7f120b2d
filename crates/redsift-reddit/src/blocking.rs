//! Synchronous calling convention for any [`SourceClient`].

use std::future::Future;

use redsift_core::SortOrder;
use tokio::runtime::{Builder, Runtime};

use crate::error::SourceError;
use crate::source::SourceClient;
use crate::types::{ExternalPost, Topic};

/// Drives a [`SourceClient`] on a private current-thread runtime, so each call
/// completes before the next one starts.
///
/// Must not be used from inside another tokio runtime.
pub struct BlockingClient<S> {
    inner: S,
    runtime: Runtime,
}

impl<S: SourceClient> BlockingClient<S> {
    /// # Errors
    ///
    /// Returns [`SourceError::Runtime`] if the runtime cannot be built.
    pub fn new(inner: S) -> Result<Self, SourceError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(SourceError::Runtime)?;
        Ok(Self { inner, runtime })
    }

    /// Blocking form of [`SourceClient::search_topics`].
    ///
    /// # Errors
    ///
    /// Propagates the wrapped client's error.
    pub fn search_topics(&self, term: &str, limit: usize) -> Result<Vec<Topic>, SourceError> {
        self.runtime.block_on(self.inner.search_topics(term, limit))
    }

    /// Blocking form of [`SourceClient::list_posts`].
    ///
    /// # Errors
    ///
    /// Propagates the wrapped client's error.
    pub fn list_posts(
        &self,
        topic: &Topic,
        order: SortOrder,
        limit: usize,
    ) -> Result<Vec<ExternalPost>, SourceError> {
        self.runtime
            .block_on(self.inner.list_posts(topic, order, limit))
    }

    /// Runs an arbitrary future that uses the wrapped client to completion.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}
