use std::sync::Arc;

use async_trait::async_trait;
use redsift_core::SortOrder;

use crate::error::SourceError;
use crate::types::{ExternalPost, Topic};

/// Read-only access to a content platform.
///
/// Implementations perform no retries and no rate-limit backoff; transport and
/// authentication failures are returned to the caller as-is.
#[async_trait]
pub trait SourceClient: Send + Sync {
    /// Search communities matching `term`, returning at most `limit` in source order.
    async fn search_topics(&self, term: &str, limit: usize) -> Result<Vec<Topic>, SourceError>;

    /// List at most `limit` posts of `topic` in `order`.
    async fn list_posts(
        &self,
        topic: &Topic,
        order: SortOrder,
        limit: usize,
    ) -> Result<Vec<ExternalPost>, SourceError>;

    /// [`SourceClient::list_posts`] with the order given by name (`hot`, `top`, `new`).
    ///
    /// An unknown name fails with [`SourceError::InvalidArgument`] before any request.
    async fn list_posts_by_name(
        &self,
        topic: &Topic,
        order: &str,
        limit: usize,
    ) -> Result<Vec<ExternalPost>, SourceError> {
        let order = order.parse::<SortOrder>()?;
        self.list_posts(topic, order, limit).await
    }
}

#[async_trait]
impl<S: SourceClient + ?Sized> SourceClient for Arc<S> {
    async fn search_topics(&self, term: &str, limit: usize) -> Result<Vec<Topic>, SourceError> {
        (**self).search_topics(term, limit).await
    }

    async fn list_posts(
        &self,
        topic: &Topic,
        order: SortOrder,
        limit: usize,
    ) -> Result<Vec<ExternalPost>, SourceError> {
        (**self).list_posts(topic, order, limit).await
    }
}
