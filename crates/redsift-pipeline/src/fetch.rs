//! Fetch orchestration: topic search, per-topic listing, field mapping.

use redsift_core::FetchSettings;
use redsift_reddit::{BlockingClient, SourceClient};

use crate::error::PipelineError;
use crate::mapper::map_post;
use crate::record::{Cell, Record};

/// Column holding the topic a record was listed under. Always first.
pub const SOURCE_GROUP_COLUMN: &str = "source_group";

/// Fetches posts for `term` as mapped records.
///
/// Topics are visited one at a time in the order the source returns them;
/// records keep topic order, then listing order within a topic. Any source
/// failure aborts the fetch and discards what was collected so far.
///
/// # Errors
///
/// - [`PipelineError::InvalidArgument`] for a blank term or an empty field list
/// - [`PipelineError::ExternalService`] if a search or listing call fails
pub async fn fetch_posts<S: SourceClient + ?Sized>(
    source: &S,
    term: &str,
    settings: &FetchSettings,
) -> Result<Vec<Record>, PipelineError> {
    let term = term.trim();
    if term.is_empty() {
        return Err(PipelineError::InvalidArgument(
            "search term must not be empty".to_string(),
        ));
    }
    if settings.fields.is_empty() {
        return Err(PipelineError::InvalidArgument(
            "field allow-list must not be empty".to_string(),
        ));
    }

    let mut topics = source.search_topics(term, settings.topic_limit).await?;
    topics.truncate(settings.topic_limit);
    tracing::info!(term, topics = topics.len(), "topic search complete");

    let mut records = Vec::new();
    for topic in &topics {
        let mut posts = source
            .list_posts(topic, settings.sort, settings.post_limit)
            .await?;
        posts.truncate(settings.post_limit);
        tracing::debug!(
            topic = %topic.display_name,
            posts = posts.len(),
            sort = %settings.sort,
            "listed topic posts"
        );

        for post in &posts {
            let mut record = Record::new();
            record.insert(SOURCE_GROUP_COLUMN, Cell::Text(topic.display_name.clone()));
            record.extend(map_post(post, &settings.fields)?);
            records.push(record);
        }
    }

    tracing::info!(term, records = records.len(), "fetch complete");
    Ok(records)
}

/// [`fetch_posts`] driven to completion on the client's own runtime.
///
/// # Errors
///
/// Same as [`fetch_posts`].
pub fn fetch_posts_blocking<S: SourceClient>(
    client: &BlockingClient<S>,
    term: &str,
    settings: &FetchSettings,
) -> Result<Vec<Record>, PipelineError> {
    client.block_on(fetch_posts(client.inner(), term, settings))
}

#[cfg(test)]
#[path = "fetch_test.rs"]
mod tests;
