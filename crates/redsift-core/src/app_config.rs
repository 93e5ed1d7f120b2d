use std::net::SocketAddr;
use std::path::PathBuf;

use crate::posts::{FieldName, SortOrder};

/// Credentials for the Reddit OAuth client-credentials flow.
#[derive(Clone, PartialEq, Eq)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
}

impl std::fmt::Debug for RedditCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedditCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Limits and field selection for one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    pub topic_limit: usize,
    pub post_limit: usize,
    pub sort: SortOrder,
    pub fields: Vec<FieldName>,
}

impl FetchSettings {
    /// Same settings with a different per-topic post limit.
    #[must_use]
    pub fn with_post_limit(&self, post_limit: usize) -> Self {
        Self {
            post_limit,
            ..self.clone()
        }
    }
}

/// Output files for the raw, cleaned, and shuffled pipeline stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagePaths {
    pub raw: PathBuf,
    pub cleaned: PathBuf,
    pub shuffled: PathBuf,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: RedditCredentials,
    pub fetch: FetchSettings,
    /// Post limit used by the interactive UI, which samples fewer posts per topic.
    pub ui_post_limit: usize,
    /// Search term used by a non-interactive pipeline run.
    pub search_query: String,
    pub stages: StagePaths,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub log_path: PathBuf,
    pub log_max_bytes: u64,
    pub request_timeout_secs: u64,
}
