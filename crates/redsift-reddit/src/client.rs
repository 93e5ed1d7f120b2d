//! Reddit API client (client-credentials OAuth, read-only).

use std::time::{Duration, Instant};

use async_trait::async_trait;
use redsift_core::{RedditCredentials, SortOrder};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::error::SourceError;
use crate::source::SourceClient;
use crate::types::{ExternalPost, Listing, Topic};

const DEFAULT_AUTH_BASE_URL: &str = "https://www.reddit.com";
const DEFAULT_API_BASE_URL: &str = "https://oauth.reddit.com";

/// Reddit caps listing pages at 100 children.
const MAX_PAGE_SIZE: usize = 100;
/// Tokens are refreshed this long before Reddit says they expire.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);
const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;

/// Reddit OAuth token response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<u64>,
}

#[derive(Debug)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Reddit API client.
///
/// The access token is exchanged lazily on the first request and reused until
/// it nears expiry, so constructing a client never touches the network.
pub struct RedditClient {
    client: Client,
    credentials: RedditCredentials,
    auth_base_url: String,
    api_base_url: String,
    token: Mutex<Option<CachedToken>>,
}

impl RedditClient {
    /// Creates a client pointed at the production Reddit endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(credentials: RedditCredentials, timeout_secs: u64) -> Result<Self, SourceError> {
        Self::with_base_urls(
            credentials,
            timeout_secs,
            DEFAULT_AUTH_BASE_URL,
            DEFAULT_API_BASE_URL,
        )
    }

    /// Creates a client with custom token and API hosts (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_urls(
        credentials: RedditCredentials,
        timeout_secs: u64,
        auth_base_url: &str,
        api_base_url: &str,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(credentials.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            credentials,
            auth_base_url: auth_base_url.trim_end_matches('/').to_string(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            token: Mutex::new(None),
        })
    }

    async fn access_token(&self) -> Result<String, SourceError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.value.clone());
            }
        }

        let fresh = self.fetch_token().await?;
        let value = fresh.value.clone();
        *cached = Some(fresh);
        Ok(value)
    }

    async fn fetch_token(&self) -> Result<CachedToken, SourceError> {
        let response = self
            .client
            .post(format!("{}/api/v1/access_token", self.auth_base_url))
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Auth(format!(
                "token exchange failed with status {}",
                response.status()
            )));
        }

        let token_resp: TokenResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Auth(format!("token parse error: {e}")))?;

        let lifetime =
            Duration::from_secs(token_resp.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS));
        tracing::debug!(lifetime_secs = lifetime.as_secs(), "obtained Reddit access token");

        Ok(CachedToken {
            value: token_resp.access_token,
            expires_at: Instant::now() + lifetime.saturating_sub(TOKEN_EXPIRY_MARGIN),
        })
    }

    async fn invalidate_token(&self) {
        *self.token.lock().await = None;
    }

    /// Walks a listing endpoint by `after` cursor until `limit` children are collected.
    ///
    /// The first page is always requested, even for `limit == 0`.
    async fn paginate<T: DeserializeOwned>(
        &self,
        path: &str,
        extra_params: &[(&str, &str)],
        limit: usize,
    ) -> Result<Vec<T>, SourceError> {
        let url = format!("{}{path}", self.api_base_url);
        let mut items: Vec<T> = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let page_size = limit.saturating_sub(items.len()).min(MAX_PAGE_SIZE);
            let mut params: Vec<(&str, String)> = vec![
                ("limit", page_size.to_string()),
                ("raw_json", "1".to_string()),
            ];
            params.extend(extra_params.iter().map(|(k, v)| (*k, (*v).to_string())));
            if let Some(cursor) = &after {
                params.push(("after", cursor.clone()));
            }

            let token = self.access_token().await?;
            let response = self
                .client
                .get(&url)
                .bearer_auth(&token)
                .query(&params)
                .send()
                .await?;

            let status = response.status();
            if status == StatusCode::UNAUTHORIZED {
                self.invalidate_token().await;
                return Err(SourceError::Auth(format!(
                    "{url} rejected the access token"
                )));
            }
            if !status.is_success() {
                return Err(SourceError::UnexpectedStatus {
                    status: status.as_u16(),
                    url,
                });
            }

            let body = response.text().await?;
            let listing: Listing<T> =
                serde_json::from_str(&body).map_err(|e| SourceError::Deserialize {
                    context: format!("listing from {url}"),
                    source: e,
                })?;

            let page_len = listing.data.children.len();
            items.extend(listing.data.children.into_iter().map(|child| child.data));
            after = listing.data.after;

            tracing::debug!(url = %url, page_len, total = items.len(), "fetched listing page");

            if items.len() >= limit || page_len == 0 || after.is_none() {
                break;
            }
        }

        items.truncate(limit);
        Ok(items)
    }
}

#[async_trait]
impl SourceClient for RedditClient {
    async fn search_topics(&self, term: &str, limit: usize) -> Result<Vec<Topic>, SourceError> {
        self.paginate("/subreddits/search", &[("q", term)], limit)
            .await
    }

    async fn list_posts(
        &self,
        topic: &Topic,
        order: SortOrder,
        limit: usize,
    ) -> Result<Vec<ExternalPost>, SourceError> {
        let path = format!("/r/{}/{}", topic.display_name, order.as_str());
        let extra: &[(&str, &str)] = match order {
            SortOrder::Top => &[("t", "all")],
            SortOrder::Hot | SortOrder::New => &[],
        };
        self.paginate(&path, extra, limit).await
    }
}
