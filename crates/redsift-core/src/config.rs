use std::net::SocketAddr;
use std::path::PathBuf;

use crate::app_config::{AppConfig, FetchSettings, RedditCredentials, StagePaths};
use crate::posts::{FieldName, SortOrder};
use crate::ConfigError;

const DEFAULT_FIELDS_RAW: &str =
    "title,body,score,comment_count,created_utc,permalink,url,author";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation live here so tests can drive them with a plain
/// `HashMap` lookup instead of mutating the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .trim()
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .trim()
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let credentials = RedditCredentials {
        client_id: require("REDDIT_CLIENT_ID")?,
        client_secret: require("REDDIT_CLIENT_SECRET")?,
        user_agent: require("REDDIT_USER_AGENT")?,
    };

    let sort = or_default("REDSIFT_SORT", "hot")
        .parse::<SortOrder>()
        .map_err(|e| invalid("REDSIFT_SORT", e.to_string()))?;

    let fields = FieldName::parse_list(&or_default("REDSIFT_FIELDS", DEFAULT_FIELDS_RAW))
        .map_err(|e| invalid("REDSIFT_FIELDS", e.to_string()))?;
    if fields.is_empty() {
        return Err(invalid(
            "REDSIFT_FIELDS",
            "field allow-list must name at least one field".to_string(),
        ));
    }

    let fetch = FetchSettings {
        topic_limit: parse_usize("REDSIFT_TOPIC_LIMIT", "5")?,
        post_limit: parse_usize("REDSIFT_POST_LIMIT", "10")?,
        sort,
        fields,
    };
    let ui_post_limit = parse_usize("REDSIFT_UI_POST_LIMIT", "5")?;

    let stages = StagePaths {
        raw: PathBuf::from(or_default(
            "REDSIFT_RAW_PATH",
            "data/fastapi_subreddits_posts.csv",
        )),
        cleaned: PathBuf::from(or_default("REDSIFT_CLEANED_PATH", "data/cleaned_file.csv")),
        shuffled: PathBuf::from(or_default(
            "REDSIFT_SHUFFLED_PATH",
            "data/shuffled_cleaned_file.csv",
        )),
    };

    let bind_addr = or_default("REDSIFT_BIND_ADDR", "127.0.0.1:8000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("REDSIFT_BIND_ADDR", e.to_string()))?;

    Ok(AppConfig {
        credentials,
        fetch,
        ui_post_limit,
        search_query: or_default("REDSIFT_SEARCH_QUERY", ""),
        stages,
        bind_addr,
        log_level: or_default("REDSIFT_LOG_LEVEL", "info"),
        log_path: PathBuf::from(or_default("REDSIFT_LOG_PATH", "logs/reddit_scraper.log")),
        log_max_bytes: parse_u64("REDSIFT_LOG_MAX_BYTES", "10485760")?,
        request_timeout_secs: parse_u64("REDSIFT_REQUEST_TIMEOUT_SECS", "30")?,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
