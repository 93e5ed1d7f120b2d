pub mod app_config;
pub mod config;
pub mod logging;
pub mod posts;

pub use app_config::{AppConfig, FetchSettings, RedditCredentials, StagePaths};
pub use config::{load_app_config, load_app_config_from_env};
pub use posts::{FieldName, SortOrder, DEFAULT_FIELDS};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid sort order \"{0}\": expected one of hot, top, new")]
    InvalidSortOrder(String),

    #[error("unknown post field \"{0}\"")]
    UnknownField(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
