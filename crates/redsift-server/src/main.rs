use std::sync::Arc;

use redsift_reddit::RedditClient;
use redsift_server::{serve, shutdown_signal, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = redsift_core::load_app_config()?;
    redsift_core::logging::init_tracing(&config)?;

    let client = RedditClient::new(config.credentials.clone(), config.request_timeout_secs)?;
    let state = AppState::from_config(&config, Arc::new(client));

    serve(config.bind_addr, state, shutdown_signal()).await
}
