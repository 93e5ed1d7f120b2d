mod menu;
mod output;
mod progress;

use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use redsift_core::AppConfig;
use redsift_pipeline::{fetch_posts_blocking, run_pipeline_blocking};
use redsift_reddit::{BlockingClient, RedditClient};
use redsift_server::AppState;

use crate::progress::SpinnerObserver;

#[derive(Debug, Parser)]
#[command(name = "redsift-cli")]
#[command(about = "Fetch, clean, and shuffle Reddit posts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch posts matching QUERY and print them
    Fetch {
        query: String,
        /// Maximum topics to search (defaults to REDSIFT_TOPIC_LIMIT)
        #[arg(long)]
        topics: Option<usize>,
        /// Maximum posts per topic (defaults to REDSIFT_POST_LIMIT)
        #[arg(long)]
        posts: Option<usize>,
    },
    /// Run fetch, clean, and shuffle, writing all three stage files
    Run {
        /// Search term (defaults to REDSIFT_SEARCH_QUERY)
        #[arg(long)]
        query: Option<String>,
    },
    /// Serve the scrape endpoint and search page until interrupted
    Serve,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = redsift_core::load_app_config()?;
    redsift_core::logging::init_tracing(&config)?;

    match cli.command {
        Some(Commands::Fetch {
            query,
            topics,
            posts,
        }) => fetch_and_print(&config, &query, topics, posts),
        Some(Commands::Run { query }) => {
            let term = query.unwrap_or_else(|| config.search_query.clone());
            run_full_pipeline(&config, &term)
        }
        Some(Commands::Serve) => serve_until_interrupted(&config, redsift_server::shutdown_signal()),
        None => menu::run(&config),
    }
}

fn blocking_client(config: &AppConfig) -> anyhow::Result<BlockingClient<RedditClient>> {
    let client = RedditClient::new(config.credentials.clone(), config.request_timeout_secs)?;
    Ok(BlockingClient::new(client)?)
}

pub(crate) fn fetch_and_print(
    config: &AppConfig,
    query: &str,
    topics: Option<usize>,
    posts: Option<usize>,
) -> anyhow::Result<()> {
    let mut settings = config.fetch.clone();
    if let Some(topics) = topics {
        settings.topic_limit = topics;
    }
    if let Some(posts) = posts {
        settings.post_limit = posts;
    }

    let client = blocking_client(config)?;
    let spinner = progress::spinner("Fetching posts...");
    let result = fetch_posts_blocking(&client, query, &settings);
    spinner.finish_and_clear();

    let records = result.context("failed to fetch posts")?;
    if records.is_empty() {
        println!("No posts found for the provided query.");
        return Ok(());
    }
    for record in &records {
        print!("{}", output::format_record(record));
    }
    Ok(())
}

pub(crate) fn run_full_pipeline(config: &AppConfig, term: &str) -> anyhow::Result<()> {
    let client = blocking_client(config)?;
    let mut observer = SpinnerObserver::new();
    let report = run_pipeline_blocking(&client, term, &config.fetch, &config.stages, &mut observer)?;

    println!(
        "Fetched {} posts; cleaned {} rows; shuffled {} rows into {}",
        report.records_fetched,
        report.rows_cleaned,
        report.rows_shuffled,
        config.stages.shuffled.display()
    );
    Ok(())
}

pub(crate) fn serve_until_interrupted<F>(config: &AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let client = RedditClient::new(config.credentials.clone(), config.request_timeout_secs)?;
    let state = AppState::from_config(config, Arc::new(client));
    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;

    println!(
        "Search page at http://{}/ (press Ctrl-C to stop)",
        config.bind_addr
    );
    runtime.block_on(redsift_server::serve(config.bind_addr, state, shutdown))
}
