//! Interactive text menu used when no subcommand is given.

use dialoguer::{theme::ColorfulTheme, Input, Select};
use redsift_core::AppConfig;

const ITEMS: [&str; 4] = [
    "Fetch posts and print them",
    "Run full pipeline (fetch, clean, shuffle)",
    "Launch search page",
    "Exit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuChoice {
    FetchAndPrint,
    FullPipeline,
    LaunchUi,
    Exit,
}

impl MenuChoice {
    pub(crate) fn from_index(index: usize) -> Self {
        match index {
            0 => MenuChoice::FetchAndPrint,
            1 => MenuChoice::FullPipeline,
            2 => MenuChoice::LaunchUi,
            _ => MenuChoice::Exit,
        }
    }
}

/// Loops until the user picks Exit. Action failures are printed and the menu
/// is shown again; only prompt failures end the loop with an error.
pub(crate) fn run(config: &AppConfig) -> anyhow::Result<()> {
    let theme = ColorfulTheme::default();

    loop {
        println!();
        let index = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(&ITEMS)
            .default(0)
            .interact()?;

        let result = match MenuChoice::from_index(index) {
            MenuChoice::FetchAndPrint => {
                let query: String = Input::with_theme(&theme)
                    .with_prompt("Enter a search query")
                    .interact_text()?;
                crate::fetch_and_print(config, &query, None, None)
            }
            MenuChoice::FullPipeline => {
                let mut input = Input::<String>::with_theme(&theme).with_prompt("Search query");
                if !config.search_query.is_empty() {
                    input = input.default(config.search_query.clone());
                }
                let query = input.interact_text()?;
                crate::run_full_pipeline(config, &query)
            }
            MenuChoice::LaunchUi => crate::serve_until_interrupted(config, ctrl_c()),
            MenuChoice::Exit => return Ok(()),
        };

        if let Err(e) = result {
            tracing::error!(error = %e, "menu action failed");
            println!("Error: {e:#}");
        }
    }
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
}
