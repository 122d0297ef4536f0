pub mod cli;
pub mod config;
pub mod errors;
pub mod wiki;

use crate::cli::Cli;
use crate::errors::TableResult;
use crate::wiki::table::TableRow;
use crate::wiki::transports::http::HttpTransport;
use crate::wiki::types::UpdateOutcome;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Entry point for the binary: set up logging and settings, then append the
/// requested row to the configured page.
pub async fn run(cli: Cli) -> TableResult<UpdateOutcome> {
    init_tracing(cli.verbose);

    // Load .env file if present (ignore error if not found)
    let _ = dotenvy::dotenv();

    let config = config::load_config(cli.config.as_deref())?;
    let connection = cli.connection(&config, |key| std::env::var(key).ok())?;

    tracing::info!(
        base_url = %connection.base_url,
        page_id = %connection.page_id,
        cells = cli.new_row.len(),
        "appending row"
    );

    let transport = HttpTransport::new();
    wiki::updater::update(&transport, &connection, TableRow::from_values(cli.new_row)).await
}
