use std::process::exit;

use clap::Parser;
use confluence_table_lib::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    match confluence_table_lib::run(cli).await {
        Ok(outcome) => {
            tracing::debug!(version = outcome.version, rows = outcome.row_count, "done");
        }
        Err(e) => {
            eprintln!("confluence-table error: {e}");
            exit(1);
        }
    }
}
