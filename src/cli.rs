use std::path::PathBuf;

use clap::Parser;

use crate::config::{AppConfig, ENV_BASE_URL, ENV_PAGE_ID, ENV_PASSWORD, ENV_USERNAME};
use crate::errors::{TableError, TableResult};
use crate::wiki::types::{Connection, Credentials};

/// Update a Confluence page table
#[derive(Parser, Debug, Clone)]
#[command(name = "confluence-table", author, version, about, long_about = None)]
pub struct Cli {
    /// Confluence username (or CONFLUENCE_USERNAME)
    #[arg(long)]
    pub username: Option<String>,

    /// Confluence password (or CONFLUENCE_PASSWORD)
    #[arg(long)]
    pub password: Option<String>,

    /// Confluence base URL (or CONFLUENCE_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Confluence page ID (or CONFLUENCE_PAGE_ID)
    #[arg(long)]
    pub page_id: Option<String>,

    /// New row to add to the table
    #[arg(long, num_args = 1.., required = true, value_name = "VALUE")]
    pub new_row: Vec<String>,

    /// Path to a config.toml with a [confluence] table
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

impl Cli {
    /// Build the connection, taking each setting from the command line first,
    /// then `env`, then the config file.
    pub fn connection<F>(&self, config: &AppConfig, env: F) -> TableResult<Connection>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = &config.confluence;
        let username = pick("--username", &self.username, ENV_USERNAME, &env, &file.username)?;
        let password = pick("--password", &self.password, ENV_PASSWORD, &env, &None)?;
        let base_url = pick("--base-url", &self.base_url, ENV_BASE_URL, &env, &file.base_url)?;
        let page_id = pick("--page-id", &self.page_id, ENV_PAGE_ID, &env, &file.page_id)?;

        Ok(Connection::new(
            base_url,
            Credentials::new(username, password),
            page_id,
        ))
    }
}

fn pick<F>(
    flag: &str,
    arg: &Option<String>,
    env_key: &str,
    env: &F,
    file: &Option<String>,
) -> TableResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    arg.clone()
        .or_else(|| env(env_key))
        .or_else(|| file.clone())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            TableError::Config(format!("{flag} is required (or set {env_key})"))
        })
}
