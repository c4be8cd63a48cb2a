use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use derive_getters::Getters;

use crate::app::utils::parse_date;

pub const DEFAULT_DATA_DIR: &str = "~/.fipi";
pub const DEFAULT_LOG_FILE: &str = "fipi.log";

#[derive(Debug, Parser)]
#[command(name = "fipi", version, about = "Track the performance of a portfolio of asset lots")]
pub struct Cli {
    /// Directory holding the portfolio definitions and archived price files
    #[arg(long, env = "FIPI_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: String,

    /// Portfolio source to open first (defaults to the first one listed)
    #[arg(long)]
    pub source: Option<String>,

    /// Valuation date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub as_of: Option<String>,

    /// Print the summary table of every source and exit
    #[arg(long)]
    pub print: bool,

    /// JSON file of allowed user/password pairs
    #[arg(long, env = "FIPI_CREDENTIALS")]
    pub credentials: Option<String>,

    /// User to authenticate as; the password is read from FIPI_PASSWORD
    #[arg(long, env = "FIPI_USER")]
    pub user: Option<String>,

    /// Where logs go while the dashboard owns the terminal
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: String,
}

/// Resolved runtime settings.
#[derive(Clone, Debug, Getters)]
pub struct Settings {
    data_dir: PathBuf,
    source: Option<String>,
    as_of: NaiveDate,
    print: bool,
    credentials: Option<PathBuf>,
    user: Option<String>,
    password: Option<String>,
    log_file: PathBuf,
    alpha_vantage_api_key: Option<String>,
}

impl Settings {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let as_of = match cli.as_of.as_deref() {
            Some(field) => parse_date(field).with_context(|| "Invalid --as-of")?,
            None => Local::now().date_naive(),
        };

        Ok(Self {
            data_dir: expand_path(&cli.data_dir),
            source: cli.source,
            as_of,
            print: cli.print,
            credentials: cli.credentials.as_deref().map(expand_path),
            user: cli.user,
            password: non_empty_env("FIPI_PASSWORD"),
            log_file: expand_path(&cli.log_file),
            alpha_vantage_api_key: non_empty_env("ALPHA_VANTAGE_API_KEY"),
        })
    }
}

pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
