//! Bless Crawl CLI
//!
//! Runs scrape, map and crawl operations against the remote endpoint.

use std::path::PathBuf;
use std::process::ExitCode;

use bless_crawl::{
    BlessCrawl, BlessCrawlError,
    settings::{self, Settings, SettingsError},
};
use clap::{Parser, Subcommand};
use futures::future::join_all;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// bless-crawl - validated web operations on the Bless network
#[derive(Parser, Debug)]
#[command(name = "bless-crawl", version, about = "Scrape, map and crawl web pages")]
struct Cli {
    /// Path to the settings file
    #[arg(short, long, default_value = "bless-crawl.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape one or more pages
    Scrape {
        #[arg(required = true)]
        urls: Vec<String>,
        /// Options as a JSON object
        #[arg(short, long)]
        options: Option<String>,
    },

    /// Map the links of one or more pages
    Map {
        #[arg(required = true)]
        urls: Vec<String>,
        #[arg(short, long)]
        options: Option<String>,
    },

    /// Crawl one or more sites
    Crawl {
        #[arg(required = true)]
        urls: Vec<String>,
        #[arg(short, long)]
        options: Option<String>,
    },

    /// Validate the settings file
    Validate,
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Client(#[from] BlessCrawlError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("Invalid --options JSON: {0}")]
    Options(#[from] serde_json::Error),

    #[error("{0} of {1} operations failed")]
    Failed(usize, usize),
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn parse_options(options: Option<&str>) -> Result<Value, CliError> {
    match options {
        Some(raw) => Ok(serde_json::from_str(raw)?),
        None => Ok(Value::Null),
    }
}

/// Print each result as pretty JSON and count failures.
fn report<T: Serialize>(urls: &[String], results: Vec<bless_crawl::Result<T>>) -> Result<(), CliError> {
    let mut failures = 0;
    for (url, result) in urls.iter().zip(results) {
        match result {
            Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            Err(e) => {
                failures += 1;
                match e.code() {
                    Some(code) => log::error!("{url}: [{code}] {e}"),
                    None => log::error!("{url}: {e}"),
                }
            }
        }
    }
    if failures > 0 {
        return Err(CliError::Failed(failures, urls.len()));
    }
    Ok(())
}

async fn run(cli: Cli, settings: Settings) -> Result<(), CliError> {
    if let Command::Validate = cli.command {
        log::info!("Validating {}...", cli.config.display());
        let config = settings.client_config()?;
        log::info!("✓ Client settings OK");
        log::info!(
            "Endpoint: {}",
            settings::resolve_endpoint(config.endpoint_url.as_deref())
        );
        log::info!(
            "Function: {}",
            settings::resolve_function_id(config.function_id.as_deref())
        );
        return Ok(());
    }

    let client = BlessCrawl::new(settings.client_value()?)?;

    match cli.command {
        Command::Scrape { urls, options } => {
            let options = parse_options(options.as_deref())?;
            let results =
                join_all(urls.iter().map(|url| client.scrape(url, options.clone()))).await;
            report(&urls, results)
        }
        Command::Map { urls, options } => {
            let options = parse_options(options.as_deref())?;
            let results = join_all(urls.iter().map(|url| client.map(url, options.clone()))).await;
            report(&urls, results)
        }
        Command::Crawl { urls, options } => {
            let options = parse_options(options.as_deref())?;
            let results =
                join_all(urls.iter().map(|url| client.crawl(url, options.clone()))).await;
            report(&urls, results)
        }
        Command::Validate => Ok(()),
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = Settings::load_or_default(&cli.config);
    init_logging(cli.verbose, &settings.logging.level);

    match run(cli, settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
