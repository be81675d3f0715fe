/*
[INPUT]:  CLI arguments, STOCKFIGHTER_* environment variables
[OUTPUT]: JSON responses on stdout, logs on stderr
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or startup flow
*/

mod cli;
mod commands;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::process::ExitCode;
use stockfighter_api::{ClientConfig, Credentials, StockfighterClient};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use commands::Outcome;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let config = ClientConfig::from_env();
    debug!(base_url = %config.base_url, ws_base_url = %config.ws_base_url, "configuration loaded");

    let client = StockfighterClient::with_config(Credentials::new(args.api_key), config)
        .context("build client")?;

    match commands::run(&client, args.command).await? {
        Outcome::Response(response) => {
            let rendered = serde_json::to_string_pretty(response.as_value())
                .context("render response")?;
            println!("{rendered}");
            if response.is_ok() {
                Ok(ExitCode::SUCCESS)
            } else {
                warn!(error = %response.error_message(), "API reported failure");
                Ok(ExitCode::FAILURE)
            }
        }
        Outcome::FeedEnded => Ok(ExitCode::SUCCESS),
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}
