mod cli;
mod code;
mod config;
mod cover_letter;
mod documents;
mod errors;
mod interview;
mod jobs;
mod llm_client;
mod output;
mod resume;
mod routes;
mod state;
mod template;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Invalid env values fail here, before anything is printed on stdout
    let config = Config::from_env()?;

    // Logs go to stderr; stdout is reserved for the command's output
    let filter = if cli.verbose {
        EnvFilter::new(format!("{}=debug", env!("CARGO_PKG_NAME")))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        })
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!("careerkit v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(err) = cli::run(cli, config).await {
        error!("{err}");
        output::print_failure(&err);
        std::process::exit(err.exit_code());
    }

    Ok(())
}
