use anyhow::Context;
use clap::Parser;
use tracing::error;

use ethlog::cli::Cli;
use ethlog::runtime::{self, boot, RunSummary};

#[tokio::main]
async fn main() {
    boot::init_logging();
    let cli = Cli::parse();

    // Writers are flushed per source, so exiting here loses nothing.
    if let Err(e) = convert(&cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn convert(cli: &Cli) -> anyhow::Result<RunSummary> {
    let config = boot::configure(cli).context("failed to load configuration")?;
    runtime::run(&config).await.context("conversion failed")
}
