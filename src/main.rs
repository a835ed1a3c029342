use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wordbench::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "wordbench=debug" } else { "wordbench=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with_writer(std::io::stderr)
        .init();

    cli.run().await
}
