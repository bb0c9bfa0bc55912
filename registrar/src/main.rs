use aptos_registrar::cli::Cli;
use aptos_registrar::tracing::init_logging;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    Cli::parse().run().await
}
