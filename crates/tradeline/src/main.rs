//! Tradeline CLI binary.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tradeline::cli::Cli;

/// Main entry point for the tradeline CLI.
///
/// Every command is a handful of file reads followed by in-memory work, so a
/// single-threaded runtime is enough.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so JSON output on stdout stays parseable.
    // Example: RUST_LOG=tradeline=debug tradeline owners --season 2026
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tradeline=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("Starting tradeline CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Tradeline CLI completed successfully");
    Ok(())
}
