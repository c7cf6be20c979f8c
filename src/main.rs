mod cli;
mod migration;
mod quicksight;
mod storage;
mod utils;

#[cfg(test)]
mod tests;

use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = cli::Cli::parse();

    let config = utils::Config::load(cli.config.as_deref())?.with_overrides(
        cli.region,
        cli.profile,
        cli.extracts_dir,
    );

    // Initialize logging
    utils::init_logging(config.log_format);

    tracing::debug!(
        region = ?config.region,
        extracts_dir = %config.extracts_dir.display(),
        "Configuration loaded"
    );

    cli::run(cli.command, &config).await
}
