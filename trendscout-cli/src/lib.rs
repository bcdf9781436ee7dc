//! Command-line interface for the Trendscout daily run.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod run;

pub use error::CliError;

pub(crate) const ARG_CATEGORIES: &str = "categories";
pub(crate) const ARG_SOURCE_URL: &str = "source-url";
pub(crate) const ARG_SOURCE_DIR: &str = "source-dir";
pub(crate) const ARG_OUTPUT_DIR: &str = "output-dir";
pub(crate) const ARG_RULES: &str = "rules";
pub(crate) const ARG_REGIME: &str = "regime";
pub(crate) const ARG_TOP: &str = "top";
pub(crate) const ARG_NO_SERIES: &str = "no-series";
pub(crate) const ARG_CATEGORY_TIMEOUT: &str = "category-timeout-secs";
pub(crate) const ARG_REQUEST_TIMEOUT: &str = "request-timeout-secs";
pub(crate) const ARG_DATE: &str = "date";
pub(crate) const ENV_SOURCE_URL: &str = "TRENDSCOUT_CMDS_RUN_SOURCE_URL";

/// Run the Trendscout CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] for argument, configuration, rule-file and snapshot
/// failures. Category failures are reported in the summary instead.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Run(args) => run::run_daily(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "trendscout",
    about = "Rank trending keywords by how buildable they are",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Discover, score and persist today's trends.
    Run(run::RunArgs),
}

#[cfg(test)]
mod tests;
