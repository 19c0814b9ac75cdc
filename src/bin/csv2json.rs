//! Standalone `csv2json` command.
//!
//! Exits non-zero when any verse group could not be written.

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use tendon::cli::{self, Csv2JsonArgs};
use tendon::logger::CustomLogger;

/// Process verses and export JSON files
#[derive(Parser, Debug)]
#[command(name = "csv2json")]
#[command(version)]
#[command(about = "Process verses and export JSON files")]
struct CommandLineOptions {
    #[command(flatten)]
    args: Csv2JsonArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let options = CommandLineOptions::parse();
    cli::run_csv2json(options.args).await?;
    Ok(())
}
