//! Standalone `tei2json` command.
//!
//! Files that fail to convert are logged; the command still exits 0.

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use tendon::cli::{self, Tei2JsonArgs};
use tendon::logger::CustomLogger;

/// Convert TEI XML files to JSON format
#[derive(Parser, Debug)]
#[command(name = "tei2json")]
#[command(version)]
#[command(about = "Convert TEI XML files to JSON format")]
struct CommandLineOptions {
    #[command(flatten)]
    args: Tei2JsonArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let options = CommandLineOptions::parse();
    cli::run_tei2json(options.args).await?;
    Ok(())
}
