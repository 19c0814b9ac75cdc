// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use log::{info, LevelFilter};
use std::path::PathBuf;

use tendon::cli::{self, Csv2JsonArgs, Tei2JsonArgs};
use tendon::logger::CustomLogger;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a CSV table of verse witnesses into one JSON file per verse
    Csv2json(Csv2JsonArgs),

    /// Convert TEI-XML transcriptions into per-manuscript JSON directories
    Tei2json(Tei2JsonArgs),

    /// Write a default configuration file
    InitConfig {
        /// Where to write the configuration
        #[arg(default_value = "conf.json")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completions for tendon
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// tendon - transcription converters for textual criticism
///
/// Launches each converter as a subcommand. `csv2json` and `tei2json` are
/// also installed as standalone commands.
#[derive(Parser, Debug)]
#[command(name = "tendon")]
#[command(version)]
#[command(about = "Convert transcription data to the JSON transcription schema")]
#[command(long_about = "tendon converts collated verse tables (CSV) and TEI-XML manuscript
transcriptions into JSON transcription files.

EXAMPLES:
    tendon csv2json verses.csv out/ --threads 8      # One JSON file per (ga, nkv) group
    tendon tei2json tei/ json/ ns ps                 # Walk tei/ns and tei/ps for .xml files
    tendon tei2json tei/ json/ ns --verse B04K1V1    # Only one verse per document
    tendon init-config conf.json                     # Write the default configuration
    tendon completions bash > tendon.bash            # Generate bash completions

CONFIGURATION:
    Pass a JSON configuration with --config (or TENDON_CONFIG). Missing
    fields take their default values; command line flags win over the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info by default, the config or --log-level may change it later
    CustomLogger::init(LevelFilter::Info)?;

    let options = CommandLineOptions::parse();

    match options.command {
        Commands::Csv2json(args) => {
            cli::run_csv2json(args).await?;
        }
        Commands::Tei2json(args) => {
            let report = cli::run_tei2json(args).await?;
            if !report.failed.is_empty() {
                info!("{} files could not be converted", report.failed.len());
            }
        }
        Commands::InitConfig { path, force } => {
            cli::run_init_config(&path, force)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "tendon", &mut std::io::stdout());
        }
    }

    Ok(())
}
