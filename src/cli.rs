/*!
 * Command-line arguments and runners shared by the `tendon`, `csv2json` and
 * `tei2json` binaries.
 */

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::{Config, LogLevel};
use crate::tei::{self, BatchReport, TeiOptions};
use crate::verse_table;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// Options every converter accepts
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Configuration file path (JSON)
    #[arg(short, long, env = "TENDON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    pub log_level: Option<CliLogLevel>,
}

#[derive(Args, Debug, Clone)]
pub struct Csv2JsonArgs {
    /// Path to the input CSV file containing verses
    #[arg(value_name = "INPUT_FILE")]
    pub input_file: PathBuf,

    /// Directory where the JSON files will be saved
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Number of worker threads, 0 uses one per CPU
    #[arg(short, long)]
    pub threads: Option<usize>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug, Clone)]
pub struct Tei2JsonArgs {
    /// Input directory containing one subdirectory per siglum suffix
    #[arg(value_name = "IN_DIR")]
    pub in_dir: PathBuf,

    /// Output directory for the JSON files
    #[arg(value_name = "OUT_DIR")]
    pub out_dir: PathBuf,

    /// Siglum suffixes to process
    #[arg(value_name = "SIGLUM_SUFFIX", required = true, num_args = 1..)]
    pub siglum_suffixes: Vec<String>,

    /// Only convert the verse with this reference
    #[arg(long, value_name = "REF")]
    pub verse: Option<String>,

    /// Number of files converted at once, 0 uses one per CPU
    #[arg(short, long)]
    pub threads: Option<usize>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Load the configuration and apply the command line log level on top
pub fn load_config(common: &CommonArgs) -> Result<Config> {
    // A command line level applies before the config is even read
    if let Some(level) = &common.log_level {
        let level: LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = match &common.config {
        Some(path) if !path.exists() => {
            warn!("Config file not found at '{}', using defaults.", path.display());
            Config::default()
        }
        path => Config::load(path.as_deref())?,
    };

    if let Some(level) = &common.log_level {
        config.log_level = level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    Ok(config)
}

/// `csv2json`: any failed verse group fails the run
pub async fn run_csv2json(args: Csv2JsonArgs) -> Result<Vec<PathBuf>> {
    let config = load_config(&args.common)?;
    let threads = args.threads.unwrap_or(config.csv.threads);

    info!("Converting {} into {}", args.input_file.display(), args.output_dir.display());

    let written = verse_table::csv_to_json(&args.input_file, &args.output_dir, threads)
        .await
        .with_context(|| format!("Conversion failed for {}", args.input_file.display()))?;

    Ok(written)
}

/// `tei2json`: per file failures are logged, the run itself succeeds
pub async fn run_tei2json(args: Tei2JsonArgs) -> Result<BatchReport> {
    let config = load_config(&args.common)?;
    let threads = args.threads.unwrap_or(config.tei.threads);
    let options = TeiOptions::from_config(&config.tei).with_single_verse(args.verse.clone());

    if !args.in_dir.is_dir() {
        warn!("Input directory does not exist: {}", args.in_dir.display());
    }

    let report = tei::process_files(
        &args.in_dir,
        &args.out_dir,
        &args.siglum_suffixes,
        &options,
        threads,
    )
    .await;

    Ok(report)
}

/// `init-config`: write the default configuration file
pub fn run_init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        warn!("Config file already exists: {}. Use -f to force overwrite.", path.display());
        return Ok(());
    }
    Config::write_default(path)?;
    info!("Wrote default configuration to {}", path.display());
    Ok(())
}
