use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use phototag::cli_style::{get_styles, print_error, print_success, print_warning};
use phototag::config::{AppConfig, CliConfig};
use phototag::legacy_import::{import_records, parse_results};
use phototag::logging::init_tracing;
use phototag::JsonRecordStore;

#[derive(Parser, Debug)]
#[command(
    name = "phototag-import",
    version,
    styles = get_styles(),
    about = "Load a plain-text results file (five lines per image, dashed separators) into the PhotoTag database."
)]
struct CliArgs {
    /// The results file to import.
    pub results: PathBuf,

    /// Database file.
    #[clap(short, long)]
    pub db: Option<PathBuf>,

    /// Config file (default: ~/.phototag.toml).
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Overwrite records that already exist instead of skipping them.
    #[clap(long)]
    pub upsert: bool,

    /// More log output on stderr (-v info, -vv debug).
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn run(cli_args: CliArgs) -> Result<()> {
    init_tracing(cli_args.verbose)?;

    let config = AppConfig::load(&CliConfig {
        db: cli_args.db.clone(),
        config: cli_args.config.clone(),
        ..Default::default()
    })?;

    let content = std::fs::read_to_string(&cli_args.results)
        .with_context(|| format!("Failed to read results file {:?}", cli_args.results))?;
    let records = parse_results(&content);
    info!("Parsed {} entries from {:?}", records.len(), cli_args.results);

    let store = JsonRecordStore::new(&config.db_path);
    let summary = import_records(&store, &records, cli_args.upsert)
        .with_context(|| format!("Failed to import into {:?}", config.db_path))?;

    for id in &summary.skipped {
        print_warning(&format!("{} already exists, skipped", id));
    }
    print_success(&format!(
        "Imported {} new, {} replaced, {} skipped into {}",
        summary.inserted,
        summary.replaced,
        summary.skipped.len(),
        config.db_path.display()
    ));
    Ok(())
}

fn main() -> ExitCode {
    let cli_args = CliArgs::parse();
    match run(cli_args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
