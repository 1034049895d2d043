use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use phototag::cli_style::{get_styles, print_error};
use phototag::config::{AppConfig, CliConfig};
use phototag::logging::init_tracing;
use phototag::output::OutputMode;
use phototag::{JsonRecordStore, MetadataManager, PhotoTagClient};

/// A comma separated list of tags, e.g. `"sky, sea ,sun"`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TagList(Vec<String>);

fn parse_tag_list(s: &str) -> Result<TagList> {
    Ok(TagList(
        s.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect(),
    ))
}

fn flatten_tags(lists: &[TagList]) -> Vec<String> {
    lists.iter().flat_map(|list| list.0.iter().cloned()).collect()
}

#[derive(Parser, Debug)]
#[command(
    name = "phototag",
    version,
    styles = get_styles(),
    about = "Fetch metadata for images using the PhotoTag API. The results are stored \
             in a local database and reused. Defaults for URL, token and database file \
             can be set in PHOTOTAG_URL, PHOTOTAG_TOKEN and PHOTOTAG_DB, or in ~/.phototag.toml.",
    after_help = "Example: phototag image1.jpg image2.jpg -p title -p description"
)]
struct CliArgs {
    /// Image files to look up, fetching from the API when not cached.
    pub image: Vec<String>,

    /// API URL.
    #[clap(short, long)]
    pub url: Option<String>,

    /// API token.
    #[clap(long)]
    pub token: Option<String>,

    /// Database file.
    #[clap(short, long)]
    pub db: Option<PathBuf>,

    /// Config file (default: ~/.phototag.toml).
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Comma separated tags every result must have.
    #[clap(short = 't', long = "tags", value_parser = parse_tag_list)]
    pub tags: Vec<TagList>,

    /// Comma separated tags to remove from every result.
    #[clap(short = 'r', long = "remove-tags", value_parser = parse_tag_list)]
    pub remove_tags: Vec<TagList>,

    /// Field to print (can be used multiple times). Can also be all, shutterstock or shutter.
    #[clap(short, long)]
    pub print: Vec<String>,

    /// Print every stored record instead of the given images.
    #[clap(short, long)]
    pub all: bool,

    /// More log output on stderr (-v info, -vv debug).
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn run(cli_args: CliArgs) -> Result<()> {
    init_tracing(cli_args.verbose)?;

    let config = AppConfig::load(&CliConfig {
        url: cli_args.url.clone(),
        token: cli_args.token.clone(),
        db: cli_args.db.clone(),
        config: cli_args.config.clone(),
    })?;
    let mode = OutputMode::from_print_fields(&cli_args.print)?;
    let default_tags = flatten_tags(&cli_args.tags);
    let removed_tags = flatten_tags(&cli_args.remove_tags);

    // Listing the store never reaches the API, so it works without a token.
    let token = if cli_args.all {
        config.token.as_str()
    } else {
        config.require_token()?
    };

    info!("Using record store at {:?}", config.db_path);
    let store = JsonRecordStore::new(&config.db_path);
    let client = PhotoTagClient::new(&config.url, token, &config.options, config.timeout_secs)
        .context("Failed to create HTTP client")?;
    let manager = MetadataManager::new(Box::new(store), Box::new(client));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Some(header) = mode.header() {
        writeln!(out, "{}", header)?;
    }

    if cli_args.all {
        for metadata in manager.all()? {
            let metadata = manager.apply_tag_deltas(metadata, &default_tags, &removed_tags)?;
            mode.write_record(&mut out, &metadata)?;
        }
    } else {
        for image in &cli_args.image {
            let metadata = manager.get_or_fetch(image, &default_tags, &removed_tags)?;
            mode.write_record(&mut out, &metadata)?;
        }
    }
    out.flush()?;
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
