//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions. Geocoding
//! commands run against replay natives loaded from a fixture file.

pub mod config;
pub mod locate;
pub mod search;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::geocoder::replay::{ReplayBackend, ReplayFixture};
use crate::geocoder::{GeoKode, GeoKodeOptions, GeocodeOutcome, Platform};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Unified forward geocoding over platform-native geocoders
#[derive(Parser)]
#[command(name = "geokode")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Geocode an address given as one or more components
    Locate(locate::LocateArgs),

    /// Search places near an optional location
    Search(search::SearchArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Options shared by the geocoding commands
#[derive(Args, Debug, Clone)]
pub struct GeocoderArgs {
    /// Native platform to emulate (android, apple)
    #[arg(long, short = 'P')]
    pub platform: Option<String>,

    /// Replay fixture (JSON) backing the native services
    #[arg(long)]
    pub fixture: Option<PathBuf>,

    /// Maximum number of results
    #[arg(long, short = 'n')]
    pub max_results: Option<usize>,

    /// Android API level (selects the geocoder call shape)
    #[arg(long)]
    pub api_level: Option<u32>,

    /// Seconds to wait for the native service (0 waits forever)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl GeocoderArgs {
    /// Apply command-line overrides on top of the loaded config
    pub fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(platform) = &self.platform {
            config.geocoder.platform = platform.parse::<Platform>().map_err(Error::Config)?;
        }
        if let Some(fixture) = &self.fixture {
            config.replay.fixture = fixture.to_string_lossy().to_string();
        }
        if let Some(max_results) = self.max_results {
            config.geocoder.max_results = max_results;
        }
        if let Some(api_level) = self.api_level {
            config.android.api_level = api_level;
        }
        if let Some(timeout) = self.timeout {
            config.geocoder.timeout_secs = timeout;
        }
        config.validate()
    }
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Locate(args) => locate::run(args).await,
        Commands::Search(args) => search::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}

/// Initialize logging to stderr
///
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` with `verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load config, apply overrides and build a replay-backed geocoder
pub fn build_geokode(args: &GeocoderArgs) -> Result<GeoKode<ReplayBackend>> {
    let mut config = Config::load()?;
    args.apply(&mut config)?;

    let fixture = match config.fixture_path() {
        Some(path) => ReplayFixture::load(&path)?,
        None => {
            return Err(Error::Config(
                "No replay fixture configured. Use --fixture or `geokode config replay.fixture <path>`"
                    .to_string(),
            ))
        }
    };

    let options = GeoKodeOptions::from(&config);
    info!(
        platform = %config.geocoder.platform,
        api_level = config.android.api_level,
        max_results = options.max_results,
        timeout = ?options.timeout.map(|t: Duration| t.as_secs()),
        "Using replay geocoder"
    );

    Ok(GeoKode::new(ReplayBackend::new(
        config.geocoder.platform,
        fixture,
        config.android.api_level,
        options,
    )))
}

/// Print an outcome in the requested format
pub fn print_outcome(outcome: GeocodeOutcome, format: &str) -> Result<()> {
    let formatter = get_formatter(format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    match outcome {
        GeocodeOutcome::Found(locations) => {
            if locations.is_empty() {
                eprintln!("No results");
            }
            println!("{}", formatter.format(&locations)?);
            Ok(())
        }
        GeocodeOutcome::NoQuery => Err(Error::Geocoding("Query is empty".to_string())),
        GeocodeOutcome::Failed(failure) => Err(Error::Geocoding(failure.to_string())),
    }
}

/// Print available output formats
pub fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
