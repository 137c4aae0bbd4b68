//! Search command handler
//!
//! Searches places, optionally biased toward a user location.

use crate::cli::{build_geokode, init_logging, list_formats, print_outcome, GeocoderArgs};
use crate::error::Result;
use clap::Args;
use tracing::warn;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Free-form search query
    #[arg(default_value = "")]
    pub query: String,

    /// Latitude to bias the search toward
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude to bias the search toward
    #[arg(long, allow_hyphen_values = true)]
    pub lng: Option<f64>,

    #[command(flatten)]
    pub geocoder: GeocoderArgs,
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    if args.geocoder.list_formats {
        list_formats();
        return Ok(());
    }

    init_logging(args.geocoder.verbose);

    if args.lat.is_some() != args.lng.is_some() {
        warn!("Both --lat and --lng are needed to bias a search; ignoring");
    }

    let geokode = build_geokode(&args.geocoder)?;
    let outcome = geokode
        .auto_search_detailed(&args.query, args.lat, args.lng)
        .await;
    print_outcome(outcome, &args.geocoder.format)
}
