//! Locate command handler
//!
//! Geocodes an address given as one or more components.

use crate::cli::{build_geokode, init_logging, list_formats, print_outcome, GeocoderArgs};
use crate::error::Result;
use clap::Args;

/// Locate command arguments
#[derive(Args)]
pub struct LocateArgs {
    /// Address components, joined with single spaces
    pub components: Vec<String>,

    #[command(flatten)]
    pub geocoder: GeocoderArgs,
}

/// Run the locate command
pub async fn run(args: LocateArgs) -> Result<()> {
    if args.geocoder.list_formats {
        list_formats();
        return Ok(());
    }

    init_logging(args.geocoder.verbose);

    let geokode = build_geokode(&args.geocoder)?;
    let outcome = geokode.locate_components_detailed(args.components.as_slice()).await;
    print_outcome(outcome, &args.geocoder.format)
}
