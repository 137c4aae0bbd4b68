//! geokode CLI entry point
//!
//! Forward geocoding against replayed platform-native geocoders

use geokode::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
