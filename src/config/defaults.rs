//! Default configuration values
//!
//! Named constants for all tunable parameters

use crate::constants::android::LISTENER_API_LEVEL;
use crate::constants::geocoder;

/// Default native platform
pub const DEFAULT_PLATFORM: &str = "android";

/// Default maximum number of results per query
pub const DEFAULT_MAX_RESULTS: usize = geocoder::DEFAULT_MAX_RESULTS;

/// Default native completion timeout in seconds (0 disables the timeout)
pub const DEFAULT_TIMEOUT_SECS: u64 = geocoder::DEFAULT_TIMEOUT_SECS;

/// Default Android API level (first level with the listener geocoder)
pub const DEFAULT_API_LEVEL: u32 = LISTENER_API_LEVEL;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "geokode";
