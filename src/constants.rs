//! Global constants for check_nextcloud
//!
//! Centralized location for defaults shared by the CLI, the config file
//! loader and the fetcher

/// Binary name used in help output
pub const APP_NAME: &str = "check_nextcloud";

/// Default location of the serverinfo API below the host
pub const DEFAULT_URI: &str = "/ocs/v2.php/apps/serverinfo/api/v1/info";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Header carrying the serverinfo token
pub const TOKEN_HEADER: &str = "NC-Token";

/// Query parameter that asks OCS for a JSON body instead of XML
pub const FORMAT_QUERY: (&str, &str) = ("format", "json");

/// Decimal places used when humanizing byte counts
pub const SIZE_DECIMALS: usize = 2;
