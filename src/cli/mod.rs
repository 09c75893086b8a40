//! CLI argument parsing and validation module
//!
//! Handles command-line interface using clap, including:
//! - Host, URI and TLS selection
//! - Token or username/password authentication
//! - Optional TOML config file supplying defaults
//! - Help and version commands
//!
//! Parsing never exits the process itself so the plugin keeps control of
//! its exit codes.

use clap::builder::BoolishValueParser;
use clap::error::ErrorKind;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::FileConfig;
use crate::constants::{APP_NAME, DEFAULT_TIMEOUT_SECS, DEFAULT_URI};
use crate::models::{Auth, CheckError, CheckSettings, RequestConfig};

/// What the process should do after argument parsing
#[derive(Debug)]
pub enum Invocation {
    /// Run the check
    Run(CheckSettings),
    /// Print help or version text and exit successfully
    Print(String),
}

/// Build the clap command definition
pub fn build_command() -> Command {
    Command::new(APP_NAME)
        .version(env!("CHECK_NEXTCLOUD_VERSION"))
        .long_version(concat!(env!("CHECK_NEXTCLOUD_VERSION"), " (", env!("GIT_HASH"), ")"))
        .about("Monitoring plugin to check the status of the Nextcloud serverinfo app")
        .long_about(
            "Monitoring plugin to check the status of the Nextcloud serverinfo app.\n\
             Prints one status line with performance data and exits 0 (OK), 1 (WARNING), \
             2 (CRITICAL) or 3 (UNKNOWN).",
        )
        .arg(
            Arg::new("host")
                .short('H')
                .long("host")
                .value_name("HOST")
                .help("Hostname of the Nextcloud instance, e.g. cloud.example.com")
        )
        .arg(
            Arg::new("uri")
                .short('U')
                .long("uri")
                .value_name("URI")
                .help(concat!(
                    "URI of the serverinfo API, shown at ",
                    "https://<host>/settings/admin/serverinfo"
                ))
        )
        .arg(
            Arg::new("token")
                .short('T')
                .long("token")
                .value_name("TOKEN")
                .help("Authenticate using the serverinfo token (either -T or -u and -p)")
        )
        .arg(
            Arg::new("user")
                .short('u')
                .long("user")
                .value_name("USER")
                .help("Username to authenticate against the API endpoint")
        )
        .arg(
            Arg::new("password")
                .short('p')
                .long("password")
                .value_name("PASSWORD")
                .help("Password to authenticate against the API endpoint")
        )
        .arg(
            Arg::new("ssl")
                .short('s')
                .long("ssl")
                .value_name("BOOL")
                .num_args(0..=1)
                .default_missing_value("false")
                .value_parser(BoolishValueParser::new())
                .help("Check over HTTPS (default: true); a bare -s switches to plain HTTP")
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .value_parser(value_parser!(u64).range(1..))
                .help("Request timeout in seconds (default: 10)")
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("TOML file with defaults for the options above")
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log request details to stderr")
                .action(ArgAction::SetTrue)
        )
}

/// Help text printed when no host is given
pub fn help_text() -> String {
    build_command().render_help().to_string()
}

/// Parse the process arguments
pub fn parse_args() -> Result<Invocation, CheckError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments (including the binary name) into an invocation
pub fn parse_args_from<I, T>(args: I) -> Result<Invocation, CheckError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match build_command().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return Ok(Invocation::Print(err.render().to_string()));
        }
        Err(err) => return Err(CheckError::InvalidArguments(first_line(&err.render().to_string()))),
    };

    let file = match matches.get_one::<PathBuf>("config") {
        Some(path) => FileConfig::load(path)
            .map_err(|e| CheckError::InvalidArguments(single_line(&format!("{:#}", e))))?,
        None => FileConfig::default(),
    };

    resolve(&matches, file).map(Invocation::Run)
}

/// Merge flags over the config file over built-in defaults
fn resolve(matches: &ArgMatches, file: FileConfig) -> Result<CheckSettings, CheckError> {
    let flag = |id: &str| matches.get_one::<String>(id).map(|value| value.trim().to_string());
    let trimmed = |value: Option<String>| value.map(|v| v.trim().to_string());

    let host = flag("host")
        .or_else(|| trimmed(file.host))
        .filter(|host| !host.is_empty())
        .ok_or_else(|| CheckError::HelpRequested(help_text()))?;

    let uri = flag("uri")
        .or_else(|| trimmed(file.uri))
        .filter(|uri| !uri.is_empty())
        .unwrap_or_else(|| DEFAULT_URI.to_string());

    let use_tls = matches
        .get_one::<bool>("ssl")
        .copied()
        .or(file.use_tls)
        .unwrap_or(true);

    // Credentials come from one source only: flags if any were given, else the file
    let auth = if ["token", "user", "password"].iter().any(|id| matches.contains_id(id)) {
        Auth::resolve(flag("token"), flag("user"), flag("password"))
    } else {
        Auth::resolve(trimmed(file.token), trimmed(file.user), trimmed(file.password))
    };

    let timeout_secs = matches
        .get_one::<u64>("timeout")
        .copied()
        .or(file.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(CheckSettings {
        request: RequestConfig {
            host,
            uri: normalize_uri(uri),
            use_tls,
            auth,
        },
        timeout: Duration::from_secs(timeout_secs),
        verbose: matches.get_flag("verbose"),
    })
}

fn normalize_uri(uri: String) -> String {
    if uri.starts_with('/') {
        uri
    } else {
        format!("/{}", uri)
    }
}

/// Collapse a multi-line message (toml errors quote the offending line)
fn single_line(message: &str) -> String {
    message
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// First line of a clap error, without its `error: ` prefix
fn first_line(rendered: &str) -> String {
    rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string()
}
