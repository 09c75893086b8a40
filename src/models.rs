//! Data models module
//!
//! Defines core data structures:
//! - RequestConfig / Auth: Normalized request descriptor built from flags
//! - ApiStatus: The OCS meta block reported by the server
//! - MetricsRecord: Flat snapshot of the serverinfo data block
//! - Severity / PerfDatum / EvaluationResult: What the plugin prints
//! - CheckError: Every terminal failure together with its exit code

use std::fmt;
use std::time::Duration;

/// Authentication mode for the serverinfo request. Exactly one is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    /// Anonymous request
    None,
    /// Serverinfo token sent in the `NC-Token` header
    Token(String),
    /// Credentials embedded as URL userinfo
    Basic { user: String, password: String },
}

impl Auth {
    /// Resolve the auth mode from raw flag values.
    ///
    /// A supplied token always wins and disables URL credentials, even when
    /// it is empty (an empty token simply sends no header).
    pub fn resolve(token: Option<String>, user: Option<String>, password: Option<String>) -> Self {
        if let Some(token) = token {
            return if token.is_empty() { Auth::None } else { Auth::Token(token) };
        }

        let user = user.unwrap_or_default();
        let password = password.unwrap_or_default();
        if user.is_empty() && password.is_empty() {
            Auth::None
        } else {
            Auth::Basic { user, password }
        }
    }

    /// Token to send in the header, if token mode is active
    pub fn token(&self) -> Option<&str> {
        match self {
            Auth::Token(token) => Some(token),
            _ => None,
        }
    }

    /// Short label for logging; never contains secrets
    pub fn mode(&self) -> &'static str {
        match self {
            Auth::None => "none",
            Auth::Token(_) => "token",
            Auth::Basic { .. } => "basic",
        }
    }
}

/// Where and how to query the serverinfo API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    /// Hostname, optionally with port (e.g. `cloud.example.com:8443`)
    pub host: String,
    /// Path of the serverinfo endpoint, always starting with `/`
    pub uri: String,
    /// Whether to use https
    pub use_tls: bool,
    /// Authentication mode
    pub auth: Auth,
}

/// Everything a single check run needs
#[derive(Debug, Clone)]
pub struct CheckSettings {
    pub request: RequestConfig,
    /// Upper bound for the whole HTTP exchange
    pub timeout: Duration,
    /// Emit debug logging on stderr
    pub verbose: bool,
}

/// Contents of `ocs.meta`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiStatus {
    pub statuscode: i64,
    pub status: String,
    pub message: String,
}

/// Active user counts over three sliding windows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveUsers {
    pub last_5_minutes: u64,
    pub last_hour: u64,
    pub last_day: u64,
}

/// Share counters from `ocs.data.nextcloud.shares`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareCounts {
    pub total: u64,
    pub user: u64,
    pub groups: u64,
    pub link: u64,
    pub federated_sent: u64,
}

/// Database backend details
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseInfo {
    pub kind: String,
    pub version: String,
    /// Size in bytes
    pub size: u64,
}

/// Flat snapshot of the serverinfo data block. Memory values are in bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsRecord {
    pub version: String,
    /// Free space in the data directory, bytes
    pub free_space: u64,
    /// 1, 5 and 15 minute load averages
    pub cpu_load: [f64; 3],
    pub mem_free: u64,
    pub mem_total: u64,
    pub swap_free: u64,
    pub swap_total: u64,
    pub app_updates_available: u64,
    /// Names of apps with a pending update, in server order
    pub app_updates: Vec<String>,
    pub users: u64,
    pub active_users: ActiveUsers,
    pub files: u64,
    pub shares: ShareCounts,
    pub webserver: String,
    pub php_version: String,
    pub database: DatabaseInfo,
}

/// Monitoring-plugin severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Severity {
    /// Process exit code by monitoring-plugin convention
    pub fn exit_code(self) -> u8 {
        match self {
            Severity::Ok => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
            Severity::Unknown => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
            Severity::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One performance-data entry: `label=value[unit][;;;min;max]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerfDatum {
    pub label: &'static str,
    /// Already formatted value
    pub value: String,
    /// Unit of measure, empty for plain counters
    pub unit: &'static str,
    /// Lower and upper bound of the value range
    pub range: Option<(u64, u64)>,
}

impl PerfDatum {
    pub fn new(label: &'static str, value: impl ToString) -> Self {
        Self {
            label,
            value: value.to_string(),
            unit: "",
            range: None,
        }
    }

    /// Byte-valued entry, carries the `B` unit
    pub fn bytes(label: &'static str, value: u64) -> Self {
        Self {
            unit: "B",
            ..Self::new(label, value)
        }
    }

    pub fn with_range(mut self, min: u64, max: u64) -> Self {
        self.range = Some((min, max));
        self
    }
}

impl fmt::Display for PerfDatum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}{}", self.label, self.value, self.unit)?;
        if let Some((min, max)) = self.range {
            write!(f, ";;;{};{}", min, max)?;
        }
        Ok(())
    }
}

/// Outcome of evaluating one serverinfo response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationResult {
    pub severity: Severity,
    /// Human readable part of the plugin line
    pub summary: String,
    /// Performance data, empty for upstream errors
    pub perf_data: Vec<PerfDatum>,
}

/// Terminal failures of a check run
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("There was a problem reading the passed option: {0}")]
    InvalidArguments(String),
    /// Carries the help text that is printed instead of a one-line message
    #[error("{0}")]
    HelpRequested(String),
    #[error("Cannot access Nextcloud server info: {0}")]
    Unreachable(String),
    #[error("Cannot access Nextcloud server info")]
    EmptyResponse,
    #[error("UNKNOWN: Nextcloud server info is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),
    #[error("UNKNOWN: Nextcloud server info is missing field {0}")]
    MissingField(String),
    #[error("UNKNOWN: Nextcloud server info field {path} is not {expected}")]
    InvalidField { path: String, expected: &'static str },
}

impl CheckError {
    /// Process exit code for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            CheckError::InvalidArguments(_) => 1,
            CheckError::HelpRequested(_) => 2,
            CheckError::Unreachable(_) | CheckError::EmptyResponse => 2,
            CheckError::MalformedJson(_)
            | CheckError::MissingField(_)
            | CheckError::InvalidField { .. } => Severity::Unknown.exit_code(),
        }
    }
}
