//! Configuration file support
//!
//! An optional TOML file supplies defaults for every connection flag so
//! credentials do not have to appear on the command line. Flags always win.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of a `--config` file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Hostname of the Nextcloud instance
    pub host: Option<String>,
    /// Path of the serverinfo API
    pub uri: Option<String>,
    /// Use https (defaults to true)
    pub use_tls: Option<bool>,
    /// Serverinfo token
    pub token: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: FileConfig = toml::from_str(content)?;
        if config.timeout_secs == Some(0) {
            anyhow::bail!("timeout_secs must be at least 1");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_file() {
        let config = FileConfig::parse(
            r#"
host = "cloud.example.com"
uri = "/nextcloud/ocs/v2.php/apps/serverinfo/api/v1/info"
use_tls = false
token = "abc123"
timeout_secs = 5
"#,
        )
        .unwrap();

        assert_eq!(config.host.as_deref(), Some("cloud.example.com"));
        assert_eq!(config.use_tls, Some(false));
        assert_eq!(config.token.as_deref(), Some("abc123"));
        assert_eq!(config.user, None);
        assert_eq!(config.timeout_secs, Some(5));
    }

    #[test]
    fn test_empty_file_is_valid() {
        assert_eq!(FileConfig::parse("").unwrap(), FileConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(FileConfig::parse("hostname = \"x\"").is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = FileConfig::parse("timeout_secs = 0").unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_load_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nextcloud.toml");
        fs::write(&path, "user = \"monitor\"\npassword = \"pa55\"\n").unwrap();

        let config = FileConfig::load(&path).unwrap();
        assert_eq!(config.user.as_deref(), Some("monitor"));
        assert_eq!(config.password.as_deref(), Some("pa55"));
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.toml");

        let err = FileConfig::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("absent.toml"));
    }
}
