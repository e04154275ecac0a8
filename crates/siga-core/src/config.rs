//! Configuration management for SIGA.
//!
//! Loads configuration from ${SIGA_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::auth::RosterAccount;
use crate::records::{self, SubjectRecord};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Account roster the built-in gateway authenticates against.
    pub accounts: Vec<RosterAccount>,

    /// Academic history records shown on the history screen.
    pub records: Vec<SubjectRecord>,

    /// UI tick cadence in milliseconds while idle.
    pub tick_rate_ms: u64,
}

impl Config {
    pub const DEFAULT_TICK_RATE_MS: u64 = 100;

    /// Loads configuration from the default path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            accounts: default_accounts(),
            records: records::builtin(),
            tick_rate_ms: Self::DEFAULT_TICK_RATE_MS,
        }
    }
}

/// The demo roster used when no config file exists.
fn default_accounts() -> Vec<RosterAccount> {
    vec![RosterAccount {
        username: "mavina".to_string(),
        password: "sigo2024".to_string(),
        full_name: "Marco Antonio Aviña Jimenez".to_string(),
        profile_name: "Alumno".to_string(),
        email: "marco@sigo.example".to_string(),
    }]
}

pub mod paths {
    //! Path resolution for SIGA configuration and data directories.
    //!
    //! SIGA_HOME resolution order:
    //! 1. SIGA_HOME environment variable (if set)
    //! 2. ~/.config/siga (default)

    use std::path::PathBuf;

    /// Returns the SIGA home directory.
    ///
    /// Checks SIGA_HOME env var first, falls back to ~/.config/siga
    pub fn siga_home() -> PathBuf {
        if let Ok(home) = std::env::var("SIGA_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("siga"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        siga_home().join("config.toml")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        siga_home().join("logs")
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    /// Config loading: missing file returns defaults.
    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.tick_rate_ms, Config::DEFAULT_TICK_RATE_MS);
        assert!(!config.accounts.is_empty());
        assert!(!config.records.is_empty());
    }

    /// Config loading: partial config merges with defaults.
    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "tick_rate_ms = 33\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.tick_rate_ms, 33);
        assert!(!config.accounts.is_empty());
    }

    /// Config loading: account roster rows parse from toml tables.
    #[test]
    fn test_load_account_roster() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(
            &config_path,
            r#"
[[accounts]]
username = "alice"
password = "secret"
full_name = "Alice Smith"
profile_name = "Student"
email = "a@x.com"
"#,
        )
        .unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.accounts.len(), 1);
        assert_eq!(config.accounts[0].username, "alice");
        assert_eq!(config.accounts[0].email, "a@x.com");
    }

    /// Config loading: malformed toml is an error, not silent defaults.
    #[test]
    fn test_load_malformed_config_is_an_error() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "accounts = 7\n").unwrap();

        assert!(Config::load_from(&config_path).is_err());
    }
}
