//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the log file.
    pub log_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Later sources win: defaults, `<config dir>/timed/config.toml`, the
    /// given file, then `TIMED_*` environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (TIMED_*)
        figment = figment.merge(Env::prefixed("TIMED_"));

        figment.extract()
    }
}

/// Returns the default log location, `~/.timed`.
pub fn default_log_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".timed")
}

/// Returns the platform-specific config directory for timed.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("timed"))
}
