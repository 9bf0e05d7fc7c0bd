//! Configuration loading: store address, collection name, request timeout.
//!
//! Precedence, highest first: CLI flags (applied by `main`), `DIALBOOK_*`
//! environment variables, the TOML config file, built-in defaults. The
//! default file lives at `~/.dialbook/config.toml`; a missing default
//! file is fine, an explicitly requested one is not.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Environment variable overriding the store base address.
pub const ENV_STORE_URL: &str = "DIALBOOK_STORE_URL";
/// Environment variable overriding the collection name.
pub const ENV_COLLECTION: &str = "DIALBOOK_COLLECTION";
/// Environment variable overriding the request timeout, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "DIALBOOK_TIMEOUT_SECS";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Record store connection settings.
    #[serde(default)]
    pub store: StoreConfig,
}

/// Record store connection settings.
#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    /// Base address of the record store.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Collection path under the base address.
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            collection: default_collection(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3001".to_owned()
}

fn default_collection() -> String {
    "persons".to_owned()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from `path` (or the default location) and apply
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error when an explicitly given file is missing or
    /// unparseable, or when a numeric environment override does not
    /// parse.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(explicit) => read_config(explicit)?,
            None => match default_config_path() {
                Ok(default) if default.exists() => read_config(&default)?,
                _ => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply environment overrides through an injected lookup.
    ///
    /// # Errors
    ///
    /// Returns an error when a numeric override does not parse.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(value) = lookup(ENV_STORE_URL) {
            self.store.base_url = value;
        }
        if let Some(value) = lookup(ENV_COLLECTION) {
            self.store.collection = value;
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            self.store.timeout_secs = value
                .parse()
                .with_context(|| format!("{ENV_TIMEOUT_SECS} is not a number: {value:?}"))?;
        }
        Ok(())
    }
}

/// Parse a TOML config file.
///
/// # Errors
///
/// Returns an error when the file cannot be read or parsed.
fn read_config(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config at {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse config at {}", path.display()))
}

/// Default config file path, `~/.dialbook/config.toml`.
///
/// # Errors
///
/// Returns an error when the home directory cannot be determined.
pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let base = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(base.home_dir().join(".dialbook").join("config.toml"))
}
