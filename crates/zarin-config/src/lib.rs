//! Configuration for the Zarin storefront client.
//!
//! Defaults, then the TOML file, then `ZARIN_*` environment variables,
//! translated into `zarin_core::StoreConfig`. The front end applies its
//! own command-line overrides on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use zarin_core::{DEFAULT_API_URL, DEFAULT_CATALOG_LIMIT, StoreConfig};

/// Prefix of the environment overrides (`ZARIN_API_URL`, ...).
pub const ENV_PREFIX: &str = "ZARIN_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// On-disk configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Storefront API base address.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Page size for the home, search, and admin product listings.
    #[serde(default = "default_catalog_limit")]
    pub catalog_limit: u32,

    /// Request timeout in seconds. Unset means no timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            catalog_limit: default_catalog_limit(),
            timeout_secs: None,
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}
fn default_catalog_limit() -> u32 {
    DEFAULT_CATALOG_LIMIT
}

impl Config {
    /// Validate and convert into the runtime configuration.
    pub fn to_store_config(&self) -> Result<StoreConfig, ConfigError> {
        let api_url: url::Url = self
            .api_url
            .trim()
            .parse()
            .map_err(|e| ConfigError::Validation {
                field: "api_url".into(),
                reason: format!("{e}: {}", self.api_url),
            })?;

        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation {
                field: "api_url".into(),
                reason: format!("expected an http(s) URL, got '{}'", self.api_url),
            });
        }

        if self.catalog_limit == 0 {
            return Err(ConfigError::Validation {
                field: "catalog_limit".into(),
                reason: "must be at least 1".into(),
            });
        }

        let timeout = match self.timeout_secs {
            Some(0) => {
                return Err(ConfigError::Validation {
                    field: "timeout_secs".into(),
                    reason: "must be at least 1 (omit it for no timeout)".into(),
                });
            }
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        Ok(StoreConfig {
            api_url,
            catalog_limit: self.catalog_limit,
            timeout,
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("gold", "zarin", "zarin").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("zarin");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// The provider stack: defaults, then `path`, then `ZARIN_*` variables.
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX))
}

/// Load the config from the canonical path plus environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the config from `path` plus environment. A missing file is fine.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = figment(path).extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
