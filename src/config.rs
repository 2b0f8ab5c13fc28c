use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub atlasgraph: AtlasConfig,
}

/// Graph engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AtlasConfig {
    /// Path to the SQLite graph database.
    pub db_path: PathBuf,
    /// Language used for display-name lookups when none is given.
    #[serde(default = "default_lang")]
    pub default_lang: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading
    /// config. Looks for the config file in this order:
    /// 1. Path specified in ATLASGRAPH_CONFIG environment variable
    /// 2. ./config.toml in current directory
    pub fn load() -> Result<Self> {
        // .env is optional; ignore errors
        let _ = dotenv::dotenv();

        let config_path = std::env::var("ATLASGRAPH_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.toml"));

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&config_str).context("Failed to parse config.toml")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.atlasgraph.default_lang.trim().is_empty() {
            anyhow::bail!("atlasgraph.default_lang must not be empty");
        }
        if let Some(parent) = self.atlasgraph.db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                anyhow::bail!(
                    "db_path parent directory does not exist: {}",
                    parent.display()
                );
            }
        }
        Ok(())
    }

    /// Get database path
    pub fn db_path(&self) -> &Path {
        &self.atlasgraph.db_path
    }

    pub fn default_lang(&self) -> &str {
        &self.atlasgraph.default_lang
    }
}
