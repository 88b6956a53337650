//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! All settings are plain values; the mock remote endpoint requires
//! no credentials.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub agent: AgentConfig,
    pub remote: RemoteConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AgentConfig {
    pub name: String,
    pub sync_interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RemoteConfig {
    /// Base URL of the remote quote provider.
    pub server_url: String,
    /// How many remote records are mapped to quotes per fetch.
    pub fetch_limit: usize,
    /// Whether locally added quotes are pushed back to the server.
    #[serde(default)]
    pub push_enabled: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Path of the persisted quote collection (JSON).
    pub quotes_file: String,
    /// Path of the persisted last-selected category filter.
    pub filter_file: String,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }
}
