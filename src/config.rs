use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::knowledge::transfer::ValidationMode;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AlmanacConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub extraction: ExtractionConfig,
    pub retrieval: RetrievalConfig,
    pub transfer: TransferConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub transport: String,
    pub log_level: String,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
    /// Key the whole knowledge base is stored under.
    pub storage_key: String,
    pub autosave_interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExtractionConfig {
    pub provider: String,
    pub api_base: String,
    pub extraction_model: String,
    pub answer_model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Only this many leading characters of an uploaded document are sent.
    pub max_input_chars: usize,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RetrievalConfig {
    pub default_max_results: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TransferConfig {
    pub validation: ValidationMode,
    pub export_filename: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: "stdio".into(),
            log_level: "info".into(),
            host: "127.0.0.1".into(),
            port: 8765,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_almanac_dir()
            .join("knowledge.db")
            .to_string_lossy()
            .into_owned();
        Self {
            db_path,
            storage_key: "knowledgeBase".into(),
            autosave_interval_secs: 60,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".into(),
            api_base: "https://generativelanguage.googleapis.com".into(),
            extraction_model: "gemini-2.5-pro".into(),
            answer_model: "gemini-2.5-flash".into(),
            api_key_env: "GEMINI_API_KEY".into(),
            max_input_chars: 20_000,
            request_timeout_secs: 120,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_max_results: 10,
        }
    }
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            validation: ValidationMode::Shallow,
            export_filename: "almanac-knowledge-base.json".into(),
        }
    }
}

impl StorageConfig {
    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_interval_secs.max(1))
    }
}

/// Returns `~/.almanac/`, or `./.almanac/` if no home directory can be found.
pub fn default_almanac_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".almanac")
}

/// Returns the default config file path: `~/.almanac/config.toml`
pub fn default_config_path() -> PathBuf {
    default_almanac_dir().join("config.toml")
}

impl AlmanacConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            AlmanacConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (ALMANAC_DB, ALMANAC_LOG_LEVEL, ALMANAC_MODEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("ALMANAC_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("ALMANAC_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("ALMANAC_MODEL") {
            self.extraction.extraction_model = val;
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
