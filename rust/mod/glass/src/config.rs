//! Session configuration, read from an optional TOML file.
//!
//! ```toml
//! [storage]
//! backend = "redb"
//! data_dir = "/var/mobile/.../Application Support"
//! db_file = "vetria.redb"
//!
//! [gate]
//! endpoint = "https://gate.example/check"
//! timeout_secs = 10
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use vetria_kv::{KVStore, MemoryKV, RedbStore};

use crate::error::GlassError;
use crate::gate::{AccessProbe, HttpProbe, NativeOnly};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub gate: GateConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Redb,
    /// Nothing survives the process.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: Backend,
    pub data_dir: PathBuf,
    pub db_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Redb,
            data_dir: PathBuf::from("."),
            db_file: "vetria.redb".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Remote access checker. Absent means the gate always picks native.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Load config from disk, or return the default if the file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!("config: {:?} not found, using defaults", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

impl StorageConfig {
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file)
    }

    /// Open the configured backend, creating the data directory if needed.
    pub fn open_kv(&self) -> Result<Arc<dyn KVStore>, GlassError> {
        match self.backend {
            Backend::Memory => Ok(Arc::new(MemoryKV::new())),
            Backend::Redb => {
                std::fs::create_dir_all(&self.data_dir).map_err(|e| {
                    GlassError::Config(format!("create {:?}: {}", self.data_dir, e))
                })?;
                Ok(Arc::new(RedbStore::open(&self.db_path())?))
            }
        }
    }
}

impl GateConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn probe(&self) -> Result<Arc<dyn AccessProbe>, GlassError> {
        match self.endpoint.as_deref().map(str::trim) {
            Some(endpoint) if !endpoint.is_empty() => {
                Ok(Arc::new(HttpProbe::new(endpoint, self.timeout())?))
            }
            _ => Ok(Arc::new(NativeOnly)),
        }
    }
}
