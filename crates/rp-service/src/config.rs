//! Service configuration file.
//!
//! ```json
//! {
//!   "database": "replay.sqlite",
//!   "meta_table": "meta_simple",
//!   "interval_cache_ttl_secs": 60
//! }
//! ```
//!
//! Every field is optional.  A relative `database` path is resolved against
//! the directory holding the config file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ServiceError, ServiceResult};

pub const DEFAULT_CONFIG_NAME: &str = "replay.json";
pub const DEFAULT_DATABASE: &str = "replay.sqlite";
pub const DEFAULT_META_TABLE: &str = "meta_simple";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// SQLite file holding simulation metadata and map documents.
    pub database:                PathBuf,
    /// Name of the metadata table.
    pub meta_table:              String,
    pub interval_cache_ttl_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            database:                PathBuf::from(DEFAULT_DATABASE),
            meta_table:              DEFAULT_META_TABLE.to_owned(),
            interval_cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl ServiceConfig {
    /// Read a config file.  A relative database path is made relative to the
    /// file's directory.
    pub fn load(path: &Path) -> ServiceResult<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| ServiceError::Config(format!("read {}: {err}", path.display())))?;
        let mut config: ServiceConfig = serde_json::from_str(&raw)
            .map_err(|err| ServiceError::Config(format!("parse {}: {err}", path.display())))?;
        if let Some(base_dir) = path.parent() {
            config.database = config.database_path(base_dir);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ServiceResult<()> {
        if self.meta_table.trim().is_empty() {
            return Err(ServiceError::Config("meta_table must not be empty".into()));
        }
        if self.interval_cache_ttl_secs == 0 {
            return Err(ServiceError::Config("interval_cache_ttl_secs must be positive".into()));
        }
        Ok(())
    }

    /// `database`, joined onto `base_dir` when relative.
    pub fn database_path(&self, base_dir: &Path) -> PathBuf {
        if self.database.is_absolute() {
            self.database.clone()
        } else {
            base_dir.join(&self.database)
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.interval_cache_ttl_secs)
    }
}
