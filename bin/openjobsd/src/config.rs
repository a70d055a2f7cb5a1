//! Server configuration.
//!
//! TOML file with a `[storage]` and a `[jwt]` section:
//!
//! ```toml
//! [storage]
//! data_dir = "/var/lib/openjobs"
//!
//! [jwt]
//! secret = "..."
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub storage: StorageConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
}

impl ServerConfig {
    /// Resolve a config argument: a bare name maps to
    /// `/etc/openjobs/<name>.toml`, anything with a `/` or `.` is a path.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.contains('.') {
            PathBuf::from(name_or_path)
        } else {
            PathBuf::from(format!("/etc/openjobs/{name_or_path}.toml"))
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Verify the configuration is usable before starting.
    pub fn verify(&self) -> anyhow::Result<()> {
        if self.jwt.secret.is_empty() {
            anyhow::bail!("JWT secret is empty in configuration.");
        }
        if self.storage.data_dir.is_empty() {
            anyhow::bail!("Storage data_dir is empty in configuration.");
        }
        Ok(())
    }

    /// Path of the SQLite database inside the data directory.
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir).join("openjobs.sqlite")
    }
}
