//! Vault connection settings read from the process environment

use std::fmt;
use std::time::Duration;

use crate::{Error, Result};

pub const VAULT_ADDR_ENV: &str = "VAULT_ADDR";
pub const VAULT_ROLE_ID_ENV: &str = "VAULT_ROLE_ID";
pub const VAULT_SECRET_ID_ENV: &str = "VAULT_SECRET_ID";
pub const VAULT_KV_MOUNT_ENV: &str = "VAULT_KV_MOUNT";
pub const VAULT_CLIENT_TIMEOUT_ENV: &str = "VAULT_CLIENT_TIMEOUT_SECS";

const DEFAULT_KV_MOUNT: &str = "kv";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings needed to authenticate against Vault and read a KV v2 secret.
///
/// Built once at process start and handed to the resolver.
#[derive(Clone, PartialEq, Eq)]
pub struct VaultConfig {
    /// Base address without a trailing slash, e.g. `https://vault.example.com`
    pub address: String,
    pub role_id: String,
    pub secret_id: String,
    /// Mount path of the KV v2 engine
    pub kv_mount: String,
    pub timeout: Duration,
}

impl VaultConfig {
    pub fn new(address: &str, role_id: &str, secret_id: &str) -> Self {
        Self {
            address: address.trim_end_matches('/').to_string(),
            role_id: role_id.to_string(),
            secret_id: secret_id.to_string(),
            kv_mount: DEFAULT_KV_MOUNT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::ConfigError(format!("{} is not set", key)))
        };

        let address = required(VAULT_ADDR_ENV)?;
        let role_id = required(VAULT_ROLE_ID_ENV)?;
        let secret_id = required(VAULT_SECRET_ID_ENV)?;

        let mut config = Self::new(&address, &role_id, &secret_id);

        if let Some(mount) = lookup(VAULT_KV_MOUNT_ENV).filter(|v| !v.is_empty()) {
            config.kv_mount = mount.trim_matches('/').to_string();
        }

        if let Some(raw) = lookup(VAULT_CLIENT_TIMEOUT_ENV).filter(|v| !v.is_empty()) {
            let secs: u64 = raw.parse().map_err(|_| {
                Error::ConfigError(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    VAULT_CLIENT_TIMEOUT_ENV, raw
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

// Credentials stay out of debug output.
impl fmt::Debug for VaultConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultConfig")
            .field("address", &self.address)
            .field("role_id", &"<redacted>")
            .field("secret_id", &"<redacted>")
            .field("kv_mount", &self.kv_mount)
            .field("timeout", &self.timeout)
            .finish()
    }
}
