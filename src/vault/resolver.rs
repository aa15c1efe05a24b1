//! Secret version resolution: login, pick the newest live version, read it

use std::collections::BTreeMap;

use tracing::info;

use super::client::VaultClient;
use super::response::VersionMetadata;
use super::SecretPayload;
use crate::config::VaultConfig;
use crate::{Error, Result};

/// A secret payload together with the version it was read from
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSecret {
    pub name: String,
    pub version: u64,
    pub payload: SecretPayload,
}

/// Pick the highest version number that has not been destroyed
pub fn select_latest_version(versions: &BTreeMap<u64, VersionMetadata>) -> Result<u64> {
    versions
        .iter()
        .filter(|(_, meta)| !meta.destroyed)
        .map(|(version, _)| *version)
        .max()
        .ok_or_else(|| Error::LookupError("no non-destroyed versions available".to_string()))
}

/// Resolve the latest usable version of `secret` and return its payload
pub async fn resolve(config: &VaultConfig, secret: &str) -> Result<SecretPayload> {
    resolve_version(config, secret)
        .await
        .map(|resolved| resolved.payload)
}

/// Like [`resolve`], but also reports which version was read
pub async fn resolve_version(config: &VaultConfig, secret: &str) -> Result<ResolvedSecret> {
    resolve_version_with(config, secret, |_, _| {}).await
}

/// Like [`resolve_version`], calling `on_selected` with the secret name and
/// chosen version before the data read is attempted
pub async fn resolve_version_with<F>(
    config: &VaultConfig,
    secret: &str,
    on_selected: F,
) -> Result<ResolvedSecret>
where
    F: FnOnce(&str, u64),
{
    let client = VaultClient::new(config)?;

    let token = client.login(&config.role_id, &config.secret_id).await?;
    info!(address = %config.address, "Authenticated with approle");

    let versions = client.read_metadata(&token, secret).await?;
    let version = select_latest_version(&versions).map_err(|e| match e {
        Error::LookupError(msg) => Error::LookupError(format!("secret '{}': {}", secret, msg)),
        other => other,
    })?;

    info!(secret, version, "Fetching secret version");
    on_selected(secret, version);
    let payload = client.read_version(&token, secret, version).await?;
    info!(secret, version, keys = payload.len(), "Fetched secret");

    Ok(ResolvedSecret {
        name: secret.to_string(),
        version,
        payload,
    })
}
