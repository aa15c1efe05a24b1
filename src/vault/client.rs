//! Vault HTTP client for approle login and KV v2 reads

use std::collections::BTreeMap;

use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::response::{
    AppRoleLoginRequest, LoginResponse, MetadataResponse, SecretDataResponse, VersionMetadata,
};
use super::SecretPayload;
use crate::config::VaultConfig;
use crate::{Error, Result};

const TOKEN_HEADER: &str = "X-Vault-Token";

/// Vault REST API client
#[derive(Debug, Clone)]
pub struct VaultClient {
    http: reqwest::Client,
    base_url: Url,
    kv_mount: String,
}

impl VaultClient {
    fn user_agent() -> String {
        format!("vault-deploy-tools/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Create a client for the configured Vault address
    pub fn new(config: &VaultConfig) -> Result<Self> {
        let base_url = Url::parse(&config.address).map_err(|e| {
            Error::ConfigError(format!("invalid Vault address '{}': {}", config.address, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::ConfigError(format!(
                "Vault address '{}' cannot be used as a base URL",
                config.address
            )));
        }

        let http = reqwest::Client::builder()
            .user_agent(Self::user_agent())
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            kv_mount: config.kv_mount.clone(),
        })
    }

    /// Exchange the approle credential pair for a client token
    pub async fn login(&self, role_id: &str, secret_id: &str) -> Result<String> {
        let url = self.endpoint(&["auth", "approle", "login"]);
        let request = self
            .http
            .post(url)
            .json(&AppRoleLoginRequest { role_id, secret_id });

        let response: LoginResponse = send_json(request, "approle login").await?;
        response.into_token()
    }

    /// List the versions of a secret with their metadata
    pub async fn read_metadata(
        &self,
        token: &str,
        secret: &str,
    ) -> Result<BTreeMap<u64, VersionMetadata>> {
        let url = self.kv_endpoint("metadata", secret)?;
        let request = self.http.get(url).header(TOKEN_HEADER, token);

        let response: MetadataResponse = send_json(request, "secret metadata").await?;
        response.into_versions()
    }

    /// Read the key/value payload of exactly one version of a secret
    pub async fn read_version(
        &self,
        token: &str,
        secret: &str,
        version: u64,
    ) -> Result<SecretPayload> {
        let mut url = self.kv_endpoint("data", secret)?;
        url.query_pairs_mut()
            .append_pair("version", &version.to_string());
        let request = self.http.get(url).header(TOKEN_HEADER, token);

        let response: SecretDataResponse = send_json(request, "secret data").await?;
        response.into_payload()
    }

    fn kv_endpoint(&self, kind: &str, secret: &str) -> Result<Url> {
        let secret_segments: Vec<&str> = secret.split('/').filter(|s| !s.is_empty()).collect();
        if secret_segments.is_empty() {
            return Err(Error::LookupError("secret name is empty".to_string()));
        }

        let mut segments: Vec<&str> = self
            .kv_mount
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        segments.push(kind);
        segments.extend(secret_segments);
        Ok(self.endpoint(&segments))
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL can hold path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("v1").extend(segments);
        }
        url
    }
}

/// Send a request and decode a successful JSON body
async fn send_json<T: DeserializeOwned>(request: RequestBuilder, what: &str) -> Result<T> {
    let response = request
        .send()
        .await
        .map_err(|e| Error::TransportError(format!("{} request failed: {}", what, e)))?;

    let status = response.status();
    debug!(%status, "{} responded", what);
    if !status.is_success() {
        return Err(Error::TransportError(format!(
            "{} returned HTTP {}",
            what, status
        )));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| Error::TransportError(format!("{} body could not be read: {}", what, e)))?;

    serde_json::from_slice(&body)
        .map_err(|e| Error::InvalidResponse(format!("{}: {}", what, e)))
}
