//! Typed response contracts for the Vault endpoints the resolver calls
//!
//! Every body is deserialized into these structs and validated here, so a
//! shape mismatch surfaces as [`Error::InvalidResponse`] with the offending
//! field named instead of a bare field-access failure further down.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::SecretPayload;
use crate::{Error, Result};

/// Request body for `POST /v1/auth/approle/login`
#[derive(Clone, Serialize)]
pub struct AppRoleLoginRequest<'a> {
    pub role_id: &'a str,
    pub secret_id: &'a str,
}

/// Reply of the approle login endpoint
#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub auth: Option<LoginAuth>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoginAuth {
    #[serde(default)]
    pub client_token: Option<String>,
}

impl LoginResponse {
    /// Extract the client token, failing if login did not produce one
    pub fn into_token(self) -> Result<String> {
        let auth = self.auth.ok_or_else(|| {
            Error::AuthenticationError("login response has no 'auth' block".to_string())
        })?;

        match auth.client_token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(Error::AuthenticationError(
                "login response has no 'auth.client_token'".to_string(),
            )),
        }
    }
}

/// Reply of `GET /v1/{mount}/metadata/{secret}`
#[derive(Clone, Debug, Deserialize)]
pub struct MetadataResponse {
    pub data: MetadataData,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MetadataData {
    pub versions: BTreeMap<String, VersionMetadata>,
}

/// Per-version metadata; only the destroyed flag matters here
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct VersionMetadata {
    #[serde(default)]
    pub destroyed: bool,
}

impl MetadataResponse {
    /// Parse the version keys into version numbers
    pub fn into_versions(self) -> Result<BTreeMap<u64, VersionMetadata>> {
        self.data
            .versions
            .into_iter()
            .map(|(key, meta)| match key.parse::<u64>() {
                Ok(version) if version > 0 => Ok((version, meta)),
                _ => Err(Error::InvalidResponse(format!(
                    "version key '{}' is not a positive integer",
                    key
                ))),
            })
            .collect()
    }
}

/// Reply of `GET /v1/{mount}/data/{secret}?version=N`
#[derive(Clone, Debug, Deserialize)]
pub struct SecretDataResponse {
    pub data: SecretDataEnvelope,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SecretDataEnvelope {
    /// Null when the version has been soft-deleted
    #[serde(default)]
    pub data: Option<IndexMap<String, serde_json::Value>>,
}

impl SecretDataResponse {
    /// Convert the inner `data.data` object into a string payload, keeping key order
    pub fn into_payload(self) -> Result<SecretPayload> {
        let data = self.data.data.ok_or_else(|| {
            Error::InvalidResponse("response has no 'data.data' object".to_string())
        })?;

        data.into_iter()
            .map(|(key, value)| {
                let value = match value {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::Bool(b) => b.to_string(),
                    _ => {
                        return Err(Error::InvalidResponse(format!(
                            "value of key '{}' is not a scalar",
                            key
                        )))
                    }
                };
                Ok((key, value))
            })
            .collect()
    }
}
