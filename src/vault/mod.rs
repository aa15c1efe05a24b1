//! Vault KV v2 secret resolution over approle authentication

pub mod client;
pub mod resolver;
pub mod response;

use indexmap::IndexMap;

pub use resolver::{
    resolve, resolve_version, resolve_version_with, select_latest_version, ResolvedSecret,
};

/// Secret key/value pairs in the order Vault returned them
pub type SecretPayload = IndexMap<String, String>;
