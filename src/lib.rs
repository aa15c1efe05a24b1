//! Deployment pipeline helpers
//!
//! Resolves the latest usable version of a Vault KV secret and exports it as a
//! Kubernetes Pod manifest or a dotenv file, and renders Kubernetes manifest
//! templates.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod template;
pub mod vault;

pub use error::{Error, Result};
