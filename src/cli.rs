//! Command-line arguments for the binaries

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::adapters::pod_builder::DEFAULT_IMAGE;

/// Output file and secret name shared by the secret export tools
#[derive(Args, Clone, Debug)]
pub struct SecretArgs {
    /// File to write to
    #[arg(short = 'o', long)]
    pub output: PathBuf,

    /// Secret name to get, relative to the KV mount
    #[arg(short = 's', long)]
    pub secret: String,
}

/// Export a Vault secret as a deployer Pod manifest
#[derive(Parser, Clone, Debug)]
#[command(name = "pod-generator", version)]
pub struct PodGeneratorArgs {
    #[command(flatten)]
    pub secret: SecretArgs,

    /// Container image for the deployer pod
    #[arg(long, default_value = DEFAULT_IMAGE)]
    pub image: String,
}

/// Export a Vault secret as a dotenv file
#[derive(Parser, Clone, Debug)]
#[command(name = "vault-fetcher", version)]
pub struct VaultFetcherArgs {
    #[command(flatten)]
    pub secret: SecretArgs,
}

/// Render k8s templates
#[derive(Parser, Clone, Debug)]
#[command(name = "k8s-manifest", version)]
pub struct ManifestArgs {
    /// Path to envs if it is needed to generate and set MD5 hash
    #[arg(short = 'e', long = "envs-path")]
    pub envs_path: Option<PathBuf>,

    /// Docker image to use. No default
    #[arg(short = 'i', long)]
    pub image: Option<String>,

    /// Template to use
    #[arg(short = 't', long, default_value = "deployment")]
    pub template: PathBuf,
}
